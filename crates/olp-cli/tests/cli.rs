//! End-to-end runs of the `olp` binary.

use std::process::{Command, Output};

fn olp(args: &[&str]) -> Output {
    olp_with_env(args, &[])
}

/// Runs `olp` with only the given context variables set.
fn olp_with_env(args: &[&str], env: &[(&str, &str)]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_olp"))
        .args(args)
        .env_remove("RUST_LOG")
        .env_remove("OCIO")
        .env_remove("SEQ")
        .env_remove("SHOT")
        .envs(env.iter().copied())
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn formats_lists_catalogue() {
    let out = olp(&["formats"]);
    assert!(out.status.success());
    let text = stdout(&out);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.first(), Some(&"cinespace (.csp)"));
    assert!(lines.contains(&"icc (.icc)"));
}

#[cfg(unix)]
#[test]
fn prescribe_prints_report() {
    let out = olp(&[
        "prescribe", "--ocio", "/show/config.ocio", "-i", "ACEScg", "--output-space", "sRGB",
        "-o", "/tmp/luts",
    ]);
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("OCIO: /show/config.ocio\n"));
    assert!(text.contains("SEQ: N/A\n"));
    assert!(text.contains("LUT Location: /tmp/luts/ACEScg_to_sRGB.csp\n"));
}

#[cfg(unix)]
#[test]
fn prescribe_json() {
    let out = olp(&[
        "prescribe", "--json", "--ocio", "c.ocio", "-i", "in", "--look", "Fix", "-o", "/tmp",
        "-f", "flame",
    ]);
    assert!(out.status.success());

    let value: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(value["filename"], "/tmp/in_to_Fix.3dl");
    let command = value["command"].as_array().unwrap();
    assert_eq!(command[0], "ociobakelut");
    assert_eq!(command.last().unwrap(), "/tmp/in_to_Fix.3dl");
}

#[cfg(unix)]
#[test]
fn context_falls_back_to_environment() {
    let out = olp_with_env(
        &["prescribe", "-i", "ACEScg", "--output-space", "sRGB", "-o", "/tmp/luts"],
        &[("OCIO", "/show/env.ocio"), ("SEQ", "sq01"), ("SHOT", "sh010")],
    );
    assert!(out.status.success());
    let text = stdout(&out);
    assert!(text.contains("OCIO: /show/env.ocio\n"));
    assert!(text.contains("SEQ: sq01\n"));
    assert!(text.contains("LUT Location: /tmp/luts/seq-sq01_shot-sh010_ACEScg_to_sRGB.csp\n"));
}

#[test]
fn missing_destination_fails() {
    let out = olp(&["prescribe", "--ocio", "c.ocio", "-i", "in", "-o", "/tmp"]);
    assert!(!out.status.success());
}

#[cfg(unix)]
#[test]
fn bake_prints_lut_path() {
    let out = olp(&[
        "bake", "--bake-tool", "true", "--ocio", "c.ocio", "-i", "in", "--output-space", "out",
        "-o", "/tmp",
    ]);
    assert!(out.status.success());
    assert_eq!(stdout(&out).trim(), "/tmp/in_to_out.csp");
}

#[cfg(unix)]
#[test]
fn failed_bake_exits_nonzero() {
    let out = olp(&[
        "bake", "--bake-tool", "false", "--ocio", "c.ocio", "-i", "in", "--output-space", "out",
        "-o", "/tmp",
    ]);
    assert!(!out.status.success());
    assert!(stdout(&out).is_empty());
}

#[cfg(unix)]
#[test]
fn bake_tool_resolves_the_given_shot() {
    use std::os::unix::fs::PermissionsExt;

    let dir = std::path::Path::new(env!("CARGO_TARGET_TMPDIR")).join("olp-shot-context");
    std::fs::create_dir_all(&dir).unwrap();
    let tool = dir.join("fake-bakelut");
    std::fs::write(
        &tool,
        "#!/bin/sh\nfor lut; do :; done\nprintf 'SEQ=%s SHOT=%s' \"$SEQ\" \"$SHOT\" > \"$lut\"\n",
    )
    .unwrap();
    std::fs::set_permissions(&tool, std::fs::Permissions::from_mode(0o755)).unwrap();

    let out = olp(&[
        "bake", "--bake-tool", tool.to_str().unwrap(), "--ocio", "c.ocio", "--seq", "seqB",
        "--shot", "shotB", "-i", "in", "--output-space", "out", "-o", dir.to_str().unwrap(),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let lut = stdout(&out).trim().to_string();
    assert!(lut.ends_with("seq-seqB_shot-shotB_in_to_out.csp"));
    assert_eq!(std::fs::read_to_string(lut).unwrap(), "SEQ=seqB SHOT=shotB");
}
