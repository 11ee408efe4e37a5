//! Main application with eframe/egui integration.
//!
//! Handles UI rendering and user interaction.

use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use egui::{Color32, RichText};
use olp_core::runner::ProcessRunner;
use olp_core::{sizes, LutFormat, DEFAULT_BAKE_TOOL};
use olp_ocio::YamlConfigProvider;
use tracing::{debug, info, warn};

use crate::handler::BakeHandler;
use crate::messages::{WorkerEvent, WorkerMsg};
use crate::state::{
    accepts_white_point, Destination, Preferences, PrescriptionState, Style, PREFERENCES_KEY,
};

/// Poll interval while the worker is busy.
const BUSY_REPAINT: Duration = Duration::from_millis(100);

/// Width of combos and text fields.
const COMBO_WIDTH: f32 = 320.0;

/// Main application.
pub struct PrescriptionApp {
    /// Sender for commands to worker thread.
    tx: Sender<WorkerMsg>,
    /// Receiver for results from worker thread.
    rx: Receiver<WorkerEvent>,
    /// Worker thread handle (Option for Drop).
    worker: Option<JoinHandle<()>>,

    /// Runtime state.
    state: PrescriptionState,
    /// Config path last sent to the worker.
    requested_config: String,
    /// A config load is in flight.
    loading: bool,

    /// Bake tool executable.
    bake_tool: String,
}

/// Configuration for launching the window.
#[derive(Debug, Clone)]
pub struct LaunchConfig {
    /// OCIO config path override (`--ocio` / `$OCIO`).
    pub ocio: Option<PathBuf>,
    /// Sequence override (`--seq` / `$SEQ`).
    pub sequence: Option<String>,
    /// Shot override (`--shot` / `$SHOT`).
    pub shot: Option<String>,
    /// Bake tool executable.
    pub bake_tool: String,
}

impl Default for LaunchConfig {
    fn default() -> Self {
        Self {
            ocio: None,
            sequence: None,
            shot: None,
            bake_tool: DEFAULT_BAKE_TOOL.to_string(),
        }
    }
}

impl PrescriptionApp {
    /// Creates a new application.
    pub fn new(cc: &eframe::CreationContext<'_>, config: LaunchConfig) -> Self {
        // Create bidirectional channels
        let (tx_to_worker, rx_in_worker) = channel();
        let (tx_to_ui, rx_from_worker) = channel();

        let worker = thread::spawn(move || {
            let handler = BakeHandler::new(
                rx_in_worker,
                tx_to_ui,
                Box::new(YamlConfigProvider),
                Box::new(ProcessRunner),
            );
            handler.run();
        });

        // Load persisted settings
        let prefs: Preferences = cc
            .storage
            .and_then(|s| eframe::get_value(s, PREFERENCES_KEY))
            .unwrap_or_default();

        let mut state = PrescriptionState::from_preferences(&prefs);
        if let Some(ocio) = config.ocio {
            state.config_path = ocio.display().to_string();
        }
        if let Some(seq) = config.sequence {
            state.sequence = seq;
        }
        if let Some(shot) = config.shot {
            state.shot = shot;
        }
        cc.egui_ctx.set_theme(state.style.theme());

        let mut app = Self {
            tx: tx_to_worker,
            rx: rx_from_worker,
            worker: Some(worker),
            state,
            requested_config: String::new(),
            loading: false,
            bake_tool: config.bake_tool,
        };

        if !app.state.config_path.is_empty() {
            app.request_config();
        }
        app
    }

    fn send(&self, msg: WorkerMsg) {
        let _ = self.tx.send(msg);
    }

    /// Asks the worker to read the current config path.
    fn request_config(&mut self) {
        self.requested_config = self.state.config_path.clone();
        self.loading = true;
        debug!(path = %self.requested_config, "requesting config");
        self.send(WorkerMsg::LoadConfig(PathBuf::from(&self.requested_config)));
    }

    fn browse_config(&mut self) {
        if let Some(path) = rfd::FileDialog::new()
            .set_title("Select OCIO Configuration")
            .add_filter("OCIO config", &["ocio"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            self.state.config_path = path.display().to_string();
            self.request_config();
        }
    }

    fn browse_output_dir(&mut self) {
        if let Some(dir) = rfd::FileDialog::new()
            .set_title("Select Output Directory")
            .pick_folder()
        {
            self.state.output_dir = dir.display().to_string();
        }
    }

    fn bake(&mut self) {
        match self.state.to_options(&self.bake_tool) {
            Ok(options) => {
                self.state.baking = true;
                self.state.result = "Baking...".into();
                self.state.log.clear();
                self.send(WorkerMsg::Bake(Box::new(options)));
            }
            Err(e) => self.show_error(e.to_string()),
        }
    }

    fn show_error(&mut self, text: String) {
        self.state.result = "Error".into();
        self.state.log = text;
    }

    fn set_style(&mut self, ctx: &egui::Context, style: Style) {
        self.state.style = style;
        ctx.set_theme(style.theme());
    }

    fn clear_settings(&mut self, ctx: &egui::Context) {
        info!("clearing settings");
        self.state.clear();
        self.requested_config.clear();
        ctx.set_theme(self.state.style.theme());
    }

    /// Process all pending events from worker. Returns true if any events were processed.
    fn process_events(&mut self) -> bool {
        let mut had_events = false;
        while let Ok(event) = self.rx.try_recv() {
            had_events = true;
            match event {
                WorkerEvent::ConfigLoaded(summary) => {
                    self.loading = false;
                    self.state.on_config_loaded(summary);
                }
                WorkerEvent::ConfigFailed(msg) => {
                    self.loading = false;
                    warn!("{msg}");
                    self.show_error(msg);
                }
                WorkerEvent::BakeFinished { filename, report } => {
                    self.state.baking = false;
                    self.state.result = filename.display().to_string();
                    self.state.log = report;
                }
                WorkerEvent::BakeFailed { stderr } => {
                    self.state.baking = false;
                    self.show_error(stderr);
                }
                WorkerEvent::Error(msg) => {
                    self.state.baking = false;
                    self.show_error(msg);
                }
            }
        }
        had_events
    }

    /// Draw menu bar.
    fn draw_menu(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            egui::menu::bar(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui.button("Load Config...").clicked() {
                        ui.close_menu();
                        self.browse_config();
                    }
                    if ui.button("Quit").clicked() {
                        ui.close_menu();
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });
                ui.menu_button("Style", |ui| {
                    if ui.button("Dark").clicked() {
                        ui.close_menu();
                        self.set_style(ctx, Style::Dark);
                    }
                    if ui.button("System").clicked() {
                        ui.close_menu();
                        self.set_style(ctx, Style::System);
                    }
                });
                ui.menu_button("Settings", |ui| {
                    if ui.button("Clear").clicked() {
                        ui.close_menu();
                        self.clear_settings(ctx);
                    }
                });
            });
        });
    }

    /// Draw bottom result panel.
    fn draw_result(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("result")
            .resizable(true)
            .min_height(140.0)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label("Result:");
                    let text = RichText::new(&self.state.result).monospace();
                    if self.state.result == "Error" {
                        ui.label(text.color(Color32::RED));
                    } else {
                        ui.label(text);
                    }
                });
                egui::ScrollArea::vertical().show(ui, |ui| {
                    ui.add(
                        egui::TextEdit::multiline(&mut self.state.log.as_str())
                            .font(egui::TextStyle::Monospace)
                            .desired_width(f32::INFINITY),
                    );
                });
            });
    }

    /// Draw the option form.
    fn draw_form(&mut self, ctx: &egui::Context) {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                self.draw_ocio_section(ui);
                ui.add_space(6.0);
                self.draw_colorspace_section(ui);
                ui.add_space(6.0);
                self.draw_baking_section(ui);
                ui.add_space(6.0);
                self.draw_icc_section(ui);
                ui.add_space(6.0);
                self.draw_output_section(ui);
                ui.add_space(10.0);

                let button = egui::Button::new(RichText::new("Bake LUT").strong());
                if ui
                    .add_enabled(self.state.can_bake(), button)
                    .on_disabled_hover_text("Pick a destination and an output directory")
                    .clicked()
                {
                    self.bake();
                }
            });
        });
    }

    fn draw_ocio_section(&mut self, ui: &mut egui::Ui) {
        ui.group(|ui| {
            ui.heading("OCIO");
            egui::Grid::new("ocio_grid").num_columns(2).show(ui, |ui| {
                ui.label("Config:");
                ui.horizontal(|ui| {
                    let edit = ui.add(
                        egui::TextEdit::singleline(&mut self.state.config_path)
                            .desired_width(COMBO_WIDTH),
                    );
                    if edit.lost_focus() && self.state.config_path != self.requested_config {
                        self.request_config();
                    }
                    if ui.button("Browse...").clicked() {
                        self.browse_config();
                    }
                    if self.loading {
                        ui.spinner();
                    }
                });
                ui.end_row();

                ui.label("SEQ:");
                ui.text_edit_singleline(&mut self.state.sequence);
                ui.end_row();

                ui.label("SHOT:");
                ui.text_edit_singleline(&mut self.state.shot);
                ui.end_row();
            });
        });
    }

    fn draw_colorspace_section(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        ui.group(|ui| {
            ui.heading("Colour Spaces");
            egui::Grid::new("cs_grid").num_columns(2).show(ui, |ui| {
                ui.label("Input:");
                combo(ui, "input_cs", &mut state.input_space, &state.colorspaces, true);
                ui.end_row();

                ui.checkbox(&mut state.shaper_space.enabled, "Shaper:");
                let enabled = state.shaper_space.enabled;
                combo(ui, "shaper_cs", &mut state.shaper_space.value, &state.colorspaces, enabled);
                ui.end_row();

                ui.radio_value(&mut state.destination, Some(Destination::OutputSpace), "Output:");
                let enabled = state.destination == Some(Destination::OutputSpace);
                combo(ui, "output_cs", &mut state.output_space, &state.colorspaces, enabled);
                ui.end_row();

                ui.radio_value(&mut state.destination, Some(Destination::Looks), "Looks:");
                let enabled = state.destination == Some(Destination::Looks);
                combo(ui, "looks", &mut state.look, &state.looks, enabled);
                ui.end_row();
            });
        });
    }

    fn draw_baking_section(&mut self, ui: &mut egui::Ui) {
        let state = &mut self.state;
        let labels: Vec<String> = LutFormat::all().iter().map(LutFormat::label).collect();
        let sizes = sizes();

        ui.group(|ui| {
            ui.heading("Baking");
            egui::Grid::new("bake_grid").num_columns(2).show(ui, |ui| {
                ui.label("LUT format:");
                combo(ui, "lut_format", &mut state.format_label, &labels, true);
                ui.end_row();

                ui.checkbox(&mut state.cube_size.enabled, "Cube size:");
                let enabled = state.cube_size.enabled;
                combo(ui, "cube_size", &mut state.cube_size.value, &sizes, enabled);
                ui.end_row();

                ui.checkbox(&mut state.shaper_size.enabled, "Shaper size:");
                let enabled = state.shaper_size.enabled;
                combo(ui, "shaper_size", &mut state.shaper_size.value, &sizes, enabled);
                ui.end_row();
            });
        });
    }

    fn draw_icc_section(&mut self, ui: &mut egui::Ui) {
        let icc = self.state.is_icc();
        let state = &mut self.state;

        ui.group(|ui| {
            ui.add_enabled_ui(icc, |ui| {
                ui.heading("ICC");
                egui::Grid::new("icc_grid").num_columns(2).show(ui, |ui| {
                    ui.checkbox(&mut state.icc_white_point.enabled, "White point:");
                    let previous = state.icc_white_point.value.clone();
                    let edit = ui.add_enabled(
                        state.icc_white_point.enabled,
                        egui::TextEdit::singleline(&mut state.icc_white_point.value)
                            .hint_text("6500")
                            .desired_width(80.0),
                    );
                    if edit.changed() && !accepts_white_point(&state.icc_white_point.value) {
                        state.icc_white_point.value = previous;
                    }
                    ui.end_row();

                    ui.checkbox(&mut state.icc_displays.enabled, "Display:");
                    let enabled = state.icc_displays.enabled;
                    combo(ui, "icc_display", &mut state.icc_displays.value, &state.displays, enabled);
                    ui.end_row();

                    ui.checkbox(&mut state.icc_description.enabled, "Description:");
                    ui.add_enabled(
                        state.icc_description.enabled,
                        egui::TextEdit::singleline(&mut state.icc_description.value)
                            .desired_width(COMBO_WIDTH),
                    );
                    ui.end_row();

                    ui.checkbox(&mut state.icc_copyright.enabled, "Copyright:");
                    ui.add_enabled(
                        state.icc_copyright.enabled,
                        egui::TextEdit::singleline(&mut state.icc_copyright.value)
                            .desired_width(COMBO_WIDTH),
                    );
                    ui.end_row();
                });
            });
        });
    }

    fn draw_output_section(&mut self, ui: &mut egui::Ui) {
        let mut browse = false;
        let state = &mut self.state;

        ui.group(|ui| {
            ui.heading("Output");
            egui::Grid::new("output_grid").num_columns(2).show(ui, |ui| {
                ui.label("Directory:");
                ui.horizontal(|ui| {
                    ui.add(
                        egui::TextEdit::singleline(&mut state.output_dir)
                            .desired_width(COMBO_WIDTH),
                    );
                    browse = ui.button("Browse...").clicked();
                });
                ui.end_row();

                ui.checkbox(&mut state.override_filename.enabled, "Override name:");
                ui.add_enabled(
                    state.override_filename.enabled,
                    egui::TextEdit::singleline(&mut state.override_filename.value)
                        .desired_width(COMBO_WIDTH),
                );
                ui.end_row();
            });
        });

        if browse {
            self.browse_output_dir();
        }
    }
}

/// Combo box over `items`, greyed out when `enabled` is false.
fn combo(ui: &mut egui::Ui, id: &str, value: &mut String, items: &[String], enabled: bool) {
    ui.add_enabled_ui(enabled, |ui| {
        egui::ComboBox::from_id_salt(id)
            .width(COMBO_WIDTH)
            .selected_text(value.as_str())
            .show_ui(ui, |ui| {
                for item in items {
                    ui.selectable_value(value, item.clone(), item);
                }
            });
    });
}

impl eframe::App for PrescriptionApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let had_events = self.process_events();

        // Draw UI
        self.draw_menu(ctx);
        self.draw_result(ctx);
        self.draw_form(ctx);

        if had_events {
            ctx.request_repaint();
        } else if self.state.baking || self.loading {
            ctx.request_repaint_after(BUSY_REPAINT);
        }
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        let prefs = self.state.to_preferences();
        eframe::set_value(storage, PREFERENCES_KEY, &prefs);
    }
}

impl Drop for PrescriptionApp {
    fn drop(&mut self) {
        // Signal worker to stop
        let _ = self.tx.send(WorkerMsg::Close);

        // Waits for a running bake to finish
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}
