//! Message types for UI <-> Worker communication.
//!
//! The UI sends requests, the worker answers with events. Requests are
//! handled strictly in order, so at most one bake runs at a time.

use std::path::PathBuf;

use olp_core::BakeOptions;
use olp_ocio::ConfigSummary;

/// Messages from UI thread to worker thread.
#[derive(Debug, Clone)]
pub enum WorkerMsg {
    /// Read an OCIO config.
    LoadConfig(PathBuf),

    /// Prescribe and run one bake.
    Bake(Box<BakeOptions>),

    /// Stop the worker.
    Close,
}

/// Events from worker thread to UI thread.
#[derive(Debug)]
pub enum WorkerEvent {
    /// Config read successfully.
    ConfigLoaded(ConfigSummary),

    /// Config could not be read.
    ConfigFailed(String),

    /// Bake tool exited with status zero.
    BakeFinished {
        /// Written LUT.
        filename: PathBuf,
        /// Prescription report.
        report: String,
    },

    /// Bake tool exited with an error status.
    BakeFailed {
        /// Captured standard error.
        stderr: String,
    },

    /// Bake could not be attempted.
    Error(String),
}
