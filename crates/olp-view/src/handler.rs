//! Worker thread handler.
//!
//! Config reading and the bake itself run here, off the UI thread, so the
//! window stays responsive while `ociobakelut` works.

use std::path::PathBuf;
use std::sync::mpsc::{Receiver, Sender};

use olp_core::runner::BakeRunner;
use olp_core::{BakeOptions, Prescription};
use olp_ocio::ColorConfigProvider;
use tracing::{debug, info, warn};

use crate::messages::{WorkerEvent, WorkerMsg};

/// Worker thread handler.
pub struct BakeHandler {
    rx: Receiver<WorkerMsg>,
    tx: Sender<WorkerEvent>,
    provider: Box<dyn ColorConfigProvider + Send>,
    runner: Box<dyn BakeRunner + Send>,
}

impl BakeHandler {
    /// Creates a new handler.
    pub fn new(
        rx: Receiver<WorkerMsg>,
        tx: Sender<WorkerEvent>,
        provider: Box<dyn ColorConfigProvider + Send>,
        runner: Box<dyn BakeRunner + Send>,
    ) -> Self {
        Self {
            rx,
            tx,
            provider,
            runner,
        }
    }

    /// Main event loop.
    pub fn run(self) {
        while let Ok(msg) = self.rx.recv() {
            match msg {
                WorkerMsg::Close => break,
                WorkerMsg::LoadConfig(path) => self.load_config(path),
                WorkerMsg::Bake(options) => self.bake(&options),
            }
        }
        debug!("bake handler shutdown");
    }

    fn send(&self, event: WorkerEvent) {
        let _ = self.tx.send(event);
    }

    fn load_config(&self, path: PathBuf) {
        match self.provider.load(&path) {
            Ok(summary) => {
                info!(path = %path.display(), colorspaces = summary.colorspaces.len(), "config loaded");
                self.send(WorkerEvent::ConfigLoaded(summary));
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "config load failed");
                self.send(WorkerEvent::ConfigFailed(e.to_string()));
            }
        }
    }

    fn bake(&self, options: &BakeOptions) {
        if let Err(e) = options.validate() {
            self.send(WorkerEvent::Error(e.to_string()));
            return;
        }

        let prescription = Prescription::prepare(options);
        info!(filename = %prescription.filename.display(), "baking LUT");

        let event = match self.runner.run(&prescription.command, &prescription.env) {
            Ok(outcome) if outcome.is_success() => WorkerEvent::BakeFinished {
                filename: prescription.filename,
                report: prescription.report,
            },
            Ok(outcome) => WorkerEvent::BakeFailed {
                stderr: outcome.stderr,
            },
            Err(e) => WorkerEvent::Error(e.to_string()),
        };
        self.send(event);
    }
}
