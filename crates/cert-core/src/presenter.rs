//! Contrato del presentador del diálogo.
//!
//! Puramente presentacional: consume instantáneas del tracker y no contiene
//! lógica de transición. La capa de render real (web, TUI) implementa este
//! trait fuera del core.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use crate::step::{DialogStep, StepState};

pub trait DialogPresenter: Send + Sync {
    /// Nueva instantánea disponible (tras cada transición).
    fn on_update(&self, title: &str, steps: &[DialogStep]);

    /// El flujo terminó y el diálogo puede cerrarse. En fallo no se invoca:
    /// el diálogo queda abierto para que el usuario lea el mensaje.
    fn on_close(&self) {}
}

/// Presentador basado en `log`, útil para CLI y demos.
#[derive(Default)]
pub struct LogPresenter;

impl DialogPresenter for LogPresenter {
    fn on_update(&self, title: &str, steps: &[DialogStep]) {
        for (i, s) in steps.iter().enumerate() {
            match s.state {
                StepState::Failed => {
                    log::error!("[{title}] {}/{} {} FAILED: {}",
                                i + 1,
                                steps.len(),
                                s.description,
                                s.error.as_deref().unwrap_or("unknown error"));
                }
                ref st => log::info!("[{title}] {}/{} {} {:?}", i + 1, steps.len(), s.description, st),
            }
        }
    }

    fn on_close(&self) {
        log::info!("dialog closed");
    }
}

/// Doble de prueba: acumula cada instantánea recibida.
#[derive(Default)]
pub struct CollectingPresenter {
    updates: Mutex<Vec<Vec<DialogStep>>>,
    closed: AtomicBool,
}

impl CollectingPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn updates(&self) -> Vec<Vec<DialogStep>> {
        self.updates.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn last(&self) -> Option<Vec<DialogStep>> {
        self.updates().last().cloned()
    }

    pub fn was_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }
}

impl DialogPresenter for CollectingPresenter {
    fn on_update(&self, _title: &str, steps: &[DialogStep]) {
        self.updates
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(steps.to_vec());
    }

    fn on_close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }
}
