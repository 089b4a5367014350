//! Handle compartible del tracker.
//!
//! Proporciona una API ergonómica y clonable para que los orquestadores
//! muten el estado del diálogo sin conocer el almacenamiento de eventos.
//! El handle se pasa por parámetro (inyección explícita); no hay singleton
//! global.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::errors::FlowError;
use crate::event::{InMemoryEventStore, TrackerEvent};
use crate::step::{DialogStep, StepSequence};
use crate::tracker::StepTracker;

#[derive(Clone)]
pub struct TrackerHandle {
    inner: Arc<Mutex<StepTracker<InMemoryEventStore>>>,
}

impl TrackerHandle {
    pub fn new() -> Self {
        Self { inner: Arc::new(Mutex::new(StepTracker::new())) }
    }

    fn lock(&self) -> MutexGuard<'_, StepTracker<InMemoryEventStore>> {
        // un panic con el lock tomado no deja el tracker inutilizable
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Inicia un flujo y devuelve su generación.
    pub fn begin(&self, sequence: &StepSequence) -> u64 {
        self.lock().begin(sequence)
    }

    /// Descarta el flujo en curso e invalida su generación.
    pub fn reset(&self) {
        self.lock().reset()
    }

    pub fn set_step(&self, generation: u64, id: &str) -> Result<Vec<DialogStep>, FlowError> {
        self.lock().set_step(generation, id).map(|s| s.to_vec())
    }

    pub fn set_step_error(&self, generation: u64, id: &str, message: &str) -> Result<Vec<DialogStep>, FlowError> {
        self.lock().set_step_error(generation, id, message).map(|s| s.to_vec())
    }

    pub fn cancel_active(&self, generation: u64) -> Result<Vec<DialogStep>, FlowError> {
        self.lock().cancel_active(generation).map(|s| s.to_vec())
    }

    /// Instantánea actual para render/diff.
    pub fn snapshot(&self) -> Vec<DialogStep> {
        self.lock().steps().to_vec()
    }

    pub fn is_completed(&self) -> bool {
        self.lock().is_completed()
    }

    pub fn events(&self) -> Vec<TrackerEvent> {
        self.lock().events()
    }
}

impl Default for TrackerHandle {
    fn default() -> Self {
        Self::new()
    }
}
