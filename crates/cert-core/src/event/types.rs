//! Tipos de evento del tracker y estructura `TrackerEvent`.
//!
//! Rol en el flujo:
//! - Cada transición del `StepTracker` emite eventos a un `EventStore`
//!   append-only.
//! - Los eventos son observabilidad (historial del diálogo, CLI, logs); la
//!   instantánea de `DialogStep` es la fuente autoritativa de estado.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eventos observables de un flujo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum TrackerEventKind {
    /// Inicio de un flujo: fija cantidad de pasos y generación. Invariante:
    /// debe ser el primer evento de un `flow_id`.
    FlowStarted { step_count: usize, generation: u64 },
    /// Un paso pasó a `Active`. No implica éxito.
    StepActivated { step_index: usize, step_id: String },
    /// Un paso quedó `Completed`.
    StepCompleted { step_index: usize, step_id: String },
    /// Un paso quedó `Failed` con su mensaje. El flujo no avanza solo
    /// (stop-on-failure); el reintento es decisión del orquestador.
    StepFailed {
        step_index: usize,
        step_id: String,
        error: String,
    },
    /// Reingreso a un paso previamente fallido (reintento explícito).
    StepRetried { step_index: usize, step_id: String },
    /// El usuario abandonó el flujo con este paso activo.
    FlowCancelled { step_index: usize, step_id: String },
    /// Cierre exitoso: el último paso quedó `Completed`.
    FlowCompleted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackerEvent {
    pub seq: u64, // asignado por el EventStore (orden de append)
    pub flow_id: Uuid,
    pub kind: TrackerEventKind,
    pub ts: DateTime<Utc>, // metadato, no afecta el estado
}
