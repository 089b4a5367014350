//! cert-core: tracker de pasos para flujos de mutación on-chain
//!
//! Modelo: una secuencia ordenada e inmutable de pasos (`StepSequence`),
//! una instantánea mutable por flujo (`Vec<DialogStep>`) gobernada por el
//! `StepTracker`, y un contrato de presentación (`DialogPresenter`) que
//! consume instantáneas sin lógica propia. Los orquestadores de negocio
//! viven en `cert-adapters`.
pub mod constants;
pub mod errors;
pub mod event;
pub mod math;
pub mod presenter;
pub mod step;
pub mod tracker;

pub use errors::FlowError;
pub use event::{EventStore, InMemoryEventStore, TrackerEvent, TrackerEventKind};
pub use math::{calculate_bigint_percentage, price_per_percent};
pub use presenter::{CollectingPresenter, DialogPresenter, LogPresenter};
pub use step::{build_step_sequence, DialogStep, Step, StepSequence, StepState};
pub use tracker::{apply_target, StepTracker, TrackerHandle};
