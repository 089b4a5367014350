//! Núcleo del tracker de pasos.
//!
//! Responsable de mantener la instantánea de `DialogStep` de un flujo,
//! aplicar la función de transición y emitir eventos de observabilidad.
//! El guard de generación invalida actualizaciones de flujos obsoletos
//! (diálogo cerrado, flujo reiniciado) sin necesidad de locks adicionales.

use uuid::Uuid;

use crate::errors::FlowError;
use crate::event::{EventStore, InMemoryEventStore, TrackerEvent, TrackerEventKind};
use crate::step::{DialogStep, StepSequence, StepState};

/// Función de transición pura sobre una instantánea ordenada.
///
/// Dado el índice del paso objetivo:
/// 1. todo paso estrictamente anterior queda `Completed`;
/// 2. el objetivo queda `Failed` si hay mensaje de error, si no `Completed`
///    cuando es el último de la secuencia, si no `Active`;
/// 3. los pasos posteriores conservan su estado previo.
///
/// Produce una colección nueva; nunca muta la entrada.
pub fn apply_target(steps: &[DialogStep], target: usize, error: Option<&str>) -> Vec<DialogStep> {
    let last = steps.len().saturating_sub(1);
    steps.iter()
         .enumerate()
         .map(|(i, s)| {
             let mut next = s.clone();
             if i < target {
                 next.state = StepState::Completed;
                 next.error = None;
             } else if i == target {
                 match error {
                     Some(msg) => {
                         next.state = StepState::Failed;
                         next.error = Some(msg.to_string());
                     }
                     None if i == last => {
                         next.state = StepState::Completed;
                         next.error = None;
                     }
                     None => {
                         next.state = StepState::Active;
                         next.error = None;
                     }
                 }
             }
             next
         })
         .collect()
}

/// Tracker de estado de pasos de un flujo.
///
/// Posee la colección de `DialogStep` de exactamente un flujo a la vez; se
/// inyecta explícitamente en cada orquestador (nada de contexto ambiente).
pub struct StepTracker<S: EventStore = InMemoryEventStore> {
    sequence: Option<StepSequence>,
    steps: Vec<DialogStep>,
    generation: u64,
    flow_id: Option<Uuid>,
    events: S,
}

impl StepTracker<InMemoryEventStore> {
    pub fn new() -> Self {
        Self::new_with_store(InMemoryEventStore::default())
    }
}

impl Default for StepTracker<InMemoryEventStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventStore> StepTracker<S> {
    pub fn new_with_store(events: S) -> Self {
        Self { sequence: None,
               steps: Vec::new(),
               generation: 0,
               flow_id: None,
               events }
    }

    /// Inicia un flujo: todos los pasos en `Idle`, generación nueva.
    ///
    /// La generación devuelta debe acompañar cada transición posterior; una
    /// generación obsoleta (flujo reiniciado o diálogo cerrado entre medio)
    /// produce `StaleGeneration` y no toca el estado.
    pub fn begin(&mut self, sequence: &StepSequence) -> u64 {
        self.generation += 1;
        let flow_id = Uuid::new_v4();
        self.flow_id = Some(flow_id);
        self.steps = sequence.initial_dialog();
        self.sequence = Some(sequence.clone());
        self.events.append_kind(flow_id,
                                TrackerEventKind::FlowStarted { step_count: sequence.len(),
                                                                generation: self.generation });
        self.generation
    }

    /// Descarta el flujo en curso (diálogo cerrado). Invalida la generación
    /// para que actualizaciones en vuelo no reaparezcan sobre el estado nuevo.
    pub fn reset(&mut self) {
        self.generation += 1;
        if let Some(seq) = &self.sequence {
            self.steps = seq.initial_dialog();
        }
    }

    /// Avanza el paso `id` a `Active` (o `Completed` si es el último),
    /// marcando todos los anteriores como `Completed`.
    pub fn set_step(&mut self, generation: u64, id: &str) -> Result<&[DialogStep], FlowError> {
        self.transition(generation, id, None)
    }

    /// Marca el paso `id` como `Failed` con el mensaje dado; los anteriores
    /// quedan `Completed`, los posteriores no cambian.
    pub fn set_step_error(&mut self, generation: u64, id: &str, message: &str) -> Result<&[DialogStep], FlowError> {
        self.transition(generation, id, Some(message))
    }

    fn transition(&mut self, generation: u64, id: &str, error: Option<&str>) -> Result<&[DialogStep], FlowError> {
        self.check_generation(generation)?;
        let sequence = self.sequence.as_ref().ok_or(FlowError::NoActiveFlow)?;
        let target = sequence.index_of(id)
                             .ok_or_else(|| FlowError::UnknownStep(id.to_string()))?;
        let last = sequence.len() - 1;
        let retry = self.steps[target].is_failed() && error.is_none();

        self.steps = apply_target(&self.steps, target, error);

        if let Some(flow_id) = self.flow_id {
            let kind = match error {
                Some(msg) => TrackerEventKind::StepFailed { step_index: target,
                                                            step_id: id.to_string(),
                                                            error: msg.to_string() },
                None if retry => TrackerEventKind::StepRetried { step_index: target,
                                                                 step_id: id.to_string() },
                None if target == last => TrackerEventKind::StepCompleted { step_index: target,
                                                                            step_id: id.to_string() },
                None => TrackerEventKind::StepActivated { step_index: target,
                                                          step_id: id.to_string() },
            };
            self.events.append_kind(flow_id, kind);
            if error.is_none() && target == last {
                self.events.append_kind(flow_id, TrackerEventKind::FlowCompleted);
            }
        }
        Ok(&self.steps)
    }

    /// Marca el paso activo como `Cancelled` (abandono del usuario). Si no
    /// hay paso activo no hace nada: cancelar un flujo ya terminado es
    /// inocuo.
    pub fn cancel_active(&mut self, generation: u64) -> Result<&[DialogStep], FlowError> {
        self.check_generation(generation)?;
        if self.sequence.is_none() {
            return Err(FlowError::NoActiveFlow);
        }
        if let Some(idx) = self.active_index() {
            let mut steps = self.steps.clone();
            steps[idx].state = StepState::Cancelled;
            self.steps = steps;
            if let Some(flow_id) = self.flow_id {
                let step_id = self.steps[idx].id.clone();
                self.events.append_kind(flow_id,
                                        TrackerEventKind::FlowCancelled { step_index: idx, step_id });
            }
        }
        Ok(&self.steps)
    }

    fn check_generation(&self, generation: u64) -> Result<(), FlowError> {
        if generation != self.generation {
            return Err(FlowError::StaleGeneration { expected: self.generation,
                                                    got: generation });
        }
        Ok(())
    }

    /// Instantánea actual (orden estable desde `begin`).
    pub fn steps(&self) -> &[DialogStep] {
        &self.steps
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn flow_id(&self) -> Option<Uuid> {
        self.flow_id
    }

    pub fn active_index(&self) -> Option<usize> {
        self.steps.iter().position(|s| s.state == StepState::Active)
    }

    /// El flujo terminó bien: todos los pasos `Completed`.
    pub fn is_completed(&self) -> bool {
        !self.steps.is_empty() && self.steps.iter().all(|s| s.state == StepState::Completed)
    }

    /// Eventos del flujo en curso (orden de append).
    pub fn events(&self) -> Vec<TrackerEvent> {
        self.flow_id.map(|fid| self.events.list(fid)).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::build_step_sequence;

    fn dialog(n: usize) -> Vec<DialogStep> {
        (0..n).map(|i| DialogStep { id: format!("s{i}"),
                                    description: format!("step {i}"),
                                    state: StepState::Idle,
                                    error: None })
              .collect()
    }

    #[test]
    fn apply_target_marks_predecessors_completed() {
        let out = apply_target(&dialog(4), 2, None);
        assert_eq!(out[0].state, StepState::Completed);
        assert_eq!(out[1].state, StepState::Completed);
        assert_eq!(out[2].state, StepState::Active);
        assert_eq!(out[3].state, StepState::Idle);
    }

    #[test]
    fn apply_target_last_step_completes() {
        let out = apply_target(&dialog(3), 2, None);
        assert!(out.iter().all(|s| s.state == StepState::Completed));
    }

    #[test]
    fn apply_target_error_beats_last_step_rule() {
        // un fallo en el último paso debe ser visible, no quedar "Completed"
        let out = apply_target(&dialog(2), 1, Some("boom"));
        assert_eq!(out[1].state, StepState::Failed);
        assert_eq!(out[1].error.as_deref(), Some("boom"));
    }

    #[test]
    fn apply_target_does_not_mutate_input() {
        let input = dialog(3);
        let _ = apply_target(&input, 1, None);
        assert!(input.iter().all(|s| s.state == StepState::Idle));
    }

    #[test]
    fn stale_generation_is_rejected_and_ignored() {
        let seq = build_step_sequence(&[("a", "A"), ("b", "B")]).unwrap();
        let mut tracker = StepTracker::new();
        let old_gen = tracker.begin(&seq);
        let new_gen = tracker.begin(&seq);

        let err = tracker.set_step(old_gen, "a").unwrap_err();
        assert!(matches!(err, FlowError::StaleGeneration { .. }));
        assert_eq!(tracker.steps()[0].state, StepState::Idle, "stale update must not touch state");

        tracker.set_step(new_gen, "a").unwrap();
        assert_eq!(tracker.steps()[0].state, StepState::Active);
    }

    #[test]
    fn unknown_step_is_an_error_not_a_silent_noop() {
        let seq = build_step_sequence(&[("a", "A")]).unwrap();
        let mut tracker = StepTracker::new();
        let gen = tracker.begin(&seq);
        assert_eq!(tracker.set_step(gen, "nope").unwrap_err(),
                   FlowError::UnknownStep("nope".into()));
    }
}
