//! Descriptores estáticos de pasos y la secuencia validada de un flujo.

use serde::{Deserialize, Serialize};

use crate::errors::FlowError;
use crate::step::{DialogStep, StepState};

/// Descriptor inmutable de un paso. El `id` es estable y único dentro del
/// flujo; la `description` es el texto visible en el diálogo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub id: String,
    pub description: String,
}

impl Step {
    pub fn new(id: impl Into<String>, description: impl Into<String>) -> Self {
        Self { id: id.into(),
               description: description.into() }
    }
}

/// Secuencia ordenada y validada de pasos. El orden declarado define el único
/// orden de transición permitido.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepSequence {
    steps: Vec<Step>,
}

impl StepSequence {
    /// Valida que la secuencia no esté vacía y que los ids sean únicos.
    pub fn new(steps: Vec<Step>) -> Result<Self, FlowError> {
        if steps.is_empty() {
            return Err(FlowError::EmptySequence);
        }
        for (i, s) in steps.iter().enumerate() {
            if steps[..i].iter().any(|p| p.id == s.id) {
                return Err(FlowError::DuplicateStepId(s.id.clone()));
            }
        }
        Ok(Self { steps })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.steps.iter().position(|s| s.id == id)
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn last_id(&self) -> &str {
        // la validación garantiza al menos un paso
        &self.steps[self.steps.len() - 1].id
    }

    /// Instantánea inicial: todos los pasos en `Idle`.
    pub fn initial_dialog(&self) -> Vec<DialogStep> {
        self.steps
            .iter()
            .map(|s| DialogStep { id: s.id.clone(),
                                  description: s.description.clone(),
                                  state: StepState::Idle,
                                  error: None })
            .collect()
    }
}

/// Builder compacto: recibe pares `(id, descripción)` en orden.
pub fn build_step_sequence(pairs: &[(&str, &str)]) -> Result<StepSequence, FlowError> {
    StepSequence::new(pairs.iter().map(|(id, d)| Step::new(*id, *d)).collect())
}
