//! Estado en tiempo de ejecución de cada paso del diálogo.

use serde::{Deserialize, Serialize};

/// Estado de un paso dentro de un flujo.
///
/// Las transiciones válidas son:
/// - `Idle` -> `Active`
/// - `Active` -> `Completed`
/// - `Active` -> `Failed`
/// - `Active` -> `Cancelled`
/// - `Failed` -> `Active` (reintento explícito del orquestador)
///
/// `Completed` y `Cancelled` son terminales. A lo sumo un paso está `Active`
/// en cada instante; tras completar el último paso, ninguno lo está.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepState {
    /// El paso aún no comenzó.
    Idle,
    /// El paso está en curso (firma pendiente, request en vuelo, etc.).
    Active,
    /// El paso terminó correctamente.
    Completed,
    /// El paso falló; el mensaje queda en `DialogStep::error`.
    Failed,
    /// El usuario abandonó el flujo mientras este paso estaba activo.
    Cancelled,
}

impl StepState {
    /// Un paso terminal no avanza automáticamente.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepState::Completed | StepState::Cancelled)
    }
}

/// Entidad en tiempo de ejecución de un paso: descriptor + estado.
///
/// El orden de la colección de `DialogStep` nunca cambia tras `begin`; sólo
/// mutan `state` y `error`, siempre mediante copias nuevas (los consumidores
/// pueden diffear instantáneas para re-render).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogStep {
    pub id: String,
    pub description: String,
    pub state: StepState,
    /// Mensaje del último fallo; se limpia al reintentar el paso.
    pub error: Option<String>,
}

impl DialogStep {
    pub fn is_failed(&self) -> bool {
        self.state == StepState::Failed
    }
}
