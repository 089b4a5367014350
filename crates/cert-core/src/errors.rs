//! Errores del core y de los orquestadores de flujo.
//!
//! Disciplina unificada: todo paso fallido queda registrado en el estado del
//! diálogo Y se propaga como `Err` al llamador. El estado visible nunca es la
//! única señal de fallo.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum FlowError {
    // Precondiciones: fallan antes de que cambie ningún estado de paso.
    #[error("wallet not connected")] MissingWallet,
    #[error("chain id not available")] MissingChainId,
    #[error("client not initialized")] ClientNotInitialized,

    // Registro / tracker
    #[error("step sequence must not be empty")] EmptySequence,
    #[error("duplicate step id: {0}")] DuplicateStepId(String),
    #[error("unknown step id: {0}")] UnknownStep(String),
    #[error("no active flow")] NoActiveFlow,
    #[error("stale generation: expected {expected}, got {got}")]
    StaleGeneration { expected: u64, got: u64 },

    // Fallos de paso en tiempo de ejecución
    #[error("flow cancelled")] Cancelled,
    #[error("signature rejected: {0}")] SigningRejected(String),
    #[error("submission failed: {0}")] Submission(String),
    #[error("transaction reverted: {0}")] Reverted(String),
    #[error("internal: {0}")] Internal(String),
}
