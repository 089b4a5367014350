//! Constantes compartidas del tracker.

/// Versión del contrato de eventos del tracker.
pub const TRACKER_VERSION: &str = "0.1.0";

/// Confirmaciones on-chain requeridas por defecto antes de dar una
/// transacción por asentada.
pub const DEFAULT_CONFIRMATIONS: u32 = 3;

/// Retardo por defecto (ms) antes de cerrar el diálogo tras un flujo exitoso,
/// para que el usuario alcance a leer el estado final.
pub const DEFAULT_CLOSE_DELAY_MS: u64 = 2000;
