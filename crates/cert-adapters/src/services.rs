//! Contratos de los colaboradores externos de un flujo.
//!
//! Todos son I/O delgado: firma/envío de transacciones, endpoint de
//! submission, espera de confirmaciones e invalidación de cache. El core no
//! los conoce; los orquestadores los reciben inyectados.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use cert_core::FlowError;

/// Request de firma tipada (EIP-712-like, simplificado).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignRequest {
    pub domain: String,
    pub primary_type: String,
    pub chain_id: u64,
    pub message: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature(pub String);

/// Transacción a enviar on-chain (payload opaco para esta capa).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TxRequest {
    pub description: String,
    pub payload: Value,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxHash(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReceiptStatus {
    Success,
    Reverted,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub tx_hash: TxHash,
    pub status: ReceiptStatus,
    pub block_number: u64,
}

/// Path a revalidar tras una mutación exitosa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevalidatePath {
    Page(String),
    Layout(String),
}

/// Servicio de firma/envío. Puede rechazar (usuario declinó) o suspender
/// indefinidamente a la espera de aprobación en la wallet externa.
#[async_trait]
pub trait Signer: Send + Sync {
    async fn sign(&self, request: SignRequest) -> Result<Signature, FlowError>;
    async fn send_transaction(&self, request: TxRequest) -> Result<TxHash, FlowError>;
}

/// Endpoint de submission. Una respuesta no exitosa es fallo del paso.
#[async_trait]
pub trait SubmissionEndpoint: Send + Sync {
    async fn submit(&self, resource: &str, body: Value) -> Result<(), FlowError>;
}

/// Espera de confirmaciones on-chain (polling externo).
#[async_trait]
pub trait ConfirmationService: Send + Sync {
    async fn wait_for_receipt(&self, tx: &TxHash, confirmations: u32) -> Result<Receipt, FlowError>;
}

/// Invalidación de cache de vistas dependientes. Best-effort: los errores se
/// loguean y no afectan el resultado del flujo.
#[async_trait]
pub trait CacheInvalidator: Send + Sync {
    async fn revalidate(&self, paths: &[RevalidatePath]) -> Result<(), FlowError>;
}
