//! Implementaciones mock de los colaboradores, para tests, CLI y demos.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use cert_core::FlowError;

use crate::flows::FlowServices;
use crate::services::{CacheInvalidator, ConfirmationService, Receipt, ReceiptStatus, RevalidatePath,
                      SignRequest, Signature, Signer, SubmissionEndpoint, TxHash, TxRequest};

/// Firma siempre, rechaza siempre, o demora antes de responder.
pub struct MockSigner {
    decline: bool,
    delay: Duration,
}

impl MockSigner {
    pub fn approving() -> Self {
        Self { decline: false, delay: Duration::ZERO }
    }

    pub fn declining() -> Self {
        Self { decline: true, delay: Duration::ZERO }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl Signer for MockSigner {
    async fn sign(&self, request: SignRequest) -> Result<Signature, FlowError> {
        tokio::time::sleep(self.delay).await;
        if self.decline {
            return Err(FlowError::SigningRejected("user rejected signature".into()));
        }
        Ok(Signature(format!("0xsig:{}", request.primary_type)))
    }

    async fn send_transaction(&self, _request: TxRequest) -> Result<TxHash, FlowError> {
        tokio::time::sleep(self.delay).await;
        if self.decline {
            return Err(FlowError::SigningRejected("user rejected transaction".into()));
        }
        Ok(TxHash("0xabc123".into()))
    }
}

/// Registra cada submission; opcionalmente falla con un mensaje fijo.
#[derive(Default)]
pub struct MockEndpoint {
    fail_with: Option<String>,
    recorded: Mutex<Vec<(String, Value)>>,
}

impl MockEndpoint {
    pub fn ok() -> Self {
        Self::default()
    }

    pub fn failing(message: impl Into<String>) -> Self {
        Self { fail_with: Some(message.into()),
               recorded: Mutex::new(Vec::new()) }
    }

    pub fn recorded(&self) -> Vec<(String, Value)> {
        self.recorded.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl SubmissionEndpoint for MockEndpoint {
    async fn submit(&self, resource: &str, body: Value) -> Result<(), FlowError> {
        self.recorded
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push((resource.to_string(), body));
        match &self.fail_with {
            Some(msg) => Err(FlowError::Submission(msg.clone())),
            None => Ok(()),
        }
    }
}

/// Devuelve un receipt tras una demora configurable.
pub struct MockConfirmations {
    status: ReceiptStatus,
    delay: Duration,
}

impl MockConfirmations {
    pub fn success() -> Self {
        Self { status: ReceiptStatus::Success, delay: Duration::ZERO }
    }

    pub fn reverted() -> Self {
        Self { status: ReceiptStatus::Reverted, delay: Duration::ZERO }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl ConfirmationService for MockConfirmations {
    async fn wait_for_receipt(&self, tx: &TxHash, _confirmations: u32) -> Result<Receipt, FlowError> {
        tokio::time::sleep(self.delay).await;
        Ok(Receipt { tx_hash: tx.clone(),
                     status: self.status,
                     block_number: 1234 })
    }
}

/// Acumula los paths revalidados.
#[derive(Default)]
pub struct MockInvalidator {
    recorded: Mutex<Vec<RevalidatePath>>,
}

impl MockInvalidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn recorded(&self) -> Vec<RevalidatePath> {
        self.recorded.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl CacheInvalidator for MockInvalidator {
    async fn revalidate(&self, paths: &[RevalidatePath]) -> Result<(), FlowError> {
        self.recorded
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .extend_from_slice(paths);
        Ok(())
    }
}

/// Juego completo de servicios mock con comportamiento feliz.
pub fn mock_services() -> FlowServices {
    FlowServices { signer: Arc::new(MockSigner::approving()),
                   endpoint: Arc::new(MockEndpoint::ok()),
                   confirmations: Arc::new(MockConfirmations::success()),
                   invalidator: Arc::new(MockInvalidator::new()) }
}
