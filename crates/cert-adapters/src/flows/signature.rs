//! Cancelación de una signature request pendiente en una Safe multisig.

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use cert_core::{DialogPresenter, FlowError, TrackerHandle};

use crate::config::FlowConfig;
use crate::context::WalletContext;
use crate::flows::signed::{run_signed_submission, SignedSubmissionRequest};
use crate::flows::FlowServices;
use crate::services::{RevalidatePath, Signature};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelSignatureRequestParams {
    pub safe_address: String,
    pub message_hash: String,
}

pub struct CancelSignatureRequestFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl CancelSignatureRequestFlow {
    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     params: CancelSignatureRequestParams)
                     -> Result<Signature, FlowError> {
        let payload = serde_json::to_value(&params).map_err(|e| FlowError::Internal(e.to_string()))?;
        let safe = params.safe_address.clone();
        run_signed_submission(&self.services,
                              &self.config,
                              wallet,
                              tracker,
                              presenter,
                              cancel,
                              SignedSubmissionRequest { title: "Cancel signature request",
                                                     primary_type: "CancelSignatureRequest",
                                                     resource: "signature-requests/cancel".into(),
                                                     payload,
                                                     revalidate: vec![RevalidatePath::Page(format!("/safe/{safe}"))] }).await
    }
}
