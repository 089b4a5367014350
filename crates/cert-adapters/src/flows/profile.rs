//! Actualización del perfil de usuario (firmada, sin transacción on-chain).

use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use cert_core::{DialogPresenter, FlowError, TrackerHandle};

use crate::config::FlowConfig;
use crate::context::WalletContext;
use crate::flows::signed::{run_signed_submission, SignedSubmissionRequest};
use crate::flows::FlowServices;
use crate::services::{RevalidatePath, Signature};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileParams {
    pub display_name: String,
    pub avatar: Option<String>,
}

pub struct UpdateProfileFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl UpdateProfileFlow {
    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     params: ProfileParams)
                     -> Result<Signature, FlowError> {
        let connected = wallet.ensure()?;
        let payload = serde_json::to_value(&params).map_err(|e| FlowError::Internal(e.to_string()))?;
        run_signed_submission(&self.services,
                              &self.config,
                              wallet,
                              tracker,
                              presenter,
                              cancel,
                              SignedSubmissionRequest { title: "Update profile",
                                                     primary_type: "UpdateUserProfile",
                                                     resource: format!("users/{}", connected.address),
                                                     payload,
                                                     revalidate: vec![RevalidatePath::Page(format!("/profile/{}",
                                                                                                   connected.address))] }).await
    }
}
