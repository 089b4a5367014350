//! Flujos de blueprints: creación, borrado y encolado de mint.
//!
//! Un blueprint es un borrador pre-mint reclamable más tarde; las tres
//! mutaciones comparten el esqueleto firma → submission.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use cert_core::{DialogPresenter, FlowError, TrackerHandle};

use crate::config::FlowConfig;
use crate::context::WalletContext;
use crate::flows::signed::{run_signed_submission, SignedSubmissionRequest};
use crate::flows::FlowServices;
use crate::services::{RevalidatePath, Signature};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlueprintParams {
    pub title: String,
    pub recipient: String,
    pub form_values: serde_json::Value,
}

pub struct CreateBlueprintFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl CreateBlueprintFlow {
    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     params: BlueprintParams)
                     -> Result<Signature, FlowError> {
        if params.recipient.trim().is_empty() {
            return Err(FlowError::Internal("blueprint recipient must not be empty".into()));
        }
        let payload = serde_json::to_value(&params).map_err(|e| FlowError::Internal(e.to_string()))?;
        run_signed_submission(&self.services,
                              &self.config,
                              wallet,
                              tracker,
                              presenter,
                              cancel,
                              SignedSubmissionRequest { title: "Create blueprint",
                                                     primary_type: "CreateBlueprint",
                                                     resource: "blueprints".into(),
                                                     payload,
                                                     revalidate: vec![RevalidatePath::Page("/blueprints".into())] }).await
    }
}

pub struct DeleteBlueprintFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl DeleteBlueprintFlow {
    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     blueprint_id: u64)
                     -> Result<Signature, FlowError> {
        run_signed_submission(&self.services,
                              &self.config,
                              wallet,
                              tracker,
                              presenter,
                              cancel,
                              SignedSubmissionRequest { title: "Delete blueprint",
                                                     primary_type: "DeleteBlueprint",
                                                     resource: format!("blueprints/{blueprint_id}/delete"),
                                                     payload: json!({ "blueprint_id": blueprint_id }),
                                                     revalidate: vec![RevalidatePath::Page("/blueprints".into())] }).await
    }
}

/// Encola el mint de un blueprint ya existente a nombre de su receptor.
pub struct QueueBlueprintMintFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl QueueBlueprintMintFlow {
    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     blueprint_id: u64)
                     -> Result<Signature, FlowError> {
        run_signed_submission(&self.services,
                              &self.config,
                              wallet,
                              tracker,
                              presenter,
                              cancel,
                              SignedSubmissionRequest { title: "Queue blueprint mint",
                                                     primary_type: "QueueBlueprintMint",
                                                     resource: format!("blueprints/{blueprint_id}/queue-mint"),
                                                     payload: json!({ "blueprint_id": blueprint_id }),
                                                     revalidate: vec![RevalidatePath::Page("/blueprints".into()),
                                                                      RevalidatePath::Page("/hypercerts".into())] }).await
    }
}
