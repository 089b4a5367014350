//! Esqueleto compartido firma-tipada → submission → listo.
//!
//! Varios flujos (blueprints, cancelación de firma, perfil) son la misma
//! secuencia con distinto recurso y payload; acá vive una sola vez.

use serde_json::{json, Value};
use tokio_util::sync::CancellationToken;

use cert_core::{build_step_sequence, DialogPresenter, FlowError, StepSequence, TrackerHandle};

use crate::config::FlowConfig;
use crate::context::WalletContext;
use crate::flows::{revalidate_best_effort, FlowDriver, FlowServices};
use crate::services::{RevalidatePath, SignRequest, Signature};

pub(crate) struct SignedSubmissionRequest {
    pub title: &'static str,
    pub primary_type: &'static str,
    pub resource: String,
    pub payload: Value,
    pub revalidate: Vec<RevalidatePath>,
}

pub(crate) fn signed_submission_steps() -> Result<StepSequence, FlowError> {
    build_step_sequence(&[("sign", "Awaiting signature"),
                          ("submit", "Submitting to API"),
                          ("done", "Done")])
}

pub(crate) async fn run_signed_submission(services: &FlowServices,
                                          config: &FlowConfig,
                                          wallet: &WalletContext,
                                          tracker: &TrackerHandle,
                                          presenter: &dyn DialogPresenter,
                                          cancel: &CancellationToken,
                                          request: SignedSubmissionRequest)
                                          -> Result<Signature, FlowError> {
    let connected = wallet.ensure()?;
    let sequence = signed_submission_steps()?;
    let driver = FlowDriver::begin(tracker, presenter, cancel, request.title, &sequence);

    let signature = driver.step("sign",
                                services.signer.sign(SignRequest { domain: config.signing_domain.clone(),
                                                                   primary_type: request.primary_type.to_string(),
                                                                   chain_id: connected.chain_id,
                                                                   message: request.payload.clone() }))
                          .await?;

    driver.step("submit",
                services.endpoint.submit(&request.resource,
                                         json!({ "signature": signature.0,
                                                 "signer": connected.address,
                                                 "chain_id": connected.chain_id,
                                                 "payload": request.payload })))
          .await?;

    revalidate_best_effort(&services.invalidator, request.revalidate).await;
    driver.finish("done", config.close_delay).await?;
    Ok(signature)
}
