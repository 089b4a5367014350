//! Flujo de minteo de un hypercert.
//!
//! Pasos: preparar metadata → enviar transacción → esperar confirmaciones →
//! listo. Un receipt revertido falla el paso de confirmación.

use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio_util::sync::CancellationToken;

use cert_core::{build_step_sequence, DialogPresenter, FlowError, StepSequence, TrackerHandle};

use crate::config::FlowConfig;
use crate::context::WalletContext;
use crate::flows::{revalidate_best_effort, FlowDriver, FlowServices};
use crate::services::{Receipt, ReceiptStatus, RevalidatePath, TxHash, TxRequest};

/// Restricción de transferencia del token minteado.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferRestriction {
    AllowAll,
    DisallowAll,
    FromCreatorOnly,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AllowlistEntry {
    pub address: String,
    pub units: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MintParams {
    pub name: String,
    pub metadata: serde_json::Value,
    pub units: u64,
    pub transfer_restriction: TransferRestriction,
    pub allowlist: Option<Vec<AllowlistEntry>>,
}

#[derive(Debug, Clone)]
pub struct MintOutcome {
    pub tx_hash: TxHash,
    pub receipt: Receipt,
}

pub struct MintHypercertFlow {
    services: FlowServices,
    config: FlowConfig,
}

impl MintHypercertFlow {
    pub const TITLE: &'static str = "Mint hypercert";

    pub fn new(services: FlowServices, config: FlowConfig) -> Self {
        Self { services, config }
    }

    pub fn steps() -> Result<StepSequence, FlowError> {
        build_step_sequence(&[("preparing", "Preparing mint"),
                              ("minting", "Awaiting mint transaction"),
                              ("confirming", "Waiting for on-chain confirmation"),
                              ("done", "Minting complete")])
    }

    pub async fn run(&self,
                     wallet: &WalletContext,
                     tracker: &TrackerHandle,
                     presenter: &dyn DialogPresenter,
                     cancel: &CancellationToken,
                     params: MintParams)
                     -> Result<MintOutcome, FlowError> {
        let connected = wallet.ensure()?;
        let sequence = Self::steps()?;
        let driver = FlowDriver::begin(tracker, presenter, cancel, Self::TITLE, &sequence);

        let payload = driver.step("preparing", async {
                                let name = params.name.trim();
                                if name.is_empty() {
                                    return Err(FlowError::Internal("hypercert name must not be empty".into()));
                                }
                                if params.units == 0 {
                                    return Err(FlowError::Internal("unit count must be positive".into()));
                                }
                                serde_json::to_value(&params)
                                    .map(|p| json!({ "minter": connected.address,
                                                     "chain_id": connected.chain_id,
                                                     "mint": p }))
                                    .map_err(|e| FlowError::Internal(e.to_string()))
                            })
                            .await?;

        let tx_hash = driver.step("minting",
                                  self.services.signer.send_transaction(TxRequest { description: "mint hypercert".into(),
                                                                                    payload }))
                            .await?;

        let receipt = driver.step("confirming", async {
                                let receipt = self.services
                                                  .confirmations
                                                  .wait_for_receipt(&tx_hash, self.config.confirmations)
                                                  .await?;
                                match receipt.status {
                                    ReceiptStatus::Success => Ok(receipt),
                                    ReceiptStatus::Reverted => Err(FlowError::Reverted(tx_hash.0.clone())),
                                }
                            })
                            .await?;

        revalidate_best_effort(&self.services.invalidator,
                               vec![RevalidatePath::Page("/hypercerts".into()),
                                    RevalidatePath::Page(format!("/profile/{}", connected.address))]).await;

        driver.finish("done", self.config.close_delay).await?;
        Ok(MintOutcome { tx_hash, receipt })
    }
}
