//! Demo ejecutable: corre un mint feliz y un mint con receipt revertido
//! contra los servicios mock, imprimiendo instantáneas y eventos del tracker.

use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use cert_adapters::mocks::{mock_services, MockConfirmations};
use cert_adapters::{FlowConfig, FlowServices, MintHypercertFlow, MintParams, TransferRestriction, WalletContext};
use cert_core::{DialogPresenter, DialogStep, TrackerHandle};

struct PrintlnPresenter;

impl DialogPresenter for PrintlnPresenter {
    fn on_update(&self, title: &str, steps: &[DialogStep]) {
        let line: Vec<String> = steps.iter()
                                     .map(|s| format!("{}={:?}", s.id, s.state))
                                     .collect();
        println!("[{title}] {}", line.join(" "));
    }

    fn on_close(&self) {
        println!("[dialog] closed");
    }
}

fn demo_params() -> MintParams {
    MintParams { name: "Demo hypercert".into(),
                 metadata: serde_json::json!({ "impact_scope": ["demo"] }),
                 units: 1_000,
                 transfer_restriction: TransferRestriction::AllowAll,
                 allowlist: None }
}

async fn run_mint(services: FlowServices, label: &str) {
    let config = FlowConfig::from_env().with_close_delay(Duration::from_millis(100));
    let flow = MintHypercertFlow::new(services, config);
    let tracker = TrackerHandle::new();
    let wallet = WalletContext::connected("0xdemo", 10);

    println!("== {label} ==");
    match flow.run(&wallet, &tracker, &PrintlnPresenter, &CancellationToken::new(), demo_params()).await {
        Ok(outcome) => println!("ok: tx={} block={}", outcome.tx_hash.0, outcome.receipt.block_number),
        Err(e) => println!("err: {e}"),
    }
    for ev in tracker.events() {
        println!("  event #{} {:?}", ev.seq, ev.kind);
    }
}

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    run_mint(mock_services(), "mint: happy path").await;

    let reverted = FlowServices { confirmations: Arc::new(MockConfirmations::reverted()),
                                  ..mock_services() };
    run_mint(reverted, "mint: reverted receipt").await;
}
