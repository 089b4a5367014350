use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use cert_adapters::mocks::{mock_services, MockConfirmations, MockEndpoint, MockSigner};
use cert_adapters::{BlueprintParams, CreateBlueprintFlow, DeleteBlueprintFlow, FlowConfig, FlowServices,
                    MintHypercertFlow, MintParams, TransferRestriction, WalletContext};
use cert_core::{DialogPresenter, DialogStep, StepState, TrackerHandle};

/// Presentador de consola: una línea por paso en cada instantánea.
struct StdoutPresenter;

impl DialogPresenter for StdoutPresenter {
    fn on_update(&self, title: &str, steps: &[DialogStep]) {
        println!("--- {title} ---");
        for s in steps {
            let mark = match s.state {
                StepState::Idle => " ",
                StepState::Active => ">",
                StepState::Completed => "x",
                StepState::Failed => "!",
                StepState::Cancelled => "~",
            };
            match &s.error {
                Some(e) => println!("  [{mark}] {} ({e})", s.description),
                None => println!("  [{mark}] {}", s.description),
            }
        }
    }

    fn on_close(&self) {
        println!("--- dialog closed ---");
    }
}

fn usage() -> ! {
    eprintln!("usage: cert-cli mint --name <TXT> --units <N> [--decline] [--revert] [--fail-submit]");
    eprintln!("       cert-cli blueprint create --title <TXT> --recipient <ADDR>");
    eprintln!("       cert-cli blueprint delete --id <N>");
    std::process::exit(2);
}

fn flag(args: &[String], name: &str) -> bool {
    args.iter().any(|a| a == name)
}

fn opt(args: &[String], name: &str) -> Option<String> {
    args.iter().position(|a| a == name).and_then(|i| args.get(i + 1).cloned())
}

fn build_services(args: &[String]) -> FlowServices {
    let mut services = mock_services();
    if flag(args, "--decline") {
        services.signer = Arc::new(MockSigner::declining());
    }
    if flag(args, "--revert") {
        services.confirmations = Arc::new(MockConfirmations::reverted());
    }
    if flag(args, "--fail-submit") {
        services.endpoint = Arc::new(MockEndpoint::failing("503 service unavailable"));
    }
    services
}

#[tokio::main]
async fn main() {
    // Cargar .env si existe para la config CERTFLOW_*
    let _ = dotenvy::dotenv();
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        usage();
    }

    let config = FlowConfig::from_env().with_close_delay(Duration::from_millis(300));
    let services = build_services(&args);
    let wallet = WalletContext::connected("0xdemo-wallet", 10);
    let tracker = TrackerHandle::new();
    let presenter = StdoutPresenter;
    let cancel = CancellationToken::new();

    let result = match args[1].as_str() {
        "mint" => {
            let name = opt(&args, "--name").unwrap_or_else(|| "Demo hypercert".to_string());
            let units = opt(&args, "--units").and_then(|v| v.parse().ok()).unwrap_or(10_000);
            let flow = MintHypercertFlow::new(services, config);
            flow.run(&wallet,
                     &tracker,
                     &presenter,
                     &cancel,
                     MintParams { name,
                                  metadata: serde_json::json!({ "impact_scope": ["demo"] }),
                                  units,
                                  transfer_restriction: TransferRestriction::FromCreatorOnly,
                                  allowlist: None })
                .await
                .map(|outcome| println!("minted: tx={} block={}", outcome.tx_hash.0, outcome.receipt.block_number))
        }
        "blueprint" => match args.get(2).map(|s| s.as_str()) {
            Some("create") => {
                let title = opt(&args, "--title").unwrap_or_else(|| "Draft".to_string());
                let recipient = opt(&args, "--recipient").unwrap_or_else(|| "0xrecipient".to_string());
                let flow = CreateBlueprintFlow::new(services, config);
                flow.run(&wallet,
                         &tracker,
                         &presenter,
                         &cancel,
                         BlueprintParams { title,
                                           recipient,
                                           form_values: serde_json::json!({}) })
                    .await
                    .map(|sig| println!("blueprint created, signature {}", sig.0))
            }
            Some("delete") => {
                let id = opt(&args, "--id").and_then(|v| v.parse().ok()).unwrap_or(1);
                let flow = DeleteBlueprintFlow::new(services, config);
                flow.run(&wallet, &tracker, &presenter, &cancel, id)
                    .await
                    .map(|sig| println!("blueprint {id} deleted, signature {}", sig.0))
            }
            _ => usage(),
        },
        _ => usage(),
    };

    if let Err(e) = result {
        eprintln!("flow failed: {e}");
        std::process::exit(1);
    }
}
