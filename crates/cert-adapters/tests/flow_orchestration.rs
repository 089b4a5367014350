//! End-to-end orchestration tests against the mock collaborators: success
//! path, failure discipline (visible state AND returned error), cancellation
//! and the generation guard.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio_util::sync::CancellationToken;

use cert_adapters::mocks::{mock_services, MockConfirmations, MockEndpoint, MockInvalidator, MockSigner};
use cert_adapters::{BlueprintParams, CancelSignatureRequestFlow, CancelSignatureRequestParams,
                    CreateBlueprintFlow, DeleteBlueprintFlow, FlowConfig, FlowServices,
                    MintHypercertFlow, MintParams, QueueBlueprintMintFlow, RevalidatePath,
                    TransferRestriction, UpdateProfileFlow, ProfileParams, WalletContext};
use cert_core::{CollectingPresenter, FlowError, StepState, TrackerHandle};

fn test_config() -> FlowConfig {
    FlowConfig::default().with_close_delay(Duration::ZERO)
}

fn mint_params() -> MintParams {
    MintParams { name: "Reforestation Q3".into(),
                 metadata: json!({ "impact_scope": ["CO2"], "work_scope": ["planting"] }),
                 units: 10_000,
                 transfer_restriction: TransferRestriction::FromCreatorOnly,
                 allowlist: None }
}

#[tokio::test]
async fn mint_happy_path_completes_every_step_and_closes() {
    let invalidator = Arc::new(MockInvalidator::new());
    let services = FlowServices { invalidator: invalidator.clone(),
                                  ..mock_services() };
    let flow = MintHypercertFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let outcome = flow.run(&WalletContext::connected("0xminter", 10),
                           &tracker,
                           &presenter,
                           &CancellationToken::new(),
                           mint_params())
                      .await
                      .expect("mint should succeed");

    assert_eq!(outcome.tx_hash.0, "0xabc123");
    assert!(tracker.is_completed());
    let last = presenter.last().expect("snapshots were published");
    assert!(last.iter().all(|s| s.state == StepState::Completed));
    assert!(presenter.was_closed());
    assert!(invalidator.recorded()
                       .contains(&RevalidatePath::Page("/hypercerts".into())));
}

#[tokio::test]
async fn precondition_failure_never_touches_step_state() {
    let flow = MintHypercertFlow::new(mock_services(), test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let err = flow.run(&WalletContext::disconnected(),
                       &tracker,
                       &presenter,
                       &CancellationToken::new(),
                       mint_params())
                  .await
                  .unwrap_err();

    assert_eq!(err, FlowError::MissingWallet);
    assert!(tracker.snapshot().is_empty(), "flow never began");
    assert!(presenter.updates().is_empty());
}

#[tokio::test]
async fn invalid_params_fail_the_preparing_step() {
    let flow = MintHypercertFlow::new(mock_services(), test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let mut params = mint_params();
    params.units = 0;
    let err = flow.run(&WalletContext::connected("0xminter", 10),
                       &tracker,
                       &presenter,
                       &CancellationToken::new(),
                       params)
                  .await
                  .unwrap_err();

    assert!(matches!(err, FlowError::Internal(_)));
    let steps = tracker.snapshot();
    assert_eq!(steps[0].state, StepState::Failed);
    assert!(steps[0].error.as_deref().unwrap_or_default().contains("unit count"));
    assert_eq!(steps[1].state, StepState::Idle);
    assert!(!presenter.was_closed(), "dialog stays open on failure");
}

#[tokio::test]
async fn reverted_receipt_fails_the_confirming_step() {
    let services = FlowServices { confirmations: Arc::new(MockConfirmations::reverted()),
                                  ..mock_services() };
    let flow = MintHypercertFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let err = flow.run(&WalletContext::connected("0xminter", 10),
                       &tracker,
                       &presenter,
                       &CancellationToken::new(),
                       mint_params())
                  .await
                  .unwrap_err();

    assert_eq!(err, FlowError::Reverted("0xabc123".into()));
    let steps = tracker.snapshot();
    assert_eq!(steps[2].id, "confirming");
    assert_eq!(steps[2].state, StepState::Failed);
    assert_eq!(steps[0].state, StepState::Completed);
    assert_eq!(steps[1].state, StepState::Completed);
    assert_eq!(steps[3].state, StepState::Idle);
}

#[tokio::test]
async fn declined_signature_is_visible_and_returned() {
    let services = FlowServices { signer: Arc::new(MockSigner::declining()),
                                  ..mock_services() };
    let flow = CreateBlueprintFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let err = flow.run(&WalletContext::connected("0xcreator", 10),
                       &tracker,
                       &presenter,
                       &CancellationToken::new(),
                       BlueprintParams { title: "Draft".into(),
                                         recipient: "0xrecipient".into(),
                                         form_values: json!({}) })
                  .await
                  .unwrap_err();

    assert!(matches!(err, FlowError::SigningRejected(_)));
    let steps = tracker.snapshot();
    assert_eq!(steps[0].id, "sign");
    assert_eq!(steps[0].state, StepState::Failed);
    assert_eq!(steps[1].state, StepState::Idle, "submit never started");
}

#[tokio::test]
async fn failed_submission_records_the_message() {
    let endpoint = Arc::new(MockEndpoint::failing("503 service unavailable"));
    let services = FlowServices { endpoint: endpoint.clone(),
                                  ..mock_services() };
    let flow = UpdateProfileFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let err = flow.run(&WalletContext::connected("0xuser", 10),
                       &tracker,
                       &presenter,
                       &CancellationToken::new(),
                       ProfileParams { display_name: "alice".into(), avatar: None })
                  .await
                  .unwrap_err();

    assert_eq!(err, FlowError::Submission("503 service unavailable".into()));
    let steps = tracker.snapshot();
    assert_eq!(steps[1].id, "submit");
    assert_eq!(steps[1].state, StepState::Failed);
    assert!(steps[1].error.as_deref().unwrap_or_default().contains("503"));
    // the request did reach the endpoint and carried the signature envelope
    let recorded = endpoint.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "users/0xuser");
    assert_eq!(recorded[0].1["signer"], "0xuser");
}

#[tokio::test]
async fn delete_blueprint_targets_the_delete_resource() {
    let endpoint = Arc::new(MockEndpoint::ok());
    let invalidator = Arc::new(MockInvalidator::new());
    let services = FlowServices { endpoint: endpoint.clone(),
                                  invalidator: invalidator.clone(),
                                  ..mock_services() };
    let flow = DeleteBlueprintFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    let signature = flow.run(&WalletContext::connected("0xowner", 10),
                             &tracker,
                             &presenter,
                             &CancellationToken::new(),
                             42)
                        .await
                        .expect("delete should succeed");

    assert_eq!(signature.0, "0xsig:DeleteBlueprint");
    assert!(tracker.is_completed());
    let recorded = endpoint.recorded();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].0, "blueprints/42/delete");
    assert_eq!(recorded[0].1["payload"]["blueprint_id"], 42);
    assert_eq!(invalidator.recorded(),
               vec![RevalidatePath::Page("/blueprints".into())]);
}

#[tokio::test]
async fn queue_blueprint_mint_refreshes_both_listings() {
    let endpoint = Arc::new(MockEndpoint::ok());
    let invalidator = Arc::new(MockInvalidator::new());
    let services = FlowServices { endpoint: endpoint.clone(),
                                  invalidator: invalidator.clone(),
                                  ..mock_services() };
    let flow = QueueBlueprintMintFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    flow.run(&WalletContext::connected("0xminter", 10),
             &tracker,
             &presenter,
             &CancellationToken::new(),
             7)
        .await
        .expect("queue should succeed");

    let recorded = endpoint.recorded();
    assert_eq!(recorded[0].0, "blueprints/7/queue-mint");
    assert_eq!(recorded[0].1["payload"]["blueprint_id"], 7);
    assert_eq!(invalidator.recorded(),
               vec![RevalidatePath::Page("/blueprints".into()),
                    RevalidatePath::Page("/hypercerts".into())]);
}

#[tokio::test]
async fn cancel_signature_request_revalidates_the_safe_page() {
    let endpoint = Arc::new(MockEndpoint::ok());
    let invalidator = Arc::new(MockInvalidator::new());
    let services = FlowServices { endpoint: endpoint.clone(),
                                  invalidator: invalidator.clone(),
                                  ..mock_services() };
    let flow = CancelSignatureRequestFlow::new(services, test_config());
    let tracker = TrackerHandle::new();
    let presenter = CollectingPresenter::new();

    flow.run(&WalletContext::connected("0xsigner", 10),
             &tracker,
             &presenter,
             &CancellationToken::new(),
             CancelSignatureRequestParams { safe_address: "0xsafe".into(),
                                           message_hash: "0xdeadbeef".into() })
        .await
        .expect("cancel should succeed");

    let recorded = endpoint.recorded();
    assert_eq!(recorded[0].0, "signature-requests/cancel");
    assert_eq!(recorded[0].1["payload"]["safe_address"], "0xsafe");
    assert_eq!(recorded[0].1["payload"]["message_hash"], "0xdeadbeef");
    assert_eq!(recorded[0].1["signer"], "0xsigner");
    assert_eq!(invalidator.recorded(),
               vec![RevalidatePath::Page("/safe/0xsafe".into())]);
}

#[tokio::test]
async fn cancellation_marks_the_active_step_cancelled() {
    let services = FlowServices { confirmations: Arc::new(MockConfirmations::success()
                                      .with_delay(Duration::from_secs(60))),
                                  ..mock_services() };
    let flow = Arc::new(MintHypercertFlow::new(services, test_config()));
    let tracker = TrackerHandle::new();
    let presenter = Arc::new(CollectingPresenter::new());
    let cancel = CancellationToken::new();

    let handle = {
        let flow = flow.clone();
        let tracker = tracker.clone();
        let presenter = presenter.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            flow.run(&WalletContext::connected("0xminter", 10),
                     &tracker,
                     presenter.as_ref(),
                     &cancel,
                     mint_params())
                .await
        })
    };

    // let the flow reach the confirmation wait, then abandon it
    tokio::time::sleep(Duration::from_millis(50)).await;
    cancel.cancel();
    let result = handle.await.expect("task join");

    assert_eq!(result.unwrap_err(), FlowError::Cancelled);
    let steps = tracker.snapshot();
    assert_eq!(steps[2].id, "confirming");
    assert_eq!(steps[2].state, StepState::Cancelled);
    assert_eq!(steps[0].state, StepState::Completed);
    assert_eq!(steps[1].state, StepState::Completed);
    assert!(!presenter.was_closed());
}

#[tokio::test]
async fn closing_the_dialog_invalidates_in_flight_updates() {
    let services = FlowServices { confirmations: Arc::new(MockConfirmations::success()
                                      .with_delay(Duration::from_secs(60))),
                                  ..mock_services() };
    let flow = Arc::new(MintHypercertFlow::new(services, test_config()));
    let tracker = TrackerHandle::new();
    let presenter = Arc::new(CollectingPresenter::new());
    let cancel = CancellationToken::new();

    let handle = {
        let flow = flow.clone();
        let tracker = tracker.clone();
        let presenter = presenter.clone();
        let cancel = cancel.clone();
        tokio::spawn(async move {
            flow.run(&WalletContext::connected("0xminter", 10),
                     &tracker,
                     presenter.as_ref(),
                     &cancel,
                     mint_params())
                .await
        })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    // user closes the dialog: tracker resets and the old generation goes stale
    tracker.reset();
    cancel.cancel();
    let result = handle.await.expect("task join");

    assert_eq!(result.unwrap_err(), FlowError::Cancelled);
    // the stale cancel-update was ignored: the fresh state is untouched
    assert!(tracker.snapshot().iter().all(|s| s.state == StepState::Idle));
}
