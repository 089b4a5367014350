//! Patrón de orquestación de flujos.
//!
//! Cada operación de negocio (mint, blueprints, firma, perfil) secuencia sus
//! llamadas async a través de un `FlowDriver`: cada efecto queda enmarcado
//! por una transición del tracker, y todo fallo se registra en el paso activo
//! ADEMÁS de propagarse como `Err`. El estado visible nunca es la única señal
//! de fallo.

pub mod blueprint;
pub mod mint;
pub mod profile;
pub mod signature;
pub(crate) mod signed;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use cert_core::{DialogPresenter, FlowError, StepSequence, TrackerHandle};

use crate::services::{CacheInvalidator, ConfirmationService, RevalidatePath, Signer, SubmissionEndpoint};

pub use blueprint::{BlueprintParams, CreateBlueprintFlow, DeleteBlueprintFlow, QueueBlueprintMintFlow};
pub use mint::{AllowlistEntry, MintHypercertFlow, MintOutcome, MintParams, TransferRestriction};
pub use profile::{ProfileParams, UpdateProfileFlow};
pub use signature::{CancelSignatureRequestFlow, CancelSignatureRequestParams};

/// Colaboradores inyectados en cada orquestador.
#[derive(Clone)]
pub struct FlowServices {
    pub signer: Arc<dyn Signer>,
    pub endpoint: Arc<dyn SubmissionEndpoint>,
    pub confirmations: Arc<dyn ConfirmationService>,
    pub invalidator: Arc<dyn CacheInvalidator>,
}

/// Corre un future suspensivo contra el token de cancelación. La cancelación
/// gana con `FlowError::Cancelled`; el future en vuelo se abandona.
pub(crate) async fn cancellable<T, F>(cancel: &CancellationToken, fut: F) -> Result<T, FlowError>
    where F: Future<Output = Result<T, FlowError>>
{
    tokio::select! {
        _ = cancel.cancelled() => Err(FlowError::Cancelled),
        res = fut => res,
    }
}

/// Conduce un flujo concreto: avanza el tracker antes de cada efecto y
/// traduce errores en estado visible.
pub(crate) struct FlowDriver<'a> {
    tracker: &'a TrackerHandle,
    presenter: &'a dyn DialogPresenter,
    cancel: &'a CancellationToken,
    title: &'a str,
    generation: u64,
}

impl<'a> FlowDriver<'a> {
    /// Inicia el flujo en el tracker y publica la instantánea inicial.
    pub fn begin(tracker: &'a TrackerHandle,
                 presenter: &'a dyn DialogPresenter,
                 cancel: &'a CancellationToken,
                 title: &'a str,
                 sequence: &StepSequence)
                 -> Self {
        let generation = tracker.begin(sequence);
        presenter.on_update(title, &tracker.snapshot());
        Self { tracker,
               presenter,
               cancel,
               title,
               generation }
    }

    /// Ejecuta un efecto bajo el paso `id`: lo activa, corre el future de
    /// forma cancelable y registra el desenlace.
    pub async fn step<T, F>(&self, id: &str, fut: F) -> Result<T, FlowError>
        where F: Future<Output = Result<T, FlowError>>
    {
        let steps = self.tracker.set_step(self.generation, id)?;
        self.presenter.on_update(self.title, &steps);

        match cancellable(self.cancel, fut).await {
            Ok(value) => Ok(value),
            Err(FlowError::Cancelled) => {
                // generación obsoleta: el diálogo ya se cerró, no hay nada
                // que marcar
                if let Ok(steps) = self.tracker.cancel_active(self.generation) {
                    self.presenter.on_update(self.title, &steps);
                }
                log::info!("[{}] flow cancelled at step '{id}'", self.title);
                Err(FlowError::Cancelled)
            }
            Err(e) => {
                if let Ok(steps) = self.tracker.set_step_error(self.generation, id, &e.to_string()) {
                    self.presenter.on_update(self.title, &steps);
                }
                log::warn!("[{}] step '{id}' failed: {e}", self.title);
                Err(e)
            }
        }
    }

    /// Cierre exitoso: completa el último paso, deja visible el estado final
    /// durante `close_delay` y recién entonces cierra el diálogo.
    pub async fn finish(&self, last_id: &str, close_delay: Duration) -> Result<(), FlowError> {
        let steps = self.tracker.set_step(self.generation, last_id)?;
        self.presenter.on_update(self.title, &steps);
        if !close_delay.is_zero() {
            tokio::select! {
                _ = self.cancel.cancelled() => {}
                _ = tokio::time::sleep(close_delay) => {}
            }
        }
        self.presenter.on_close();
        Ok(())
    }
}

/// Invalidación best-effort: un fallo aquí no degrada un flujo ya exitoso.
pub(crate) async fn revalidate_best_effort(invalidator: &Arc<dyn CacheInvalidator>, paths: Vec<RevalidatePath>) {
    if let Err(e) = invalidator.revalidate(&paths).await {
        log::warn!("cache revalidation failed (ignored): {e}");
    }
}
