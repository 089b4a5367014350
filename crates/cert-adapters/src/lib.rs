//! cert-adapters: orquestadores de flujo y colaboradores externos
//!
//! Este crate provee:
//! - Los contratos async de los colaboradores (firma, submission,
//!   confirmaciones, invalidación de cache) y sus mocks.
//! - Un orquestador por mutación de negocio (mint, blueprints, cancelación
//!   de firma, perfil), todos conduciendo el `StepTracker` de `cert-core`
//!   mediante el mismo patrón `FlowDriver`.
//! - Precondiciones de wallet y configuración por entorno.
//!
//! Nota: el core sólo conoce pasos y estados; toda la semántica de negocio
//! (qué se firma, a qué recurso se postea) vive acá.

pub mod config;
pub mod context;
pub mod flows;
pub mod mocks;
pub mod services;

pub use config::{init_dotenv, FlowConfig};
pub use context::{ConnectedWallet, WalletContext};
pub use flows::{AllowlistEntry, BlueprintParams, CancelSignatureRequestFlow, CancelSignatureRequestParams,
                CreateBlueprintFlow, DeleteBlueprintFlow, FlowServices, MintHypercertFlow,
                MintOutcome, MintParams, ProfileParams, QueueBlueprintMintFlow, TransferRestriction,
                UpdateProfileFlow};
pub use services::{CacheInvalidator, ConfirmationService, Receipt, ReceiptStatus, RevalidatePath,
                   SignRequest, Signature, Signer, SubmissionEndpoint, TxHash, TxRequest};
