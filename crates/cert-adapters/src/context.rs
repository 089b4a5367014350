//! Precondiciones de wallet/cliente para arrancar un flujo.
//!
//! Las violaciones fallan rápido, antes de que ningún paso cambie de estado;
//! no son pasos del diálogo.

use serde::{Deserialize, Serialize};

use cert_core::FlowError;

/// Estado de conexión tal como lo ve la capa de UI.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WalletContext {
    pub address: Option<String>,
    pub chain_id: Option<u64>,
    /// El cliente (SDK de marketplace/minting) terminó de inicializar.
    pub client_ready: bool,
}

/// Wallet validada: los orquestadores sólo trabajan con esta forma.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectedWallet {
    pub address: String,
    pub chain_id: u64,
}

impl WalletContext {
    pub fn connected(address: impl Into<String>, chain_id: u64) -> Self {
        Self { address: Some(address.into()),
               chain_id: Some(chain_id),
               client_ready: true }
    }

    pub fn disconnected() -> Self {
        Self { address: None,
               chain_id: None,
               client_ready: false }
    }

    /// Verifica wallet conectada, chain presente y cliente inicializado.
    pub fn ensure(&self) -> Result<ConnectedWallet, FlowError> {
        let address = self.address.clone().ok_or(FlowError::MissingWallet)?;
        let chain_id = self.chain_id.ok_or(FlowError::MissingChainId)?;
        if !self.client_ready {
            return Err(FlowError::ClientNotInitialized);
        }
        Ok(ConnectedWallet { address, chain_id })
    }
}
