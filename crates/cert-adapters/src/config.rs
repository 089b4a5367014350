//! Carga de configuración de flujos desde variables de entorno.
//! Usa convención `CERTFLOW_*` con defaults razonables; ninguna variable es
//! obligatoria.

use std::env;
use std::time::Duration;

use dotenvy::dotenv;
use once_cell::sync::Lazy;

use cert_core::constants::{DEFAULT_CLOSE_DELAY_MS, DEFAULT_CONFIRMATIONS};

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct FlowConfig {
    /// Confirmaciones on-chain antes de dar una transacción por asentada.
    pub confirmations: u32,
    /// Cuánto queda visible el estado final antes de cerrar el diálogo.
    pub close_delay: Duration,
    /// Base del endpoint de submission.
    pub api_url: String,
    /// Dominio para requests de firma tipada.
    pub signing_domain: String,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self { confirmations: DEFAULT_CONFIRMATIONS,
               close_delay: Duration::from_millis(DEFAULT_CLOSE_DELAY_MS),
               api_url: "https://api.certflow.local".to_string(),
               signing_domain: "certflow.app".to_string() }
    }
}

impl FlowConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let defaults = Self::default();
        let confirmations = env::var("CERTFLOW_CONFIRMATIONS").ok()
                                                              .and_then(|v| v.parse().ok())
                                                              .unwrap_or(defaults.confirmations);
        let close_delay = env::var("CERTFLOW_CLOSE_DELAY_MS").ok()
                                                             .and_then(|v| v.parse().ok())
                                                             .map(Duration::from_millis)
                                                             .unwrap_or(defaults.close_delay);
        let api_url = env::var("CERTFLOW_API_URL").unwrap_or(defaults.api_url);
        let signing_domain = env::var("CERTFLOW_SIGNING_DOMAIN").unwrap_or(defaults.signing_domain);
        Self { confirmations,
               close_delay,
               api_url,
               signing_domain }
    }

    /// Variante sin retardo de cierre, útil en tests y demos.
    pub fn with_close_delay(mut self, close_delay: Duration) -> Self {
        self.close_delay = close_delay;
        self
    }

    pub fn with_confirmations(mut self, confirmations: u32) -> Self {
        self.confirmations = confirmations;
        self
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
