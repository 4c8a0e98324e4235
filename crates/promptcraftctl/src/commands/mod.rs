//! Command implementations, one module per lab.

pub mod advanced;
pub mod basics;
pub mod key;
pub mod techniques;

use crate::cli::Commands;
use anyhow::Result;
use promptcraft_common::{CredentialStore, GatewayClient, DEFAULT_GATEWAY_URL};

/// Environment override for the gateway URL
pub const GATEWAY_ENV: &str = "PROMPTCRAFT_GATEWAY";

/// Everything a command needs from the environment
pub struct Session {
    pub gateway_url: String,
    pub store: CredentialStore,
}

impl Session {
    /// Priority: --gateway flag, $PROMPTCRAFT_GATEWAY, default.
    pub fn discover_gateway_url(explicit: Option<&str>) -> String {
        if let Some(url) = explicit {
            return url.to_string();
        }
        if let Ok(url) = std::env::var(GATEWAY_ENV) {
            return url;
        }
        DEFAULT_GATEWAY_URL.to_string()
    }

    pub fn new(gateway: Option<&str>, store: CredentialStore) -> Self {
        Self {
            gateway_url: Self::discover_gateway_url(gateway),
            store,
        }
    }

    /// Gateway client; fails before any network call without a stored key.
    pub fn client(&self) -> Result<GatewayClient> {
        let key = self.store.api_key().map(str::to_string);
        Ok(GatewayClient::with_required_key(&self.gateway_url, key)?)
    }
}

pub async fn dispatch(command: Commands, session: &mut Session) -> Result<()> {
    match command {
        Commands::Key { action } => key::run(action, &mut session.store),
        Commands::Compose(args) => basics::compose(args, session).await,
        Commands::Techniques => {
            techniques::list();
            Ok(())
        }
        Commands::Compare { technique } => techniques::compare(&technique, session).await,
        Commands::Analyze { prompt, send } => techniques::analyze(&prompt, send, session).await,
        Commands::Chain { steps } => advanced::chain(&steps, session).await,
        Commands::Refine => advanced::refine(session).await,
        Commands::Consistency { prompt, per_run } => {
            advanced::consistency(&prompt, per_run, session).await
        }
    }
}
