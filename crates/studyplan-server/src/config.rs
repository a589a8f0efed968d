use std::env;
use std::net::SocketAddr;

const DEFAULT_BIND: &str = "0.0.0.0:5000";

/// Server settings from the environment. Provider settings live in
/// `studyplan_ai::config`.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: SocketAddr,
}

impl ServerConfig {
    pub fn from_env() -> eyre::Result<Self> {
        let bind = env::var("STUDYPLAN_BIND").unwrap_or_else(|_| DEFAULT_BIND.to_string());
        let bind = bind
            .parse::<SocketAddr>()
            .map_err(|e| eyre::eyre!("STUDYPLAN_BIND is not a socket address ({bind:?}): {e}"))?;
        Ok(Self { bind })
    }
}
