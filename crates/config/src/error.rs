use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration from environment: {0}")]
    EnvError(#[from] envy::Error),

    #[error("Failed to load env file '{path}': {source}")]
    EnvFileError {
        path: String,
        #[source]
        source: dotenv::Error,
    },

    #[error("Gateway configuration error: {0}")]
    GatewayError(#[from] crate::gateway::GatewayError),

    #[error("Poller configuration error: {0}")]
    PollerError(#[from] crate::poller::PollerError),

    #[error("Log configuration error: {0}")]
    LogError(#[from] crate::log::LogError),
}
