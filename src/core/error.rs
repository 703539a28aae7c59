use thiserror::Error;

#[derive(Error, Debug)]
pub enum WarError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Unknown combatant: {0}")]
    UnknownCombatant(String),
}

pub type Result<T> = std::result::Result<T, WarError>;
