use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(String),

    #[error("Failed to parse config file: {0}")]
    Parse(String),

    #[error("Invalid configuration: {0}")]
    Validation(String),

    #[error("Failed to write config file: {0}")]
    Write(String),

    #[error("Failed to edit config document: {0}")]
    Edit(String),
}
