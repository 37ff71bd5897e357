use thiserror::Error;

#[derive(Error, Debug)]
pub enum BizPulseError {
    #[error("Configuration error: {0}")]
    Config(String),
}
