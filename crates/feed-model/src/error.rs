use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("channel name is empty")]
    EmptyChannel,
    #[error("invalid channel name: {0:?}")]
    InvalidChannel(String),
}
