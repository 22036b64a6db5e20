use orderdesk_shared::{InvalidInput, ProcessStatus, UnknownStatus};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OrderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    UnknownStatus(#[from] UnknownStatus),

    #[error("Illegal process transition from {from} to {to}")]
    IllegalTransition {
        from: ProcessStatus,
        to: ProcessStatus,
    },
}

impl From<InvalidInput> for OrderError {
    fn from(err: InvalidInput) -> Self {
        OrderError::InvalidInput(err.0)
    }
}

pub type OrderResult<T> = Result<T, OrderError>;
