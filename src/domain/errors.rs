#[derive(Debug, Clone, PartialEq)]
pub enum DomainError {
    InsufficientBalance { balance: i64, total: i64 },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DomainError::InsufficientBalance { balance, total } => {
                write!(
                    f,
                    "Insufficient balance: have {}, need {}",
                    balance, total
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}

pub type DomainResult<T> = Result<T, DomainError>;
