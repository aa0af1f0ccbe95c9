use thiserror::Error;

#[derive(Error, Debug)]
pub enum ComplianceError {
    #[error("Family not found: {0}")]
    FamilyNotFound(String),

    #[error("Family source error: {0}")]
    Source(String),

    #[error("Invalid family fixture: {0}")]
    Fixture(#[from] serde_json::Error),

    #[error("Failed to read family fixture: {0}")]
    Io(#[from] std::io::Error),
}
