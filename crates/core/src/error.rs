use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Unknown session: {id}")]
    UnknownSession { id: Uuid },

    #[error("Unreadable image: {0}")]
    ImageUnreadable(String),

    #[error("Validation failed: {0}")]
    Validation(String),
}
