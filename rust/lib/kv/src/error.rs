use thiserror::Error;

#[derive(Error, Debug)]
pub enum KVError {
    /// The backing store could not complete the operation (I/O, transaction
    /// or commit failure). Never used to signal an absent key.
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl KVError {
    pub(crate) fn unavailable(e: impl std::fmt::Display) -> Self {
        KVError::Unavailable(e.to_string())
    }
}
