/// Failures raised by the domain layer.
///
/// Missing records and rejected input are not errors here: the handlers
/// report them in the response envelope or as field errors.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),
}

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
