use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestError {
    #[error(transparent)]
    Corpsync(#[from] corpsync::Error),
    #[error("Test setup failed: {0}")]
    Setup(String),
}
