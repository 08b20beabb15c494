use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0} thread panicked")]
    Panicked(&'static str),
}
