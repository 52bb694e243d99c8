use thiserror::Error;

#[derive(Debug, Error)]
pub enum ThreadDumpError {
    #[error("input file '{name}' not found")]
    InputFileNotFound { name: String },
    #[error("I/O failure: {e}")]
    StdIoError {
        #[from]
        e: std::io::Error,
    },
    #[error("JSON serialization failure: {e}")]
    SerdeError {
        #[from]
        e: serde_json::Error,
    },
}
