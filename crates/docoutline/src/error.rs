use std::path::PathBuf;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("cannot read document {path}: {source}")]
    DocumentRead {
        path: PathBuf,
        #[source]
        source: pdf::PdfError,
    },

    #[error("invalid configuration {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: outline_core::ConfigError,
    },

    #[error("{failed} of {total} documents failed")]
    BatchFailed { failed: usize, total: usize },
}
