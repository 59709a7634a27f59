use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Usage error: {0}")]
    Usage(String),

    #[error("Malformed PKCS8 key: {0}")]
    Format(String),

    #[error("Unsupported key algorithm {oid}, only Ed25519 (1.3.101.112) is supported")]
    UnsupportedAlgorithm { oid: String },

    /// Derived point failed validation. Never retried, it means the
    /// derivation itself is broken.
    #[error("Invalid Ed25519 public point: {0}")]
    InvalidPoint(&'static str),

    #[error("Passphrase error: {0}")]
    Passphrase(String),

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("OpenPGP error: {0}")]
    OpenPgp(#[from] anyhow::Error),
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
