//! Startup failures. Nothing past the first frame produces one of these.

use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("failed to read corpus {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed corpus {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("corpus {} has no usable poems", .path.display())]
    EmptyCorpus { path: PathBuf },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("no single-width glyphs left in the {0} pool")]
    NoGlyphs(&'static str),
}

pub type Result<T> = std::result::Result<T, Error>;
