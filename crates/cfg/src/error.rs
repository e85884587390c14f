use thiserror::Error;

use std::io;

#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("cannot convert '{value}' to {target}")]
    Convert { value: String, target: &'static str },
}

pub type Result<T> = core::result::Result<T, Error>;
