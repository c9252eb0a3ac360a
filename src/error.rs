use crate::stamp::StampError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("upstream transport error: {0}")]
    Transport(String),

    #[error("stamp error: {0}")]
    Stamp(#[from] StampError),

    #[error("rounding error: {0}")]
    Rounding(#[from] chrono::RoundingError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("reqwest error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("subprocess `{command}` exited with {status}: {stderr}")]
    SubprocessFailed {
        command: String,
        status: std::process::ExitStatus,
        stderr: String,
    },

    #[error("config error: {0}")]
    Config(#[from] confy::ConfyError),

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}
