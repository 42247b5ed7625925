use snafu::prelude::*;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum Error {
    #[snafu(display("Failed to start {command}: {source}"))]
    LaunchError {
        command: String,
        source: std::io::Error,
    },
    #[snafu(display("{message}: {source}"))]
    KeyboardError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("{message}: {source}"))]
    MailError {
        message: String,
        source: Box<dyn std::error::Error>,
    },
    #[snafu(display("Failed to read {path}: {source}"))]
    ReadError {
        path: String,
        source: std::io::Error,
    },
    #[snafu(display("Failed to parse {path}: {source}"))]
    ParseError {
        path: String,
        source: quick_xml::DeError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
