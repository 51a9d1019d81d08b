use std::path::PathBuf;

use gridfix_core::{ParseError, PassageError, RangeError};
use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error("{0}")]
    #[diagnostic(code(gridfix::parse))]
    Parse(#[from] ParseError),

    #[error("{0}")]
    #[diagnostic(code(gridfix::range))]
    Range(#[from] RangeError),

    #[error("Invalid grid reference {0:?}")]
    #[diagnostic(
        code(gridfix::grid_reference),
        help("Use two square letters and two 5-digit groups, e.g. \"SX 41815 48338\"")
    )]
    GridReference(String),

    #[error("{0}")]
    #[diagnostic(code(gridfix::calc))]
    Passage(#[from] PassageError),

    #[error("Missing --{0} for this calculation")]
    #[diagnostic(
        code(gridfix::calc),
        help("Give two of --distance, --speed and --time")
    )]
    MissingInput(&'static str),

    #[error("Cannot read {}: {source}", path.display())]
    #[diagnostic(code(gridfix::config))]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid settings in {}: {source}", path.display())]
    #[diagnostic(code(gridfix::config))]
    ConfigFormat {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Cannot write output: {0}")]
    Output(#[from] serde_json::Error),
}
