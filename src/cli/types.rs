use thiserror::Error;

/// Errors in the command-line arguments.
///
/// Any of these ends the run with the usage message and exit status 1,
/// before anything else is done.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CliError {
    /// Fewer than a selector and a criterion were given.
    ///
    /// Holds the number of arguments that were supplied.
    #[error("expected a selector and a criterion, got {0} argument(s)")]
    MissingArguments(usize),

    /// The first argument is not one of the known selectors.
    #[error("unknown selector: {0}")]
    UnknownSelector(String),

    /// Help was requested explicitly.
    #[error("help requested")]
    HelpRequested,
}
