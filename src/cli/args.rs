use std::{fmt, str::FromStr};

use super::CliError;
use crate::{
    Result,
    dictionary::{ApplicationHandle, Reflection},
};

/// How the target application is identified on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector {
    /// `--name`: the application's display name.
    Name,
    /// `--path`: a bundle or dictionary path.
    Path,
    /// `--bundle_id`: a bundle identifier.
    BundleId,
    /// `--signature`: a four-character creator code.
    Signature,
}

impl Selector {
    /// The command-line flag for this selector.
    pub fn flag(&self) -> &'static str {
        match self {
            Selector::Name => "--name",
            Selector::Path => "--path",
            Selector::BundleId => "--bundle_id",
            Selector::Signature => "--signature",
        }
    }

    /// Resolves `criterion` through the matching reflection lookup.
    ///
    /// # Errors
    ///
    /// Propagates the lookup's resolution error.
    pub fn resolve(&self, reflection: &dyn Reflection, criterion: &str) -> Result<ApplicationHandle> {
        match self {
            Selector::Name => reflection.app_with_name(criterion),
            Selector::Path => reflection.app_with_path(criterion),
            Selector::BundleId => reflection.app_with_bundle_id(criterion),
            Selector::Signature => reflection.app_with_signature(criterion),
        }
    }
}

impl FromStr for Selector {
    type Err = CliError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "--name" => Ok(Selector::Name),
            "--path" => Ok(Selector::Path),
            "--bundle_id" => Ok(Selector::BundleId),
            "--signature" => Ok(Selector::Signature),
            "-h" | "--help" => Err(CliError::HelpRequested),
            other => Err(CliError::UnknownSelector(other.to_string())),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag())
    }
}

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    /// How `criterion` is interpreted.
    pub selector: Selector,
    /// Name, path, bundle identifier or signature of the application.
    pub criterion: String,
    /// Everything after the criterion, forwarded to the generator as is.
    pub passthrough: Vec<String>,
}

impl Invocation {
    /// Parses the arguments following the program name.
    ///
    /// # Errors
    ///
    /// Returns `CliError` if fewer than two arguments are given or the first
    /// one is not a known selector.
    pub fn parse(args: &[String]) -> std::result::Result<Self, CliError> {
        if let Some(first) = args.first() {
            if first == "-h" || first == "--help" {
                return Err(CliError::HelpRequested);
            }
        }

        let [selector, criterion, passthrough @ ..] = args else {
            return Err(CliError::MissingArguments(args.len()));
        };

        Ok(Self {
            selector: selector.parse()?,
            criterion: criterion.clone(),
            passthrough: passthrough.to_vec(),
        })
    }
}

/// Usage text printed on argument errors.
pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--name | --path | --bundle_id | --signature] <criterion> [rdoc-options...]\n\
         Examples:\n\
         \x20   # Generate HTML documentation for iTunes:\n\
         \x20   {program} --name iTunes\n\
         \x20   # Generate RI documentation for iTunes:\n\
         \x20   {program} --name iTunes --ri\n\
         See rdoc --help for additional options."
    )
}
