//! Command-line interface.
//!
//! `rdoc-osa [--name | --path | --bundle_id | --signature] <criterion> [rdoc-options...]`
//!
//! Arguments are taken positionally so that any generator flag can follow
//! the criterion untouched.

mod args;
pub mod formatting;
mod types;

#[cfg(test)]
mod tests;

pub use args::{Invocation, Selector, usage};
pub use types::CliError;
