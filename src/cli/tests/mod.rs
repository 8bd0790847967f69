//! Unit tests for CLI module
//!
//! Tests argument parsing, selector dispatch and usage text.

#![allow(clippy::panic)]
#![allow(clippy::unwrap_used)]

use std::cell::RefCell;

use crate::{
    Result,
    cli::{CliError, Invocation, Selector, formatting::format_error, usage},
    dictionary::{ApplicationHandle, InterfaceModule, Reflection},
};

fn args(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

/// Records which lookup was called with which criterion.
#[derive(Default)]
struct RecordingReflection {
    calls: RefCell<Vec<(&'static str, String)>>,
}

impl RecordingReflection {
    fn record(&self, lookup: &'static str, criterion: &str) -> Result<ApplicationHandle> {
        self.calls.borrow_mut().push((lookup, criterion.to_string()));
        Ok(ApplicationHandle::new(criterion, "/Applications"))
    }
}

impl Reflection for RecordingReflection {
    fn app_with_name(&self, name: &str) -> Result<ApplicationHandle> {
        self.record("name", name)
    }

    fn app_with_path(&self, path: &str) -> Result<ApplicationHandle> {
        self.record("path", path)
    }

    fn app_with_bundle_id(&self, bundle_id: &str) -> Result<ApplicationHandle> {
        self.record("bundle_id", bundle_id)
    }

    fn app_with_signature(&self, signature: &str) -> Result<ApplicationHandle> {
        self.record("signature", signature)
    }

    fn interface_module(&self, _handle: &ApplicationHandle) -> Result<InterfaceModule> {
        Ok(InterfaceModule::default())
    }
}

#[test]
fn parse_selector_and_criterion() {
    let invocation = Invocation::parse(&args(&["--name", "iTunes"])).unwrap();

    assert_eq!(invocation.selector, Selector::Name);
    assert_eq!(invocation.criterion, "iTunes");
    assert!(invocation.passthrough.is_empty());
}

#[test]
fn parse_collects_passthrough_in_order() {
    let invocation =
        Invocation::parse(&args(&["--bundle_id", "com.apple.iTunes", "--ri", "-o", "out"])).unwrap();

    assert_eq!(invocation.selector, Selector::BundleId);
    assert_eq!(invocation.passthrough, args(&["--ri", "-o", "out"]));
}

#[test]
fn parse_requires_two_arguments() {
    assert_eq!(Invocation::parse(&[]), Err(CliError::MissingArguments(0)));
    assert_eq!(
        Invocation::parse(&args(&["--name"])),
        Err(CliError::MissingArguments(1))
    );
}

#[test]
fn parse_rejects_unknown_selector() {
    let result = Invocation::parse(&args(&["--title", "iTunes"]));

    assert_eq!(result, Err(CliError::UnknownSelector("--title".to_string())));
}

#[test]
fn parse_help() {
    assert_eq!(
        Invocation::parse(&args(&["--help"])),
        Err(CliError::HelpRequested)
    );
    assert_eq!(
        Invocation::parse(&args(&["-h", "x"])),
        Err(CliError::HelpRequested)
    );
}

#[test]
fn selector_flags_round_trip() {
    for selector in [
        Selector::Name,
        Selector::Path,
        Selector::BundleId,
        Selector::Signature,
    ] {
        assert_eq!(selector.flag().parse::<Selector>(), Ok(selector));
    }
}

#[test]
fn selector_dispatches_to_matching_lookup() {
    let reflection = RecordingReflection::default();

    Selector::Name.resolve(&reflection, "iTunes").unwrap();
    Selector::Path.resolve(&reflection, "/Applications/iTunes.app").unwrap();
    Selector::BundleId.resolve(&reflection, "com.apple.iTunes").unwrap();
    Selector::Signature.resolve(&reflection, "hook").unwrap();

    let calls = reflection.calls.borrow();
    let lookups: Vec<&str> = calls.iter().map(|(lookup, _)| *lookup).collect();
    assert_eq!(lookups, ["name", "path", "bundle_id", "signature"]);
    assert_eq!(calls[3].1, "hook");
}

#[test]
fn usage_names_program_and_selectors() {
    let text = usage("rdoc-osa");

    assert!(text.starts_with(
        "Usage: rdoc-osa [--name | --path | --bundle_id | --signature] <criterion> [rdoc-options...]"
    ));
    assert!(text.contains("    rdoc-osa --name iTunes --ri"));
    assert!(text.ends_with("See rdoc --help for additional options."));
}

#[test]
fn format_error_wraps_text() {
    let formatted = format_error("boom");

    assert!(formatted.contains("boom"));
    assert!(formatted.ends_with("\x1b[0m"));
}
