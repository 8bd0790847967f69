//! rdoc-osa - generates API documentation for a scriptable application.

use std::{env, process::ExitCode};

use rdoc_osa::{
    app,
    cli::{
        CliError, Invocation,
        formatting::{format_error, format_usage},
        usage,
    },
    config::Config,
    dictionary::SdefReflection,
    tracing_config,
};
use tracing::{Level, debug, span, warn};

fn main() -> ExitCode {
    let mut args = env::args();
    let program = args.next().unwrap_or_else(|| "rdoc-osa".to_string());
    let args: Vec<String> = args.collect();

    let invocation = match Invocation::parse(&args) {
        Ok(invocation) => invocation,
        Err(CliError::HelpRequested) => {
            eprintln!("{}", usage(&program));
            return ExitCode::FAILURE;
        }
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            eprintln!("{}", format_usage(&usage(&program)));
            return ExitCode::FAILURE;
        }
    };

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error(&e.to_string()));
            return ExitCode::FAILURE;
        }
    };

    let _guard = match tracing_config::init(&config.logging) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("warning: logging disabled: {e}");
            None
        }
    };

    let _span = span!(Level::INFO, "rdoc_osa").entered();
    debug!(?invocation, "starting");

    let reflection = SdefReflection::new(&config.dictionary);
    match app::run(&invocation, &config, &reflection) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            warn!(error = %e, "documentation generation failed");
            eprintln!("{}", format_error(&e.to_string()));
            ExitCode::FAILURE
        }
    }
}
