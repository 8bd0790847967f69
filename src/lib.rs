//! rdoc-osa - API documentation for scriptable applications.
//!
//! Resolves an application by name, path, bundle identifier or signature,
//! reads its scripting dictionary and renders it as a Ruby stub of the
//! `OSA::<App>` module. The stub is handed to `rdoc`, together with any
//! extra generator flags, and removed afterwards.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use rdoc_osa::{app, cli::Invocation, config::Config, dictionary::SdefReflection};
//!
//! let args = vec!["--name".to_string(), "TextEdit".to_string(), "--ri".to_string()];
//! let invocation = Invocation::parse(&args)?;
//! let config = Config::default();
//! let reflection = SdefReflection::new(&config.dictionary);
//!
//! app::run(&invocation, &config, &reflection)?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

/// Application resolution and documentation generation pipeline.
pub mod app;

/// Command-line argument parsing.
pub mod cli;

/// Configuration schema definitions and loading.
pub mod config;

/// Core error types and result aliases.
pub mod core;

/// Scripting dictionaries and their reflection into interface modules.
pub mod dictionary;

/// Stub rendering and generator invocation.
pub mod docs;

/// Installation of the command and its support script.
pub mod install;

/// Logging setup.
pub mod tracing_config;

/// Re-exported core types for convenience.
pub use core::{RdocOsaError, Result};
