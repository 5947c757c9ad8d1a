//! Unattended plugin publishing for CI
//!
//! This library drives the whole publish sequence of a design-platform
//! plugin:
//! - session bootstrap and one-time-code login
//! - plugin metadata lookup
//! - code bundle synthesis from the manifest's `ui` and `main` sources
//! - signed upload and version publish
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod cli;
pub mod error;
pub mod manifest;
pub mod publish;

// Re-export commonly used types
pub use error::{CliError, PublishError, Result, Step};
