//! Error types for plugin publishing.
//!
//! Every failure is fatal to a publish run. Step failures keep the original
//! cause so the top-level caller sees the first error unchanged.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for publish operations
pub type Result<T> = std::result::Result<T, PublishError>;

/// Main error type for all publish operations
#[derive(Error, Debug)]
pub enum PublishError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Transport-level HTTP errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The platform answered with a non-success status
    #[error("{method} {url} returned {status}: {body}")]
    Status {
        /// Request method
        method: String,
        /// Request URL
        url: String,
        /// Response status code
        status: u16,
        /// Response body text (may be empty)
        body: String,
    },

    /// A response was missing fields the flow depends on
    #[error("Unexpected response from {endpoint}: {reason}")]
    InvalidResponse {
        /// Endpoint that produced the response
        endpoint: String,
        /// What was wrong with it
        reason: String,
    },

    /// Plugin manifest could not be used
    #[error("Manifest error in {}: {reason}", .path.display())]
    Manifest {
        /// Manifest file path
        path: PathBuf,
        /// Reason for the error
        reason: String,
    },

    /// Account credentials are unusable
    #[error("Invalid credentials: {reason}")]
    Credentials {
        /// Reason for the error
        reason: String,
    },

    /// A publish step failed; `source` is the original cause
    #[error("{step} failed: {source}")]
    Step {
        /// Step that failed
        step: Step,
        /// Original cause
        #[source]
        source: Box<PublishError>,
    },
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },

    /// Missing required argument
    #[error("Missing required argument: {argument}")]
    MissingArgument {
        /// Argument name
        argument: String,
    },
}

/// The ordered steps of a publish run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Bootstrap,
    Login,
    ResolveResource,
    RequestUploadLinks,
    UpdateSettings,
    BuildBundle,
    UploadBundle,
    PublishVersion,
}

impl Step {
    /// All steps in execution order.
    pub const ALL: [Step; 8] = [
        Step::Bootstrap,
        Step::Login,
        Step::ResolveResource,
        Step::RequestUploadLinks,
        Step::UpdateSettings,
        Step::BuildBundle,
        Step::UploadBundle,
        Step::PublishVersion,
    ];

    /// Short label used in diagnostics ("Error <action>: ...").
    pub fn action(self) -> &'static str {
        match self {
            Step::Bootstrap => "fetching team files",
            Step::Login => "logging in",
            Step::ResolveResource => "getting plugin resources",
            Step::RequestUploadLinks => "getting upload links",
            Step::UpdateSettings => "updating plugin settings",
            Step::BuildBundle => "building code bundle",
            Step::UploadBundle => "uploading code",
            Step::PublishVersion => "publishing version",
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Bootstrap => "Session bootstrap",
            Step::Login => "Login",
            Step::ResolveResource => "Plugin resource lookup",
            Step::RequestUploadLinks => "Upload link request",
            Step::UpdateSettings => "Settings update",
            Step::BuildBundle => "Bundle build",
            Step::UploadBundle => "Bundle upload",
            Step::PublishVersion => "Version publish",
        };
        f.write_str(name)
    }
}

impl PublishError {
    /// The step a failure is attributed to, if it came out of the flow.
    pub fn step(&self) -> Option<Step> {
        match self {
            PublishError::Step { step, .. } => Some(*step),
            _ => None,
        }
    }

    /// The original cause, unwrapping the step wrapper.
    pub fn root(&self) -> &PublishError {
        match self {
            PublishError::Step { source, .. } => source.root(),
            other => other,
        }
    }

    pub(crate) fn invalid_response(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        PublishError::InvalidResponse {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }
}
