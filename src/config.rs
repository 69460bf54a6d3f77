//! Configuration module for pdfmerge.
//!
//! This module turns CLI arguments into a validated [`Config`] that drives the
//! HTTP service. Every option has a default, so running the binary without
//! arguments reproduces the fixed behavior: port 3000, the current directory
//! as workspace root, at most ten files per request and one output file per
//! request.

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

use crate::cli::Cli;
use crate::{MAX_MERGE_FILES, MIN_MERGE_FILES};

/// Default listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Default bind address.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Default request body limit (100 MiB).
pub const DEFAULT_MAX_UPLOAD_SIZE: usize = 100 * 1024 * 1024;

/// Where merged outputs are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One uniquely named output per request.
    #[default]
    PerRequest,
    /// A single `public/merged.pdf` shared by all requests.
    ///
    /// Concurrent merges overwrite and delete each other's output. Only
    /// meant for compatibility testing against the legacy service.
    Shared,
}

/// Complete configuration of the merge service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind to.
    pub host: String,

    /// Port to listen on. Zero picks an ephemeral port.
    pub port: u16,

    /// Directory containing `uploads/`, `public/` and `templates/`.
    pub root: PathBuf,

    /// Maximum number of `pdf` file parts accepted per request.
    pub max_files: usize,

    /// Maximum request body size in bytes.
    pub max_upload_size: usize,

    /// Output placement strategy.
    pub output_mode: OutputMode,

    /// Verbose logging.
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            root: PathBuf::from("."),
            max_files: MAX_MERGE_FILES,
            max_upload_size: DEFAULT_MAX_UPLOAD_SIZE,
            output_mode: OutputMode::default(),
            verbose: false,
        }
    }
}

impl Config {
    /// Create a configuration rooted at `root` with every other option defaulted.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            ..Self::default()
        }
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `max_files` is below the two-file minimum of a merge
    /// - `max_upload_size` is zero
    /// - `host` and `port` do not form a socket address
    pub fn validate(&self) -> Result<()> {
        if self.max_files < MIN_MERGE_FILES {
            bail!(
                "Maximum number of files must be at least {MIN_MERGE_FILES}, got {}",
                self.max_files
            );
        }

        if self.max_upload_size == 0 {
            bail!("Maximum upload size must be greater than zero");
        }

        self.socket_addr()?;

        Ok(())
    }

    /// The address the server binds to.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("Invalid listen address: {}:{}", self.host, self.port))
    }
}

impl TryFrom<&Cli> for Config {
    type Error = anyhow::Error;

    fn try_from(cli: &Cli) -> Result<Self> {
        let output_mode = if cli.shared_output {
            OutputMode::Shared
        } else {
            OutputMode::PerRequest
        };

        let config = Self {
            host: cli.host.clone(),
            port: cli.port,
            root: cli.root.clone(),
            max_files: cli.max_files,
            max_upload_size: cli.max_upload_size,
            output_mode,
            verbose: cli.verbose,
        };

        config.validate()?;
        Ok(config)
    }
}
