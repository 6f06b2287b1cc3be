//! CLI command definitions and handlers

use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

use std::path::PathBuf;

use crate::client::{ApiClient, HttpUploadChannel};
use crate::config::Config;
use crate::error::{Error, Result};

pub mod init;
pub mod project;
pub mod scan;
pub mod status;

/// Output format options
#[derive(Debug, Clone, Copy, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// Table format - one row per record (default)
    #[default]
    Table,
    /// List format - key/value block per record
    List,
    /// JSON format - structured for scripts/APIs
    Json,
}

/// ScanOps CLI - companion for the ScanOps security analysis platform
#[derive(Parser, Debug)]
#[command(name = "scanops")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, list, json)
    #[arg(
        long,
        global = true,
        env = "SCANOPS_FORMAT",
        default_value = "table",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "SCANOPS_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override platform base URL
    #[arg(long, global = true, env = "SCANOPS_API_HOST", hide_env = true)]
    pub base_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize ScanOps configuration
    Init,

    /// Show configuration status
    Status,

    /// Display version information
    Version,

    /// Manage scans
    #[command(subcommand)]
    Scan(ScanCommands),

    /// Manage projects
    #[command(subcommand)]
    Project(ProjectCommands),

    /// Generate shell completions
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Scan management subcommands
#[derive(Subcommand, Debug)]
pub enum ScanCommands {
    /// Create and run a new scan
    Create(ScanCreateArgs),

    /// List all scans in the system
    List {
        /// Filter the list, as key=value pairs; use ';' inside a value for arrays
        #[arg(long = "filter")]
        filters: Vec<String>,
    },

    /// Show information about a scan
    Show {
        /// Scan ID
        scan_id: String,
    },

    /// Show information about a scan workflow
    Workflow {
        /// Scan ID
        scan_id: String,
    },

    /// Delete one or more scans
    Delete {
        /// Scan IDs to delete
        #[arg(required = true)]
        scan_ids: Vec<String>,
    },

    /// Cancel one or more scans from running
    Cancel {
        /// Scan IDs to cancel
        #[arg(required = true)]
        scan_ids: Vec<String>,
    },

    /// Get a list of all available tags to filter by
    Tags,
}

/// Arguments for `scan create`
#[derive(Args, Debug, Default)]
pub struct ScanCreateArgs {
    /// A file holding the requested scan object in JSON format. Takes precedence over --input
    #[arg(long = "input-file")]
    pub input_file: Option<PathBuf>,

    /// The requested scan object, inline JSON
    #[arg(long)]
    pub input: Option<String>,

    /// A path to a pre-built sources archive to scan
    #[arg(long, short = 's')]
    pub sources: Option<PathBuf>,

    /// A path to a directory with sources to scan
    #[arg(long = "source-dir", short = 'd')]
    pub source_dir: Option<PathBuf>,

    /// Source file GLOB filtering patterns, comma separated
    #[arg(long)]
    pub filter: Option<String>,

    /// Source file exclusion patterns, comma separated
    #[arg(long)]
    pub exclusion: Option<String>,

    /// Name of the project
    #[arg(long = "project-name")]
    pub project_name: Option<String>,

    /// Type of project source: upload
    #[arg(long = "project-source-type")]
    pub project_source_type: Option<String>,

    /// Type of project: sast
    #[arg(long = "project-type")]
    pub project_type: Option<String>,

    /// Whether an incremental scan should be performed, defaults to false
    #[arg(long)]
    pub incremental: Option<String>,

    /// The name of the analysis preset to use
    #[arg(long = "preset-name")]
    pub preset_name: Option<String>,
}

/// Project management subcommands
#[derive(Subcommand, Debug)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        /// A file holding the requested project object in JSON format. Takes precedence over --input
        #[arg(long = "input-file")]
        input_file: Option<PathBuf>,

        /// The requested project object, inline JSON
        #[arg(long)]
        input: Option<String>,
    },

    /// List all projects in the system
    List {
        /// Filter the list, as key=value pairs
        #[arg(long = "filter")]
        filters: Vec<String>,
    },

    /// Show information about a project
    Show {
        /// Project ID
        project_id: String,
    },

    /// Delete one or more projects
    Delete {
        /// Project IDs to delete
        #[arg(required = true)]
        project_ids: Vec<String>,
    },

    /// Get a list of all available tags to filter by
    Tags,
}

/// Context for command execution containing the clients and runtime options
pub struct CommandContext {
    pub client: ApiClient,
    pub channel: HttpUploadChannel,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load configuration, resolve the API host, and build the clients.
    ///
    /// Host precedence: `--base-url` flag (or `SCANOPS_API_HOST`) over the
    /// config file over the hosted default.
    pub fn new(
        format: OutputFormat,
        base_url: Option<&str>,
        config_path: Option<&str>,
    ) -> Result<Self> {
        let config = Config::load_at(config_path)?;
        let host = base_url
            .map(str::to_string)
            .or_else(|| config.base_url.clone());

        let client = ApiClient::with_host(config.api_key.clone(), host.clone())?;
        let channel = HttpUploadChannel::new(config.api_key, host)?;

        Ok(Self {
            client,
            channel,
            format,
        })
    }
}

/// Parse `key=value` filter expressions into query parameters
pub(crate) fn parse_filter_params(values: &[String]) -> Result<Vec<(String, String)>> {
    values
        .iter()
        .map(|raw| {
            raw.split_once('=')
                .map(|(key, value)| (key.trim().to_string(), value.to_string()))
                .ok_or_else(|| {
                    Error::Other(format!("Invalid filter expression: {raw} (expected key=value)"))
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_params() {
        let params = parse_filter_params(&[
            "limit=40".to_string(),
            "statuses=Queued;Running".to_string(),
        ])
        .unwrap();

        assert_eq!(params[0], ("limit".to_string(), "40".to_string()));
        assert_eq!(
            params[1],
            ("statuses".to_string(), "Queued;Running".to_string())
        );
    }

    #[test]
    fn test_parse_filter_params_rejects_missing_equals() {
        let err = parse_filter_params(&["limit".to_string()]).unwrap_err();
        assert!(err.to_string().contains("limit"));
    }

    #[test]
    fn test_cli_parses_scan_create_flags() {
        let cli = Cli::parse_from([
            "scanops",
            "scan",
            "create",
            "--input",
            "{}",
            "--source-dir",
            "/tmp/src",
            "--filter",
            "*.go,*.java",
            "--exclusion",
            "*.log",
            "--project-name",
            "p1",
        ]);

        match cli.command {
            Commands::Scan(ScanCommands::Create(args)) => {
                assert_eq!(args.input.as_deref(), Some("{}"));
                assert_eq!(args.filter.as_deref(), Some("*.go,*.java"));
                assert_eq!(args.exclusion.as_deref(), Some("*.log"));
                assert_eq!(args.project_name.as_deref(), Some("p1"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_requires_ids_for_delete() {
        assert!(Cli::try_parse_from(["scanops", "scan", "delete"]).is_err());
    }
}
