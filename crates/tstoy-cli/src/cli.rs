//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tstoy_config::{Ensure, Frequency, Scope, ScopePaths, Settings};

/// Manage tstoy settings files as declarative resources
#[derive(Parser, Debug)]
#[command(name = "tstoy-resource")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub settings: SettingsArgs,

    /// Settings as a JSON object instead of the individual flags.
    /// Read from stdin when piped and this flag is not given.
    #[arg(long, alias = "inputJSON", value_name = "JSON", global = true)]
    pub input: Option<String>,

    /// Directory holding the machine-wide settings file
    #[arg(long, env = "TSTOY_MACHINE_CONFIG_DIR", global = true)]
    pub machine_config_dir: Option<PathBuf>,

    /// Directory holding the per-user settings file
    #[arg(long, env = "TSTOY_USER_CONFIG_DIR", global = true)]
    pub user_config_dir: Option<PathBuf>,

    /// The command to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Platform scope directories with any overrides applied.
    pub fn scope_paths(&self) -> ScopePaths {
        ScopePaths::new()
            .with_machine_dir(self.machine_config_dir.clone())
            .with_user_dir(self.user_config_dir.clone())
    }
}

/// Individual settings flags. Each one overrides the matching field of
/// any JSON input.
#[derive(Args, Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsArgs {
    /// The target scope for the configuration (machine or user)
    #[arg(long, global = true)]
    pub scope: Option<Scope>,

    /// Whether the configuration file should exist (present or absent)
    #[arg(long, global = true)]
    pub ensure: Option<Ensure>,

    /// Whether tstoy should check for updates on start
    #[arg(
        long = "updateAutomatically",
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true",
        value_name = "BOOL"
    )]
    pub update_automatically: Option<bool>,

    /// Days between update checks, 1 to 90 inclusive; 0 leaves it unset
    #[arg(
        long = "updateFrequency",
        global = true,
        allow_negative_numbers = true,
        value_name = "DAYS"
    )]
    pub update_frequency: Option<i64>,
}

impl SettingsArgs {
    /// Layer the explicitly given flags over `base`.
    pub fn apply(&self, mut base: Settings) -> tstoy_config::Result<Settings> {
        if let Some(scope) = self.scope {
            base.scope = Some(scope);
        }
        if let Some(ensure) = self.ensure {
            base.ensure = Some(ensure);
        }
        if let Some(automatic) = self.update_automatically {
            base.update_automatically = Some(automatic);
        }
        if let Some(days) = self.update_frequency
            && let Some(frequency) = Frequency::requested(days)?
        {
            base.update_frequency = Some(frequency);
        }
        Ok(base)
    }
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print the current state of a settings file as JSON
    ///
    /// The scope comes from --all, then --scope, then the JSON input.
    Get {
        /// Print every scope, machine first, one JSON object per line
        #[arg(long)]
        all: bool,
    },

    /// Bring a settings file to the desired state and print the result
    Set,

    /// Report whether a settings file is in the desired state, without
    /// changing it
    Test,

    /// Print the JSON schema for resource input
    Schema,

    /// Print the settings file path for each scope
    ShowPath {
        /// Scopes to show; both when omitted
        scopes: Vec<Scope>,
    },
}
