//! Command-line interface definitions.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Rewrites the telemetry identifiers in Cursor's storage.json.
#[derive(Parser, Debug)]
#[command(name = "cursor-id-modifier", version, about, long_about = None)]
pub struct Cli {
    /// Path to the tool settings file.
    #[arg(
        short,
        long,
        default_value = "cursor-id-modifier.yaml",
        env = "CURSOR_ID_CONFIG",
        global = true
    )]
    pub config: PathBuf,

    /// Account whose storage.json is targeted (macOS and Linux).
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Console language (en, cn, pt_br). Detected from the locale by default.
    #[arg(long, global = true)]
    pub lang: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Returns the log level based on verbosity flags.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    #[command(flatten)]
    Storage(StorageCommand),

    /// Validate the settings file without touching storage.json.
    #[command(name = "settings-validate")]
    SettingsValidate,
}

/// Subcommands that operate on storage.json.
#[derive(Subcommand, Debug)]
pub enum StorageCommand {
    /// Print the resolved storage.json location.
    Path,

    /// Show the identifiers currently stored.
    Show,

    /// Write a new set of identifiers.
    Write(WriteArgs),

    /// Make storage.json read-only, keeping the current identifiers.
    Lock,

    /// Make storage.json writable, keeping the current identifiers.
    Unlock,
}

/// Arguments for the write subcommand.
#[derive(Args, Debug)]
pub struct WriteArgs {
    /// Value for telemetry.machineId.
    #[arg(long)]
    pub machine_id: String,

    /// Value for telemetry.macMachineId.
    #[arg(long)]
    pub mac_machine_id: String,

    /// Value for telemetry.devDeviceId.
    #[arg(long)]
    pub dev_device_id: String,

    /// Value for telemetry.sqmId.
    #[arg(long)]
    pub sqm_id: String,

    /// Leave storage.json read-only afterwards.
    #[arg(long)]
    pub read_only: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_write() {
        let cli = Cli::try_parse_from([
            "cursor-id-modifier",
            "-vv",
            "write",
            "--machine-id",
            "m",
            "--mac-machine-id",
            "mac",
            "--dev-device-id",
            "d",
            "--sqm-id",
            "s",
            "--read-only",
        ])
        .unwrap();

        assert_eq!(cli.log_level(), "debug");
        match cli.command {
            Commands::Storage(StorageCommand::Write(args)) => {
                assert_eq!(args.machine_id, "m");
                assert_eq!(args.sqm_id, "s");
                assert!(args.read_only);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_read_only_defaults_to_false() {
        let cli = Cli::try_parse_from([
            "cursor-id-modifier",
            "write",
            "--machine-id",
            "m",
            "--mac-machine-id",
            "mac",
            "--dev-device-id",
            "d",
            "--sqm-id",
            "s",
        ])
        .unwrap();

        match cli.command {
            Commands::Storage(StorageCommand::Write(args)) => assert!(!args.read_only),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_settings_validate_is_not_a_storage_command() {
        let cli = Cli::try_parse_from(["cursor-id-modifier", "settings-validate"]).unwrap();
        assert!(matches!(cli.command, Commands::SettingsValidate));
    }

    #[test]
    fn test_write_requires_every_identifier() {
        let result = Cli::try_parse_from(["cursor-id-modifier", "write", "--machine-id", "m"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_global_user_after_subcommand() {
        let cli = Cli::try_parse_from(["cursor-id-modifier", "show", "--user", "alice"]).unwrap();
        assert_eq!(cli.user.as_deref(), Some("alice"));
        assert!(matches!(cli.command, Commands::Storage(StorageCommand::Show)));
    }
}
