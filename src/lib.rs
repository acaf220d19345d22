//! Cursor ID modifier - rewrites the telemetry identifiers in Cursor's
//! `storage.json` without disturbing the rest of the file.
//!
//! The core is [`storage::StorageManager`], which merges a full set of
//! identifiers into the JSON document and replaces the file atomically,
//! optionally leaving it read-only. [`platform::resolve`] works out where
//! the file lives for a given user and OS.

pub mod cli;
pub mod config;
pub mod error;
pub mod lang;
pub mod platform;
pub mod storage;
pub mod validation;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::cli::{Cli, Commands, StorageCommand, WriteArgs};
use crate::config::Settings;
use crate::error::{SettingsError, StorageError};
use crate::lang::{Console, Language};
use crate::platform::{Environment, PathHints, Platform, SystemEnvironment};
use crate::storage::{FileMode, StorageManager, TelemetryIds};

/// Runs the tool with the provided CLI arguments.
///
/// Failures are reported on the console before being returned.
pub fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.log_level())?;

    let env = SystemEnvironment;
    let platform = Platform::current();
    let mut console = Console::new(Language::detect(&env));

    let result = dispatch(&cli, &platform, &env, &mut console);
    if let Err(e) = &result {
        let program = std::env::args()
            .next()
            .unwrap_or_else(|| "cursor-id-modifier".to_string());
        for line in failure_lines(&console, &platform, e, &program) {
            console.warn(line);
        }
    }
    result
}

fn dispatch(
    cli: &Cli,
    platform: &Platform,
    env: &dyn Environment,
    console: &mut Console,
) -> Result<()> {
    let command = match &cli.command {
        Commands::SettingsValidate => return validate_settings(&cli.config),
        Commands::Storage(command) => command,
    };

    let settings = config::load_and_validate(&cli.config)?;
    *console = Console::new(select_language(cli.lang.as_deref(), &settings, env)?);
    debug!(%platform, language = %console.language(), ?command, "Starting");

    execute(command, cli.user.as_deref(), &settings, platform, env, console)
}

/// Initializes the tracing subscriber for structured logging on stderr.
fn setup_logging(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    Ok(())
}

/// Picks the console language: command line, then settings, then locale.
fn select_language(
    flag: Option<&str>,
    settings: &Settings,
    env: &dyn Environment,
) -> Result<Language, SettingsError> {
    match flag.or(settings.language.as_deref()) {
        Some(code) => code.parse(),
        None => Ok(Language::detect(env)),
    }
}

/// Works out which storage.json to operate on.
///
/// `user` is the `--user` flag; it wins over the settings file.
fn storage_path(
    user: Option<&str>,
    settings: &Settings,
    platform: &Platform,
    env: &dyn Environment,
) -> Result<PathBuf, StorageError> {
    if let Some(path) = &settings.storage_path {
        return Ok(path.clone());
    }

    let user = user.or(settings.username.as_deref());
    let hints = PathHints::from_env(env, user);
    platform::resolve(platform, &hints, &settings.app_name)
}

fn execute(
    command: &StorageCommand,
    user: Option<&str>,
    settings: &Settings,
    platform: &Platform,
    env: &dyn Environment,
    console: &Console,
) -> Result<()> {
    let path = storage_path(user, settings, platform, env)?;
    let manager = StorageManager::new(path);

    match command {
        StorageCommand::Path => {
            console.say(manager.path().display());
            Ok(())
        }
        StorageCommand::Show => show(&manager, console),
        StorageCommand::Write(args) => write(&manager, args, settings.read_only, console),
        StorageCommand::Lock => set_mode(&manager, FileMode::Locked, console),
        StorageCommand::Unlock => set_mode(&manager, FileMode::Writable, console),
    }
}

/// Displays the identifiers currently stored.
fn show(manager: &StorageManager, console: &Console) -> Result<()> {
    let messages = console.messages();
    console.say(console.config_location(manager.path()));
    console.say(messages.reading_config);

    match manager.read()? {
        Some(config) => console.say(console.storage_summary(&config)),
        None => console.say(messages.no_document),
    }

    Ok(())
}

/// Writes a full identifier set supplied on the command line.
fn write(
    manager: &StorageManager,
    args: &WriteArgs,
    read_only_default: bool,
    console: &Console,
) -> Result<()> {
    let messages = console.messages();
    let ids = TelemetryIds {
        machine_id: args.machine_id.clone(),
        mac_machine_id: args.mac_machine_id.clone(),
        dev_device_id: args.dev_device_id.clone(),
        sqm_id: args.sqm_id.clone(),
    };
    let mode = FileMode::from_read_only(args.read_only || read_only_default);

    console.say(console.config_location(manager.path()));
    console.say(messages.writing_config);

    manager.write(&ids, mode)?;
    info!(path = %manager.path().display(), locked = mode.is_locked(), "Identifiers written");

    console.say(messages.success);
    if mode.is_locked() {
        console.say(messages.read_only_warning);
    }
    console.say(messages.restart);

    Ok(())
}

/// Rewrites the stored identifiers unchanged, only switching the file mode.
///
/// Refuses to touch a file that lacks any of the four identifiers.
fn set_mode(manager: &StorageManager, mode: FileMode, console: &Console) -> Result<()> {
    let messages = console.messages();
    let path = manager.path().display();

    let config = manager
        .read()?
        .with_context(|| format!("{}: {}", messages.no_document, path))?;
    let ids = config
        .complete_ids()
        .with_context(|| format!("{}: {}", messages.missing_ids, path))?;

    manager.write(&ids, mode)?;
    info!(%path, locked = mode.is_locked(), "File mode changed");

    if mode.is_locked() {
        console.say(messages.locked);
        console.say(messages.read_only_warning);
    } else {
        console.say(messages.unlocked);
    }
    console.say(messages.operation_completed);

    Ok(())
}

/// Validates the settings file and prints the report.
fn validate_settings(path: &Path) -> Result<()> {
    let settings = config::load_from_path(path)?;
    let report = validation::check(&settings);

    println!("{}", validation::report::render(&report, path));

    if !report.is_accepted() {
        anyhow::bail!(SettingsError::ValidationFailed {
            error_count: report.error_count()
        });
    }

    Ok(())
}

/// Localized failure text, plus privilege hints when access was denied.
fn failure_lines(
    console: &Console,
    platform: &Platform,
    error: &anyhow::Error,
    program: &str,
) -> Vec<String> {
    let mut lines = vec![console.error(format!("{:#}", error))];

    if let Some(denied) = error
        .downcast_ref::<StorageError>()
        .filter(|e| e.is_permission_denied())
    {
        if let Some(path) = denied.path() {
            lines.push(console.config_location(path));
        }
        lines.extend(console.privilege_hints(platform, program));
    }

    lines
}
