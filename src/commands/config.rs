use clap::{Args, Subcommand};
use serde::Serialize;

use markswap::defaults::{self, Defaults, MarkswapConfig};

use super::CmdResult;

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Display configuration (file merged over built-in defaults)
    Show {
        /// Show only built-in defaults (ignore markswap.json)
        #[arg(long)]
        builtin: bool,
    },
    /// Set default options
    Set {
        /// Default for --case-sensitive
        #[arg(long, value_name = "BOOL")]
        case_sensitive: Option<bool>,
        /// Default for --whole-words
        #[arg(long, value_name = "BOOL")]
        whole_words: Option<bool>,
        /// Default for --write
        #[arg(long, value_name = "BOOL")]
        write: Option<bool>,
    },
    /// Reset configuration to built-in defaults (deletes markswap.json)
    Reset,
    /// Show the path to markswap.json
    Path,
}

#[derive(Debug, Serialize)]
pub struct ConfigOutput {
    command: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    config: Option<MarkswapConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    defaults: Option<Defaults>,
    #[serde(skip_serializing_if = "Option::is_none")]
    path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exists: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deleted: Option<bool>,
}

impl ConfigOutput {
    fn new(command: &'static str) -> Self {
        Self {
            command,
            config: None,
            defaults: None,
            path: None,
            exists: None,
            deleted: None,
        }
    }
}

pub fn run(args: ConfigArgs) -> CmdResult<ConfigOutput> {
    match args.command {
        ConfigCommand::Show { builtin } => show(builtin),
        ConfigCommand::Set {
            case_sensitive,
            whole_words,
            write,
        } => set(case_sensitive, whole_words, write),
        ConfigCommand::Reset => reset(),
        ConfigCommand::Path => path(),
    }
}

fn show(builtin: bool) -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.show");
    if builtin {
        output.defaults = Some(defaults::builtin_defaults());
    } else {
        output.config = Some(defaults::load_config());
    }
    Ok((output, 0))
}

fn set(
    case_sensitive: Option<bool>,
    whole_words: Option<bool>,
    write: Option<bool>,
) -> CmdResult<ConfigOutput> {
    if case_sensitive.is_none() && whole_words.is_none() && write.is_none() {
        return Err(markswap::Error::validation_missing_argument(vec![
            "case-sensitive".to_string(),
            "whole-words".to_string(),
            "write".to_string(),
        ])
        .with_hint("Pass at least one option to set"));
    }

    let mut config = defaults::load_config();
    if let Some(value) = case_sensitive {
        config.defaults.options.case_sensitive = value;
    }
    if let Some(value) = whole_words {
        config.defaults.options.whole_words = value;
    }
    if let Some(value) = write {
        config.defaults.write = value;
    }

    defaults::save_config(&config)?;
    markswap::log_status!("config", "Saved {}", defaults::config_path()?);

    let mut output = ConfigOutput::new("config.set");
    output.config = Some(config);
    Ok((output, 0))
}

fn reset() -> CmdResult<ConfigOutput> {
    let deleted = defaults::reset_config()?;
    let mut output = ConfigOutput::new("config.reset");
    output.deleted = Some(deleted);
    Ok((output, 0))
}

fn path() -> CmdResult<ConfigOutput> {
    let mut output = ConfigOutput::new("config.path");
    output.path = Some(defaults::config_path()?);
    output.exists = Some(defaults::config_exists());
    Ok((output, 0))
}
