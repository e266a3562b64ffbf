use crate::constants::{exit_codes, verbosity};
use crate::error::{Error, Result};
use crate::validation::{ExtensionPolicy, ValidatorKind};
use clap::{error::ErrorKind, Args, CommandFactory, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;
use std::path::PathBuf;

const HELP_TEMPLATE: &str = r#"{about-section}
{usage-heading} {usage}

{all-args}
{after-help}
"#;

/// Toolkit used to draw the dialogs.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default)]
#[value(rename_all = "lowercase")]
pub enum Backend {
    /// Inline terminal prompts.
    #[default]
    Dialoguer,
    /// Full-screen boxes drawn by the `dialog` program.
    Dialog,
}

impl Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Backend::Dialoguer => "dialoguer",
            Backend::Dialog => "dialog",
        };
        write!(f, "{s}")
    }
}

/// Validator evaluated by `dialogwiz check`.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq)]
#[value(rename_all = "kebab-case")]
pub enum CheckKind {
    NonEmpty,
    Integer,
    Decimal,
    Host,
    IpAddress,
    Port,
    FileName,
    /// Needs at least one `--extension`.
    Extension,
}

impl CheckKind {
    pub fn to_validator(self, extensions: &[String]) -> Result<ValidatorKind> {
        let validator = match self {
            CheckKind::NonEmpty => ValidatorKind::NonEmpty,
            CheckKind::Integer => ValidatorKind::Integer,
            CheckKind::Decimal => ValidatorKind::Decimal,
            CheckKind::Host => ValidatorKind::Host,
            CheckKind::IpAddress => ValidatorKind::IpAddress,
            CheckKind::Port => ValidatorKind::Port,
            CheckKind::FileName => ValidatorKind::FileName,
            CheckKind::Extension => match extensions {
                [] => {
                    return Err(Error::MalformedPrompt(
                        "the extension check needs at least one --extension".into(),
                    ))
                }
                [single] => ValidatorKind::Extension(ExtensionPolicy::single(single)),
                many => ValidatorKind::Extension(ExtensionPolicy::any_of(many.iter().cloned())),
            },
        };
        Ok(validator)
    }
}

/// Terminal dialog wizards with validated input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run a wizard and print the answers as JSON.
    Run(RunArgs),
    /// Check one value against a validator.
    Check(CheckArgs),
}

impl Commands {
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Run(args) => args.verbose,
            Commands::Check(args) => args.verbose,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Wizard file, or a directory containing wizard.json, wizard.yaml or wizard.yml.
    #[arg(value_name = "WIZARD")]
    pub wizard: PathBuf,

    /// Toolkit used to draw the dialogs.
    #[arg(short, long, value_enum, default_value_t = Backend::Dialoguer)]
    pub backend: Backend,

    /// Write the answers to this file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Replace the background title set in the wizard file.
    #[arg(long = "background-title")]
    pub background_title: Option<String>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[arg(value_name = "VALIDATOR", value_enum)]
    pub validator: CheckKind,

    #[arg(value_name = "VALUE")]
    pub value: String,

    /// Allowed extension for the `extension` check; repeat for several.
    #[arg(short, long = "extension", value_name = "EXT")]
    pub extensions: Vec<String>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Parse command line arguments, printing the full help when something
/// required is missing.
pub fn parse_cli() -> Cli {
    Cli::try_parse().unwrap_or_else(|e| {
        if matches!(
            e.kind(),
            ErrorKind::MissingRequiredArgument | ErrorKind::MissingSubcommand
        ) {
            let mut command = Cli::command().help_template(HELP_TEMPLATE);
            if let Err(print_err) = command.print_help() {
                eprintln!("Failed to display help information: {print_err}");
            } else {
                println!();
            }
            std::process::exit(exit_codes::FAILURE);
        } else {
            e.exit();
        }
    })
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
