pub mod args;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, Backend, CheckArgs, CheckKind, Cli, Commands,
    RunArgs,
};
pub use runner::{check, run};
