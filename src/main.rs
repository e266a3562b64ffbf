use dialogwiz::{
    cli::{check, get_log_level_from_verbose, parse_cli, run, Commands},
    constants::exit_codes,
    error::default_error_handler,
};

fn main() {
    let cli = parse_cli();
    let lvl = get_log_level_from_verbose(cli.command.verbose());
    env_logger::Builder::new().filter_level(lvl).init();

    let result = match cli.command {
        Commands::Run(args) => run(args).map(|()| exit_codes::SUCCESS),
        Commands::Check(args) => check(&args)
            .map(|valid| if valid { exit_codes::SUCCESS } else { exit_codes::FAILURE }),
    };

    match result {
        Ok(code) => std::process::exit(code),
        Err(err) => default_error_handler(err),
    }
}
