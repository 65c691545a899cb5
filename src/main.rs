use anyhow::Result;
use clap::Parser;

use extension_placement::{cli, commands, logging};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();

    if matches!(args.command, cli::Command::Version) {
        commands::version::run();
        return Ok(());
    }

    let name = args.command.name();
    logging::init_subscriber(args.verbose, name);
    let log = logging::Logger::new(name);

    match &args.command {
        cli::Command::Resolve(opts) => commands::resolve::run(&args.global, opts, &log),
        cli::Command::Check => commands::check::run(&args.global, &log),
        cli::Command::Targets(opts) => commands::targets::run(&args.global, opts, &log),
        cli::Command::Watch(opts) => commands::watch::run(&args.global, opts, &log),
        cli::Command::Version => Ok(()),
    }
}
