use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI entry point for the placement resolver.
#[derive(Parser, Debug)]
#[command(
    name = "placement",
    about = "Resolve where editor extensions run and whether a reload is needed",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone)]
pub struct GlobalOpts {
    /// Inventory snapshot to resolve against
    #[arg(short, long, global = true, default_value = "snapshot.toml")]
    pub snapshot: PathBuf,

    /// Resolve extensions sequentially (parallel is enabled by default)
    #[arg(long = "no-parallel", global = true, action = clap::ArgAction::SetFalse)]
    pub parallel: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve and report every installed extension
    Resolve(ResolveOpts),
    /// Exit non-zero when any extension needs a reload
    Check,
    /// List servers an extension can additionally be installed on
    Targets(TargetsOpts),
    /// Re-resolve whenever the snapshot changes
    Watch(WatchOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Resolve(_) => "resolve",
            Self::Check => "check",
            Self::Targets(_) => "targets",
            Self::Watch(_) => "watch",
            Self::Version => "version",
        }
    }
}

/// Options for the `resolve` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ResolveOpts {
    /// Only report records with this extension id
    #[arg(long)]
    pub id: Option<String>,

    /// Print decisions as JSON instead of a summary
    #[arg(long)]
    pub json: bool,
}

/// Options for the `targets` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct TargetsOpts {
    /// Extension id to look up
    #[arg(long)]
    pub id: String,

    /// Include servers the extension can run on but does not prefer
    #[arg(long)]
    pub anywhere: bool,
}

/// Options for the `watch` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct WatchOpts {
    /// Poll interval in milliseconds
    #[arg(long, default_value_t = 500, value_parser = clap::value_parser!(u64).range(10..))]
    pub interval_ms: u64,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn defaults() {
        let cli = Cli::parse_from(["placement", "check"]);
        assert_eq!(cli.global.snapshot, PathBuf::from("snapshot.toml"));
        assert!(cli.global.parallel);
        assert!(!cli.verbose);
        assert!(matches!(cli.command, Command::Check));
    }

    #[test]
    fn parse_snapshot_short_and_after_subcommand() {
        let cli = Cli::parse_from(["placement", "-s", "a.toml", "check"]);
        assert_eq!(cli.global.snapshot, PathBuf::from("a.toml"));
        let cli = Cli::parse_from(["placement", "check", "--snapshot", "b.toml"]);
        assert_eq!(cli.global.snapshot, PathBuf::from("b.toml"));
    }

    #[test]
    fn parse_no_parallel() {
        let cli = Cli::parse_from(["placement", "--no-parallel", "resolve"]);
        assert!(!cli.global.parallel);
    }

    #[test]
    fn parse_resolve_options() {
        let cli = Cli::parse_from(["placement", "resolve", "--id", "pub.ext", "--json"]);
        assert!(
            matches!(&cli.command, Command::Resolve(_)),
            "Expected Resolve command"
        );
        if let Command::Resolve(opts) = cli.command {
            assert_eq!(opts.id.as_deref(), Some("pub.ext"));
            assert!(opts.json);
        }
    }

    #[test]
    fn targets_requires_id() {
        assert!(Cli::try_parse_from(["placement", "targets"]).is_err());
        let cli = Cli::parse_from(["placement", "targets", "--id", "a.b", "--anywhere"]);
        assert!(
            matches!(&cli.command, Command::Targets(o) if o.id == "a.b" && o.anywhere),
            "Expected Targets command"
        );
    }

    #[test]
    fn watch_interval() {
        let cli = Cli::parse_from(["placement", "watch"]);
        assert!(matches!(&cli.command, Command::Watch(o) if o.interval_ms == 500));
        let cli = Cli::parse_from(["placement", "watch", "--interval-ms", "50"]);
        assert!(matches!(&cli.command, Command::Watch(o) if o.interval_ms == 50));
        assert!(Cli::try_parse_from(["placement", "watch", "--interval-ms", "1"]).is_err());
    }

    #[test]
    fn verbose_is_global() {
        let cli = Cli::parse_from(["placement", "resolve", "-v"]);
        assert!(cli.verbose);
    }

    #[test]
    fn command_names() {
        assert_eq!(Cli::parse_from(["placement", "version"]).command.name(), "version");
        assert_eq!(
            Cli::parse_from(["placement", "targets", "--id", "x"]).command.name(),
            "targets"
        );
    }
}
