// Command handlers module
pub mod app;
mod common;
pub mod sys;
pub mod version;

use clap::{value_parser, Arg, ArgAction, Command};
use std::path::PathBuf;

// Re-exports for cleaner imports
pub use app::execute as app;
pub use sys::execute as sys;
pub use version::execute as version;

fn continuous_args(command: Command) -> Command {
    command
        .arg(
            Arg::new("continuous")
                .short('c')
                .long("continuous")
                .help("Repeat the check every --interval seconds until interrupted")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("interval")
                .short('i')
                .long("interval")
                .value_name("SECONDS")
                .help("Seconds between checks in continuous mode")
                .value_parser(value_parser!(u64).range(1..))
                .default_value("60"),
        )
        .arg(
            Arg::new("count")
                .short('n')
                .long("count")
                .value_name("N")
                .help("Stop continuous mode after N checks")
                .value_parser(value_parser!(u64).range(1..))
                .requires("continuous"),
        )
        .arg(
            Arg::new("log")
                .short('l')
                .long("log")
                .value_name("PATH")
                .help("Append every report to this file")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("Print one JSON document per check instead of the text report")
                .action(ArgAction::SetTrue),
        )
}

/// Command-line definition
pub fn build_cli() -> Command {
    Command::new("pulsecheck")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Application reachability and system resource health checks")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(continuous_args(
            Command::new("app")
                .about("Check whether applications are up or down over HTTP(S)")
                .after_help(concat!(
                    "Examples:\n",
                    "  pulsecheck app https://example.com https://example.org\n",
                    "  pulsecheck app --file urls.txt\n",
                    "  pulsecheck app --continuous --interval 30 https://example.com",
                ))
                .arg(
                    Arg::new("urls")
                        .help("URLs or hosts to check")
                        .num_args(1..)
                        .conflicts_with("file"),
                )
                .arg(
                    Arg::new("file")
                        .short('f')
                        .long("file")
                        .value_name("FILE")
                        .help("File with one URL per line ('#' starts a comment)")
                        .value_parser(value_parser!(PathBuf)),
                )
                .arg(
                    Arg::new("timeout")
                        .short('t')
                        .long("timeout")
                        .value_name("SECONDS")
                        .help("Request timeout per target")
                        .value_parser(value_parser!(u64).range(1..))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("insecure")
                        .short('k')
                        .long("insecure")
                        .help("Accept invalid TLS certificates")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("no-proxy")
                        .long("no-proxy")
                        .help("Ignore HTTP(S)_PROXY settings from the environment")
                        .action(ArgAction::SetTrue),
                ),
        ))
        .subcommand(continuous_args(
            Command::new("sys")
                .about("Check CPU, memory and disk usage against thresholds")
                .after_help(concat!(
                    "Examples:\n",
                    "  pulsecheck sys\n",
                    "  pulsecheck sys --thresholds cpu=90,memory=85,disk=80\n",
                    "  pulsecheck sys --continuous --interval 60 --log health.log\n\n",
                    "Default thresholds: CPU=80%, Memory=80%, Disk=80%",
                ))
                .arg(
                    Arg::new("thresholds")
                        .short('t')
                        .long("thresholds")
                        .value_name("LIST")
                        .help("Custom thresholds, e.g. cpu=90,memory=85,disk=80"),
                )
                .arg(
                    Arg::new("top")
                        .long("top")
                        .value_name("N")
                        .help("Number of top CPU-consuming processes to list")
                        .value_parser(value_parser!(u64).range(1..))
                        .default_value("5"),
                )
                .arg(
                    Arg::new("disk")
                        .short('d')
                        .long("disk")
                        .value_name("PATH")
                        .help("Report usage of the filesystem holding PATH")
                        .value_parser(value_parser!(PathBuf)),
                ),
        ))
        .subcommand(Command::new("version").about("Shows version information"))
}
