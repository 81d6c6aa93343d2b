use anyhow::Result;

use pulsecheck::commands;

fn main() -> Result<()> {
    pulsecheck::init_logging();

    let matches = commands::build_cli().get_matches();

    match matches.subcommand() {
        Some(("app", sub_matches)) => commands::app(sub_matches)?,
        Some(("sys", sub_matches)) => commands::sys(sub_matches)?,
        Some(("version", _)) => commands::version()?,
        _ => unreachable!("clap requires a subcommand"),
    }

    Ok(())
}
