mod config;
mod convert;
mod home_directory;
mod rate;
mod report;
mod reserve;

use {
    crate::{
        convert::{RayToWadCmd, WadToRayCmd},
        home_directory::HomeDirectory,
        rate::{ApyCmd, InterestCmd, LinearCmd, PowCmd},
        reserve::ReserveCmd,
    },
    clap::Parser,
    config::{Config, ENV_PREFIX},
    config_parser::parse_config,
    std::path::PathBuf,
    tracing::metadata::LevelFilter,
};

#[derive(Parser)]
#[command(author, version, about, next_display_order = None)]
struct Cli {
    /// Directory holding the config file [default: ~/.lending]
    #[arg(long, global = true)]
    home: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Annual percentage yield of a rate compounded every second
    Apy(ApyCmd),

    /// Compounded interest factor accrued since the last update
    Interest(InterestCmd),

    /// Linear interest factor accrued since the last update
    Linear(LinearCmd),

    /// Raise a ray to an integer power
    Pow(PowCmd),

    /// Convert a ray to a wad, rounding half up
    RayToWad(RayToWadCmd),

    /// Convert a wad to a ray
    WadToRay(WadToRayCmd),

    /// Preview a reserve's yields and indices
    Reserve(ReserveCmd),
}

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments.
    let cli = Cli::parse();

    // Find the home directory from the CLI `--home` flag.
    let app_dir = HomeDirectory::new_or_default(cli.home)?;

    // Parse the config file.
    let cfg: Config = parse_config(app_dir.config_file(), ENV_PREFIX)?;

    // Set up tracing. Reports go to stdout, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_max_level(cfg.log_level.parse::<LevelFilter>()?)
        .with_writer(std::io::stderr)
        .init();

    let report = match cli.command {
        Command::Apy(cmd) => cmd.report(&cfg.display)?,
        Command::Interest(cmd) => cmd.report(&cfg.display)?,
        Command::Linear(cmd) => cmd.report(&cfg.display)?,
        Command::Pow(cmd) => cmd.report()?,
        Command::RayToWad(cmd) => cmd.report()?,
        Command::WadToRay(cmd) => cmd.report()?,
        Command::Reserve(cmd) => cmd.report(&cfg.display)?,
    };

    report.print(&cfg.display)
}

// ----------------------------------- tests -----------------------------------

#[cfg(test)]
mod tests {
    use {super::*, clap::CommandFactory};

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn home_flag_is_global() {
        let cli = Cli::parse_from(["lending", "pow", "1", "0", "--home", "/tmp/lending"]);
        assert_eq!(cli.home, Some(PathBuf::from("/tmp/lending")));
    }
}
