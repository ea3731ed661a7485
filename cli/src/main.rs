//! Terminal host for the game: plain text board on stdout, line commands on stdin.
use std::io;
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use sweeper_core::GameController;

mod command;
mod settings;
mod text;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity<clap_verbosity_flag::WarnLevel>,

    #[command(flatten)]
    game: settings::GameArgs,

    /// Read the game configuration from a TOML file, flags still override it
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(args.verbose.tracing_level_filter())
        .with_writer(io::stderr)
        .init();

    let config = settings::resolve(args.config.as_deref(), &args.game)?;
    log::debug!("config: {:?}", config);

    println!("{}", command::HELP);
    let renderer = text::TextRenderer::new(io::stdout());
    let mut controller = GameController::new(config, renderer);
    controller.run(command::LineInput::new(io::stdin().lock()));

    log::debug!("Exiting in state {:?}", controller.state());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn args_are_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn parses_preset_and_overrides() {
        let args = Args::try_parse_from(["sweeper", "-p", "expert", "--mines", "80", "-s", "7"])
            .unwrap();

        assert_eq!(args.game.preset, Some(settings::Preset::Expert));
        assert_eq!(args.game.mines, Some(80));
        assert_eq!(args.game.seed, Some(7));
        assert!(args.config.is_none());
    }
}
