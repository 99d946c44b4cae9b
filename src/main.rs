use flappy::build_info;
use flappy::input::CrosstermInput;
use flappy::ui::{TerminalGuard, TerminalRenderer};
use flappy::utils::logging::init_file_logger;
use flappy::{
    new_session, AssetSource, DirectoryAssets, FixedRateLoop, GameConfig, PlaceholderAssets,
    StartupError,
};
use std::path::PathBuf;
use std::process::exit;

/// Command-line options.
#[derive(Debug, Default)]
struct Cli {
    config: Option<PathBuf>,
    seed: Option<u64>,
    placeholder: bool,
}

enum Command {
    Play(Cli),
    Version,
    Help,
}

fn print_help() {
    println!("Flappy - Flappy Bird in your terminal\n");
    println!("Usage: flappy [options]\n");
    println!("Options:");
    println!("  --config PATH   Use this config file instead of ./flappy.toml or ~/.flappy/flappy.toml");
    println!("  --seed N        Seed the pipe generator for a reproducible run");
    println!("  --placeholder   Use generated sprites instead of the sprite directory");
    println!("  --version       Show version information");
    println!("  --help          Show this help message");
}

fn parse_args(args: impl IntoIterator<Item = String>) -> Result<Command, String> {
    let mut cli = Cli::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--version" | "-v" => return Ok(Command::Version),
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => {
                let path = args.next().ok_or("--config needs a path")?;
                cli.config = Some(PathBuf::from(path));
            }
            "--seed" => {
                let value = args.next().ok_or("--seed needs a number")?;
                let seed = value
                    .parse()
                    .map_err(|_| format!("invalid seed: {value}"))?;
                cli.seed = Some(seed);
            }
            "--placeholder" => cli.placeholder = true,
            other => return Err(format!("Unknown option: {other}")),
        }
    }

    Ok(Command::Play(cli))
}

fn run(cli: Cli) -> Result<(), StartupError> {
    let path = GameConfig::locate(cli.config.as_deref())?;
    let mut config = GameConfig::load(&path)?;
    log::info!("Loaded config from {}", path.display());
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    let source: Box<dyn AssetSource> = if cli.placeholder {
        Box::new(PlaceholderAssets)
    } else {
        Box::new(DirectoryAssets::new(config.asset_dir()))
    };

    let (width, height) = (config.width as u32, config.height as u32);
    let interval = config.frame_interval();
    let mut session = new_session(config, source.as_ref())?;

    let _guard = TerminalGuard::new()?;
    let mut renderer = TerminalRenderer::new(width, height)?;
    let mut input = CrosstermInput;

    let summary = FixedRateLoop::new(interval).run(&mut session, &mut input, &mut renderer)?;
    log::info!(
        "Session over after {} frames, last score {}",
        summary.frames,
        session.score()
    );
    Ok(())
}

fn main() {
    let command = match parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(message) => {
            eprintln!("{message}");
            eprintln!("Run 'flappy --help' for usage.");
            exit(1);
        }
    };

    let cli = match command {
        Command::Version => {
            println!("{}", build_info::version_line());
            return;
        }
        Command::Help => {
            print_help();
            return;
        }
        Command::Play(cli) => cli,
    };

    // Logging is best effort; the game runs without it.
    if let Err(e) = init_file_logger() {
        eprintln!("flappy: logging disabled: {e}");
    }
    log::info!("Starting {}", build_info::version_line());

    if let Err(e) = run(cli) {
        log::error!("{e}");
        eprintln!("flappy: {e}");
        exit(1);
    }

    println!("Goodbye!");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_no_args_plays_with_defaults() {
        match parse(&[]).unwrap() {
            Command::Play(cli) => {
                assert!(cli.config.is_none());
                assert!(cli.seed.is_none());
                assert!(!cli.placeholder);
            }
            _ => panic!("expected Play"),
        }
    }

    #[test]
    fn test_all_play_options() {
        match parse(&["--config", "my.toml", "--seed", "42", "--placeholder"]).unwrap() {
            Command::Play(cli) => {
                assert_eq!(cli.config, Some(PathBuf::from("my.toml")));
                assert_eq!(cli.seed, Some(42));
                assert!(cli.placeholder);
            }
            _ => panic!("expected Play"),
        }
    }

    #[test]
    fn test_version_and_help_short_circuit() {
        assert!(matches!(parse(&["--seed", "1", "--version"]), Ok(Command::Version)));
        assert!(matches!(parse(&["-h"]), Ok(Command::Help)));
    }

    #[test]
    fn test_bad_arguments() {
        assert!(parse(&["--seed", "many"]).is_err());
        assert!(parse(&["--config"]).is_err());
        assert!(parse(&["--fast"]).is_err());
    }
}
