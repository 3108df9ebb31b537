use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "parallax",
    author,
    version,
    about = "Headless driver for the parallax image slider",
    arg_required_else_help = false
)]
pub struct Cli {
    #[command(flatten)]
    pub run: RunArgs,
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Slider config file; defaults to `slider.toml` in the config directory.
    #[arg(long, value_name = "FILE", env = "PARALLAX_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Viewport size in CSS pixels (e.g. `1440x900`).
    #[arg(
        long,
        value_name = "WIDTHxHEIGHT",
        value_parser = parse_dimensions,
        default_value = "1440x900"
    )]
    pub viewport: (u32, u32),

    /// Listen to touch events instead of mouse events.
    #[arg(long)]
    pub touch: bool,

    /// Pick the input modality from a browser user-agent string.
    #[arg(long, value_name = "UA", conflicts_with = "touch")]
    pub user_agent: Option<String>,

    /// Override a slider tunable (`speed`, `ease`, `threshold`, `rgb_shift`,
    /// `scale_min`, `scale_max`). Repeatable.
    #[arg(long = "set", value_name = "KEY=VALUE", global = true)]
    pub overrides: Vec<String>,

    /// Number of frames to simulate.
    #[arg(long, value_name = "N", default_value_t = 600)]
    pub frames: u64,

    /// JSON input script; a short demo gesture runs when omitted.
    #[arg(long, value_name = "FILE")]
    pub script: Option<PathBuf>,

    /// Write JSON-lines frame snapshots to PATH (`-` for stdout).
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Snapshot every K-th frame; the last frame is always written.
    #[arg(
        long,
        value_name = "K",
        default_value_t = 60,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub every: u64,

    /// Pace frames at `runtime.frame_interval` instead of running flat out.
    #[arg(long)]
    pub realtime: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Inspect and validate slider configuration.
    Config(ConfigCommand),
}

#[derive(Parser, Debug)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Parse and validate a config file.
    Check {
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML.
    Show,
    /// Show where configuration is looked up.
    Where,
}

pub fn parse() -> Cli {
    Cli::parse()
}

fn parse_dimensions(value: &str) -> Result<(u32, u32), String> {
    let (w, h) = value
        .split_once(['x', 'X'])
        .ok_or_else(|| "expected WIDTHxHEIGHT".to_string())?;
    let width = w
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid viewport width".to_string())?;
    let height = h
        .trim()
        .parse::<u32>()
        .map_err(|_| "invalid viewport height".to_string())?;
    if width == 0 || height == 0 {
        return Err("viewport dimensions must be greater than zero".into());
    }
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_viewport_dimensions() {
        assert_eq!(parse_dimensions("1440x900").unwrap(), (1440, 900));
        assert_eq!(parse_dimensions(" 800 X 600 ").unwrap(), (800, 600));
        assert!(parse_dimensions("800").is_err());
        assert!(parse_dimensions("0x600").is_err());
        assert!(parse_dimensions("wide x 600").is_err());
    }

    #[test]
    fn run_flags_and_subcommands_parse() {
        let cli = Cli::try_parse_from([
            "parallax",
            "--viewport",
            "1000x800",
            "--set",
            "ease=0.2",
            "--set",
            "speed=3",
            "--frames",
            "10",
            "--snapshot",
            "-",
        ])
        .unwrap();
        assert!(cli.command.is_none());
        assert_eq!(cli.run.viewport, (1000, 800));
        assert_eq!(cli.run.overrides, vec!["ease=0.2", "speed=3"]);
        assert_eq!(cli.run.frames, 10);
        assert_eq!(cli.run.every, 60);

        let cli = Cli::try_parse_from(["parallax", "config", "check", "deck.toml"]).unwrap();
        match cli.command {
            Some(Command::Config(ConfigCommand {
                action: ConfigAction::Check { file },
            })) => assert_eq!(file, Some(PathBuf::from("deck.toml"))),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn every_must_be_positive() {
        assert!(Cli::try_parse_from(["parallax", "--every", "0"]).is_err());
    }
}
