mod cli;
mod layout;
mod paths;
mod report;
mod run;
mod script;

use std::path::Path;

use anyhow::{Context, Result};
use cli::{Command, ConfigAction, RunArgs};
use paths::AppPaths;

fn main() -> Result<()> {
    let cli = cli::parse();
    run::initialise_tracing();

    match cli.command {
        Some(Command::Config(config_cmd)) => handle_config_command(config_cmd.action, &cli.run),
        None => run::run(cli.run),
    }
}

fn handle_config_command(action: ConfigAction, args: &RunArgs) -> Result<()> {
    let paths = AppPaths::discover()?;

    match action {
        ConfigAction::Check { file } => {
            run_config_check(&paths, file.as_deref().or(args.config.as_deref()))
        }
        ConfigAction::Show => run_config_show(&paths, args),
        ConfigAction::Where => run_config_where(&paths),
    }
}

fn run_config_check(paths: &AppPaths, explicit: Option<&Path>) -> Result<()> {
    let (deck, source) = run::load_deck(explicit, paths)?;
    let missing: Vec<_> = deck
        .slides
        .iter()
        .filter_map(|slide| slide.image.as_deref())
        .filter(|image| !image.is_file())
        .collect();

    let origin = match &source {
        Some(path) => path.display().to_string(),
        None => "built-in defaults".to_string(),
    };
    println!(
        "{origin}: ok ({} slides, {} laid out)",
        deck.slides.len(),
        deck.expanded_slides().len()
    );
    for image in missing {
        println!(
            "  warning: image {} not found; a placeholder will be shown",
            image.display()
        );
    }
    Ok(())
}

fn run_config_show(paths: &AppPaths, args: &RunArgs) -> Result<()> {
    let (mut deck, _) = run::load_deck(args.config.as_deref(), paths)?;
    deck.slider.apply_overrides(&args.overrides);
    let rendered = deck
        .to_toml_string()
        .context("failed to render configuration")?;
    print!("{rendered}");
    Ok(())
}

fn run_config_where(paths: &AppPaths) -> Result<()> {
    let config_file = paths.config_file();
    println!("Configuration:");
    println!("  dir:   {}", paths.config_dir().display());
    println!(
        "  file:  {} ({})",
        config_file.display(),
        if config_file.is_file() {
            "present"
        } else {
            "missing; built-in defaults apply"
        }
    );
    println!("  env:   {} overrides the directory", paths::ENV_CONFIG_DIR);
    Ok(())
}
