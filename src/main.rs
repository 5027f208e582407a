//! Terminal Game of Life application

use anyhow::{Context, Result};
use clap::Parser;
use game_of_life_sim::{
    runtime::{self, IntervalTimer},
    terminal::{TerminalCanvas, TerminalEvents, TerminalSession},
    utils::ColorOutput,
    World,
};
use std::path::{Path, PathBuf};

const SAVE_DIR: &str = "save";
const EXTENSION: &str = ".json";
const DISPLAY_RATE: f32 = 30.0;

#[derive(Parser)]
#[command(name = "game_of_life_sim")]
#[command(about = "Multi-species Game of Life with a terminal viewer and editor")]
#[command(version = "0.1.0")]
struct Cli {
    /// World file to load from the save directory
    #[arg(long)]
    load: Option<String>,

    /// World file written to the save directory on exit
    #[arg(long)]
    save: Option<String>,

    /// Open the interactive editor instead of running the simulation
    #[arg(long)]
    edit: bool,

    /// Clear the grid when entering the editor
    #[arg(long)]
    clean: bool,

    /// Config document governing new worlds
    #[arg(long, default_value = "config/default.json")]
    config: PathBuf,

    /// Print world settings before starting
    #[arg(short, long)]
    verbose: bool,
}

/// Resolve a bare world name to its path under the save directory,
/// appending the `.json` extension when missing.
fn save_path(name: &str) -> PathBuf {
    let mut file = name.to_string();
    if !file.ends_with(EXTENSION) {
        file.push_str(EXTENSION);
    }
    Path::new(SAVE_DIR).join(file)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    std::fs::create_dir_all(SAVE_DIR)
        .with_context(|| format!("failed to create {SAVE_DIR} directory"))?;

    let mut world = World::create(&cli.config)?;

    if let Some(name) = cli.load.as_deref() {
        let path = save_path(name);
        world
            .load(&path)
            .with_context(|| format!("failed to load world from {}", path.display()))?;
    }

    if cli.verbose {
        println!("{}", ColorOutput::info("world settings:"));
        print!("{}", world.summary());
    }

    let mut display = IntervalTimer::new(1.0 / DISPLAY_RATE);

    {
        let _session = TerminalSession::new().context("failed to initialize terminal")?;
        let mut canvas = TerminalCanvas::new(world.cell_size, world.rows, world.columns);
        let mut events = TerminalEvents::new(world.cell_size);

        if cli.edit {
            runtime::edit(&mut world, &mut canvas, &mut events, &mut display, cli.clean)?;
        } else {
            runtime::run(
                &mut world,
                &mut canvas,
                &mut events,
                &mut display,
                runtime::WARMUP_SECONDS,
            )?;
        }
        // Session drop restores the terminal before anything is printed.
    }

    if let Some(name) = cli.save.as_deref() {
        let path = save_path(name);
        world
            .save(&path)
            .with_context(|| format!("failed to save world to {}", path.display()))?;
        println!(
            "{}",
            ColorOutput::success(&format!("world saved to {}", path.display()))
        );
    }

    println!(
        "{}",
        ColorOutput::info(&format!("stopped at generation {}", world.generation))
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "game_of_life_sim",
            "--load",
            "glider",
            "--save",
            "result.json",
            "--edit",
            "--clean",
        ])
        .unwrap();

        assert_eq!(cli.load.as_deref(), Some("glider"));
        assert_eq!(cli.save.as_deref(), Some("result.json"));
        assert!(cli.edit);
        assert!(cli.clean);
    }

    #[test]
    fn test_save_path_appends_extension() {
        assert_eq!(save_path("glider"), Path::new("save/glider.json"));
        assert_eq!(save_path("glider.json"), Path::new("save/glider.json"));
    }
}
