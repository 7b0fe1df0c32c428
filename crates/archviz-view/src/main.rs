use anyhow::{Context, Result};
use archviz_editor::EditorSettings;
use clap::Parser;

mod cli;
#[cfg(feature = "gui")]
mod gui;
mod headless;
#[cfg(feature = "gui")]
mod viewer;

fn main() -> Result<()> {
    init_tracing();
    let args = cli::CliArgs::parse();
    let settings = editor_settings(&args.settings)?;
    let models_dir = args.settings.models_dir;
    match args.mode {
        Some(cli::Mode::Headless { command }) => {
            headless::run_headless(command, settings, &models_dir)
        }
        None => run_gui(settings, models_dir),
    }
}

fn editor_settings(args: &cli::SettingsArgs) -> Result<EditorSettings> {
    let defaults = EditorSettings::default();
    let settings = EditorSettings {
        wall_height: args.wall_height.unwrap_or(defaults.wall_height),
        grid_step: args.grid_snap.unwrap_or(defaults.grid_step),
        ..defaults
    };
    settings.validated().context("invalid editor settings")
}

#[cfg(feature = "gui")]
fn run_gui(settings: EditorSettings, models_dir: std::path::PathBuf) -> Result<()> {
    gui::run_gui(settings, models_dir)
}

#[cfg(not(feature = "gui"))]
fn run_gui(_settings: EditorSettings, _models_dir: std::path::PathBuf) -> Result<()> {
    anyhow::bail!("GUI support disabled. Rebuild with --features gui.");
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
