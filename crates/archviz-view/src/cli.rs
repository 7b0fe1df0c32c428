use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "archviz-view")]
#[command(about = "Archviz wall and furniture layout editor")]
pub struct CliArgs {
    #[command(flatten)]
    pub settings: SettingsArgs,
    #[command(subcommand)]
    pub mode: Option<Mode>,
}

#[derive(Args)]
pub struct SettingsArgs {
    /// Directory holding `<Name>.glb` furniture models.
    #[arg(long, global = true, default_value = archviz_io::DEFAULT_MODELS_DIR)]
    pub models_dir: PathBuf,
    /// Height used for new walls.
    #[arg(long, global = true)]
    pub wall_height: Option<f64>,
    /// Position snap step on the ground grid.
    #[arg(long, global = true)]
    pub grid_snap: Option<f64>,
}

#[derive(Subcommand)]
pub enum Mode {
    Headless {
        #[command(subcommand)]
        command: HeadlessCommand,
    },
}

#[derive(Subcommand)]
pub enum HeadlessCommand {
    /// Feed ground clicks through the wall tool and print the walls.
    Walls(WallsArgs),
    /// Load a furniture model and print its parts.
    Model(ModelArgs),
}

#[derive(Args)]
pub struct WallsArgs {
    /// Semicolon-separated `x,z` ground points, e.g. "0,0;3,0".
    #[arg(long)]
    pub points: String,
}

#[derive(Args)]
pub struct ModelArgs {
    #[arg(long)]
    pub name: String,
}
