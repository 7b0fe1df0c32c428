use anyhow::{Context, Result, bail};
use archviz_editor::{ClickOutcome, Editor, EditorSettings};
use archviz_geometry::{PlanePoint, Ray};
use archviz_io::load_furniture;
use archviz_scene::FurnitureKind;
use std::path::Path;

use crate::cli::{HeadlessCommand, ModelArgs, WallsArgs};

pub fn run_headless(
    command: HeadlessCommand,
    settings: EditorSettings,
    models_dir: &Path,
) -> Result<()> {
    match command {
        HeadlessCommand::Walls(args) => place_walls(args, settings),
        HeadlessCommand::Model(args) => describe_model(args, models_dir),
    }
}

fn place_walls(args: WallsArgs, settings: EditorSettings) -> Result<()> {
    let points = parse_points(&args.points)?;
    let mut editor = Editor::new(settings)?;
    editor.set_wall_placement(true);

    for point in points {
        match editor.click(Some(&Ray::downward(point.x, point.z))) {
            ClickOutcome::WallStarted(start) => {
                println!("start  ({:.2}, {:.2})", start.x, start.z);
            }
            ClickOutcome::WallCommitted(guid) => {
                let Some(placed) = editor.scene().wall(guid) else {
                    continue;
                };
                let wall = &placed.wall;
                println!(
                    "wall   {}  length {:.2}  yaw {:.1}°  center ({:.2}, {:.2})  label {}",
                    guid.short(),
                    wall.length,
                    wall.yaw().to_degrees(),
                    wall.position().x,
                    wall.position().z,
                    placed.label.text
                );
            }
            ClickOutcome::WallRejected => {
                println!("skip   ({:.2}, {:.2}) repeats the start point", point.x, point.z);
            }
            ClickOutcome::Ignored => {
                println!("skip   ({:.2}, {:.2}) is off the floor", point.x, point.z);
            }
            ClickOutcome::Selected(_) | ClickOutcome::Cleared => {}
        }
    }

    if let Some(start) = editor.placement().captured_point() {
        println!("open   ({:.2}, {:.2}) has no end point", start.x, start.z);
    }
    println!("{} wall(s) placed", editor.scene().walls().len());
    Ok(())
}

fn describe_model(args: ModelArgs, models_dir: &Path) -> Result<()> {
    let kind: FurnitureKind = args.name.parse()?;
    let asset = load_furniture(models_dir, kind)?;
    println!("{}: {} part(s)", asset.name, asset.parts.len());
    for part in &asset.parts {
        let size = part.bounds.transformed(&part.local).size();
        println!(
            "  {}  {:.3} x {:.3} x {:.3}",
            part.name, size.x, size.y, size.z
        );
    }
    if let Some(bounds) = asset.bounds() {
        let size = bounds.size();
        println!("bounds {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }
    Ok(())
}

fn parse_points(text: &str) -> Result<Vec<PlanePoint>> {
    let mut points = Vec::new();
    for (index, pair) in text.split(';').map(str::trim).filter(|p| !p.is_empty()).enumerate() {
        let parts: Vec<&str> = pair.split(',').collect();
        if parts.len() != 2 {
            bail!("point {} ('{pair}') expects two comma-separated numbers, e.g. 3,0", index + 1);
        }
        let x: f64 = parts[0]
            .trim()
            .parse()
            .with_context(|| format!("invalid x in point {}", index + 1))?;
        let z: f64 = parts[1]
            .trim()
            .parse()
            .with_context(|| format!("invalid z in point {}", index + 1))?;
        points.push(PlanePoint::new(x, z));
    }
    if points.is_empty() {
        bail!("--points needs at least one x,z pair");
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn points_parse_with_spaces() {
        let points = parse_points(" 0,0; 3 , 0 ;").expect("points");
        assert_eq!(points, vec![PlanePoint::new(0.0, 0.0), PlanePoint::new(3.0, 0.0)]);
    }

    #[test]
    fn malformed_point_is_rejected() {
        assert!(parse_points("0,0;3").is_err());
        assert!(parse_points("a,b").is_err());
        assert!(parse_points("").is_err());
    }
}
