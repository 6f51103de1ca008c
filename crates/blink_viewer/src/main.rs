use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use blink_core::load_stl;
use blink_renderer::{run, RenderConfig, Scene};

mod presenter;
mod window;

use window::WindowSurface;

const USAGE: &str = "Usage: blink_viewer <path/to/mesh.stl>";

/// The mesh path, if exactly one argument was given.
fn parse_args<I>(args: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = OsString>,
{
    let mut args = args.into_iter();
    match (args.next(), args.next()) {
        (Some(path), None) => Some(PathBuf::from(path)),
        _ => None,
    }
}

fn main() -> Result<()> {
    // RUST_LOG directives take precedence over the Info default
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let Some(mesh_path) = parse_args(std::env::args_os().skip(1)) else {
        println!("{USAGE}");
        return Ok(());
    };

    log::info!("Starting Blink");

    let mesh = load_stl(&mesh_path)
        .with_context(|| format!("Failed to load mesh {}", mesh_path.display()))?;

    if let Some((min, max)) = mesh.bounds() {
        log::debug!("Mesh bounds: {min} .. {max}");
    }

    let config = RenderConfig::default();
    let scene = Scene::default();

    let mut surface = WindowSurface::new(config.width, config.height)
        .context("Failed to create window")?;

    run(&mut surface, &scene, &config);

    log::info!(
        "Exiting ({} unique vertices held for mesh rendering)",
        mesh.vertex_count()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<OsString> {
        list.iter().map(OsString::from).collect()
    }

    #[test]
    fn test_single_path_argument() {
        assert_eq!(
            parse_args(args(&["models/part.stl"])),
            Some(PathBuf::from("models/part.stl"))
        );
    }

    #[test]
    fn test_wrong_argument_count() {
        assert_eq!(parse_args(args(&[])), None);
        assert_eq!(parse_args(args(&["a.stl", "b.stl"])), None);
    }
}
