#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Wanderings dungeon crawler.

mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;
use wanderings_core::MockupLayout;
use wanderings_rendering::{
    save_png, ArtManifest, Color, PngSpriteLoader, Presentation, RenderingBackend,
};
use wanderings_rendering_macroquad::MacroquadBackend;

use self::session::GameSession;

const WINDOW_TITLE: &str = "LoFi Wanderings";
const DEFAULT_ASSET_ROOT: &str = "resources";

/// Built-in maps selectable from the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum LayoutArg {
    /// Stone room with a one-cell corridor around an inner block.
    BorderedRoom,
    /// Walled maze mixing brick, stone, wood and metal.
    Labyrinth,
}

impl From<LayoutArg> for MockupLayout {
    fn from(layout: LayoutArg) -> Self {
        match layout {
            LayoutArg::BorderedRoom => MockupLayout::BorderedRoom,
            LayoutArg::Labyrinth => MockupLayout::Labyrinth,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "wanderings", about = "First-person grid dungeon crawler")]
struct CliArgs {
    /// Art manifest describing wall sprite folders; defaults to the built-in
    /// wall sets beneath `resources/`.
    #[arg(long, value_name = "PATH")]
    manifest: Option<PathBuf>,

    /// Map to start on.
    #[arg(long, value_enum, default_value_t = LayoutArg::BorderedRoom)]
    layout: LayoutArg,

    /// Render as fast as possible instead of waiting for the display refresh.
    #[arg(long)]
    no_vsync: bool,

    /// Log the frame rate once per second.
    #[arg(long)]
    show_fps: bool,

    /// Write the starting view to a PNG file and exit without opening a window.
    #[arg(long, value_name = "PNG")]
    snapshot: Option<PathBuf>,

    /// Enable debug logging when `RUST_LOG` is unset.
    #[arg(short, long)]
    verbose: bool,
}

/// Entry point for the Wanderings command-line interface.
fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_tracing(args.verbose);

    let manifest = match &args.manifest {
        Some(path) => ArtManifest::from_path(path)?,
        None => ArtManifest::builtin(Path::new(DEFAULT_ASSET_ROOT)),
    };
    let catalog = manifest.load_catalog(&mut PngSpriteLoader);
    let mut session = GameSession::new(args.layout.into(), catalog, manifest.view());
    println!("{}", session.banner());

    if let Some(path) = &args.snapshot {
        return write_snapshot(&mut session, path);
    }

    let mut scene = session.blank_scene();
    session.populate_scene(&mut scene);
    let presentation = Presentation::new(WINDOW_TITLE, Color::from_rgb_u8(0, 0, 0), scene);

    MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps)
        .run(presentation, move |dt, input, scene| {
            session.advance(dt, input);
            session.populate_scene(scene);
        })
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn write_snapshot(session: &mut GameSession, path: &Path) -> Result<()> {
    let mut scene = session.blank_scene();
    session.populate_scene(&mut scene);
    save_png(&scene.view, path)
        .with_context(|| format!("failed to write snapshot to {}", path.display()))?;
    info!(path = %path.display(), "snapshot written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_open_the_bordered_room_with_vsync() {
        let args = CliArgs::try_parse_from(["wanderings"]).expect("defaults parse");

        assert_eq!(args.layout, LayoutArg::BorderedRoom);
        assert!(!args.no_vsync);
        assert!(args.manifest.is_none());
        assert!(args.snapshot.is_none());
    }

    #[test]
    fn layout_and_snapshot_flags_parse() {
        let args = CliArgs::try_parse_from([
            "wanderings",
            "--layout",
            "labyrinth",
            "--snapshot",
            "view.png",
            "--manifest",
            "art/walls.toml",
        ])
        .expect("flags parse");

        assert_eq!(MockupLayout::from(args.layout), MockupLayout::Labyrinth);
        assert_eq!(args.snapshot, Some(PathBuf::from("view.png")));
        assert_eq!(args.manifest, Some(PathBuf::from("art/walls.toml")));
    }

    #[test]
    fn unknown_layouts_are_rejected() {
        assert!(CliArgs::try_parse_from(["wanderings", "--layout", "castle"]).is_err());
    }
}
