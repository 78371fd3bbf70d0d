//! Art manifest parsing and sprite loading.
//!
//! The manifest is a small TOML document:
//!
//! ```toml
//! version = 1
//!
//! [walls]
//! 1 = "first_wall"
//! 2 = "stone_wall"
//!
//! [view]
//! width = 300
//! height = 400
//! sky = [77, 130, 229]
//! ground = [16, 80, 30]
//! sky_fraction = 0.6
//! ```
//!
//! `sky_fraction` is the share of the view above the horizon and is clamped
//! to `0.0..=1.0`. View edges may not exceed [`MAX_VIEW_DIMENSION`] pixels.
//!
//! Every wall root holds `f{rank}.png`, `l{rank}.png` and `r{rank}.png` for
//! each visible rank. Missing or undecodable images never fail the catalog;
//! they are logged and leave an empty slot.

use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use wanderings_core::{ViewDirection, WallId, VISIBLE_DEPTH};

use crate::{
    art::{WallArtCatalog, WallSpriteSet},
    surface::Surface,
    view::ViewConfig,
    Color,
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;

/// Largest accepted width or height of a view override.
pub const MAX_VIEW_DIMENSION: u32 = 4096;

/// Colour treated as transparent in wall art.
pub const COLOR_KEY: [u8; 3] = [0, 0, 0];

/// Wall roots shipped with the game, in wall id order.
const DEFAULT_WALL_ROOTS: [(WallId, &str); 4] = [
    (WallId::BRICK, "first_wall"),
    (WallId::STONE, "stone_wall"),
    (WallId::WOOD, "wood_wall"),
    (WallId::METAL, "metal_wall"),
];

/// Configuration problems detected while reading an art manifest.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ManifestError {
    /// The document is not valid TOML or does not match the manifest layout.
    #[error("malformed art manifest: {0}")]
    Malformed(String),
    /// The manifest declares a version this build cannot read.
    #[error("unsupported art manifest version {found} (expected {expected})")]
    UnsupportedVersion {
        /// Version declared by the manifest.
        found: u32,
        /// Version understood by this build.
        expected: u32,
    },
    /// A key of the `[walls]` table is not a positive wall id.
    #[error("invalid wall id `{0}` in art manifest")]
    InvalidWallId(String),
    /// Wall ids must run from one without gaps.
    #[error("art manifest wall ids must be contiguous from 1, missing {missing}")]
    MissingWallId {
        /// First id absent from the sequence.
        missing: u16,
    },
    /// A view override describes an empty surface.
    #[error("view dimensions must be positive (received {width}x{height})")]
    EmptyView {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A view override is larger than the renderer accepts.
    #[error("view dimensions may not exceed {max} pixels (received {width}x{height})")]
    OversizedView {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
        /// Largest accepted edge.
        max: u32,
    },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawManifest {
    version: u32,
    #[serde(default)]
    walls: BTreeMap<String, PathBuf>,
    view: Option<RawView>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawView {
    width: Option<u32>,
    height: Option<u32>,
    sky: Option<[u8; 3]>,
    ground: Option<[u8; 3]>,
    sky_fraction: Option<f32>,
}

/// Parsed art manifest with wall roots resolved against the manifest folder.
#[derive(Clone, Debug, PartialEq)]
pub struct ArtManifest {
    walls: Vec<(WallId, PathBuf)>,
    view: ViewConfig,
}

impl ArtManifest {
    /// Manifest describing the four built-in wall sets beneath `asset_root`.
    #[must_use]
    pub fn builtin(asset_root: &Path) -> Self {
        Self {
            walls: DEFAULT_WALL_ROOTS
                .iter()
                .map(|(id, root)| (*id, asset_root.join(root)))
                .collect(),
            view: ViewConfig::default(),
        }
    }

    /// Reads and parses the manifest at `path`.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read art manifest at {}", path.display()))?;
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let manifest = Self::parse(&contents, base)
            .with_context(|| format!("invalid art manifest at {}", path.display()))?;
        Ok(manifest)
    }

    /// Parses manifest text, resolving wall roots relative to `base`.
    pub fn parse(contents: &str, base: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            toml::from_str(contents).map_err(|error| ManifestError::Malformed(error.to_string()))?;
        if raw.version != SUPPORTED_MANIFEST_VERSION {
            return Err(ManifestError::UnsupportedVersion {
                found: raw.version,
                expected: SUPPORTED_MANIFEST_VERSION,
            });
        }

        let mut walls = Vec::with_capacity(raw.walls.len());
        for (key, root) in raw.walls {
            let id = key
                .trim()
                .parse::<u16>()
                .ok()
                .filter(|id| *id > 0)
                .ok_or_else(|| ManifestError::InvalidWallId(key.clone()))?;
            walls.push((WallId::new(id), base.join(root)));
        }
        walls.sort_by_key(|(id, _)| *id);
        for (expected, (id, _)) in (1..).zip(&walls) {
            if id.get() != expected {
                return Err(ManifestError::MissingWallId { missing: expected });
            }
        }

        let view = resolve_view(raw.view)?;
        Ok(Self { walls, view })
    }

    /// Wall roots in id order.
    #[must_use]
    pub fn walls(&self) -> &[(WallId, PathBuf)] {
        &self.walls
    }

    /// View configuration after applying overrides.
    #[must_use]
    pub fn view(&self) -> ViewConfig {
        self.view
    }

    /// Loads every wall set listed in the manifest.
    pub fn load_catalog(&self, loader: &mut impl SpriteLoader) -> WallArtCatalog {
        let sets = self
            .walls
            .iter()
            .map(|(id, root)| load_wall_set(*id, root, &mut *loader))
            .collect();
        let catalog = WallArtCatalog::new(sets);
        info!(
            walls = catalog.len(),
            sprites = catalog.loaded_count(),
            "wall art catalog loaded"
        );
        catalog
    }
}

fn resolve_view(raw: Option<RawView>) -> Result<ViewConfig, ManifestError> {
    let mut view = ViewConfig::default();
    let Some(raw) = raw else {
        return Ok(view);
    };
    view.width = raw.width.unwrap_or(view.width);
    view.height = raw.height.unwrap_or(view.height);
    if view.width == 0 || view.height == 0 {
        return Err(ManifestError::EmptyView {
            width: view.width,
            height: view.height,
        });
    }
    if view.width > MAX_VIEW_DIMENSION || view.height > MAX_VIEW_DIMENSION {
        return Err(ManifestError::OversizedView {
            width: view.width,
            height: view.height,
            max: MAX_VIEW_DIMENSION,
        });
    }
    if let Some([red, green, blue]) = raw.sky {
        view.sky = Color::from_rgb_u8(red, green, blue);
    }
    if let Some([red, green, blue]) = raw.ground {
        view.ground = Color::from_rgb_u8(red, green, blue);
    }
    if let Some(fraction) = raw.sky_fraction {
        view.sky_fraction = fraction.clamp(0.0, 1.0);
    }
    Ok(view)
}

/// Source of decoded sprite images.
pub trait SpriteLoader {
    /// Loads the image stored at `path`.
    fn load(&mut self, path: &Path) -> Result<Surface>;
}

impl<F> SpriteLoader for F
where
    F: FnMut(&Path) -> Result<Surface>,
{
    fn load(&mut self, path: &Path) -> Result<Surface> {
        self(path)
    }
}

/// Loader decoding PNG files with the `image` crate and applying
/// [`COLOR_KEY`].
#[derive(Clone, Copy, Debug, Default)]
pub struct PngSpriteLoader;

impl SpriteLoader for PngSpriteLoader {
    fn load(&mut self, path: &Path) -> Result<Surface> {
        let decoded = image::ImageReader::open(path)
            .with_context(|| format!("failed to open sprite at {}", path.display()))?
            .with_guessed_format()
            .with_context(|| format!("failed to sniff sprite format at {}", path.display()))?
            .decode()
            .with_context(|| format!("failed to decode sprite at {}", path.display()))?
            .to_rgba8();
        let (width, height) = decoded.dimensions();
        let mut surface = Surface::from_rgba(width, height, decoded.into_raw())?;
        surface.apply_color_key(COLOR_KEY);
        Ok(surface)
    }
}

/// Writes a surface to disk as a PNG image.
pub fn save_png(surface: &Surface, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let image = image::RgbaImage::from_raw(
        surface.width(),
        surface.height(),
        surface.as_rgba().to_vec(),
    )
    .context("surface buffer does not match its dimensions")?;
    image
        .save(path)
        .with_context(|| format!("failed to write png to {}", path.display()))
}

/// File name of the sprite for a direction and rank, e.g. `l2.png`.
#[must_use]
pub fn sprite_file_name(direction: ViewDirection, rank: u32) -> String {
    let prefix = match direction {
        ViewDirection::Front => 'f',
        ViewDirection::Left => 'l',
        ViewDirection::Right => 'r',
    };
    format!("{prefix}{rank}.png")
}

fn load_wall_set(id: WallId, root: &Path, loader: &mut impl SpriteLoader) -> WallSpriteSet {
    let mut load_direction = |direction: ViewDirection| -> Vec<Option<Surface>> {
        (0..VISIBLE_DEPTH)
            .map(|rank| {
                let path = root.join(sprite_file_name(direction, rank));
                match loader.load(&path) {
                    Ok(surface) => {
                        debug!(wall = id.get(), path = %path.display(), "loaded wall sprite");
                        Some(surface)
                    }
                    Err(error) => {
                        let reason = format!("{error:#}");
                        warn!(
                            wall = id.get(),
                            path = %path.display(),
                            error = %reason,
                            "wall sprite unavailable"
                        );
                        None
                    }
                }
            })
            .collect()
    };
    let front = load_direction(ViewDirection::Front);
    let left = load_direction(ViewDirection::Left);
    let right = load_direction(ViewDirection::Right);
    WallSpriteSet::new(front, left, right)
}
