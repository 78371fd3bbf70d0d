#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts and software compositing for Wanderings
//! adapters.
//!
//! Frames are composed on the CPU into [`Surface`] buffers: the
//! [`ViewRenderer`] paints the first-person view from the wall grid and the
//! [`WallArtCatalog`], and [`MiniMap`] paints the explored cells. Backends
//! only upload finished surfaces and overlay text.

pub mod art;
pub mod assets;
pub mod minimap;
pub mod surface;
pub mod view;

use anyhow::Result as AnyResult;
use std::{error::Error, fmt, time::Duration};
use wanderings_core::Facing;

pub use art::{projection_offset, WallArtCatalog, WallSpriteSet};
pub use assets::{save_png, ArtManifest, ManifestError, PngSpriteLoader, SpriteLoader};
pub use minimap::MiniMap;
pub use surface::{blit, PixelRect, Surface};
pub use view::{compositing_order, ViewConfig, ViewRenderer, WallSlot};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color to RGBA bytes.
    #[must_use]
    pub fn to_rgba8(self) -> [u8; 4] {
        [
            channel_to_u8(self.red),
            channel_to_u8(self.green),
            channel_to_u8(self.blue),
            channel_to_u8(self.alpha),
        ]
    }
}

fn channel_to_u8(channel: f32) -> u8 {
    (channel.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Input snapshot gathered by adapters before updating the scene.
///
/// Motion flags report buttons currently held; turn flags report presses
/// detected on this frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Move forward is held.
    pub forward: bool,
    /// Move back is held.
    pub back: bool,
    /// Strafe left is held.
    pub strafe_left: bool,
    /// Strafe right is held.
    pub strafe_right: bool,
    /// Turn left was pressed.
    pub turn_left: bool,
    /// Turn right was pressed.
    pub turn_right: bool,
}

/// Text overlays drawn above the first-person view.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HudPresentation {
    /// Latest action message.
    pub action_message: String,
    /// Compass sentence naming the player's heading.
    pub compass_message: String,
    /// Heading shown by the compass indicator.
    pub facing: Facing,
    /// Coordinate readout lines.
    pub coordinate_lines: [String; 2],
}

impl Default for HudPresentation {
    fn default() -> Self {
        Self {
            action_message: String::new(),
            compass_message: String::new(),
            facing: Facing::North,
            coordinate_lines: [String::new(), String::new()],
        }
    }
}

/// Everything a backend displays for a single frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Composed first-person view.
    pub view: Surface,
    /// Composed minimap.
    pub minimap: Surface,
    /// Text overlays.
    pub hud: HudPresentation,
}

impl Scene {
    /// Creates a scene with blank surfaces of the provided sizes.
    #[must_use]
    pub fn new(view: ViewConfig, minimap: &MiniMap) -> Self {
        Self {
            view: view.surface(),
            minimap: minimap.surface().clone(),
            hud: HudPresentation::default(),
        }
    }
}

/// Data required to present a scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Creates a new presentation descriptor.
    #[must_use]
    pub fn new(window_title: impl Into<String>, clear_color: Color, scene: Scene) -> Self {
        Self {
            window_title: window_title.into(),
            clear_color,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Wanderings scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta and the
    /// per-frame input captured by the adapter, and refreshes the scene
    /// before it is drawn.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors raised while constructing rendering resources.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderingError {
    /// A pixel buffer does not match the declared surface dimensions.
    PixelBufferSize {
        /// Byte length implied by the dimensions.
        expected: usize,
        /// Byte length supplied.
        actual: usize,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PixelBufferSize { expected, actual } => {
                write!(
                    f,
                    "pixel buffer holds {actual} bytes but the surface needs {expected}"
                )
            }
        }
    }
}

impl Error for RenderingError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_colors_survive_the_float_round_trip() {
        for value in [0, 1, 16, 77, 128, 229, 255] {
            let rgba = Color::from_rgb_u8(value, value, value).to_rgba8();
            assert_eq!(rgba, [value, value, value, 255]);
        }
    }

    #[test]
    fn out_of_range_channels_saturate() {
        assert_eq!(Color::new(2.0, -1.0, 0.5, 1.0).to_rgba8(), [255, 0, 128, 255]);
    }

    #[test]
    fn scene_surfaces_match_their_sources() {
        let scene = Scene::new(ViewConfig::default(), &MiniMap::new(12, 8));

        assert_eq!((scene.view.width(), scene.view.height()), (300, 400));
        assert_eq!((scene.minimap.width(), scene.minimap.height()), (12, 8));
    }

    #[test]
    fn rendering_error_describes_the_mismatch() {
        let error = RenderingError::PixelBufferSize {
            expected: 16,
            actual: 3,
        };

        assert_eq!(
            error.to_string(),
            "pixel buffer holds 3 bytes but the surface needs 16"
        );
    }
}
