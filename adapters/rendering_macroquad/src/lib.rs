#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Wanderings.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! The first-person view and the minimap arrive as finished RGBA surfaces;
//! this adapter uploads them to textures once per frame and overlays the HUD
//! text and the compass indicator.

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    color::{Color as MacroquadColor, WHITE, YELLOW},
    input::{is_key_down, is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
    text::measure_text,
    texture::{FilterMode, Image, Texture2D},
};
use std::time::Duration;
use tracing::info;
use wanderings_core::Facing;
use wanderings_rendering::{
    Color, FrameInput, HudPresentation, Presentation, RenderingBackend, Scene, Surface,
};

/// Window width in pixels.
pub const WINDOW_WIDTH: i32 = 640;
/// Window height in pixels.
pub const WINDOW_HEIGHT: i32 = 480;

const VIEW_ORIGIN: Vec2 = Vec2::new(40.0, 40.0);
const MINIMAP_ORIGIN: Vec2 = Vec2::new(390.0, 290.0);
const COMPASS_ORIGIN: Vec2 = Vec2::new(42.0, 42.0);
const COMPASS_SIZE: f32 = 24.0;
const HUD_MARGIN: f32 = 8.0;
const HUD_LINE_SPACING: f32 = 20.0;
const HUD_FONT_SIZE: f32 = 18.0;

/// Snapshot of the keys the adapter cares about on a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
struct KeyObservations {
    forward_down: bool,
    back_down: bool,
    strafe_left_down: bool,
    strafe_right_down: bool,
    turn_left_pressed: bool,
    turn_right_pressed: bool,
    quit_pressed: bool,
}

impl KeyObservations {
    fn poll() -> Self {
        let down = |keys: [KeyCode; 2]| keys.into_iter().any(is_key_down);
        let pressed = |keys: [KeyCode; 2]| keys.into_iter().any(is_key_pressed);

        Self {
            forward_down: down([KeyCode::W, KeyCode::Up]),
            back_down: down([KeyCode::S, KeyCode::Down]),
            strafe_left_down: down([KeyCode::Q, KeyCode::Comma]),
            strafe_right_down: down([KeyCode::E, KeyCode::Period]),
            turn_left_pressed: pressed([KeyCode::A, KeyCode::Left]),
            turn_right_pressed: pressed([KeyCode::D, KeyCode::Right]),
            quit_pressed: is_key_pressed(KeyCode::Escape),
        }
    }

    fn frame_input(self) -> FrameInput {
        FrameInput {
            forward: self.forward_down,
            back: self.back_down,
            strafe_left: self.strafe_left_down,
            strafe_right: self.strafe_right_down,
            turn_left: self.turn_left_pressed,
            turn_right: self.turn_right_pressed,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug, Default)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs the frame rate once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a frame and returns the average rate once a second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let per_second = self.frames as f32 / self.elapsed.as_secs_f32();
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            window_resizable: false,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut view_texture = SurfaceTexture::new(&scene.view);
            let mut minimap_texture = SurfaceTexture::new(&scene.minimap);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keys = KeyObservations::poll();
                if keys.quit_pressed {
                    info!("quit requested");
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                update_scene(frame_dt, keys.frame_input(), &mut scene);

                macroquad::window::clear_background(background);
                view_texture.draw(&scene.view, VIEW_ORIGIN);
                minimap_texture.draw(&scene.minimap, MINIMAP_ORIGIN);
                draw_compass(scene.hud.facing);
                draw_hud_text(&scene.hud, &scene.view);

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        info!(fps = f64::from(per_second), "frame rate");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// GPU texture mirroring a CPU surface, recreated when the surface resizes.
struct SurfaceTexture {
    texture: Texture2D,
    width: u32,
    height: u32,
}

impl SurfaceTexture {
    fn new(surface: &Surface) -> Self {
        let texture = Texture2D::from_image(&to_image(surface));
        texture.set_filter(FilterMode::Nearest);
        Self {
            texture,
            width: surface.width(),
            height: surface.height(),
        }
    }

    fn draw(&mut self, surface: &Surface, origin: Vec2) {
        if surface.width() != self.width || surface.height() != self.height {
            self.texture.delete();
            *self = Self::new(surface);
        } else {
            self.texture.update(&to_image(surface));
        }
        macroquad::texture::draw_texture(self.texture, origin.x, origin.y, WHITE);
    }
}

fn to_image(surface: &Surface) -> Image {
    Image {
        bytes: surface.as_rgba().to_vec(),
        width: u16::try_from(surface.width()).unwrap_or(u16::MAX),
        height: u16::try_from(surface.height()).unwrap_or(u16::MAX),
    }
}

fn draw_compass(facing: Facing) {
    let [tip, left, right] = compass_arrow(facing, COMPASS_ORIGIN, COMPASS_SIZE);
    macroquad::shapes::draw_triangle(
        to_macroquad_vec(tip),
        to_macroquad_vec(left),
        to_macroquad_vec(right),
        YELLOW,
    );
}

/// Triangle pointing towards `facing` inside the square at `origin`.
fn compass_arrow(facing: Facing, origin: Vec2, size: f32) -> [Vec2; 3] {
    let center = origin + Vec2::splat(size / 2.0);
    let direction = match facing {
        Facing::North => Vec2::new(0.0, -1.0),
        Facing::East => Vec2::new(1.0, 0.0),
        Facing::South => Vec2::new(0.0, 1.0),
        Facing::West => Vec2::new(-1.0, 0.0),
    };
    let half = size / 2.0;
    let across = direction.perp() * (half * 0.6);
    let tip = center + direction * half;
    let base = center - direction * (half * 0.6);
    [tip, base + across, base - across]
}

fn draw_hud_text(hud: &HudPresentation, view: &Surface) {
    let view_size = Vec2::new(view.width() as f32, view.height() as f32);
    let action_width = measure_text(&hud.action_message, None, HUD_FONT_SIZE as u16, 1.0).width;
    let lines = [
        hud.action_message.as_str(),
        hud.coordinate_lines[0].as_str(),
        hud.coordinate_lines[1].as_str(),
        hud.compass_message.as_str(),
    ];
    for (line, baseline) in lines.into_iter().zip(hud_baselines(view_size, action_width)) {
        let _ = macroquad::text::draw_text(line, baseline.x, baseline.y, HUD_FONT_SIZE, WHITE);
    }
}

/// Text baselines over the view: the action line centred along the top edge,
/// then the two coordinate lines and the compass sentence stacked in the
/// bottom-left corner.
fn hud_baselines(view_size: Vec2, action_width: f32) -> [Vec2; 4] {
    let left = VIEW_ORIGIN.x + HUD_MARGIN;
    let action_x = VIEW_ORIGIN.x + ((view_size.x - action_width) / 2.0).max(HUD_MARGIN);
    let bottom = VIEW_ORIGIN.y + view_size.y - HUD_MARGIN;
    [
        Vec2::new(action_x, VIEW_ORIGIN.y + HUD_MARGIN + HUD_FONT_SIZE),
        Vec2::new(left, bottom - 2.0 * HUD_LINE_SPACING),
        Vec2::new(left, bottom - HUD_LINE_SPACING),
        Vec2::new(left, bottom),
    ]
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> MacroquadColor {
    MacroquadColor::new(color.red, color.green, color.blue, color.alpha)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_observations_map_onto_frame_input() {
        let keys = KeyObservations {
            forward_down: true,
            strafe_right_down: true,
            turn_left_pressed: true,
            quit_pressed: true,
            ..KeyObservations::default()
        };

        assert_eq!(
            keys.frame_input(),
            FrameInput {
                forward: true,
                strafe_right: true,
                turn_left: true,
                ..FrameInput::default()
            }
        );
    }

    #[test]
    fn compass_arrow_points_towards_the_facing() {
        let origin = Vec2::ZERO;
        for (facing, expected_tip) in [
            (Facing::North, Vec2::new(12.0, 0.0)),
            (Facing::East, Vec2::new(24.0, 12.0)),
            (Facing::South, Vec2::new(12.0, 24.0)),
            (Facing::West, Vec2::new(0.0, 12.0)),
        ] {
            let [tip, left, right] = compass_arrow(facing, origin, 24.0);
            assert_eq!(tip, expected_tip, "tip for {facing:?}");
            assert!(left.distance(tip) > 0.0 && right.distance(tip) > 0.0);
            assert!(left != right);
        }
    }

    #[test]
    fn fps_counter_reports_once_per_second() {
        let mut counter = FpsCounter::default();
        let frame = Duration::from_millis(250);

        assert_eq!(counter.record_frame(frame), None);
        assert_eq!(counter.record_frame(frame), None);
        assert_eq!(counter.record_frame(frame), None);
        assert_eq!(counter.record_frame(frame), Some(4.0));
        assert_eq!(counter.record_frame(frame), None);
    }

    #[test]
    fn layout_fits_inside_the_window() {
        let view_right = VIEW_ORIGIN.x + 300.0;
        let minimap_bottom = MINIMAP_ORIGIN.y + 140.0;

        assert!(view_right <= MINIMAP_ORIGIN.x);
        assert!(minimap_bottom <= WINDOW_HEIGHT as f32);
        assert!(MINIMAP_ORIGIN.x + 140.0 <= WINDOW_WIDTH as f32);
    }

    #[test]
    fn hud_text_sits_over_the_view() {
        let view_size = Vec2::new(300.0, 400.0);
        let [action, x_line, z_line, compass] = hud_baselines(view_size, 100.0);

        assert_eq!(action, Vec2::new(140.0, 66.0), "action line is centred");
        assert_eq!(x_line, Vec2::new(48.0, 392.0));
        assert_eq!(z_line, Vec2::new(48.0, 412.0));
        assert_eq!(compass, Vec2::new(48.0, 432.0));
        for baseline in [action, x_line, z_line, compass] {
            assert!(baseline.x >= VIEW_ORIGIN.x && baseline.x < VIEW_ORIGIN.x + view_size.x);
            assert!(baseline.y - HUD_FONT_SIZE >= VIEW_ORIGIN.y);
            assert!(baseline.y <= VIEW_ORIGIN.y + view_size.y);
        }
    }

    #[test]
    fn wide_action_messages_keep_a_left_margin() {
        let [action, ..] = hud_baselines(Vec2::new(300.0, 400.0), 500.0);

        assert_eq!(action.x, VIEW_ORIGIN.x + HUD_MARGIN);
    }
}
