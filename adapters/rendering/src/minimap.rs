//! Top-down overview of the explored cells.

use glam::IVec2;
use wanderings_core::Position;

use crate::{
    surface::{blit, PixelRect, Surface},
    Color,
};

/// Default edge length of the minimap in pixels.
pub const DEFAULT_MINIMAP_SIZE: i32 = 140;

const BACKGROUND: Color = Color::from_rgb_u8(0, 0, 0);
const PLAYER: Color = Color::from_rgb_u8(255, 255, 0);
const VISITED: Color = Color::from_rgb_u8(0, 128, 0);
const UNVISITED: Color = Color::from_rgb_u8(32, 32, 32);

/// Minimap surface painted one square per map cell.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MiniMap {
    surface: Surface,
}

impl MiniMap {
    /// Creates a minimap; non-positive sizes are clamped to one pixel.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        let clamp = |size: i32| u32::try_from(size.max(1)).unwrap_or(1);
        Self {
            surface: Surface::new(clamp(width), clamp(height)),
        }
    }

    /// Rendered minimap.
    #[must_use]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Repaints the minimap for a `columns` × `rows` map.
    ///
    /// Visited cells are green, the visited cell under the player yellow, and
    /// everything else dark grey.
    pub fn update<F>(&mut self, columns: u32, rows: u32, player: &Position, is_visited: F)
    where
        F: Fn(i32, i32) -> bool,
    {
        self.surface.fill(BACKGROUND);
        if columns == 0 || rows == 0 {
            return;
        }

        let cell_width = (self.surface.width() / columns).max(1);
        let cell_height = (self.surface.height() / rows).max(1);
        for row in 0..rows {
            for column in 0..columns {
                let (Ok(x), Ok(y)) = (i32::try_from(column), i32::try_from(row)) else {
                    continue;
                };
                let color = if is_visited(x, y) {
                    if x == player.x && y == player.y {
                        PLAYER
                    } else {
                        VISITED
                    }
                } else {
                    UNVISITED
                };
                let rect = PixelRect::new(
                    x.saturating_mul(i32::try_from(cell_width).unwrap_or(i32::MAX)),
                    y.saturating_mul(i32::try_from(cell_height).unwrap_or(i32::MAX)),
                    cell_width,
                    cell_height,
                );
                self.surface.fill_rect(rect, color);
            }
        }
    }

    /// Copies the minimap onto `target` with its top-left corner at `dest`.
    pub fn render(&self, target: Option<&mut Surface>, dest: IVec2) {
        blit(Some(&self.surface), target, None, dest);
    }
}

impl Default for MiniMap {
    fn default() -> Self {
        Self::new(DEFAULT_MINIMAP_SIZE, DEFAULT_MINIMAP_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wanderings_core::Facing;

    const YELLOW: [u8; 4] = [255, 255, 0, 255];
    const GREEN: [u8; 4] = [0, 128, 0, 255];
    const GREY: [u8; 4] = [32, 32, 32, 255];

    #[test]
    fn non_positive_sizes_clamp_to_one_pixel() {
        let minimap = MiniMap::new(0, -7);

        assert_eq!(minimap.surface().width(), 1);
        assert_eq!(minimap.surface().height(), 1);
    }

    #[test]
    fn cells_are_coloured_by_visit_state() {
        let mut minimap = MiniMap::new(20, 20);
        let player = Position::new(1, 0, Facing::East);

        minimap.update(2, 2, &player, |x, y| y == 0 || x == 9);

        assert_eq!(minimap.surface().pixel(0, 0), Some(GREEN));
        assert_eq!(minimap.surface().pixel(10, 0), Some(YELLOW));
        assert_eq!(minimap.surface().pixel(19, 9), Some(YELLOW));
        assert_eq!(minimap.surface().pixel(0, 10), Some(GREY));
        assert_eq!(minimap.surface().pixel(15, 15), Some(GREY));
    }

    #[test]
    fn leftover_pixels_stay_black() {
        let mut minimap = MiniMap::new(7, 7);

        minimap.update(3, 3, &Position::ORIGIN, |_, _| false);

        assert_eq!(minimap.surface().pixel(5, 5), Some(GREY));
        assert_eq!(minimap.surface().pixel(6, 6), Some([0, 0, 0, 255]));
    }

    #[test]
    fn render_copies_onto_the_target_at_the_offset() {
        let mut minimap = MiniMap::new(2, 2);
        minimap.update(1, 1, &Position::ORIGIN, |_, _| true);
        let mut screen = Surface::new(4, 4);

        minimap.render(Some(&mut screen), IVec2::new(2, 2));

        assert_eq!(screen.pixel(3, 3), Some(YELLOW));
        assert_eq!(screen.pixel(1, 1), Some([0, 0, 0, 0]));
    }

    #[test]
    fn empty_maps_leave_a_blank_surface() {
        let mut minimap = MiniMap::default();

        minimap.update(0, 4, &Position::ORIGIN, |_, _| true);

        assert_eq!(minimap.surface().pixel(70, 70), Some([0, 0, 0, 255]));
    }
}
