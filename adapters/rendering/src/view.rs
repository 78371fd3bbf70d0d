//! First-person view compositor.
//!
//! The view is painted back to front: for every depth rank, starting with the
//! farthest, the front walls of the neighbouring cells go down first, then
//! the side walls of the cell on the view axis, and finally its own front
//! wall.

use wanderings_core::{DepthRank, Position, ViewDirection, WallGrid};

use crate::{
    art::WallArtCatalog,
    surface::{blit, PixelRect, Surface},
    Color,
};

/// Number of cells beside the view axis whose front walls are drawn.
pub const LATERAL_REACH: i32 = 1;

/// Dimensions and backdrop colours of the first-person view.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewConfig {
    /// Width of the view in pixels.
    pub width: u32,
    /// Height of the view in pixels.
    pub height: u32,
    /// Colour of the upper band.
    pub sky: Color,
    /// Colour of the lower band.
    pub ground: Color,
    /// Share of the height covered by the sky.
    pub sky_fraction: f32,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            width: 300,
            height: 400,
            sky: Color::from_rgb_u8(77, 130, 229),
            ground: Color::from_rgb_u8(16, 80, 30),
            sky_fraction: 0.6,
        }
    }
}

impl ViewConfig {
    /// Height of the sky band in pixels.
    #[must_use]
    pub fn horizon(&self) -> u32 {
        (self.height as f32 * self.sky_fraction) as u32
    }

    /// Creates a surface matching the configured view size.
    #[must_use]
    pub fn surface(&self) -> Surface {
        Surface::new(self.width, self.height)
    }
}

/// A single wall lookup performed while composing a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WallSlot {
    /// Cell and side whose wall id is looked up.
    pub cell: Position,
    /// Sprite orientation used for the wall.
    pub direction: ViewDirection,
    /// Depth of the cell along the view axis.
    pub rank: DepthRank,
    /// Signed column offset from the view axis, negative to the left.
    pub lateral: i32,
}

/// Wall lookups for `position` in compositing order.
#[must_use]
pub fn compositing_order(position: &Position) -> Vec<WallSlot> {
    let mut slots = Vec::new();
    for rank in DepthRank::FAR_TO_NEAR {
        let base = position.ahead(rank.steps());
        let front = |cell: Position, lateral: i32| WallSlot {
            cell,
            direction: ViewDirection::Front,
            rank,
            lateral,
        };

        for offset in (1..=LATERAL_REACH).rev() {
            slots.push(front(base.left_of(offset), -offset));
        }
        for offset in (1..=LATERAL_REACH).rev() {
            slots.push(front(base.right_of(offset), offset));
        }
        slots.push(WallSlot {
            cell: base.left_facing(),
            direction: ViewDirection::Left,
            rank,
            lateral: 0,
        });
        slots.push(WallSlot {
            cell: base.right_facing(),
            direction: ViewDirection::Right,
            rank,
            lateral: 0,
        });
        slots.push(front(base, 0));
    }
    slots
}

/// Composes first-person frames from a wall grid and a wall art catalog.
#[derive(Clone, Copy, Debug)]
pub struct ViewRenderer<'art> {
    art: &'art WallArtCatalog,
    config: ViewConfig,
}

impl<'art> ViewRenderer<'art> {
    /// Creates a renderer drawing with the provided art.
    #[must_use]
    pub fn new(art: &'art WallArtCatalog, config: ViewConfig) -> Self {
        Self { art, config }
    }

    /// View configuration in use.
    #[must_use]
    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    /// Paints the backdrop and every visible wall onto `target`.
    ///
    /// Walls without art are skipped. The target is not resized; anything
    /// outside it is clipped.
    pub fn render_frame<G>(&self, target: &mut Surface, grid: &G, position: &Position)
    where
        G: WallGrid + ?Sized,
    {
        let horizon = self.config.horizon();
        target.fill_rect(
            PixelRect::new(0, 0, self.config.width, horizon),
            self.config.sky,
        );
        target.fill_rect(
            PixelRect::new(
                0,
                i32::try_from(horizon).unwrap_or(i32::MAX),
                self.config.width,
                self.config.height.saturating_sub(horizon),
            ),
            self.config.ground,
        );

        for slot in compositing_order(position) {
            let wall = grid.wall_id_at(&slot.cell);
            let Some(sprite) = self.art.sprite_for(wall, slot.direction, slot.rank) else {
                continue;
            };
            let offset = self
                .art
                .offset_for(slot.direction, slot.rank, slot.lateral)
                .as_ivec2();
            blit(Some(sprite), Some(&mut *target), None, offset);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wanderings_core::Facing;

    #[test]
    fn compositing_order_paints_far_ranks_first() {
        let slots = compositing_order(&Position::new(5, 5, Facing::North));

        assert_eq!(slots.len(), 15);
        let ranks: Vec<u32> = slots.iter().map(|slot| slot.rank.get()).collect();
        assert_eq!(ranks, [2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn compositing_order_within_a_rank() {
        let slots = compositing_order(&Position::new(5, 5, Facing::North));
        let far: Vec<_> = slots[..5]
            .iter()
            .map(|slot| (slot.cell, slot.direction, slot.lateral))
            .collect();

        assert_eq!(
            far,
            vec![
                (Position::new(4, 3, Facing::North), ViewDirection::Front, -1),
                (Position::new(6, 3, Facing::North), ViewDirection::Front, 1),
                (Position::new(5, 3, Facing::West), ViewDirection::Left, 0),
                (Position::new(5, 3, Facing::East), ViewDirection::Right, 0),
                (Position::new(5, 3, Facing::North), ViewDirection::Front, 0),
            ]
        );
    }

    #[test]
    fn horizon_splits_sixty_forty() {
        assert_eq!(ViewConfig::default().horizon(), 240);
    }
}
