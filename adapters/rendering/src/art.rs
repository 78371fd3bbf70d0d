//! Wall sprite bundles and the fixed perspective table placing them on screen.

use glam::Vec2;
use wanderings_core::{DepthRank, ViewDirection, WallId, VISIBLE_DEPTH};

use crate::surface::Surface;

/// Multiplier applied to every entry of the projection table.
pub const PROJECTION_SCALE: f32 = 4.0;

/// Unscaled screen anchors of a single depth rank.
#[derive(Clone, Copy, Debug, PartialEq)]
struct RankAnchors {
    front_origin_x: f32,
    front_stride_x: f32,
    front_y: f32,
    left: Vec2,
    right: Vec2,
}

const RANK_ANCHORS: [RankAnchors; VISIBLE_DEPTH as usize] = [
    RankAnchors {
        front_origin_x: 6.0,
        front_stride_x: 63.0,
        front_y: 8.0,
        left: Vec2::new(0.0, 0.0),
        right: Vec2::new(69.0, 0.0),
    },
    RankAnchors {
        front_origin_x: 17.0,
        front_stride_x: 41.0,
        front_y: 23.0,
        left: Vec2::new(6.0, 8.0),
        right: Vec2::new(58.0, 8.0),
    },
    RankAnchors {
        front_origin_x: 23.0,
        front_stride_x: 29.0,
        front_y: 32.0,
        left: Vec2::new(17.0, 23.0),
        right: Vec2::new(52.0, 23.0),
    },
];

/// Screen-space top-left corner of a wall sprite.
///
/// `lateral` is the signed column offset of the cell relative to the view
/// axis and only affects front-facing sprites. Ranks beyond the table answer
/// the origin.
#[must_use]
pub fn projection_offset(direction: ViewDirection, rank: DepthRank, lateral: i32) -> Vec2 {
    let Some(anchors) = usize::try_from(rank.get())
        .ok()
        .and_then(|index| RANK_ANCHORS.get(index))
    else {
        return Vec2::ZERO;
    };

    let unscaled = match direction {
        ViewDirection::Front => Vec2::new(
            anchors.front_origin_x + anchors.front_stride_x * lateral as f32,
            anchors.front_y,
        ),
        ViewDirection::Left => anchors.left,
        ViewDirection::Right => anchors.right,
    };
    unscaled * PROJECTION_SCALE
}

/// Front, left and right sprites of a single wall type, one per depth rank.
///
/// Any slot may be empty when its image failed to load.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallSpriteSet {
    front: Vec<Option<Surface>>,
    left: Vec<Option<Surface>>,
    right: Vec<Option<Surface>>,
}

impl WallSpriteSet {
    /// Creates a set from per-rank sprite lists ordered nearest first.
    #[must_use]
    pub fn new(
        front: Vec<Option<Surface>>,
        left: Vec<Option<Surface>>,
        right: Vec<Option<Surface>>,
    ) -> Self {
        Self { front, left, right }
    }

    /// Number of ranks the set can serve.
    #[must_use]
    pub fn visible_depth(&self) -> u32 {
        u32::try_from(self.front.len().min(self.left.len()).min(self.right.len()))
            .unwrap_or(u32::MAX)
            .min(VISIBLE_DEPTH)
    }

    /// Sprite for the requested direction and rank.
    #[must_use]
    pub fn image(&self, direction: ViewDirection, rank: DepthRank) -> Option<&Surface> {
        if rank.get() >= self.visible_depth() {
            return None;
        }
        let sprites = match direction {
            ViewDirection::Front => &self.front,
            ViewDirection::Left => &self.left,
            ViewDirection::Right => &self.right,
        };
        sprites
            .get(usize::try_from(rank.get()).ok()?)
            .and_then(Option::as_ref)
    }

    /// Number of sprites that loaded successfully.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        [&self.front, &self.left, &self.right]
            .into_iter()
            .flatten()
            .filter(|sprite| sprite.is_some())
            .count()
    }
}

/// Read-only catalog mapping wall ids to their sprite sets.
///
/// Ids start at one; [`WallId::NONE`] and ids past the last set resolve to
/// no art.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WallArtCatalog {
    sets: Vec<WallSpriteSet>,
}

impl WallArtCatalog {
    /// Creates a catalog whose first set answers [`WallId::BRICK`].
    #[must_use]
    pub fn new(sets: Vec<WallSpriteSet>) -> Self {
        Self { sets }
    }

    /// Number of wall types in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    /// Returns `true` when the catalog holds no wall types.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Sprite set for the provided wall id.
    #[must_use]
    pub fn set(&self, wall: WallId) -> Option<&WallSpriteSet> {
        let index = usize::from(wall.get()).checked_sub(1)?;
        self.sets.get(index)
    }

    /// Sprite drawn for `wall` seen from `direction` at depth `rank`.
    #[must_use]
    pub fn sprite_for(
        &self,
        wall: WallId,
        direction: ViewDirection,
        rank: DepthRank,
    ) -> Option<&Surface> {
        self.set(wall)?.image(direction, rank)
    }

    /// Screen-space placement of a sprite; see [`projection_offset`].
    #[must_use]
    pub fn offset_for(&self, direction: ViewDirection, rank: DepthRank, lateral: i32) -> Vec2 {
        projection_offset(direction, rank, lateral)
    }

    /// Number of sprites that loaded successfully across all sets.
    #[must_use]
    pub fn loaded_count(&self) -> usize {
        self.sets.iter().map(WallSpriteSet::loaded_count).sum()
    }
}
