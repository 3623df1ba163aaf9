use super::{Positioned, Renderable, FIELD_WIDTH, TILE_HEIGHT};
use crate::engine::Point;
use rand::Rng;
use std::ops::RangeInclusive;

pub const SPRITE: &str = "images/enemy-bug.png";
/// The stone rows the bugs travel along.
pub const LANES: RangeInclusive<u32> = 1..=3;

const MIN_SPEED: f32 = 150.0;
const MAX_SPEED: f32 = 250.0;
// bug art sits a little above its row so the sprite lines up with the tile
const LANE_Y_OFFSET: f32 = -20.0;

/// Vertical origin of a lane. Items share this formula so gems spawn on
/// the same rows the bugs drive down.
pub fn lane_y(lane: u32) -> f32 {
    lane as f32 * TILE_HEIGHT + LANE_Y_OFFSET
}

#[derive(Debug, Clone)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    speed: f32,
}

impl Enemy {
    pub fn new(lane: u32, rng: &mut impl Rng) -> Self {
        Enemy {
            x: 0.0,
            y: lane_y(lane),
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
        }
    }

    /// Frame-rate independent motion: `dt` is seconds since the last step.
    pub fn advance(&mut self, dt: f32) {
        self.x += self.speed * dt;
    }

    pub fn has_exited_field(&self) -> bool {
        self.x > FIELD_WIDTH
    }

    /// Back to the left edge of the given lane.
    pub fn recycle(&mut self, lane: u32) {
        self.x = 0.0;
        self.y = lane_y(lane);
    }

    /// Recycle-in-place on field exit: random lane, fresh speed, same
    /// allocation. The enemy population never changes size.
    pub fn recycle_random(&mut self, rng: &mut impl Rng) {
        self.recycle(rng.gen_range(LANES));
        self.speed = rng.gen_range(MIN_SPEED..MAX_SPEED);
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }
}

impl Positioned for Enemy {
    fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

impl Renderable for Enemy {
    fn sprite(&self) -> Option<&str> {
        Some(SPRITE)
    }
}
