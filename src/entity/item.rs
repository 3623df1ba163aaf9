use super::enemy::{lane_y, LANES};
use super::{Positioned, Renderable, COLUMNS, TILE_WIDTH};
use crate::engine::Point;
use rand::Rng;

pub const GEM_SPRITES: &[&str] = &[
    "images/Gem Blue.png",
    "images/Gem Green.png",
    "images/Gem Orange.png",
];
pub const STAR_SPRITES: &[&str] = &["images/Star.png"];

/// Score divisors: the gem shows on every 6th point, the star every 10th.
pub const GEM_FREQUENCY: u32 = 6;
pub const STAR_FREQUENCY: u32 = 10;

// parked here while inactive; nothing on the grid can reach it
const OFF_FIELD: f32 = -100.0;

#[derive(Debug, Clone)]
pub struct Item {
    pub x: f32,
    pub y: f32,
    sprite: Option<&'static str>,
    roster: &'static [&'static str],
    frequency: u32,
}

impl Item {
    pub fn new(roster: &'static [&'static str], frequency: u32) -> Self {
        Item {
            x: OFF_FIELD,
            y: OFF_FIELD,
            sprite: None,
            roster,
            frequency,
        }
    }

    /// The scoring gem.
    pub fn gem() -> Self {
        Item::new(GEM_SPRITES, GEM_FREQUENCY)
    }

    /// The extra-life star.
    pub fn star() -> Self {
        Item::new(STAR_SPRITES, STAR_FREQUENCY)
    }

    /// Re-evaluated on every score change: visible only while the score is
    /// a positive multiple of this item's frequency, at a random cell on
    /// the stone rows with a random sprite from the roster.
    pub fn recompute(&mut self, score: u32, rng: &mut impl Rng) {
        if score > 0 && score % self.frequency == 0 {
            self.sprite = Some(self.roster[rng.gen_range(0..self.roster.len())]);
            self.x = rng.gen_range(0..COLUMNS) as f32 * TILE_WIDTH;
            self.y = lane_y(rng.gen_range(LANES));
        } else {
            self.deactivate();
        }
    }

    /// Explicit reset to the off-field sentinel, called on pickup.
    pub fn deactivate(&mut self) {
        self.x = OFF_FIELD;
        self.y = OFF_FIELD;
        self.sprite = None;
    }

    pub fn is_active(&self) -> bool {
        self.sprite.is_some()
    }

    pub fn frequency(&self) -> u32 {
        self.frequency
    }
}

impl Positioned for Item {
    fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

impl Renderable for Item {
    fn sprite(&self) -> Option<&str> {
        self.sprite
    }
}
