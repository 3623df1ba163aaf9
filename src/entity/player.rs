use super::{Positioned, Renderable, TILE_HEIGHT, TILE_WIDTH};
use crate::engine::Point;

/// Playable characters shown on the select screen, in cursor order.
pub const ROSTER: [&str; 5] = [
    "images/char-boy.png",
    "images/char-cat-girl.png",
    "images/char-horn-girl.png",
    "images/char-pink-girl.png",
    "images/char-princess-girl.png",
];

pub const SELECTOR_SPRITE: &str = "images/Selector.png";
pub const STARTING_LIVES: i32 = 3;

// start cell: middle column, bottom grass row (nudged down to center the art)
const START_X: f32 = TILE_WIDTH * 2.0;
const START_Y: f32 = TILE_HEIGHT * 4.0 + 43.0;
// crossing above this line means the water was reached
const GOAL_Y: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Debug, Clone)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    sprite_index: Option<usize>,
    pub score: u32,
    pub lives: i32,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: START_X,
            y: START_Y,
            sprite_index: None,
            score: 0,
            lives: STARTING_LIVES,
        }
    }

    /// One tile per press, clamped to the playfield. Dead players stay put.
    pub fn step(&mut self, direction: Direction) {
        if self.lives <= 0 {
            return;
        }
        match direction {
            Direction::Left => {
                if self.x >= TILE_WIDTH {
                    self.x -= TILE_WIDTH;
                }
            }
            Direction::Right => {
                if self.x <= TILE_WIDTH * 3.0 {
                    self.x += TILE_WIDTH;
                }
            }
            Direction::Up => {
                if self.y >= 0.0 {
                    self.y -= TILE_HEIGHT;
                }
            }
            Direction::Down => {
                if self.y <= TILE_HEIGHT * 4.0 {
                    self.y += TILE_HEIGHT;
                }
            }
        }
    }

    pub fn reached_goal(&self) -> bool {
        self.y < GOAL_Y
    }

    pub fn reset_position(&mut self) {
        self.x = START_X;
        self.y = START_Y;
    }

    /// Score only ever grows; the explicit reset is the one exception.
    pub fn add_score(&mut self, points: u32) {
        self.score += points;
    }

    pub fn reset_score(&mut self) {
        self.score = 0;
    }

    /// The single designated life operation: +1 for a star, -1 for a hit.
    pub fn adjust_lives(&mut self, delta: i32) {
        self.lives += delta;
    }

    pub fn reset_lives(&mut self) {
        self.lives = STARTING_LIVES;
    }

    pub fn select_sprite(&mut self, index: usize) {
        self.sprite_index = Some(index.min(ROSTER.len() - 1));
    }

    pub fn deselect_sprite(&mut self) {
        self.sprite_index = None;
    }

    pub fn is_selected(&self) -> bool {
        self.sprite_index.is_some()
    }

    pub fn sprite_index(&self) -> Option<usize> {
        self.sprite_index
    }
}

impl Default for Player {
    fn default() -> Self {
        Player::new()
    }
}

impl Positioned for Player {
    fn position(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }
}

impl Renderable for Player {
    fn sprite(&self) -> Option<&str> {
        self.sprite_index.map(|index| ROSTER[index])
    }
}

/// HUD text is a pure function of the numeric state; the strings are part
/// of the game's look and are matched exactly by tests.
pub fn score_text(score: u32) -> String {
    match score {
        0..=9 => format!("Score: 00{}", score),
        10..=99 => format!("Score: 0{}", score),
        100..=999 => format!("Score: {}", score),
        _ => "Stop it. This game isn't that good. Go read a book or something.".to_string(),
    }
}

pub fn lives_text(lives: i32) -> String {
    format!("Lives: {}", lives)
}
