pub mod enemy;
pub mod item;
pub mod player;

pub use enemy::Enemy;
pub use item::Item;
pub use player::Player;

use crate::engine::{Assets, Point, Renderer};

// ==================== Playfield geometry ====================
// Everything on screen is laid out on a 5x6 grid of these tiles.
pub const TILE_WIDTH: f32 = 101.0;
pub const TILE_HEIGHT: f32 = 83.0;
pub const COLUMNS: u32 = 5;
pub const ROWS: u32 = 6;
pub const CANVAS_WIDTH: f32 = 505.0;
pub const CANVAS_HEIGHT: f32 = 606.0;
/// Enemies count as gone a couple of pixels before the canvas edge.
pub const FIELD_WIDTH: f32 = 503.0;

pub trait Positioned {
    fn position(&self) -> Point;
}

/// Shared render contract for every game piece. A piece without an active
/// sprite draws nothing, which is how inactive items stay invisible.
pub trait Renderable: Positioned {
    fn sprite(&self) -> Option<&str>;

    fn draw(&self, renderer: &Renderer, assets: &Assets) {
        if let Some(name) = self.sprite() {
            if let Some(image) = assets.get(name) {
                renderer.draw_image(image, &self.position());
            }
        }
    }
}

// ==================== Collision detection ====================

/// Asymmetric overlap margins, measured player-minus-other. The margins
/// come from the sprite artwork, not the raw image dimensions.
#[derive(Debug, Clone, Copy)]
pub struct HitBox {
    pub min_dx: f32,
    pub max_dx: f32,
    pub min_dy: f32,
    pub max_dy: f32,
}

impl HitBox {
    pub fn overlaps(&self, player: Point, other: Point) -> bool {
        let dx = player.x - other.x;
        let dy = player.y - other.y;
        dx >= self.min_dx && dx <= self.max_dx && dy >= self.min_dy && dy <= self.max_dy
    }
}

pub const ENEMY_HIT_BOX: HitBox = HitBox {
    min_dx: -47.0,
    max_dx: 63.0,
    min_dy: -64.0,
    max_dy: 51.0,
};

pub const GEM_HIT_BOX: HitBox = HitBox {
    min_dx: -66.0,
    max_dx: 67.0,
    min_dy: -87.0,
    max_dy: 48.0,
};

pub const STAR_HIT_BOX: HitBox = HitBox {
    min_dx: -51.0,
    max_dx: 50.0,
    min_dy: -61.0,
    max_dy: 59.0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collision {
    Enemy(usize),
    Gem,
    Star,
}

/// Detection only; the caller decides the response. Inactive items sit at
/// the off-field sentinel and never overlap anything on the grid.
pub fn check_collisions(
    player: &Player,
    enemies: &[Enemy],
    gem: &Item,
    star: &Item,
) -> Vec<Collision> {
    let mut events = Vec::new();
    let player_pos = player.position();
    for (index, enemy) in enemies.iter().enumerate() {
        if ENEMY_HIT_BOX.overlaps(player_pos, enemy.position()) {
            events.push(Collision::Enemy(index));
        }
    }
    if gem.is_active() && GEM_HIT_BOX.overlaps(player_pos, gem.position()) {
        events.push(Collision::Gem);
    }
    if star.is_active() && STAR_HIT_BOX.overlaps(player_pos, star.position()) {
        events.push(Collision::Star);
    }
    events
}
