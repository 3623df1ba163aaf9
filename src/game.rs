use crate::browser;
use crate::engine::input::Input;
use crate::engine::{AssetManifest, Assets, Audio, Cue, Game, Point, Rect, Renderer};
use crate::entity::player::{self, Direction};
use crate::entity::{
    check_collisions, Collision, Enemy, Item, Player, Renderable, CANVAS_HEIGHT, CANVAS_WIDTH,
    COLUMNS, TILE_HEIGHT, TILE_WIDTH,
};
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use rand::{thread_rng, Rng};

/// Background tiles top to bottom: the water goal row, three stone lanes
/// the bugs drive down, two grass rows for the player.
const ROW_SPRITES: [&str; 6] = [
    "images/water-block.png",
    "images/stone-block.png",
    "images/stone-block.png",
    "images/stone-block.png",
    "images/grass-block.png",
    "images/grass-block.png",
];

const ENEMY_COUNT: u32 = 3;

/// Which screen owns update, draw and input right now.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    CharacterSelect { cursor: usize },
    Playing,
    GameOver,
}

/// The full game state behind the mode machine. Pure data plus pure
/// transitions: audio comes back to the caller as cues and all randomness
/// flows in through the `Rng` handle, so native tests can drive the whole
/// thing deterministically.
pub struct World {
    pub mode: Mode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub gem: Item,
    pub star: Item,
}

impl World {
    pub fn new(rng: &mut impl Rng) -> Self {
        World {
            mode: Mode::CharacterSelect { cursor: 0 },
            player: Player::new(),
            enemies: (1..=ENEMY_COUNT).map(|lane| Enemy::new(lane, rng)).collect(),
            gem: Item::gem(),
            star: Item::star(),
        }
    }

    /// Apply one key press to whichever screen is active. Returns the
    /// sound cues the press produced.
    pub fn handle_input(&mut self, input: Input) -> Vec<Cue> {
        let mut cues = Vec::new();
        match self.mode {
            Mode::CharacterSelect { cursor } => match input {
                // bounds clamp, no wraparound
                Input::Left if cursor > 0 => {
                    self.mode = Mode::CharacterSelect { cursor: cursor - 1 };
                    cues.push(Cue::MenuNavigate);
                }
                Input::Right if cursor < player::ROSTER.len() - 1 => {
                    self.mode = Mode::CharacterSelect { cursor: cursor + 1 };
                    cues.push(Cue::MenuNavigate);
                }
                Input::Enter => {
                    self.start_game(cursor);
                    cues.push(Cue::Hit);
                }
                _ => {}
            },
            Mode::Playing => {
                if let Some(direction) = direction_of(input) {
                    self.player.step(direction);
                }
            }
            Mode::GameOver => {
                if input == Input::Space {
                    self.restart();
                    cues.push(Cue::Hit);
                }
            }
        }
        cues
    }

    /// One fixed timestep of gameplay. A no-op outside Playing, which is
    /// what keeps the game-over screen frozen until restart.
    pub fn update(&mut self, dt: f32, rng: &mut impl Rng) -> Vec<Cue> {
        let mut cues = Vec::new();
        if self.mode != Mode::Playing {
            return cues;
        }

        for enemy in &mut self.enemies {
            enemy.advance(dt);
            if enemy.has_exited_field() {
                enemy.recycle_random(rng);
            }
        }

        if self.player.reached_goal() {
            cues.push(Cue::Achievement);
            self.player.reset_position();
            self.award_points(1, rng);
        }

        for event in check_collisions(&self.player, &self.enemies, &self.gem, &self.star) {
            match event {
                Collision::Enemy(_) => {
                    cues.push(Cue::Hit);
                    self.player.reset_position();
                    self.player.adjust_lives(-1);
                }
                Collision::Gem => {
                    self.award_points(1, rng);
                    cues.push(Cue::Pickup);
                    self.gem.deactivate();
                }
                Collision::Star => {
                    self.player.adjust_lives(1);
                    cues.push(Cue::Pickup);
                    self.star.deactivate();
                }
            }
        }

        if self.player.lives <= 0 {
            self.mode = Mode::GameOver;
            cues.push(Cue::HeroDeath);
        }

        cues
    }

    /// Item visibility depends on the score, so every score change runs
    /// through here.
    fn award_points(&mut self, points: u32, rng: &mut impl Rng) {
        self.player.add_score(points);
        self.gem.recompute(self.player.score, rng);
        self.star.recompute(self.player.score, rng);
    }

    fn start_game(&mut self, sprite_index: usize) {
        self.player.select_sprite(sprite_index);
        self.reset_entities();
        self.mode = Mode::Playing;
    }

    fn restart(&mut self) {
        self.reset_entities();
        self.player.deselect_sprite();
        self.mode = Mode::CharacterSelect { cursor: 0 };
    }

    /// Back to the initial board: start cell, zero score, full lives,
    /// enemies in their fixed starting lanes, items parked off field.
    fn reset_entities(&mut self) {
        self.player.reset_position();
        self.player.reset_score();
        self.player.reset_lives();
        for (index, enemy) in self.enemies.iter_mut().enumerate() {
            enemy.recycle(index as u32 + 1);
        }
        self.gem.deactivate();
        self.star.deactivate();
    }
}

// ==================== Game implementation ====================

pub enum Froggo {
    /// Waiting on the asset manifest and everything it names.
    Loading,
    /// Assets are in; the world is live.
    Loaded(Session),
}

pub struct Session {
    world: World,
    assets: Assets,
    audio: Audio,
}

impl Froggo {
    const MANIFEST_PATH: &'static str = "assets.json";

    pub fn new() -> Self {
        Froggo::Loading
    }
}

impl Default for Froggo {
    fn default() -> Self {
        Froggo::new()
    }
}

#[async_trait(?Send)]
impl Game for Froggo {
    async fn initialize(&self) -> Result<Box<dyn Game>> {
        match self {
            Froggo::Loading => {
                let manifest: AssetManifest = browser::fetch_json(Self::MANIFEST_PATH)
                    .await
                    .with_context(|| {
                        format!("Failed to load asset manifest from : {}", Self::MANIFEST_PATH)
                    })?;
                let assets = Assets::load(&manifest.images).await?;
                let audio = Audio::new(&manifest.audio)?;
                let world = World::new(&mut thread_rng());
                Ok(Box::new(Froggo::Loaded(Session {
                    world,
                    assets,
                    audio,
                })))
            }
            Froggo::Loaded(_) => Err(anyhow!("Game is already initialized")),
        }
    }

    fn handle_input(&mut self, input: Input) {
        if let Froggo::Loaded(session) = self {
            let was_playing = session.world.mode == Mode::Playing;
            for cue in session.world.handle_input(input) {
                session.audio.play(cue);
            }
            if !was_playing && session.world.mode == Mode::Playing {
                session.audio.start_music();
            }
        }
    }

    fn update(&mut self, dt: f32) {
        if let Froggo::Loaded(session) = self {
            let was_over = session.world.mode == Mode::GameOver;
            for cue in session.world.update(dt, &mut thread_rng()) {
                session.audio.play(cue);
            }
            if !was_over && session.world.mode == Mode::GameOver {
                session.audio.stop_music();
            }
        }
    }

    fn draw(&self, renderer: &Renderer) {
        let session = match self {
            Froggo::Loaded(session) => session,
            Froggo::Loading => return,
        };
        renderer.clear(&Rect {
            x: 0.0,
            y: 0.0,
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        });
        draw_background(renderer, &session.assets);
        match session.world.mode {
            Mode::CharacterSelect { cursor } => {
                draw_character_select(renderer, &session.assets, cursor);
                draw_start_text(renderer);
            }
            Mode::Playing => {
                draw_playfield(renderer, session);
            }
            Mode::GameOver => {
                draw_playfield(renderer, session);
                draw_game_over_text(renderer);
            }
        }
    }
}

fn direction_of(input: Input) -> Option<Direction> {
    match input {
        Input::Left => Some(Direction::Left),
        Input::Right => Some(Direction::Right),
        Input::Up => Some(Direction::Up),
        Input::Down => Some(Direction::Down),
        Input::Enter | Input::Space => None,
    }
}

// ==================== Screen rendering ====================

fn draw_background(renderer: &Renderer, assets: &Assets) {
    for (row, sprite) in ROW_SPRITES.iter().enumerate() {
        for col in 0..COLUMNS {
            if let Some(image) = assets.get(sprite) {
                renderer.draw_image(
                    image,
                    &Point {
                        x: col as f32 * TILE_WIDTH,
                        y: row as f32 * TILE_HEIGHT,
                    },
                );
            }
        }
    }
}

/// Draw order matters : enemies under items under the player, HUD on top.
fn draw_playfield(renderer: &Renderer, session: &Session) {
    for enemy in &session.world.enemies {
        enemy.draw(renderer, &session.assets);
    }
    session.world.gem.draw(renderer, &session.assets);
    session.world.star.draw(renderer, &session.assets);
    session.world.player.draw(renderer, &session.assets);
    draw_hud(renderer, &session.world.player);
}

fn draw_hud(renderer: &Renderer, player: &Player) {
    renderer.text(&player::lives_text(player.lives), &Point { x: 15.0, y: 577.0 });
    renderer.text(
        &player::score_text(player.score),
        &Point { x: 350.0, y: 577.0 },
    );
}

fn draw_character_select(renderer: &Renderer, assets: &Assets, cursor: usize) {
    let row_y = TILE_HEIGHT * 4.0 + 43.0;
    if let Some(selector) = assets.get(player::SELECTOR_SPRITE) {
        renderer.draw_image(
            selector,
            &Point {
                x: cursor as f32 * TILE_WIDTH,
                y: row_y,
            },
        );
    }
    for (index, sprite) in player::ROSTER.iter().enumerate() {
        if let Some(image) = assets.get(sprite) {
            renderer.draw_image(
                image,
                &Point {
                    x: index as f32 * TILE_WIDTH,
                    y: row_y,
                },
            );
        }
    }
}

fn draw_start_text(renderer: &Renderer) {
    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;
    renderer.save();
    renderer.set_text_align("center");
    renderer.set_font("80pt impact");
    renderer.set_line_width(3.0);
    renderer.text(
        "FROGGO!",
        &Point {
            x: center_x,
            y: center_y - 50.0,
        },
    );
    renderer.set_font("20pt impact");
    renderer.set_line_width(2.0);
    renderer.text(
        "A misleadingly titled game!",
        &Point {
            x: center_x,
            y: center_y - 15.0,
        },
    );
    renderer.text(
        "Use arrow keys to select player",
        &Point {
            x: center_x,
            y: center_y + 40.0,
        },
    );
    renderer.text(
        "and press Enter to play!",
        &Point {
            x: center_x,
            y: center_y + 70.0,
        },
    );
    renderer.restore();
}

fn draw_game_over_text(renderer: &Renderer) {
    let center_x = CANVAS_WIDTH / 2.0;
    let center_y = CANVAS_HEIGHT / 2.0;
    renderer.save();
    renderer.set_text_align("center");
    renderer.set_font("70pt impact");
    renderer.text(
        "GAME OVER",
        &Point {
            x: center_x,
            y: center_y + 50.0,
        },
    );
    renderer.set_font("20pt impact");
    renderer.text(
        "Press Spacebar to play again!",
        &Point {
            x: center_x,
            y: center_y + 80.0,
        },
    );
    renderer.restore();
}
