use froggo::entity::enemy::{lane_y, Enemy};
use froggo::entity::item::{Item, GEM_SPRITES};
use froggo::entity::player::{self, Player};
use froggo::entity::{check_collisions, Collision, Renderable};

use approx::assert_relative_eq;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

// ── Enemy ─────────────────────────────────────────────────────────────────────

#[test]
fn enemy_spawns_at_lane_origin() {
    let mut rng = seeded_rng();
    let enemy = Enemy::new(1, &mut rng);
    assert_eq!(enemy.x, 0.0);
    assert_eq!(enemy.y, 63.0); // 1 * 83 - 20
    assert_eq!(Enemy::new(2, &mut rng).y, 146.0);
    assert_eq!(Enemy::new(3, &mut rng).y, 229.0);
}

#[test]
fn enemy_speed_is_bounded() {
    let mut rng = seeded_rng();
    for _ in 0..100 {
        let enemy = Enemy::new(1, &mut rng);
        assert!(enemy.speed() >= 150.0 && enemy.speed() < 250.0);
    }
}

#[test]
fn advance_moves_by_speed_times_dt() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(2, &mut rng);
    let speed = enemy.speed();
    enemy.advance(0.5);
    assert_relative_eq!(enemy.x, speed * 0.5);
    enemy.advance(0.25);
    assert_relative_eq!(enemy.x, speed * 0.5 + speed * 0.25);
}

#[test]
fn advance_leaves_lane_unchanged() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(3, &mut rng);
    enemy.advance(2.0);
    assert_eq!(enemy.y, 229.0);
}

#[test]
fn exit_detection_starts_past_the_field_edge() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(1, &mut rng);
    enemy.x = 503.0;
    assert!(!enemy.has_exited_field());
    enemy.x = 503.5;
    assert!(enemy.has_exited_field());
}

#[test]
fn recycle_returns_to_requested_lane() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(1, &mut rng);
    enemy.x = 600.0;
    enemy.recycle(3);
    assert_eq!(enemy.x, 0.0);
    assert_eq!(enemy.y, 229.0);
}

#[test]
fn random_recycle_lands_in_a_valid_lane() {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(1, &mut rng);
    for _ in 0..50 {
        enemy.x = 600.0;
        enemy.recycle_random(&mut rng);
        assert_eq!(enemy.x, 0.0);
        assert!([lane_y(1), lane_y(2), lane_y(3)].contains(&enemy.y));
        assert!(enemy.speed() >= 150.0 && enemy.speed() < 250.0);
    }
}

// ── Player movement ───────────────────────────────────────────────────────────

#[test]
fn player_starts_at_the_start_cell() {
    let player = Player::new();
    assert_eq!(player.x, 202.0);
    assert_eq!(player.y, 375.0);
    assert_eq!(player.score, 0);
    assert_eq!(player.lives, 3);
    assert!(!player.is_selected());
}

#[test]
fn step_moves_one_tile() {
    let mut player = Player::new();
    player.step(player::Direction::Up);
    assert_eq!((player.x, player.y), (202.0, 292.0));
    player.step(player::Direction::Left);
    assert_eq!((player.x, player.y), (101.0, 292.0));
    player.step(player::Direction::Right);
    player.step(player::Direction::Down);
    assert_eq!((player.x, player.y), (202.0, 375.0));
}

#[test]
fn step_clamps_at_the_left_edge() {
    let mut player = Player::new();
    player.x = 0.0;
    player.step(player::Direction::Left);
    assert_eq!(player.x, 0.0);
}

#[test]
fn step_clamps_at_the_right_edge() {
    let mut player = Player::new();
    player.x = 404.0;
    player.step(player::Direction::Right);
    assert_eq!(player.x, 404.0);
}

#[test]
fn step_clamps_at_the_bottom_row() {
    let mut player = Player::new();
    player.step(player::Direction::Down);
    assert_eq!(player.y, 375.0);
}

#[test]
fn dead_player_cannot_move() {
    let mut player = Player::new();
    player.lives = 0;
    player.step(player::Direction::Up);
    assert_eq!(player.y, 375.0);
}

#[test]
fn goal_line_sits_above_the_top_row() {
    let mut player = Player::new();
    player.y = 20.0;
    assert!(!player.reached_goal());
    player.y = 19.9;
    assert!(player.reached_goal());
}

#[test]
fn sprite_selection_is_clamped_to_the_roster() {
    let mut player = Player::new();
    player.select_sprite(2);
    assert_eq!(player.sprite_index(), Some(2));
    player.select_sprite(99);
    assert_eq!(player.sprite_index(), Some(4));
    player.deselect_sprite();
    assert!(!player.is_selected());
}

#[test]
fn lives_change_by_designated_operation_only() {
    let mut player = Player::new();
    player.adjust_lives(-1);
    assert_eq!(player.lives, 2);
    player.adjust_lives(1);
    assert_eq!(player.lives, 3);
    player.reset_lives();
    assert_eq!(player.lives, 3);
}

// ── HUD text ──────────────────────────────────────────────────────────────────

#[test]
fn score_text_is_zero_padded() {
    assert_eq!(player::score_text(0), "Score: 000");
    assert_eq!(player::score_text(5), "Score: 005");
    assert_eq!(player::score_text(42), "Score: 042");
    assert_eq!(player::score_text(137), "Score: 137");
    assert_eq!(player::score_text(999), "Score: 999");
}

#[test]
fn score_text_switches_to_flavor_text_at_one_thousand() {
    assert_eq!(
        player::score_text(1000),
        "Stop it. This game isn't that good. Go read a book or something."
    );
}

#[test]
fn lives_text_is_plain() {
    assert_eq!(player::lives_text(3), "Lives: 3");
    assert_eq!(player::lives_text(0), "Lives: 0");
}

// ── Items ─────────────────────────────────────────────────────────────────────

#[test]
fn items_start_inactive_off_field() {
    let gem = Item::gem();
    assert!(!gem.is_active());
    assert_eq!((gem.x, gem.y), (-100.0, -100.0));
    assert_eq!(gem.frequency(), 6);
    assert_eq!(Item::star().frequency(), 10);
}

#[test]
fn gem_activates_only_on_positive_multiples_of_six() {
    let mut rng = seeded_rng();
    let mut gem = Item::gem();
    gem.recompute(0, &mut rng);
    assert!(!gem.is_active());
    for score in 1..=5 {
        gem.recompute(score, &mut rng);
        assert!(!gem.is_active(), "score {} should not activate", score);
    }
    gem.recompute(6, &mut rng);
    assert!(gem.is_active());
    gem.recompute(7, &mut rng);
    assert!(!gem.is_active());
    gem.recompute(12, &mut rng);
    assert!(gem.is_active());
}

#[test]
fn active_gem_sits_on_a_stone_row_cell() {
    let mut rng = seeded_rng();
    let mut gem = Item::gem();
    for _ in 0..50 {
        gem.recompute(6, &mut rng);
        assert!([0.0, 101.0, 202.0, 303.0, 404.0].contains(&gem.x));
        assert!([63.0, 146.0, 229.0].contains(&gem.y));
        let sprite = gem.sprite().unwrap();
        assert!(GEM_SPRITES.contains(&sprite));
    }
}

#[test]
fn star_activates_on_multiples_of_ten() {
    let mut rng = seeded_rng();
    let mut star = Item::star();
    star.recompute(10, &mut rng);
    assert!(star.is_active());
    assert_eq!(star.sprite(), Some("images/Star.png"));
    star.recompute(5, &mut rng);
    assert!(!star.is_active());
}

#[test]
fn deactivate_parks_the_item_off_field() {
    let mut rng = seeded_rng();
    let mut gem = Item::gem();
    gem.recompute(6, &mut rng);
    gem.deactivate();
    assert!(!gem.is_active());
    assert_eq!((gem.x, gem.y), (-100.0, -100.0));
}

// ── Collision detection ───────────────────────────────────────────────────────

fn lone_enemy(x: f32, y: f32) -> Vec<Enemy> {
    let mut rng = seeded_rng();
    let mut enemy = Enemy::new(1, &mut rng);
    enemy.x = x;
    enemy.y = y;
    vec![enemy]
}

#[test]
fn overlapping_enemy_is_reported() {
    let player = Player::new();
    let enemies = lone_enemy(player.x, player.y);
    let events = check_collisions(&player, &enemies, &Item::gem(), &Item::star());
    assert_eq!(events, vec![Collision::Enemy(0)]);
}

#[test]
fn enemy_hit_box_edges_are_exact() {
    let mut player = Player::new();
    player.x = 202.0;
    player.y = 300.0;

    // dx = player.x - enemy.x must stay within [-47, 63]
    let events = check_collisions(&player, &lone_enemy(139.0, 300.0), &Item::gem(), &Item::star());
    assert_eq!(events.len(), 1); // dx = 63, inside
    let events = check_collisions(&player, &lone_enemy(138.5, 300.0), &Item::gem(), &Item::star());
    assert!(events.is_empty()); // dx = 63.5, outside
    let events = check_collisions(&player, &lone_enemy(249.0, 300.0), &Item::gem(), &Item::star());
    assert_eq!(events.len(), 1); // dx = -47, inside
    let events = check_collisions(&player, &lone_enemy(249.5, 300.0), &Item::gem(), &Item::star());
    assert!(events.is_empty()); // dx = -47.5, outside

    // dy = player.y - enemy.y must stay within [-64, 51]
    let events = check_collisions(&player, &lone_enemy(202.0, 364.0), &Item::gem(), &Item::star());
    assert_eq!(events.len(), 1); // dy = -64, inside
    let events = check_collisions(&player, &lone_enemy(202.0, 364.5), &Item::gem(), &Item::star());
    assert!(events.is_empty()); // dy = -64.5, outside
    let events = check_collisions(&player, &lone_enemy(202.0, 249.0), &Item::gem(), &Item::star());
    assert_eq!(events.len(), 1); // dy = 51, inside
    let events = check_collisions(&player, &lone_enemy(202.0, 248.5), &Item::gem(), &Item::star());
    assert!(events.is_empty()); // dy = 51.5, outside
}

#[test]
fn active_items_on_the_player_are_reported() {
    let mut rng = seeded_rng();
    let player = Player::new();
    let mut gem = Item::gem();
    gem.recompute(6, &mut rng);
    gem.x = player.x;
    gem.y = player.y;
    let mut star = Item::star();
    star.recompute(10, &mut rng);
    star.x = player.x;
    star.y = player.y;
    let events = check_collisions(&player, &[], &gem, &star);
    assert_eq!(events, vec![Collision::Gem, Collision::Star]);
}

#[test]
fn inactive_item_never_collides() {
    let player = Player::new();
    let mut gem = Item::gem();
    // even parked right on the player, an inactive item produces no event
    gem.x = player.x;
    gem.y = player.y;
    let events = check_collisions(&player, &[], &gem, &Item::star());
    assert!(events.is_empty());
}
