/// Pure game-logic functions.
///
/// Every public function takes an immutable reference to the current
/// `GameState` (and, where needed, an RNG handle) and returns a brand-new
/// `GameState`.  Side effects are limited to the injected RNG and logging.
/// Events produced along the way are appended to `GameState::events` for the
/// caller to drain.

use log::{debug, info};
use rand::Rng;

use crate::consts::*;
use crate::entities::{
    Boss, Bullet, Command, Decoration, DecorationKind, Direction, Enemy, Explosion, GameEvent,
    GameState, Operation, Phase, Player, RunState,
};

// ── Constructors ─────────────────────────────────────────────────────────────

/// Build the world as it looks on the title screen.
pub fn init_state(rng: &mut impl Rng) -> GameState {
    GameState {
        run: RunState::new(),
        player: Player::new(),
        boss: Boss::new(),
        enemies: Vec::new(),
        bullets: Vec::new(),
        decorations: scatter_decorations(rng),
        explosions: Vec::new(),
        events: Vec::new(),
        frame: 0,
    }
}

fn scatter_decorations(rng: &mut impl Rng) -> Vec<Decoration> {
    let mut decorations = Vec::with_capacity(ISLAND_COUNT + CLOUD_COUNT);
    for _ in 0..ISLAND_COUNT {
        let variant = rng.gen_range(1..=ISLAND_VARIANTS);
        decorations.push(Decoration {
            x: rng.gen_range(0..X_MAX),
            y: rng.gen_range(0..Y_MAX),
            kind: DecorationKind::Island(variant),
        });
    }
    for _ in 0..CLOUD_COUNT {
        decorations.push(Decoration {
            x: rng.gen_range(0..X_MAX),
            y: rng.gen_range(0..Y_MAX),
            kind: DecorationKind::Cloud,
        });
    }
    decorations
}

fn random_enemy_speed(rng: &mut impl Rng) -> i32 {
    rng.gen_range(ENEMY_MIN_SPEED..=ENEMY_MAX_SPEED)
}

/// A fresh enemy at a random column along the top edge.
pub fn spawn_enemy(rng: &mut impl Rng) -> Enemy {
    Enemy {
        x: rng.gen_range(0..=X_MAX),
        y: 0,
        speed: random_enemy_speed(rng),
    }
}

// ── Input-driven state transitions ──────────────────────────────────────────

/// Apply one input command.  `Quit` is the caller's business and leaves the
/// state untouched.
pub fn apply_command(state: &GameState, command: Command) -> GameState {
    let mut next = state.clone();
    match command {
        Command::Steer(direction, operation) => steer(&mut next.player, direction, operation),
        Command::Fire(Operation::Start) => next.player.firing = true,
        Command::Fire(Operation::Stop) => {
            next.player.firing = false;
            next.player.riffle = 0;
        }
        Command::Nuke => nuke(&mut next),
        Command::Continue => press_continue(&mut next),
        Command::Quit => {}
    }
    next
}

fn steer(player: &mut Player, direction: Direction, operation: Operation) {
    match (operation, direction) {
        (Operation::Start, Direction::Up) => player.dy = -PLAYER_SPEED,
        (Operation::Start, Direction::Down) => player.dy = PLAYER_SPEED,
        (Operation::Start, Direction::Left) => player.dx = -PLAYER_SPEED,
        (Operation::Start, Direction::Right) => player.dx = PLAYER_SPEED,
        (Operation::Stop, Direction::Up | Direction::Down) => player.dy = 0,
        (Operation::Stop, Direction::Left | Direction::Right) => player.dx = 0,
    }
}

/// Spend the mega charge: every ordinary enemy blows up, nothing is scored
/// and the boss is left alone.
fn nuke(state: &mut GameState) {
    if state.run.phase != Phase::Playing || state.player.mega == 0 {
        return;
    }
    state.player.mega -= 1;
    let destroyed = state.enemies.len();
    destroy_all_enemies(state);
    info!("nuke fired, {} enemies destroyed", destroyed);
}

fn press_continue(state: &mut GameState) {
    match state.run.phase {
        Phase::Intro => {
            state.run.phase = Phase::Playing;
            info!("game started");
        }
        Phase::LevelCleared => advance_level(state),
        Phase::GameOver => restart(state),
        Phase::Playing => {}
    }
}

fn advance_level(state: &mut GameState) {
    let run = &mut state.run;
    run.level += 1;
    run.max_enemies += 1;
    run.elapsed_ticks = 0;
    run.phase = Phase::Playing;

    let player = &mut state.player;
    player.health = MAX_HEALTH;
    player.mega = 1;
    player.score += LEVEL_BONUS;
    if run.boss_defeated {
        player.score += BOSS_BONUS;
    }
    run.boss_defeated = false;

    info!(
        "entering level {} (enemy cap {}, score {})",
        run.level, run.max_enemies, player.score
    );
}

fn restart(state: &mut GameState) {
    state.run = RunState {
        phase: Phase::Playing,
        ..RunState::new()
    };
    state.player = Player::new();
    state.boss.park();
    state.enemies.clear();
    state.bullets.clear();
    state.explosions.clear();
    info!("new game");
}

// ── Per-frame tick (nearly pure — RNG is injected) ──────────────────────────

/// Advance the simulation by one frame.  All randomness comes through `rng`
/// so callers control determinism (useful for tests with a seeded RNG).
///
/// Nothing moves outside `Phase::Playing`.
pub fn tick(state: &GameState, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    next.frame += 1;

    if next.run.phase != Phase::Playing {
        return next;
    }
    next.run.elapsed_ticks += 1;

    // ── 0. Animate explosions left over from the previous frame ──────────────
    advance_explosions(&mut next);

    // ── 1. Level cleared? ────────────────────────────────────────────────────
    if next.player.score > 0 && next.run.elapsed_ticks >= LEVEL_TICKS {
        clear_level(&mut next);
        return next;
    }

    // ── 2. Enemies ramming the player ────────────────────────────────────────
    let rams = ram_player(&mut next);
    next.player.health = next
        .player
        .health
        .saturating_sub(COLLISION_DAMAGE * rams)
        .min(MAX_HEALTH);

    // ── 3. Death ─────────────────────────────────────────────────────────────
    if next.player.health == 0 {
        game_over(&mut next);
        return next;
    }

    // ── 4. Bullets against enemies and boss ──────────────────────────────────
    resolve_bullet_hits(&mut next);

    // ── 5. Top up the enemy wave ─────────────────────────────────────────────
    if next.enemies.len() < next.run.max_enemies {
        next.enemies.push(spawn_enemy(rng));
    }

    // ── 6. Boss entrance ─────────────────────────────────────────────────────
    if next.run.elapsed_ticks == BOSS_TICK && !next.boss.visible {
        summon_boss(&mut next.boss, rng);
        next.events.push(GameEvent::BossAppeared);
        info!("boss appeared at x={}", next.boss.x);
    }

    // ── 7. Move everything ───────────────────────────────────────────────────
    update_entities(&mut next, rng);

    next
}

fn clear_level(state: &mut GameState) {
    destroy_all_enemies(state);
    state.run.boss_defeated = !state.boss.visible;
    state.boss.park();
    state.run.phase = Phase::LevelCleared;
    state.run.elapsed_ticks = 0;
    state.events.push(GameEvent::LevelCleared {
        level: state.run.level,
    });
    info!(
        "level {} cleared (boss defeated: {})",
        state.run.level, state.run.boss_defeated
    );
}

fn game_over(state: &mut GameState) {
    state.player.health = 0;
    state.player.alive = false;
    state.run.phase = Phase::GameOver;
    state.run.elapsed_ticks = 0;
    state.events.push(GameEvent::GameOver {
        score: state.player.score,
    });
    info!(
        "game over at level {} with score {}",
        state.run.level, state.player.score
    );
}

/// Remove every enemy touching the player; returns how many there were.
fn ram_player(state: &mut GameState) -> u32 {
    let player_rect = state.player.rect();
    let (rammed, kept): (Vec<Enemy>, Vec<Enemy>) = std::mem::take(&mut state.enemies)
        .into_iter()
        .partition(|e| e.rect().overlaps(&player_rect));
    state.enemies = kept;
    for enemy in &rammed {
        explode(state, enemy.x, enemy.y);
    }
    if !rammed.is_empty() {
        debug!("player rammed by {} enemies", rammed.len());
    }
    rammed.len() as u32
}

/// Every overlapping (enemy, bullet) pair destroys both and scores
/// `KILL_SCORE` per bullet.  The boss soaks one health point per bullet
/// and only disappears at zero.  A bullet is spent on its first target.
fn resolve_bullet_hits(state: &mut GameState) {
    if state.bullets.is_empty() {
        return;
    }
    let bullet_rects: Vec<_> = state.bullets.iter().map(Bullet::rect).collect();
    let mut spent = vec![false; bullet_rects.len()];
    let mut killed: Vec<(i32, i32)> = Vec::new();
    let mut gained = 0;

    let enemies = std::mem::take(&mut state.enemies);
    for enemy in enemies {
        let rect = enemy.rect();
        let mut hits = 0;
        for (i, bullet) in bullet_rects.iter().enumerate() {
            if !spent[i] && rect.overlaps(bullet) {
                spent[i] = true;
                hits += 1;
            }
        }
        if hits == 0 {
            state.enemies.push(enemy);
        } else {
            gained += KILL_SCORE * hits;
            killed.push((enemy.x, enemy.y));
        }
    }

    if state.boss.visible {
        let rect = state.boss.rect();
        let mut hits = 0;
        for (i, bullet) in bullet_rects.iter().enumerate() {
            if !spent[i] && rect.overlaps(bullet) {
                spent[i] = true;
                hits += 1;
            }
        }
        state.boss.health = state.boss.health.saturating_sub(hits);
        if state.boss.health == 0 {
            killed.push((state.boss.x, state.boss.y));
            state.boss.park();
            state.events.push(GameEvent::BossDefeated);
            info!("boss defeated");
        }
    }

    let mut index = 0;
    state.bullets.retain(|_| {
        let keep = !spent[index];
        index += 1;
        keep
    });
    for (x, y) in killed {
        explode(state, x, y);
    }
    state.player.score += gained;
}

/// Runs before anything new can blow up, so a fresh explosion is drawn at
/// frame 0.
fn advance_explosions(state: &mut GameState) {
    for explosion in &mut state.explosions {
        explosion.frame += 1;
    }
    state.explosions.retain(|e| e.frame < EXPLOSION_FRAMES);
}

fn destroy_all_enemies(state: &mut GameState) {
    for enemy in std::mem::take(&mut state.enemies) {
        explode(state, enemy.x, enemy.y);
    }
}

fn explode(state: &mut GameState, x: i32, y: i32) {
    state.explosions.push(Explosion { x, y, frame: 0 });
    state.events.push(GameEvent::Explosion { x, y });
}

fn summon_boss(boss: &mut Boss, rng: &mut impl Rng) {
    boss.x = rng.gen_range(BOSS_WIDTH / 2..=X_MAX - BOSS_WIDTH / 2);
    boss.y = BOSS_HEIGHT / 2;
    boss.moving_right = rng.gen_bool(0.5);
    boss.moving_down = true;
    boss.health = BOSS_MAX_HEALTH;
    boss.visible = true;
}

// ── Movement ─────────────────────────────────────────────────────────────────

fn update_entities(state: &mut GameState, rng: &mut impl Rng) {
    for decoration in &mut state.decorations {
        if decoration.y > Y_MAX + WRAP_MARGIN {
            decoration.y = -WRAP_MARGIN;
        } else {
            decoration.y += decoration.speed();
        }
    }

    for enemy in &mut state.enemies {
        if enemy.y > Y_MAX {
            enemy.x = rng.gen_range(0..=X_MAX);
            enemy.y = 0;
            enemy.speed = random_enemy_speed(rng);
        } else {
            enemy.y += enemy.speed;
        }
    }

    move_boss(&mut state.boss);

    for bullet in &mut state.bullets {
        bullet.y -= BULLET_SPEED;
    }
    state.bullets.retain(|b| b.y > 0);

    // Shots leave from where the plane was at the start of the tick.
    let (muzzle_x, muzzle_y) = (state.player.x, state.player.y);
    move_player(&mut state.player);
    if state.player.firing {
        let (riffle, shoot) = fire_cadence(state.player.riffle);
        state.player.riffle = riffle;
        if shoot {
            state.bullets.push(Bullet {
                x: muzzle_x,
                y: muzzle_y - BULLET_OFFSET,
            });
        }
    } else {
        state.player.riffle = 0;
    }
}

/// One step of the riffle counter while the trigger is held.
///
/// Returns the new counter and whether a bullet leaves this tick.  The
/// counter moves by two on shooting ticks, which is what makes the burst
/// short and the pause long.
pub fn fire_cadence(riffle: u32) -> (u32, bool) {
    let mut riffle = riffle + 1;
    let mut shoot = false;
    if riffle < RIFFLE_BURST {
        shoot = true;
        riffle += 1;
    }
    if riffle >= RIFFLE_PERIOD {
        riffle = 0;
    }
    (riffle, shoot)
}

/// Horizontal limits use a quarter of the sprite width, vertical limits half
/// the sprite height.
pub fn player_bounds() -> (i32, i32, i32, i32) {
    (
        PLAYER_WIDTH / 4,
        X_MAX - PLAYER_WIDTH / 4,
        PLAYER_HEIGHT / 2,
        Y_MAX - PLAYER_HEIGHT / 2,
    )
}

fn move_player(player: &mut Player) {
    let (x_min, x_max, y_min, y_max) = player_bounds();
    player.x = (player.x + player.dx).clamp(x_min, x_max);
    player.y = (player.y + player.dy).clamp(y_min, y_max);
}

fn move_boss(boss: &mut Boss) {
    if !boss.visible {
        boss.park();
        return;
    }
    boss.x += if boss.moving_right { BOSS_SPEED } else { -BOSS_SPEED };
    boss.y += if boss.moving_down { BOSS_SPEED } else { -BOSS_SPEED };

    let rect = boss.rect();
    if rect.right() >= X_MAX {
        boss.moving_right = false;
    } else if rect.left() <= 0 {
        boss.moving_right = true;
    }
    if rect.bottom() >= Y_MAX {
        boss.moving_down = false;
    } else if rect.top() <= 0 {
        boss.moving_down = true;
    }
}

// ── HUD ──────────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BarColor {
    Red,
    Green,
}

/// Red at half health or below.
pub fn bar_color(health: u32) -> BarColor {
    if health <= MAX_HEALTH / 2 {
        BarColor::Red
    } else {
        BarColor::Green
    }
}

/// Everything the renderer needs besides the sprites.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Hud {
    pub phase: Phase,
    pub level: u32,
    pub score: u32,
    pub time_left: u32,
    pub health: u32,
    pub health_color: BarColor,
    /// Present only while the boss is on screen.
    pub boss: Option<(u32, BarColor)>,
    pub nuke_ready: bool,
    /// Overlay title and prompt for the non-playing phases.
    pub banner: Option<(&'static str, &'static str)>,
}

pub fn hud(state: &GameState) -> Hud {
    let banner = match state.run.phase {
        Phase::Intro => Some(("FLYING FORTRESS", "PRESS ENTER TO START")),
        Phase::LevelCleared => Some(("LEVEL CLEARED", "PRESS ENTER TO CONTINUE")),
        Phase::GameOver => Some(("GAME OVER", "PRESS ENTER TO CONTINUE")),
        Phase::Playing => None,
    };
    Hud {
        phase: state.run.phase,
        level: state.run.level,
        score: state.player.score,
        time_left: LEVEL_TIME.saturating_sub(state.run.elapsed_secs()),
        health: state.player.health,
        health_color: bar_color(state.player.health),
        boss: state
            .boss
            .visible
            .then(|| (state.boss.health, bar_color(state.boss.health))),
        nuke_ready: state.player.mega > 0,
        banner,
    }
}
