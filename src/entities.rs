//! All game entity types. Pure data, no game rules.

use crate::consts::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Title screen, shown once at start-up.
    Intro,
    Playing,
    LevelCleared,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    Start,
    Stop,
}

/// One input event, already translated from the keyboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    Steer(Direction, Operation),
    Fire(Operation),
    Nuke,
    Continue,
    Quit,
}

/// Things that happened during a tick and that the shell may want to
/// turn into sound or log lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    Explosion { x: i32, y: i32 },
    BossAppeared,
    BossDefeated,
    LevelCleared { level: u32 },
    GameOver { score: u32 },
}

// ── Geometry ──────────────────────────────────────────────────────────────────

/// Axis-aligned bounding box stored as centre + size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub cx: i32,
    pub cy: i32,
    pub w: i32,
    pub h: i32,
}

impl Rect {
    pub fn new(cx: i32, cy: i32, w: i32, h: i32) -> Self {
        Rect { cx, cy, w, h }
    }

    pub fn left(&self) -> i32 {
        self.cx - self.w / 2
    }

    pub fn right(&self) -> i32 {
        self.left() + self.w
    }

    pub fn top(&self) -> i32 {
        self.cy - self.h / 2
    }

    pub fn bottom(&self) -> i32 {
        self.top() + self.h
    }

    /// Strict overlap: touching edges do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.left() < other.right()
            && other.left() < self.right()
            && self.top() < other.bottom()
            && other.top() < self.bottom()
    }
}

// ── Player ────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    /// 0..=MAX_HEALTH
    pub health: u32,
    pub score: u32,
    pub firing: bool,
    /// Riffle counter driving burst fire.
    pub riffle: u32,
    /// Nuke charges, 0 or 1.
    pub mega: u32,
    pub alive: bool,
}

impl Player {
    pub fn new() -> Self {
        Player {
            x: X_MAX / 2,
            y: Y_MAX - PLAYER_HEIGHT / 2 - 100,
            dx: 0,
            dy: 0,
            health: MAX_HEALTH,
            score: 0,
            firing: false,
            riffle: 0,
            mega: 1,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

// ── Enemies & boss ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Enemy {
    pub x: i32,
    pub y: i32,
    /// Pixels per tick, straight down.
    pub speed: i32,
}

impl Enemy {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ENEMY_SIZE, ENEMY_SIZE)
    }
}

/// The boss keeps its identity across levels; "destroyed" only means
/// invisible.
#[derive(Clone, Debug)]
pub struct Boss {
    pub x: i32,
    pub y: i32,
    pub moving_right: bool,
    pub moving_down: bool,
    pub health: u32,
    pub visible: bool,
}

impl Boss {
    pub fn new() -> Self {
        Boss {
            x: BOSS_PARK.0,
            y: BOSS_PARK.1,
            moving_right: true,
            moving_down: true,
            health: BOSS_MAX_HEALTH,
            visible: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BOSS_WIDTH, BOSS_HEIGHT)
    }

    /// Hide the boss off-screen with full health.
    pub fn park(&mut self) {
        self.visible = false;
        self.health = BOSS_MAX_HEALTH;
        self.x = BOSS_PARK.0;
        self.y = BOSS_PARK.1;
    }
}

impl Default for Boss {
    fn default() -> Self {
        Self::new()
    }
}

// ── Projectiles & effects ─────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: i32,
    pub y: i32,
}

impl Bullet {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_SIZE, BULLET_SIZE)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DecorationKind {
    /// One of `ISLAND_VARIANTS` island images (1-based).
    Island(u8),
    Cloud,
}

/// Background scenery. Never collides.
#[derive(Clone, Debug)]
pub struct Decoration {
    pub x: i32,
    pub y: i32,
    pub kind: DecorationKind,
}

impl Decoration {
    pub fn speed(&self) -> i32 {
        match self.kind {
            DecorationKind::Island(_) => ISLAND_SPEED,
            DecorationKind::Cloud => CLOUD_SPEED,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Explosion {
    pub x: i32,
    pub y: i32,
    /// Index into the animation, 0..EXPLOSION_FRAMES.
    pub frame: usize,
}

// ── Run state ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct RunState {
    pub level: u32,
    pub phase: Phase,
    /// Playing ticks since the level started.
    pub elapsed_ticks: u32,
    pub max_enemies: usize,
    /// Set when a level is cleared with the boss already shot down.
    pub boss_defeated: bool,
}

impl RunState {
    pub fn new() -> Self {
        RunState {
            level: 1,
            phase: Phase::Intro,
            elapsed_ticks: 0,
            max_enemies: MIN_ENEMIES,
            boss_defeated: false,
        }
    }

    /// Whole seconds elapsed in the current level.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_ticks / FRAMERATE
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::new()
    }
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The whole world. Each typed vector doubles as the collision group for
/// its kind.
#[derive(Clone, Debug)]
pub struct GameState {
    pub run: RunState,
    pub player: Player,
    pub boss: Boss,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub decorations: Vec<Decoration>,
    pub explosions: Vec<Explosion>,
    /// Events accumulated since the caller last drained them.
    pub events: Vec<GameEvent>,
    pub frame: u64,
}

/// Borrowed, tagged view of one drawable entity.
#[derive(Clone, Copy, Debug)]
pub enum Sprite<'a> {
    Decoration(&'a Decoration),
    Enemy(&'a Enemy),
    Boss(&'a Boss),
    Bullet(&'a Bullet),
    Player(&'a Player),
    Explosion(&'a Explosion),
}

impl GameState {
    /// Every visible entity, back to front.
    pub fn sprites(&self) -> Vec<Sprite<'_>> {
        let mut out = Vec::with_capacity(
            self.decorations.len() + self.enemies.len() + self.bullets.len()
                + self.explosions.len()
                + 2,
        );
        out.extend(self.decorations.iter().map(Sprite::Decoration));
        out.extend(self.enemies.iter().map(Sprite::Enemy));
        if self.boss.visible {
            out.push(Sprite::Boss(&self.boss));
        }
        out.extend(self.bullets.iter().map(Sprite::Bullet));
        if self.player.alive {
            out.push(Sprite::Player(&self.player));
        }
        out.extend(self.explosions.iter().map(Sprite::Explosion));
        out
    }
}
