//! Flying Fortress - a vertical scrolling arcade shooter.
//!
//! - `entities`: pure game data
//! - `compute`: the simulation (state machine, movement, collisions, scoring)
//! - `assets`: text-art sprite loading
//! - `audio`: explosion sounds, muted when no output is available
//! - `config`: runtime configuration from the environment
//! - `controls`: held-key tracking turned into steer/fire commands

pub mod assets;
pub mod audio;
pub mod compute;
pub mod config;
pub mod controls;
pub mod entities;

/// Gameplay tunables.
pub mod consts {
    /// Logical arena size. Every entity position lives in this space.
    pub const X_MAX: i32 = 1400;
    pub const Y_MAX: i32 = 900;

    /// Simulation ticks per second.
    pub const FRAMERATE: u32 = 30;
    /// Seconds the player must survive to clear a level.
    pub const LEVEL_TIME: u32 = 30;
    /// Seconds into a level at which the boss shows up.
    pub const BOSS_TIME: u32 = 10;

    pub const MIN_ENEMIES: usize = 5;
    pub const MAX_HEALTH: u32 = 100;
    pub const BOSS_MAX_HEALTH: u32 = 100;

    pub const COLLISION_DAMAGE: u32 = 10;
    pub const KILL_SCORE: u32 = 10;
    pub const LEVEL_BONUS: u32 = 10;
    pub const BOSS_BONUS: u32 = 1000;

    pub const PLAYER_WIDTH: i32 = 100;
    pub const PLAYER_HEIGHT: i32 = 80;
    pub const PLAYER_SPEED: i32 = 10;

    pub const ENEMY_SIZE: i32 = 64;
    /// Inclusive range of enemy descent speeds.
    pub const ENEMY_MIN_SPEED: i32 = 3;
    pub const ENEMY_MAX_SPEED: i32 = 10;

    pub const BOSS_WIDTH: i32 = 200;
    pub const BOSS_HEIGHT: i32 = 150;
    pub const BOSS_SPEED: i32 = 4;
    /// Where an invisible boss waits.
    pub const BOSS_PARK: (i32, i32) = (-1000, -1000);

    pub const BULLET_SIZE: i32 = 10;
    pub const BULLET_SPEED: i32 = 20;
    /// Bullets leave the nose of the plane, not its centre.
    pub const BULLET_OFFSET: i32 = 25;

    /// Riffle fire: shots only while the counter is below `RIFFLE_BURST`,
    /// the counter wraps once it reaches `RIFFLE_PERIOD`.
    pub const RIFFLE_BURST: u32 = 6;
    pub const RIFFLE_PERIOD: u32 = 12;

    pub const ISLAND_COUNT: usize = 10;
    pub const ISLAND_SIZE: i32 = 128;
    pub const ISLAND_SPEED: i32 = 1;
    pub const ISLAND_VARIANTS: u8 = 4;
    pub const CLOUD_COUNT: usize = 10;
    pub const CLOUD_WIDTH: i32 = 160;
    pub const CLOUD_HEIGHT: i32 = 96;
    pub const CLOUD_SPEED: i32 = 2;
    /// Decorations wrap once they are this far past the bottom edge.
    pub const WRAP_MARGIN: i32 = 64;

    pub const EXPLOSION_SIZE: i32 = 96;
    pub const EXPLOSION_FRAMES: usize = 16;

    /// Ticks in one level.
    pub const LEVEL_TICKS: u32 = LEVEL_TIME * FRAMERATE;
    /// Tick at which the boss is summoned.
    pub const BOSS_TICK: u32 = BOSS_TIME * FRAMERATE;
}
