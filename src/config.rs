/// Runtime configuration: defaults, overridden from the environment.
///
/// The game takes no command-line arguments.  Recognised variables:
///
/// * `FLYING_FORTRESS_ASSETS` — directory holding the sprite files
/// * `FLYING_FORTRESS_SEED`   — RNG seed, for reproducible runs
/// * `FLYING_FORTRESS_MUTE`   — `1`/`true`/`yes` silences the game
/// * `FLYING_FORTRESS_LOG`    — write log output to this file

use std::path::PathBuf;

pub const ENV_ASSETS: &str = "FLYING_FORTRESS_ASSETS";
pub const ENV_SEED: &str = "FLYING_FORTRESS_SEED";
pub const ENV_MUTE: &str = "FLYING_FORTRESS_MUTE";
pub const ENV_LOG: &str = "FLYING_FORTRESS_LOG";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub assets_dir: PathBuf,
    pub seed: Option<u64>,
    pub muted: bool,
    pub log_file: Option<PathBuf>,
    /// Values that were set but could not be used.  Collected rather than
    /// logged because the logger is built from this config.
    pub warnings: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            assets_dir: PathBuf::from("./assets"),
            seed: None,
            muted: false,
            log_file: None,
            warnings: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup.  Unparseable values are ignored
    /// and noted in `warnings`.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Config::default();

        if let Some(dir) = lookup(ENV_ASSETS).filter(|s| !s.trim().is_empty()) {
            config.assets_dir = PathBuf::from(dir);
        }

        if let Some(raw) = lookup(ENV_SEED) {
            match raw.trim().parse::<u64>() {
                Ok(seed) => config.seed = Some(seed),
                Err(_) => config.warnings.push(format!(
                    "{}={:?} is not a number, using a random seed",
                    ENV_SEED, raw
                )),
            }
        }

        if let Some(raw) = lookup(ENV_MUTE) {
            match parse_flag(&raw) {
                Some(flag) => config.muted = flag,
                None => config
                    .warnings
                    .push(format!("{}={:?} is not a boolean, ignoring", ENV_MUTE, raw)),
            }
        }

        config.log_file = lookup(ENV_LOG)
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);

        config
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}
