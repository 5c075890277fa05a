//! Simulation configuration resource.
//!
//! Settings loaded from an INI file. Every key is optional; missing keys keep
//! the safe defaults below.
//!
//! # Configuration File Format
//!
//! ```ini
//! [simulation]
//! tick_ms = 10
//! frame_ms = 16
//! frame_timing = per_frame
//! seed = 7
//!
//! [arena]
//! width = 960
//! height = 640
//! tile_size = 16
//! floor_margin = 16
//!
//! [player]
//! speed = 2
//! health = 5
//! attack_interval = 45
//!
//! [monsters]
//! count = 5
//! speed = 1
//! health = 5
//! contact_damage = 0.5
//! decision_max = 90
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::animation::FrameTiming;

const DEFAULT_TICK_MS: u64 = 10;
const DEFAULT_FRAME_MS: u64 = 16;
const DEFAULT_SEED: u64 = 7;
const DEFAULT_ARENA_WIDTH: u32 = 960;
const DEFAULT_ARENA_HEIGHT: u32 = 640;
const DEFAULT_TILE_SIZE: u32 = 16;
const DEFAULT_FLOOR_MARGIN: u32 = 16;
const DEFAULT_PLAYER_SPEED: f32 = 2.0;
const DEFAULT_PLAYER_HEALTH: f32 = 5.0;
const DEFAULT_ATTACK_INTERVAL: u32 = 45;
const DEFAULT_MONSTER_COUNT: u32 = 5;
const DEFAULT_MONSTER_SPEED: f32 = 1.0;
const DEFAULT_MONSTER_HEALTH: f32 = 5.0;
const DEFAULT_CONTACT_DAMAGE: f32 = 0.5;
const DEFAULT_DECISION_MAX: u32 = 90;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

#[derive(Resource, Debug, Clone)]
pub struct SimConfig {
    /// Length of one simulation tick in milliseconds.
    pub tick_ms: u64,
    /// Synthetic frame length used when not running in realtime.
    pub frame_ms: u64,
    pub frame_timing: FrameTiming,
    pub seed: u64,
    pub arena_width: u32,
    pub arena_height: u32,
    pub tile_size: u32,
    pub floor_margin: u32,
    pub player_speed: f32,
    pub player_health: f32,
    /// Cooldown between player attacks, in ticks.
    pub attack_interval: u32,
    pub monster_count: u32,
    pub monster_speed: f32,
    pub monster_health: f32,
    pub contact_damage: f32,
    /// Upper bound (exclusive) of the random chase re-decision delay.
    pub decision_max: u32,
    pub config_path: PathBuf,
}

/// Unsigned key that must fit in `u32`; out-of-range values are ignored.
fn read_u32(config: &Ini, section: &str, key: &str) -> Option<u32> {
    let value = config.getuint(section, key).ok().flatten()?;
    match u32::try_from(value) {
        Ok(value) => Some(value),
        Err(_) => {
            warn!("[{}] {} = {} is out of range, keeping default", section, key, value);
            None
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SimConfig {
    pub fn new() -> Self {
        Self {
            tick_ms: DEFAULT_TICK_MS,
            frame_ms: DEFAULT_FRAME_MS,
            frame_timing: FrameTiming::default(),
            seed: DEFAULT_SEED,
            arena_width: DEFAULT_ARENA_WIDTH,
            arena_height: DEFAULT_ARENA_HEIGHT,
            tile_size: DEFAULT_TILE_SIZE,
            floor_margin: DEFAULT_FLOOR_MARGIN,
            player_speed: DEFAULT_PLAYER_SPEED,
            player_health: DEFAULT_PLAYER_HEALTH,
            attack_interval: DEFAULT_ATTACK_INTERVAL,
            monster_count: DEFAULT_MONSTER_COUNT,
            monster_speed: DEFAULT_MONSTER_SPEED,
            monster_health: DEFAULT_MONSTER_HEALTH,
            contact_damage: DEFAULT_CONTACT_DAMAGE,
            decision_max: DEFAULT_DECISION_MAX,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from `config_path`.
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply(&config);
        Ok(())
    }

    fn apply(&mut self, config: &Ini) {
        // [simulation] section
        if let Some(tick_ms) = config.getuint("simulation", "tick_ms").ok().flatten() {
            self.tick_ms = tick_ms.max(1);
        }
        if let Some(frame_ms) = config.getuint("simulation", "frame_ms").ok().flatten() {
            self.frame_ms = frame_ms;
        }
        if let Some(timing) = config.get("simulation", "frame_timing") {
            match FrameTiming::parse(&timing) {
                Some(timing) => self.frame_timing = timing,
                None => warn!(
                    "Unknown frame_timing '{}', keeping {}",
                    timing,
                    self.frame_timing.as_str()
                ),
            }
        }
        if let Some(seed) = config.getuint("simulation", "seed").ok().flatten() {
            self.seed = seed;
        }

        // [arena] section
        if let Some(width) = read_u32(config, "arena", "width") {
            self.arena_width = width;
        }
        if let Some(height) = read_u32(config, "arena", "height") {
            self.arena_height = height;
        }
        if let Some(tile_size) = read_u32(config, "arena", "tile_size") {
            self.tile_size = tile_size;
        }
        if let Some(margin) = read_u32(config, "arena", "floor_margin") {
            self.floor_margin = margin;
        }

        // [player] section
        if let Some(speed) = config.getfloat("player", "speed").ok().flatten() {
            self.player_speed = speed as f32;
        }
        if let Some(health) = config.getfloat("player", "health").ok().flatten() {
            self.player_health = health as f32;
        }
        if let Some(interval) = read_u32(config, "player", "attack_interval") {
            self.attack_interval = interval;
        }

        // [monsters] section
        if let Some(count) = read_u32(config, "monsters", "count") {
            self.monster_count = count;
        }
        if let Some(speed) = config.getfloat("monsters", "speed").ok().flatten() {
            self.monster_speed = speed as f32;
        }
        if let Some(health) = config.getfloat("monsters", "health").ok().flatten() {
            self.monster_health = health as f32;
        }
        if let Some(damage) = config.getfloat("monsters", "contact_damage").ok().flatten() {
            self.contact_damage = damage as f32;
        }
        if let Some(max) = read_u32(config, "monsters", "decision_max") {
            self.decision_max = max;
        }

        info!(
            "Loaded config: tick={}ms frame={}ms timing={} seed={} arena={}x{} monsters={}",
            self.tick_ms,
            self.frame_ms,
            self.frame_timing.as_str(),
            self.seed,
            self.arena_width,
            self.arena_height,
            self.monster_count
        );
    }

    /// Save configuration to `config_path`, creating the file if needed.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set("simulation", "tick_ms", Some(self.tick_ms.to_string()));
        config.set("simulation", "frame_ms", Some(self.frame_ms.to_string()));
        config.set(
            "simulation",
            "frame_timing",
            Some(self.frame_timing.as_str().to_string()),
        );
        config.set("simulation", "seed", Some(self.seed.to_string()));

        config.set("arena", "width", Some(self.arena_width.to_string()));
        config.set("arena", "height", Some(self.arena_height.to_string()));
        config.set("arena", "tile_size", Some(self.tile_size.to_string()));
        config.set("arena", "floor_margin", Some(self.floor_margin.to_string()));

        config.set("player", "speed", Some(self.player_speed.to_string()));
        config.set("player", "health", Some(self.player_health.to_string()));
        config.set(
            "player",
            "attack_interval",
            Some(self.attack_interval.to_string()),
        );

        config.set("monsters", "count", Some(self.monster_count.to_string()));
        config.set("monsters", "speed", Some(self.monster_speed.to_string()));
        config.set("monsters", "health", Some(self.monster_health.to_string()));
        config.set(
            "monsters",
            "contact_damage",
            Some(self.contact_damage.to_string()),
        );
        config.set("monsters", "decision_max", Some(self.decision_max.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Duration of one tick.
    pub fn tick_duration(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.tick_ms)
    }
}
