use clap::Parser;
use std::ops::RangeInclusive;
use std::path::PathBuf;

/// Everything the session and the run loop need to know up front.
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Logical play area, independent of the terminal size
    pub play_width: f32,
    pub play_height: f32,
    pub target_fps: u32,
    pub starting_lives: i32,
    /// Open on the main menu instead of dropping straight into play
    pub start_in_menu: bool,

    pub player_size: (f32, f32),
    pub player_speed: f32,

    pub enemy_size: (f32, f32),
    pub enemy_fall_speed: RangeInclusive<f32>,
    /// Vertical band above the visible area where enemies and power-ups (re)spawn
    pub respawn_band: RangeInclusive<f32>,
    pub base_enemies: u32,
    pub enemies_per_level: u32,
    pub points_per_kill: u32,

    pub bullet_size: (f32, f32),
    /// Negative: bullets travel up
    pub bullet_speed: f32,
    /// Lateral offset of each bullet when double fire is active
    pub double_fire_offset: f32,

    pub power_up_size: (f32, f32),
    pub power_up_speed: f32,
    /// Frames between power-up spawn attempts, 0 disables spawning
    pub power_up_interval: u64,
    pub max_power_ups: usize,
    pub speed_boost_multiplier: f32,

    pub asset_dir: PathBuf,
    pub volume: f32,
    pub mute: bool,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            play_width: 800.0,
            play_height: 600.0,
            target_fps: 60,
            starting_lives: 3,
            start_in_menu: true,

            player_size: (50.0, 40.0),
            player_speed: 5.0,

            enemy_size: (40.0, 40.0),
            enemy_fall_speed: 2.0..=5.0,
            respawn_band: -100.0..=-40.0,
            base_enemies: 5,
            enemies_per_level: 3,
            points_per_kill: 10,

            bullet_size: (5.0, 10.0),
            bullet_speed: -7.0,
            double_fire_offset: 10.0,

            power_up_size: (30.0, 30.0),
            power_up_speed: 2.0,
            power_up_interval: 600,
            max_power_ups: 1,
            speed_boost_multiplier: 1.5,

            asset_dir: PathBuf::from("assets"),
            volume: 0.5,
            mute: false,
            seed: None,
        }
    }
}

impl GameConfig {
    /// Number of enemies in the wave for `level` (1-based)
    pub fn enemy_batch_size(&self, level: u32) -> usize {
        (self.base_enemies + level.saturating_sub(1) * self.enemies_per_level) as usize
    }

    /// Duration of one frame at the target rate
    pub fn frame_interval(&self) -> std::time::Duration {
        std::time::Duration::from_secs_f64(1.0 / self.target_fps.max(1) as f64)
    }
}

/// Command line flags
#[derive(Parser, Debug)]
#[command(name = "space_adventure", version, about = "Terminal arcade shooter")]
pub struct Cli {
    /// Skip the main menu and start playing immediately
    #[arg(long)]
    pub skip_menu: bool,

    /// Target frames per second
    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Lives at the start of every run
    #[arg(long, default_value_t = 3)]
    pub lives: i32,

    /// Directory holding images/ and sounds/
    #[arg(long, default_value = "assets")]
    pub assets: PathBuf,

    /// Seed for enemy placement and power-up drops
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sound effect volume (0.0 - 1.0)
    #[arg(long, default_value_t = 0.5)]
    pub volume: f32,

    /// Disable audio entirely
    #[arg(long)]
    pub mute: bool,

    /// Where tracing output goes (the terminal belongs to the game)
    #[arg(long, default_value = "space_adventure.log")]
    pub log_file: PathBuf,
}

impl Cli {
    pub fn game_config(&self) -> GameConfig {
        GameConfig {
            target_fps: self.fps.max(1),
            starting_lives: self.lives.max(1),
            start_in_menu: !self.skip_menu,
            asset_dir: self.assets.clone(),
            volume: self.volume.clamp(0.0, 1.0),
            mute: self.mute,
            seed: self.seed,
            ..GameConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_batch_size_grows_by_three() {
        let config = GameConfig::default();
        assert_eq!(config.enemy_batch_size(1), 5);
        assert_eq!(config.enemy_batch_size(2), 8);
        assert_eq!(config.enemy_batch_size(3), 11);
    }

    #[test]
    fn test_cli_defaults_match_config_defaults() {
        let cli = Cli::parse_from(["space_adventure"]);
        let config = cli.game_config();
        let defaults = GameConfig::default();
        assert_eq!(config.target_fps, defaults.target_fps);
        assert_eq!(config.starting_lives, defaults.starting_lives);
        assert!(config.start_in_menu);
        assert_eq!(config.asset_dir, defaults.asset_dir);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn test_cli_flags() {
        let cli = Cli::parse_from([
            "space_adventure",
            "--skip-menu",
            "--fps",
            "30",
            "--seed",
            "7",
            "--volume",
            "3.0",
            "--mute",
        ]);
        let config = cli.game_config();
        assert!(!config.start_in_menu);
        assert_eq!(config.target_fps, 30);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.volume, 1.0);
        assert!(config.mute);
    }
}
