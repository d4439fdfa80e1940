use rand::Rng;

use super::entity::Entity;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub body: Entity,
    /// Units per frame, rolled once at spawn
    pub fall_speed: f32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, fall_speed: f32, config: &GameConfig) -> Self {
        let (width, height) = config.enemy_size;
        let mut body = Entity::new(x, y, width, height);
        body.vy = fall_speed;
        Self { body, fall_speed }
    }

    /// Creates an enemy at a random spot above the visible area with a random fall speed
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let fall_speed = rng.random_range(config.enemy_fall_speed.clone());
        let mut enemy = Self::new(0.0, 0.0, fall_speed, config);
        enemy
            .body
            .respawn_above(rng, config.play_width, &config.respawn_band);
        enemy
    }

    /// Creates a full wave for `level`
    pub fn spawn_wave<R: Rng + ?Sized>(rng: &mut R, level: u32, config: &GameConfig) -> Vec<Self> {
        (0..config.enemy_batch_size(level))
            .map(|_| Self::spawn(rng, config))
            .collect()
    }

    /// Falls one step. Enemies that drop out the bottom are recycled to the top,
    /// never removed. Returns true when a recycle happened.
    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) -> bool {
        self.body.vy = self.fall_speed;
        self.body.advance();
        self.body.recycle_below(
            rng,
            config.play_width,
            config.play_height,
            &config.respawn_band,
        )
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec!["\\|/", "{=}", "/_\\"]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_enemy_falls_at_its_own_speed() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy::new(100.0, 10.0, 4.0, &config);
        assert!(!enemy.update(&mut rng, &config));
        assert_eq!(enemy.body.y, 14.0);
        assert_eq!(enemy.body.x, 100.0);
    }

    #[test]
    fn test_enemy_recycles_past_bottom() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(3);
        let mut enemy = Enemy::new(100.0, 598.0, 3.0, &config);
        assert!(enemy.update(&mut rng, &config));
        assert!(config.respawn_band.contains(&enemy.body.y));
        assert!(enemy.body.x >= 0.0 && enemy.body.x <= 760.0);
        // speed survives the respawn
        assert_eq!(enemy.fall_speed, 3.0);
    }

    #[test]
    fn test_spawn_wave_size() {
        let config = GameConfig::default();
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(Enemy::spawn_wave(&mut rng, 1, &config).len(), 5);
        assert_eq!(Enemy::spawn_wave(&mut rng, 2, &config).len(), 8);
        assert_eq!(Enemy::spawn_wave(&mut rng, 4, &config).len(), 14);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_spawned_enemies_are_above_screen(seed in any::<u64>()) {
                let config = GameConfig::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let enemy = Enemy::spawn(&mut rng, &config);
                prop_assert!(config.enemy_fall_speed.contains(&enemy.fall_speed));
                prop_assert!(config.respawn_band.contains(&enemy.body.y));
                prop_assert!(enemy.body.bottom() <= 0.0);
            }

            #[test]
            fn test_enemy_never_leaves_play_column(
                seed in any::<u64>(),
                frames in 1usize..600,
            ) {
                let config = GameConfig::default();
                let mut rng = StdRng::seed_from_u64(seed);
                let mut enemy = Enemy::spawn(&mut rng, &config);
                for _ in 0..frames {
                    enemy.update(&mut rng, &config);
                    prop_assert!(enemy.body.y <= config.play_height + 5.0);
                    prop_assert!(enemy.body.y >= -100.0);
                }
            }
        }
    }
}
