use super::bullet::Bullet;
use super::entity::Entity;
use super::power_up::PowerUpKind;
use crate::config::GameConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub body: Entity,
    pub speed: f32,
    /// Absorbs the next enemy collision
    pub shield_active: bool,
    pub double_fire: bool,
    pub speed_multiplier: f32,
}

impl Player {
    /// Places the ship centred horizontally, 50 units above the bottom edge
    pub fn new(config: &GameConfig) -> Self {
        let (width, height) = config.player_size;
        Self {
            body: Entity::centered(
                config.play_width / 2.0,
                config.play_height - 50.0,
                width,
                height,
            ),
            speed: config.player_speed,
            shield_active: false,
            double_fire: false,
            speed_multiplier: 1.0,
        }
    }

    /// Sets this frame's velocity from a held direction, each axis in -1..=1
    pub fn steer(&mut self, dx: f32, dy: f32) {
        let step = self.speed * self.speed_multiplier;
        self.body.vx = dx.clamp(-1.0, 1.0) * step;
        self.body.vy = dy.clamp(-1.0, 1.0) * step;
    }

    /// Applies velocity and keeps the ship inside the play area
    pub fn update(&mut self, play_width: f32, play_height: f32) {
        self.body.advance();
        let max_x = (play_width - self.body.width()).max(0.0);
        let max_y = (play_height - self.body.height()).max(0.0);
        self.body.x = self.body.x.clamp(0.0, max_x);
        self.body.y = self.body.y.clamp(0.0, max_y);
    }

    /// Bullets for one trigger pull, spawned at the top-centre of the ship
    pub fn fire(&self, config: &GameConfig) -> Vec<Bullet> {
        let center_x = self.body.center_x();
        let top = self.body.y;

        if self.double_fire {
            vec![
                Bullet::new(center_x - config.double_fire_offset, top, config),
                Bullet::new(center_x + config.double_fire_offset, top, config),
            ]
        } else {
            vec![Bullet::new(center_x, top, config)]
        }
    }

    pub fn apply_power_up(&mut self, kind: PowerUpKind, config: &GameConfig) {
        match kind {
            PowerUpKind::Shield => self.shield_active = true,
            PowerUpKind::DoubleFire => self.double_fire = true,
            PowerUpKind::SpeedBoost => self.speed_multiplier = config.speed_boost_multiplier,
        }
    }

    /// Spends the shield on a hit. Returns true when the hit was absorbed.
    pub fn absorb_hit(&mut self) -> bool {
        std::mem::replace(&mut self.shield_active, false)
    }

    pub fn get_sprite_lines(&self) -> Vec<&'static str> {
        vec![" /^\\ ", "<|||>", " ||| "]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_new() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        assert_eq!(player.body.center_x(), 400.0);
        assert_eq!(player.body.y, 530.0);
        assert_eq!(player.speed, 5.0);
        assert!(!player.shield_active);
        assert!(!player.double_fire);
        assert_eq!(player.speed_multiplier, 1.0);
    }

    #[test]
    fn test_player_movement() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        let (x, y) = (player.body.x, player.body.y);

        player.steer(-1.0, 0.0);
        player.update(config.play_width, config.play_height);
        assert_eq!(player.body.x, x - 5.0);
        assert_eq!(player.body.y, y);

        player.steer(1.0, -1.0);
        player.update(config.play_width, config.play_height);
        assert_eq!(player.body.x, x);
        assert_eq!(player.body.y, y - 5.0);
    }

    #[test]
    fn test_player_clamped_to_play_area() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);

        player.body.x = 2.0;
        player.steer(-1.0, 0.0);
        player.update(config.play_width, config.play_height);
        assert_eq!(player.body.x, 0.0);

        player.body.y = 558.0;
        player.steer(0.0, 1.0);
        player.update(config.play_width, config.play_height);
        assert_eq!(player.body.y, 560.0);
    }

    #[test]
    fn test_speed_boost_scales_movement() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.apply_power_up(PowerUpKind::SpeedBoost, &config);
        let x = player.body.x;
        player.steer(1.0, 0.0);
        player.update(config.play_width, config.play_height);
        assert_eq!(player.body.x, x + 7.5);
    }

    #[test]
    fn test_fire_single_bullet() {
        let config = GameConfig::default();
        let player = Player::new(&config);
        let bullets = player.fire(&config);
        assert_eq!(bullets.len(), 1);
        assert_eq!(bullets[0].body.center_x(), player.body.center_x());
    }

    #[test]
    fn test_fire_double_bullets() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        player.apply_power_up(PowerUpKind::DoubleFire, &config);
        let bullets = player.fire(&config);
        assert_eq!(bullets.len(), 2);
        assert_eq!(bullets[0].body.center_x(), player.body.center_x() - 10.0);
        assert_eq!(bullets[1].body.center_x(), player.body.center_x() + 10.0);
    }

    #[test]
    fn test_shield_absorbs_one_hit() {
        let config = GameConfig::default();
        let mut player = Player::new(&config);
        assert!(!player.absorb_hit());

        player.apply_power_up(PowerUpKind::Shield, &config);
        assert!(player.shield_active);
        assert!(player.absorb_hit());
        assert!(!player.shield_active);
        assert!(!player.absorb_hit());
    }

    // Property-based tests
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_player_stays_in_bounds(
                moves in prop::collection::vec((-1i8..=1, -1i8..=1), 0..400),
                boosted in any::<bool>(),
            ) {
                let config = GameConfig::default();
                let mut player = Player::new(&config);
                if boosted {
                    player.apply_power_up(PowerUpKind::SpeedBoost, &config);
                }
                for (dx, dy) in moves {
                    player.steer(dx as f32, dy as f32);
                    player.update(config.play_width, config.play_height);
                    prop_assert!(player.body.x >= 0.0);
                    prop_assert!(player.body.right() <= config.play_width);
                    prop_assert!(player.body.y >= 0.0);
                    prop_assert!(player.body.bottom() <= config.play_height);
                }
            }
        }
    }
}
