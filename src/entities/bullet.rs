use super::entity::Entity;
use crate::config::GameConfig;

/// Player projectile. Travels straight up and is consumed on its first hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub body: Entity,
    pub speed: f32,
}

impl Bullet {
    /// Spawns a bullet centred on (`x`, `y`)
    pub fn new(x: f32, y: f32, config: &GameConfig) -> Self {
        let (width, height) = config.bullet_size;
        let mut body = Entity::centered(x, y, width, height);
        body.vy = config.bullet_speed;
        Self {
            body,
            speed: config.bullet_speed,
        }
    }

    pub fn update(&mut self) {
        self.body.vy = self.speed;
        self.body.advance();
    }

    /// True once the whole bullet has left through the top edge
    pub fn is_off_screen(&self) -> bool {
        self.body.bottom() < 0.0
    }

    pub fn get_char(&self) -> char {
        '|'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_new_centered() {
        let config = GameConfig::default();
        let bullet = Bullet::new(100.0, 500.0, &config);
        assert_eq!(bullet.body.center_x(), 100.0);
        assert_eq!(bullet.body.y, 495.0);
        assert_eq!(bullet.speed, -7.0);
    }

    #[test]
    fn test_bullet_moves_up() {
        let config = GameConfig::default();
        let mut bullet = Bullet::new(100.0, 500.0, &config);
        bullet.update();
        assert_eq!(bullet.body.y, 488.0);
        assert_eq!(bullet.body.x, 97.5);
    }

    #[test]
    fn test_bullet_off_screen_only_when_fully_above() {
        let config = GameConfig::default();
        let mut bullet = Bullet::new(100.0, 0.0, &config);

        bullet.body.y = -1.0;
        // bottom edge at 9, still visible
        assert!(!bullet.is_off_screen());

        bullet.body.y = -10.0;
        assert!(!bullet.is_off_screen());

        bullet.body.y = -10.5;
        assert!(bullet.is_off_screen());
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_bullet_always_rises(
                x in 0.0f32..800.0,
                y in -50.0f32..650.0,
            ) {
                let config = GameConfig::default();
                let mut bullet = Bullet::new(x, y, &config);
                let (before_x, before_y) = (bullet.body.x, bullet.body.y);
                bullet.update();
                prop_assert!(bullet.body.y < before_y);
                prop_assert_eq!(bullet.body.x, before_x);
            }
        }
    }
}
