use rand::Rng;

use super::entity::Entity;
use crate::config::GameConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PowerUpKind {
    Shield,
    DoubleFire,
    SpeedBoost,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::DoubleFire,
        PowerUpKind::SpeedBoost,
    ];

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn get_name(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::DoubleFire => "Double Fire",
            PowerUpKind::SpeedBoost => "Speed Boost",
        }
    }

    pub fn get_char(&self) -> char {
        match self {
            PowerUpKind::Shield => 'S',
            PowerUpKind::DoubleFire => 'D',
            PowerUpKind::SpeedBoost => '>',
        }
    }
}

/// Falling pickup. Recycles like an enemy until the player grabs it.
#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub body: Entity,
    pub kind: PowerUpKind,
}

impl PowerUp {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, config: &GameConfig) -> Self {
        let (width, height) = config.power_up_size;
        let mut body = Entity::new(x, y, width, height);
        body.vy = config.power_up_speed;
        Self { body, kind }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, config: &GameConfig) -> Self {
        let kind = PowerUpKind::random(rng);
        let mut power_up = Self::new(0.0, 0.0, kind, config);
        power_up
            .body
            .respawn_above(rng, config.play_width, &config.respawn_band);
        power_up
    }

    pub fn update<R: Rng + ?Sized>(&mut self, rng: &mut R, config: &GameConfig) -> bool {
        self.body.vy = config.power_up_speed;
        self.body.advance();
        self.body.recycle_below(
            rng,
            config.play_width,
            config.play_height,
            &config.respawn_band,
        )
    }
}
