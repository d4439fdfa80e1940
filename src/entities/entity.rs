use rand::Rng;
use std::ops::RangeInclusive;

/// Position, size and velocity shared by every game object.
///
/// Coordinates are logical play-area units with the origin at the top-left,
/// `y` growing downwards. Size is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entity {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    width: f32,
    height: f32,
}

impl Entity {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            width,
            height,
        }
    }

    /// Builds an entity whose centre sits at (`center_x`, `center_y`)
    pub fn centered(center_x: f32, center_y: f32, width: f32, height: f32) -> Self {
        Self::new(center_x - width / 2.0, center_y - height / 2.0, width, height)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Applies one frame of velocity
    pub fn advance(&mut self) {
        self.x += self.vx;
        self.y += self.vy;
    }

    /// Moves the entity to a random spot above the visible area
    pub fn respawn_above<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        play_width: f32,
        band: &RangeInclusive<f32>,
    ) {
        let max_x = (play_width - self.width).max(0.0);
        self.x = rng.random_range(0.0..=max_x);
        self.y = rng.random_range(band.clone());
    }

    /// Respawns above the play area once the top edge has passed the bottom.
    /// Returns true when the entity was recycled.
    pub fn recycle_below<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        play_width: f32,
        play_height: f32,
        band: &RangeInclusive<f32>,
    ) -> bool {
        if self.y > play_height {
            self.respawn_above(rng, play_width, band);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_centered() {
        let entity = Entity::centered(100.0, 50.0, 40.0, 20.0);
        assert_eq!(entity.x, 80.0);
        assert_eq!(entity.y, 40.0);
        assert_eq!(entity.center_x(), 100.0);
        assert_eq!(entity.bottom(), 60.0);
        assert_eq!(entity.right(), 120.0);
    }

    #[test]
    fn test_advance_applies_velocity() {
        let mut entity = Entity::new(10.0, 10.0, 5.0, 5.0);
        entity.vx = -2.0;
        entity.vy = 3.5;
        entity.advance();
        assert_eq!(entity.x, 8.0);
        assert_eq!(entity.y, 13.5);
        assert_eq!(entity.width(), 5.0);
        assert_eq!(entity.height(), 5.0);
    }

    #[test]
    fn test_recycle_only_past_bottom() {
        let mut rng = StdRng::seed_from_u64(1);
        let band = -100.0..=-40.0;

        let mut entity = Entity::new(10.0, 600.0, 40.0, 40.0);
        assert!(!entity.recycle_below(&mut rng, 800.0, 600.0, &band));
        assert_eq!(entity.y, 600.0);

        entity.y = 600.5;
        assert!(entity.recycle_below(&mut rng, 800.0, 600.0, &band));
        assert!(band.contains(&entity.y));
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_respawn_lands_in_band(
                seed in any::<u64>(),
                width in 1.0f32..200.0,
            ) {
                let mut rng = StdRng::seed_from_u64(seed);
                let band = -100.0..=-40.0;
                let mut entity = Entity::new(0.0, 700.0, width, 40.0);
                entity.respawn_above(&mut rng, 800.0, &band);
                prop_assert!(band.contains(&entity.y));
                prop_assert!(entity.x >= 0.0);
                prop_assert!(entity.right() <= 800.0 + 1e-3);
            }
        }
    }
}
