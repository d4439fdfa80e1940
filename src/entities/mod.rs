mod bullet;
mod enemy;
mod entity;
mod game_state;
mod player;
mod power_up;

// Re-export all public types
pub use bullet::Bullet;
pub use enemy::Enemy;
pub use entity::Entity;
pub use game_state::GameState;
pub use player::Player;
pub use power_up::{PowerUp, PowerUpKind};
