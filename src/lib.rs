// Library exports for testing
pub use entities::{Bullet, Enemy, Entity, GameState, Player, PowerUp, PowerUpKind};

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod collision;
pub mod config;
pub mod entities;
pub mod input;
pub mod renderer;
pub mod session;
