//! Bounding-box collision detection.
//!
//! Detection only reads the entity collections and reports what touched what.
//! [`crate::session::GameSession`] applies the outcome (removals, score, lives).

use crate::entities::{Bullet, Enemy, Entity, PowerUp, PowerUpKind};

/// Axis-aligned overlap. Boxes that only share an edge do not collide.
pub fn overlaps(a: &Entity, b: &Entity) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// One resolved contact, indices refer to the collections passed to [`detect`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Collision {
    EnemyDestroyed { bullet: usize, enemy: usize },
    PlayerHit { enemy: usize },
    PowerUpCollected { power_up: usize, kind: PowerUpKind },
}

/// Runs one resolution pass.
///
/// Every bullet is tested against every enemy in collection order; the first
/// overlap wins and that bullet stops scanning, so a bullet destroys at most
/// one enemy and an enemy is destroyed by at most one bullet. Enemies that
/// survive the bullets are then tested against the player, and finally every
/// power-up is tested against the player.
pub fn detect(
    bullets: &[Bullet],
    enemies: &[Enemy],
    player: &Entity,
    power_ups: &[PowerUp],
) -> Vec<Collision> {
    let mut collisions = Vec::new();
    let mut destroyed = vec![false; enemies.len()];

    for (b_idx, bullet) in bullets.iter().enumerate() {
        let hit = enemies
            .iter()
            .enumerate()
            .find(|(e_idx, enemy)| !destroyed[*e_idx] && overlaps(&bullet.body, &enemy.body));

        if let Some((e_idx, _)) = hit {
            destroyed[e_idx] = true;
            collisions.push(Collision::EnemyDestroyed {
                bullet: b_idx,
                enemy: e_idx,
            });
        }
    }

    for (e_idx, enemy) in enemies.iter().enumerate() {
        if !destroyed[e_idx] && overlaps(&enemy.body, player) {
            collisions.push(Collision::PlayerHit { enemy: e_idx });
        }
    }

    for (p_idx, power_up) in power_ups.iter().enumerate() {
        if overlaps(&power_up.body, player) {
            collisions.push(Collision::PowerUpCollected {
                power_up: p_idx,
                kind: power_up.kind,
            });
        }
    }

    collisions
}

/// Removes the flagged indices from `items`, keeping the order of the rest
pub fn remove_indices<T>(items: &mut Vec<T>, indices: &[usize]) {
    if indices.is_empty() {
        return;
    }
    let mut doomed = vec![false; items.len()];
    for &idx in indices {
        if idx < doomed.len() {
            doomed[idx] = true;
        }
    }
    let mut flags = doomed.into_iter();
    items.retain(|_| !flags.next().unwrap_or(false));
}
