use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::collision::{self, Collision};
use crate::config::GameConfig;
use crate::entities::{Bullet, Enemy, GameState, Player, PowerUp, PowerUpKind};
use crate::input::FrameInput;

/// Something that happened during a frame. The run loop turns these into sounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Fired { bullets: usize },
    EnemyDestroyed,
    PlayerHit { shielded: bool },
    PowerUpCollected(PowerUpKind),
    LevelUp(u32),
    GameOver { score: u32 },
}

/// Owns every entity and all score/level/lives bookkeeping.
///
/// Nothing in here touches the terminal, audio or clock: callers feed a
/// [`FrameInput`] to [`GameSession::update`] and drain [`GameEvent`]s afterwards.
pub struct GameSession {
    config: GameConfig,
    state: GameState,
    running: bool,
    player: Player,
    enemies: Vec<Enemy>,
    bullets: Vec<Bullet>,
    power_ups: Vec<PowerUp>,
    score: u32,
    level: u32,
    lives: i32,
    /// Frames spent in `Playing` since the last reset
    frame_count: u64,
    rng: StdRng,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: GameConfig) -> Self {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let state = if config.start_in_menu {
            GameState::MainMenu
        } else {
            GameState::Playing
        };

        Self {
            state,
            running: true,
            player: Player::new(&config),
            enemies: Enemy::spawn_wave(&mut rng, 1, &config),
            bullets: Vec::new(),
            power_ups: Vec::new(),
            score: 0,
            level: 1,
            lives: config.starting_lives,
            frame_count: 0,
            rng,
            events: Vec::new(),
            config,
        }
    }

    /// Starts a fresh run: score 0, level 1, full lives, a new wave, back to `Playing`
    pub fn reset(&mut self) {
        tracing::info!(score = self.score, level = self.level, "restarting");
        self.player = Player::new(&self.config);
        self.enemies = Enemy::spawn_wave(&mut self.rng, 1, &self.config);
        self.bullets.clear();
        self.power_ups.clear();
        self.score = 0;
        self.level = 1;
        self.lives = self.config.starting_lives;
        self.frame_count = 0;
        self.events.clear();
        self.state = GameState::Playing;
        self.running = true;
    }

    /// Main menu play button
    pub fn start(&mut self) {
        if self.state == GameState::MainMenu {
            tracing::info!("starting game");
            self.state = GameState::Playing;
        }
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Fires from the ship's nose. Ignored outside of `Playing`.
    pub fn fire(&mut self) {
        if self.state != GameState::Playing {
            return;
        }
        let bullets = self.player.fire(&self.config);
        tracing::debug!(count = bullets.len(), "fire");
        self.events.push(GameEvent::Fired {
            bullets: bullets.len(),
        });
        self.bullets.extend(bullets);
    }

    /// Advances one frame of gameplay. Does nothing outside of `Playing`.
    pub fn update(&mut self, input: &FrameInput) {
        if self.state != GameState::Playing {
            return;
        }
        self.frame_count += 1;

        let (dx, dy) = input.direction();
        self.player.steer(dx, dy);
        self.player
            .update(self.config.play_width, self.config.play_height);

        for enemy in &mut self.enemies {
            enemy.update(&mut self.rng, &self.config);
        }
        for power_up in &mut self.power_ups {
            power_up.update(&mut self.rng, &self.config);
        }
        for bullet in &mut self.bullets {
            bullet.update();
        }

        // Bullets are consumed once they leave the top; enemies and power-ups recycle instead
        self.bullets.retain(|b| !b.is_off_screen());

        self.resolve_collisions();
        self.maybe_spawn_power_up();

        if self.enemies.is_empty() {
            self.next_level();
        }

        // Checked even after a level change so a lethal frame is never masked
        if self.lives <= 0 {
            self.game_over();
        }
    }

    fn resolve_collisions(&mut self) {
        let collisions = collision::detect(
            &self.bullets,
            &self.enemies,
            &self.player.body,
            &self.power_ups,
        );
        if collisions.is_empty() {
            return;
        }

        let mut spent_bullets = Vec::new();
        let mut dead_enemies = Vec::new();
        let mut collected = Vec::new();

        for collision in collisions {
            match collision {
                Collision::EnemyDestroyed { bullet, enemy } => {
                    spent_bullets.push(bullet);
                    dead_enemies.push(enemy);
                    self.score += self.config.points_per_kill;
                    self.events.push(GameEvent::EnemyDestroyed);
                }
                Collision::PlayerHit { enemy } => {
                    dead_enemies.push(enemy);
                    let shielded = self.player.absorb_hit();
                    if !shielded {
                        self.lives -= 1;
                    }
                    tracing::debug!(shielded, lives = self.lives, "player hit");
                    self.events.push(GameEvent::PlayerHit { shielded });
                }
                Collision::PowerUpCollected { power_up, kind } => {
                    collected.push(power_up);
                    self.player.apply_power_up(kind, &self.config);
                    tracing::debug!(?kind, "power-up collected");
                    self.events.push(GameEvent::PowerUpCollected(kind));
                }
            }
        }

        collision::remove_indices(&mut self.bullets, &spent_bullets);
        collision::remove_indices(&mut self.enemies, &dead_enemies);
        collision::remove_indices(&mut self.power_ups, &collected);
    }

    fn maybe_spawn_power_up(&mut self) {
        let interval = self.config.power_up_interval;
        if interval == 0
            || !self.frame_count.is_multiple_of(interval)
            || self.power_ups.len() >= self.config.max_power_ups
        {
            return;
        }
        let power_up = PowerUp::spawn(&mut self.rng, &self.config);
        tracing::debug!(kind = ?power_up.kind, "power-up spawned");
        self.power_ups.push(power_up);
    }

    fn next_level(&mut self) {
        self.level += 1;
        self.enemies = Enemy::spawn_wave(&mut self.rng, self.level, &self.config);
        tracing::info!(level = self.level, enemies = self.enemies.len(), "level up");
        self.events.push(GameEvent::LevelUp(self.level));
    }

    fn game_over(&mut self) {
        tracing::info!(score = self.score, level = self.level, "game over");
        self.state = GameState::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
    }

    /// Hands over every event queued since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Replaces the current wave, e.g. to stage a specific situation
    pub fn load_wave(&mut self, enemies: Vec<Enemy>) {
        self.enemies = enemies;
    }

    pub fn push_bullet(&mut self, bullet: Bullet) {
        self.bullets.push(bullet);
    }

    pub fn push_power_up(&mut self, power_up: PowerUp) {
        self.power_ups.push(power_up);
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn power_ups(&self) -> &[PowerUp] {
        &self.power_ups
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}
