use color_eyre::Result;
use ratatui::{Terminal, backend::Backend};

use crate::audio::{AudioSink, Sound};
use crate::clock::{FrameClock, fps_from};
use crate::entities::GameState;
use crate::input::{InputAction, InputManager, InputSource};
use crate::renderer::{GameRenderer, RenderView};
use crate::session::{GameEvent, GameSession};

/// The main application: one session plus the collaborators it talks to.
pub struct App {
    session: GameSession,
    input_manager: InputManager,
    renderer: GameRenderer,
    audio: Box<dyn AudioSink>,
    clock: Box<dyn FrameClock>,
    fps: u32,
    /// Every event the session produced, kept for inspection after a run
    history: Vec<GameEvent>,
}

impl App {
    pub fn new(
        session: GameSession,
        input: Box<dyn InputSource>,
        renderer: GameRenderer,
        audio: Box<dyn AudioSink>,
        clock: Box<dyn FrameClock>,
    ) -> Self {
        Self {
            session,
            input_manager: InputManager::new(input),
            renderer,
            audio,
            clock,
            fps: 0,
            history: Vec::new(),
        }
    }

    /// Run the application's main loop until the player quits.
    ///
    /// Each pass is poll input → update → render. On the game-over screen the
    /// loop blocks on the next key instead of polling.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        tracing::info!(state = ?self.session.state(), "main loop started");
        self.render(terminal)?;

        while self.session.is_running() {
            self.fps = fps_from(self.clock.elapsed_since_last_frame());

            let state = self.session.state();
            if state == GameState::GameOver {
                self.input_manager.wait_event(state)?;
            } else {
                self.input_manager.poll_events(state)?;
            }

            self.process_actions();
            if !self.session.is_running() {
                break;
            }

            self.session.update(&self.input_manager.frame_input());
            self.input_manager.end_frame();
            self.dispatch_events();

            if self.session.state() == GameState::GameOver {
                // Gameplay input stops at game over
                self.input_manager.release_all();
            }

            self.render(terminal)?;
            if self.session.state() != GameState::GameOver {
                self.clock
                    .sleep_until_next_frame(self.session.config().target_fps);
            }
        }

        tracing::info!(score = self.session.score(), "main loop finished");
        Ok(())
    }

    /// Process input actions and update game state accordingly
    fn process_actions(&mut self) {
        for action in self.input_manager.actions().to_vec() {
            match action {
                InputAction::Quit => {
                    self.session.quit();
                    return;
                }
                InputAction::Play => self.session.start(),
                InputAction::Restart => {
                    if self.session.state() == GameState::GameOver {
                        self.session.reset();
                    }
                }
                InputAction::Fire => self.session.fire(),
            }
        }
    }

    fn dispatch_events(&mut self) {
        for event in self.session.drain_events() {
            if let Some(sound) = Sound::for_event(&event) {
                self.audio.play(sound);
            }
            self.history.push(event);
        }
    }

    fn render<B: Backend>(&self, terminal: &mut Terminal<B>) -> Result<()> {
        terminal.draw(|frame| {
            let view = RenderView::of(&self.session, self.fps);
            self.renderer.render(frame, &view);
        })?;
        Ok(())
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }

    pub fn history(&self) -> &[GameEvent] {
        &self.history
    }
}
