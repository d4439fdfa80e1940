use color_eyre::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::collections::VecDeque;
use std::time::Duration;

use crate::entities::GameState;

/// Keys the game cares about, after translation from the terminal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Fire,
    Confirm,
    Restart,
    Exit,
}

/// Raw input as delivered by an [`InputSource`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Window/terminal asked to close
    Quit,
    KeyDown(Key),
    KeyUp(Key),
}

/// Represents semantic game actions that fire once per key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    Play,
    Fire,
    Restart,
    Quit,
}

/// Where input events come from. The terminal in the game, a script in tests.
pub trait InputSource {
    /// Every event currently pending, without blocking
    fn poll(&mut self) -> Result<Vec<InputEvent>>;

    /// Blocks until the next event arrives
    fn wait(&mut self) -> Result<InputEvent>;

    /// Whether key releases are reported. Without them held keys only last one frame.
    fn reports_releases(&self) -> bool;
}

/// Reads crossterm events from the terminal
pub struct CrosstermInput {
    reports_releases: bool,
}

impl CrosstermInput {
    /// `reports_releases` should be true only when keyboard enhancement flags were pushed
    pub fn new(reports_releases: bool) -> Self {
        Self { reports_releases }
    }
}

impl InputSource for CrosstermInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        let mut events = Vec::new();
        while event::poll(Duration::from_millis(0))? {
            if let Some(input) = translate(event::read()?) {
                events.push(input);
            }
        }
        Ok(events)
    }

    fn wait(&mut self) -> Result<InputEvent> {
        loop {
            if let Some(input) = translate(event::read()?) {
                return Ok(input);
            }
        }
    }

    fn reports_releases(&self) -> bool {
        self.reports_releases
    }
}

/// Maps a crossterm event onto a game event. Anything unrecognised is dropped.
pub fn translate(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<InputEvent> {
    if key_event.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key_event.code, KeyCode::Char('c') | KeyCode::Char('C'))
    {
        return Some(InputEvent::Quit);
    }

    let key = match key_event.code {
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Key::Left,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Key::Right,
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Key::Up,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Key::Down,
        KeyCode::Char(' ') => Key::Fire,
        KeyCode::Enter => Key::Confirm,
        KeyCode::Char('r') | KeyCode::Char('R') => Key::Restart,
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Key::Exit,
        _ => return None,
    };

    match key_event.kind {
        KeyEventKind::Release => Some(InputEvent::KeyUp(key)),
        _ => Some(InputEvent::KeyDown(key)),
    }
}

/// Tracks the state of keys that can be held down for continuous input
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct FrameInput {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub fire: bool,
}

impl FrameInput {
    /// Held direction as (dx, dy), each in -1..=1
    pub fn direction(&self) -> (f32, f32) {
        let axis = |neg: bool, pos: bool| (pos as i8 - neg as i8) as f32;
        (axis(self.left, self.right), axis(self.up, self.down))
    }
}

/// Manages input polling and translates raw key events into game actions
pub struct InputManager {
    source: Box<dyn InputSource>,
    held: FrameInput,
    oneshot_actions: Vec<InputAction>,
}

impl InputManager {
    pub fn new(source: Box<dyn InputSource>) -> Self {
        Self {
            source,
            held: FrameInput::default(),
            oneshot_actions: Vec::new(),
        }
    }

    /// Drains every pending event. Call once per frame before reading actions.
    pub fn poll_events(&mut self, game_state: GameState) -> Result<()> {
        for event in self.source.poll()? {
            self.handle_event(event, game_state);
        }
        Ok(())
    }

    /// Blocks for a single event. Used while the game waits on the player.
    pub fn wait_event(&mut self, game_state: GameState) -> Result<()> {
        let event = self.source.wait()?;
        self.handle_event(event, game_state);
        Ok(())
    }

    pub fn handle_event(&mut self, event: InputEvent, game_state: GameState) {
        match event {
            InputEvent::Quit => self.oneshot_actions.push(InputAction::Quit),
            InputEvent::KeyDown(key) => self.handle_key_down(key, game_state),
            InputEvent::KeyUp(key) => self.set_held(key, false),
        }
    }

    fn handle_key_down(&mut self, key: Key, game_state: GameState) {
        if key == Key::Exit {
            self.oneshot_actions.push(InputAction::Quit);
            return;
        }

        match game_state {
            GameState::MainMenu => {
                if matches!(key, Key::Confirm | Key::Fire) {
                    self.oneshot_actions.push(InputAction::Play);
                }
            }
            GameState::Playing => {
                // Fire is edge triggered: a held or auto-repeating key shoots once
                if key == Key::Fire && !self.held.fire {
                    self.oneshot_actions.push(InputAction::Fire);
                }
                self.set_held(key, true);
            }
            GameState::GameOver => {
                if key == Key::Restart {
                    self.oneshot_actions.push(InputAction::Restart);
                }
            }
        }
    }

    fn set_held(&mut self, key: Key, down: bool) {
        match key {
            Key::Up => {
                self.held.up = down;
                if down {
                    self.held.down = false;
                }
            }
            Key::Down => {
                self.held.down = down;
                if down {
                    self.held.up = false;
                }
            }
            Key::Left => {
                self.held.left = down;
                if down {
                    self.held.right = false;
                }
            }
            Key::Right => {
                self.held.right = down;
                if down {
                    self.held.left = false;
                }
            }
            Key::Fire => self.held.fire = down,
            Key::Confirm | Key::Restart | Key::Exit => {}
        }
    }

    pub fn is_key_held(&self, key: Key) -> bool {
        match key {
            Key::Up => self.held.up,
            Key::Down => self.held.down,
            Key::Left => self.held.left,
            Key::Right => self.held.right,
            Key::Fire => self.held.fire,
            Key::Confirm | Key::Restart | Key::Exit => false,
        }
    }

    /// One-shot actions gathered since the last [`InputManager::end_frame`]
    pub fn actions(&self) -> &[InputAction] {
        &self.oneshot_actions
    }

    /// Keys held this frame
    pub fn frame_input(&self) -> FrameInput {
        self.held
    }

    /// Forgets one-shot actions, and held keys too when releases never arrive
    pub fn end_frame(&mut self) {
        self.oneshot_actions.clear();
        if !self.source.reports_releases() {
            self.held = FrameInput::default();
        }
    }

    /// Drops all held keys, e.g. when gameplay stops accepting input
    pub fn release_all(&mut self) {
        self.held = FrameInput::default();
    }
}

/// Replays a fixed list of event batches, one batch per poll
#[derive(Debug, Default)]
pub struct ScriptedInput {
    batches: VecDeque<Vec<InputEvent>>,
    reports_releases: bool,
}

impl ScriptedInput {
    pub fn new(batches: Vec<Vec<InputEvent>>) -> Self {
        Self {
            batches: batches.into(),
            reports_releases: true,
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Result<Vec<InputEvent>> {
        Ok(self.batches.pop_front().unwrap_or_default())
    }

    /// Returns the first event of the next non-empty batch, or `Quit` once the script runs dry
    fn wait(&mut self) -> Result<InputEvent> {
        while let Some(mut batch) = self.batches.pop_front() {
            if !batch.is_empty() {
                let event = batch.remove(0);
                if !batch.is_empty() {
                    self.batches.push_front(batch);
                }
                return Ok(event);
            }
        }
        Ok(InputEvent::Quit)
    }

    fn reports_releases(&self) -> bool {
        self.reports_releases
    }
}
