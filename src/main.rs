use clap::Parser;
use color_eyre::{Result, eyre::WrapErr, eyre::eyre};
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

use space_adventure::app::App;
use space_adventure::assets::Assets;
use space_adventure::audio::open_audio;
use space_adventure::clock::SystemClock;
use space_adventure::config::Cli;
use space_adventure::input::CrosstermInput;
use space_adventure::renderer::GameRenderer;
use space_adventure::session::GameSession;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = cli.game_config();
    tracing::info!(?config, "starting");

    // Load everything before the terminal switches screens so failures are logged, not drawn over
    let assets = Assets::load(&config.asset_dir);
    let audio = open_audio(
        &Assets::sound_dir(&config.asset_dir),
        config.volume,
        config.mute,
    );

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    tracing::info!(supports_keyboard_enhancement, "terminal capabilities");

    // Setup terminal manually for full control
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Enable keyboard enhancement AFTER entering alternate screen
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let mut app = App::new(
        GameSession::new(config),
        Box::new(CrosstermInput::new(supports_keyboard_enhancement)),
        GameRenderer::new(assets),
        audio,
        Box::new(SystemClock::new()),
    );
    let result = app.run(&mut terminal);

    // Cleanup runs whether or not the loop failed
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!("main loop failed: {err:#}");
    }
    result
}

/// Sends tracing output to a file; the terminal is busy drawing the game
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .wrap_err_with(|| format!("cannot create log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| eyre!("failed to install logger: {err}"))
}
