use crate::assets::Assets;
use crate::entities::{Bullet, Enemy, Entity, GameState, Player, PowerUp, PowerUpKind};
use crate::session::GameSession;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

/// View struct that holds all game state needed for rendering
pub struct RenderView<'a> {
    pub game_state: GameState,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub bullets: &'a [Bullet],
    pub power_ups: &'a [PowerUp],
    pub score: u32,
    pub level: u32,
    pub lives: i32,
    pub play_width: f32,
    pub play_height: f32,
    pub fps: u32,
}

impl<'a> RenderView<'a> {
    pub fn of(session: &'a GameSession, fps: u32) -> Self {
        Self {
            game_state: session.state(),
            player: session.player(),
            enemies: session.enemies(),
            bullets: session.bullets(),
            power_ups: session.power_ups(),
            score: session.score(),
            level: session.level(),
            lives: session.lives(),
            play_width: session.config().play_width,
            play_height: session.config().play_height,
            fps,
        }
    }
}

/// Handles all rendering responsibilities for the game
pub struct GameRenderer {
    assets: Assets,
}

impl GameRenderer {
    pub fn new(assets: Assets) -> Self {
        Self { assets }
    }

    /// Main render method that dispatches to state-specific renderers
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        match view.game_state {
            GameState::MainMenu => self.render_main_menu(frame),
            GameState::Playing => self.render_game(frame, view),
            GameState::GameOver => self.render_game_over(frame, view),
        }
    }

    fn render_main_menu(&self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(Color::Black)), area);

        let title_area = Rect {
            x: area.x,
            y: area.y + area.height / 2 - area.height.min(8) / 2,
            width: area.width,
            height: area.height.min(1),
        };
        frame.render_widget(
            Paragraph::new(Line::from("Space Adventure").bold().white()).centered(),
            title_area,
        );

        // Play button
        let button_area = centered_rect(area, 16, 3, 2);
        frame.render_widget(
            Paragraph::new(Line::from("PLAY").bold().white())
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Green)),
                )
                .style(Style::default().bg(Color::Green))
                .alignment(Alignment::Center),
            button_area,
        );

        let hint_area = Rect {
            x: area.x,
            y: (button_area.bottom() + 1).min(area.bottom().saturating_sub(1)),
            width: area.width,
            height: area.height.min(1),
        };
        frame.render_widget(
            Paragraph::new(Line::from("Enter/Space: Play  Q: Quit").dark_gray()).centered(),
            hint_area,
        );
    }

    /// Renders the active gameplay screen
    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = frame.area();
        if area.height < 3 || area.width < 3 {
            return;
        }

        // HUD on the first row, controls on the last, play field in between
        let game_area = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height - 2,
        };
        let projection = Projection::new(game_area, view.play_width, view.play_height);

        let buffer = frame.buffer_mut();
        self.render_background(buffer, game_area);

        let player_style = if view.player.shield_active {
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD)
        };
        draw_sprite(
            buffer,
            &projection,
            &view.player.body,
            &view.player.get_sprite_lines(),
            player_style,
        );

        let enemy_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        for enemy in view.enemies {
            draw_sprite(
                buffer,
                &projection,
                &enemy.body,
                &enemy.get_sprite_lines(),
                enemy_style,
            );
        }

        for bullet in view.bullets {
            let (col, row) = projection.point(bullet.body.center_x(), bullet.body.y);
            draw_text(
                buffer,
                game_area,
                col,
                row,
                &bullet.get_char().to_string(),
                Style::default().fg(Color::Yellow),
            );
        }

        for power_up in view.power_ups {
            let label = format!("[{}]", power_up.kind.get_char());
            draw_sprite(
                buffer,
                &projection,
                &power_up.body,
                &[label.as_str()],
                Style::default()
                    .fg(Color::White)
                    .bg(power_up_color(power_up.kind))
                    .add_modifier(Modifier::BOLD),
            );
        }

        frame.render_widget(
            Paragraph::new(hud_line(view)),
            Rect {
                x: area.x + 1,
                y: area.y,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );

        // Controls hint at bottom
        let controls = Line::from(vec![Span::styled(
            "[WASD/Arrows: Move] [Space: Fire] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        frame.render_widget(
            Paragraph::new(controls).centered(),
            Rect {
                x: area.x + 1,
                y: area.bottom() - 1,
                width: area.width.saturating_sub(2),
                height: 1,
            },
        );
    }

    fn render_background(&self, buffer: &mut Buffer, game_area: Rect) {
        if self.assets.background.is_none() {
            for y in game_area.top()..game_area.bottom() {
                for x in game_area.left()..game_area.right() {
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        cell.set_bg(Color::Black);
                    }
                }
            }
            return;
        }

        for row in 0..game_area.height {
            for col in 0..game_area.width {
                let (r, g, b) =
                    self.assets
                        .background_at(col, row, game_area.width, game_area.height);
                if let Some(cell) = buffer.cell_mut((game_area.x + col, game_area.y + row)) {
                    cell.set_bg(Color::Rgb(r, g, b));
                }
            }
        }
    }

    /// Renders the game over screen
    fn render_game_over(&self, frame: &mut Frame, view: &RenderView) {
        let game_over_text = vec![
            Line::from(""),
            Line::from("╔═══════════════════════════╗").centered().red(),
            Line::from("║         GAME OVER         ║")
                .centered()
                .red()
                .bold(),
            Line::from("╚═══════════════════════════╝").centered().red(),
            Line::from(""),
            Line::from(format!("Final Score: {}", view.score))
                .centered()
                .white()
                .bold(),
            Line::from(format!("Level reached: {}", view.level))
                .centered()
                .cyan()
                .bold(),
            Line::from(""),
            Line::from("Press R to restart").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        frame.render_widget(
            Paragraph::new(game_over_text)
                .block(Block::default().borders(Borders::ALL))
                .alignment(Alignment::Center),
            frame.area(),
        );
    }
}

/// Maps logical play-area coordinates onto terminal cells
struct Projection {
    area: Rect,
    scale_x: f32,
    scale_y: f32,
}

impl Projection {
    fn new(area: Rect, play_width: f32, play_height: f32) -> Self {
        Self {
            area,
            scale_x: area.width as f32 / play_width.max(1.0),
            scale_y: area.height as f32 / play_height.max(1.0),
        }
    }

    /// Cell for a logical point; may fall outside the area
    fn point(&self, x: f32, y: f32) -> (i32, i32) {
        (
            self.area.x as i32 + (x * self.scale_x).floor() as i32,
            self.area.y as i32 + (y * self.scale_y).floor() as i32,
        )
    }
}

/// Draws sprite lines centred on the entity horizontally, starting at its top row
fn draw_sprite(
    buffer: &mut Buffer,
    projection: &Projection,
    body: &Entity,
    lines: &[&str],
    style: Style,
) {
    // Still waiting above the play area
    if body.bottom() <= 0.0 {
        return;
    }
    let (center_col, top_row) = projection.point(body.center_x(), body.y);
    for (i, line) in lines.iter().enumerate() {
        let col = center_col - line.chars().count() as i32 / 2;
        draw_text(buffer, projection.area, col, top_row + i as i32, line, style);
    }
}

/// Writes ASCII `text` at a possibly off-screen cell, clipped to `area`
fn draw_text(buffer: &mut Buffer, area: Rect, col: i32, row: i32, text: &str, style: Style) {
    if row < area.top() as i32 || row >= area.bottom() as i32 {
        return;
    }
    let (col, text) = if col < area.left() as i32 {
        let skip = (area.left() as i32 - col) as usize;
        match text.get(skip..) {
            Some(rest) if !rest.is_empty() => (area.left() as i32, rest),
            _ => return,
        }
    } else {
        (col, text)
    };
    if col >= area.right() as i32 {
        return;
    }
    let max_width = (area.right() as i32 - col) as usize;
    buffer.set_stringn(col as u16, row as u16, text, max_width, style);
}

fn power_up_color(kind: PowerUpKind) -> Color {
    match kind {
        PowerUpKind::Shield => Color::Blue,
        PowerUpKind::DoubleFire => Color::Magenta,
        PowerUpKind::SpeedBoost => Color::Green,
    }
}

fn hud_line(view: &RenderView) -> Line<'static> {
    let label = Style::default().fg(Color::DarkGray);
    let mut spans = vec![
        Span::styled("Score: ", label),
        Span::styled(
            format!("{}", view.score),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Level: ", label),
        Span::styled(
            format!("{}", view.level),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Lives: ", label),
        Span::styled(
            format!("{}", view.lives.max(0)),
            if view.lives > 1 {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
            },
        ),
    ];

    let badges = [
        (view.player.shield_active, "SHIELD"),
        (view.player.double_fire, "x2"),
        (view.player.speed_multiplier > 1.0, "SPEED"),
    ];
    for (active, badge) in badges {
        if active {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("[{badge}]"),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ));
        }
    }

    spans.push(Span::styled("  FPS: ", label));
    spans.push(Span::styled(
        format!("{}", view.fps),
        Style::default().fg(Color::White),
    ));
    Line::from(spans)
}

/// A `width` x `height` rect centred in `area`, pushed down by `offset_y` rows
fn centered_rect(area: Rect, width: u16, height: u16, offset_y: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = (area.y + (area.height - height) / 2 + offset_y).min(area.bottom() - height);
    Rect {
        x,
        y,
        width,
        height,
    }
}
