//! Terminal presentation: half-block pixels inside a ratatui frame.
//!
//! Each terminal cell shows two vertically stacked pixels using the upper
//! half block glyph: foreground is the top pixel, background the bottom.

use super::frame_buffer::FrameBuffer;
use crate::core::game_loop::{Hud, Renderer};
use crate::entities::Sprite;
use crate::game::GamePhase;
use crossterm::cursor::{Hide, Show};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
    Frame, Terminal,
};
use std::io::{self, Stdout};

const UPPER_HALF_BLOCK: char = '\u{2580}';

/// Puts the terminal into game mode and restores it when dropped, also on
/// early returns and panics.
pub struct TerminalGuard {
    _private: (),
}

impl TerminalGuard {
    pub fn new() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        stdout.execute(Hide)?;
        Ok(Self { _private: () })
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let mut stdout = io::stdout();
        let _ = stdout.execute(Show);
        let _ = stdout.execute(DisableMouseCapture);
        let _ = stdout.execute(LeaveAlternateScreen);
        let _ = disable_raw_mode();
    }
}

pub struct TerminalRenderer {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    frame: FrameBuffer,
}

impl TerminalRenderer {
    /// `width` and `height` are the game's logical resolution.
    pub fn new(width: u32, height: u32) -> io::Result<Self> {
        let backend = CrosstermBackend::new(io::stdout());
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        Ok(Self {
            terminal,
            frame: FrameBuffer::new(width, height),
        })
    }
}

impl Renderer for TerminalRenderer {
    fn present(&mut self, sprites: &[Sprite], hud: &Hud) -> io::Result<()> {
        self.frame.draw(sprites);
        let frame = &self.frame;
        self.terminal.draw(|f| render_game(f, frame, hud))?;
        Ok(())
    }
}

/// Render the bordered play area and status bar.
pub fn render_game(frame: &mut Frame, pixels: &FrameBuffer, hud: &Hud) {
    let area = frame.size();

    let block = Block::default()
        .title(" Flappy Bird ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(2)])
        .split(inner);

    frame.render_widget(HalfBlockView::new(pixels), chunks[0]);
    render_status_bar(frame, chunks[1], hud);
}

fn phase_color(phase: GamePhase) -> Color {
    match phase {
        GamePhase::Starting => Color::Yellow,
        GamePhase::Running => Color::Green,
        GamePhase::Ending => Color::Red,
        GamePhase::Ended => Color::Magenta,
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, hud: &Hud) {
    if area.height < 1 {
        return;
    }

    let status = Line::from(vec![
        Span::styled(hud.phase.hint(), Style::default().fg(phase_color(hud.phase))),
        Span::raw("   "),
        Span::styled(
            format!("Score: {}", hud.score),
            Style::default().fg(Color::White),
        ),
    ]);
    frame.render_widget(
        Paragraph::new(status).alignment(Alignment::Center),
        Rect { height: 1, ..area },
    );

    if area.height >= 2 {
        let controls = Line::from(vec![
            Span::styled("[Space/Click]", Style::default().fg(Color::White)),
            Span::styled(" Flap  ", Style::default().fg(Color::DarkGray)),
            Span::styled("[Q]", Style::default().fg(Color::White)),
            Span::styled(" Quit", Style::default().fg(Color::DarkGray)),
        ]);
        frame.render_widget(
            Paragraph::new(controls).alignment(Alignment::Center),
            Rect {
                y: area.y + 1,
                height: 1,
                ..area
            },
        );
    }
}

/// Scales the frame buffer into a cell area, keeping its aspect ratio.
pub struct HalfBlockView<'a> {
    pixels: &'a FrameBuffer,
}

impl<'a> HalfBlockView<'a> {
    pub fn new(pixels: &'a FrameBuffer) -> Self {
        Self { pixels }
    }

    /// Pixels per source pixel, and the cell size of the scaled picture.
    fn fit(&self, area: Rect) -> Option<(f64, u16, u16)> {
        let (pw, ph) = (f64::from(self.pixels.width()), f64::from(self.pixels.height()));
        if area.width == 0 || area.height == 0 || pw == 0.0 || ph == 0.0 {
            return None;
        }
        let scale = (f64::from(area.width) / pw).min(f64::from(area.height) * 2.0 / ph);
        let cols = ((pw * scale) as u16).clamp(1, area.width);
        let rows = ((ph * scale / 2.0) as u16).clamp(1, area.height);
        Some((scale, cols, rows))
    }

    fn sample(&self, x: f64, y: f64) -> Color {
        let px = (x as u32).min(self.pixels.width() - 1);
        let py = (y as u32).min(self.pixels.height() - 1);
        let [r, g, b, _] = self.pixels.pixel(px, py).0;
        Color::Rgb(r, g, b)
    }
}

impl Widget for HalfBlockView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let Some((scale, cols, rows)) = self.fit(area) else {
            return;
        };
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;

        for row in 0..rows {
            for col in 0..cols {
                let x = (f64::from(col) + 0.5) / scale;
                let upper = self.sample(x, (f64::from(row) * 2.0 + 0.5) / scale);
                let lower = self.sample(x, (f64::from(row) * 2.0 + 1.5) / scale);
                buf.get_mut(left + col, top + row)
                    .set_char(UPPER_HALF_BLOCK)
                    .set_fg(upper)
                    .set_bg(lower);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::SpriteImage;
    use image::{Rgba, RgbaImage};

    fn striped_frame() -> FrameBuffer {
        // 4x4: rows 0 and 2 red, rows 1 and 3 blue.
        let mut fb = FrameBuffer::new(4, 4);
        let stripes = RgbaImage::from_fn(4, 4, |_, y| {
            if y % 2 == 0 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 255, 255])
            }
        });
        fb.draw(&[Sprite::new(SpriteImage::new("stripes.png", stripes), 0, 0)]);
        fb
    }

    #[test]
    fn test_one_to_one_half_blocks() {
        let fb = striped_frame();
        let area = Rect::new(0, 0, 4, 2);
        let mut buf = Buffer::empty(area);
        HalfBlockView::new(&fb).render(area, &mut buf);

        let cell = buf.get(1, 0);
        assert_eq!(cell.symbol(), "\u{2580}");
        assert_eq!(cell.fg, Color::Rgb(255, 0, 0));
        assert_eq!(cell.bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn test_picture_centred_in_wide_area() {
        let fb = striped_frame();
        let area = Rect::new(0, 0, 10, 2);
        let mut buf = Buffer::empty(area);
        HalfBlockView::new(&fb).render(area, &mut buf);

        // Scale is limited by height: 4 columns, centred with 3 spare each side.
        assert_eq!(buf.get(2, 0).symbol(), " ");
        assert_eq!(buf.get(3, 0).symbol(), "\u{2580}");
        assert_eq!(buf.get(6, 1).symbol(), "\u{2580}");
        assert_eq!(buf.get(7, 1).symbol(), " ");
    }

    #[test]
    fn test_empty_area_draws_nothing() {
        let fb = striped_frame();
        let area = Rect::new(0, 0, 0, 0);
        let mut buf = Buffer::empty(area);
        HalfBlockView::new(&fb).render(area, &mut buf);
        assert!(buf.content.is_empty());
    }

    #[test]
    fn test_phase_colors_distinct() {
        let colors = [
            phase_color(GamePhase::Starting),
            phase_color(GamePhase::Running),
            phase_color(GamePhase::Ending),
            phase_color(GamePhase::Ended),
        ];
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
