use crate::entity::Direction;
use crate::frame::{Frame, Glyph};
use crate::game::GameState;
use crate::renderer::{Input, InputProvider, Renderer, RestartPrompt};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use std::io::{self, Write};
use std::time::Duration;

pub struct CliRenderer {
    active: bool,
    // Where the restart question goes, just under the game over message
    prompt_at: (u16, u16),
}

impl CliRenderer {
    pub fn new() -> Self {
        Self {
            active: false,
            prompt_at: (0, 0),
        }
    }

    fn draw_glyph(&self, glyph: Glyph, stdout: &mut io::Stdout) -> io::Result<()> {
        let color = match glyph {
            Glyph::Empty => Color::Reset,
            Glyph::Border => Color::DarkGrey,
            Glyph::Food => Color::Red,
            Glyph::Snake => Color::Green,
        };
        queue!(stdout, SetForegroundColor(color), Print(glyph.as_char()))?;
        Ok(())
    }
}

impl Default for CliRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Translate a key press into game input. Releases and unbound keys map to `None`.
pub fn map_key(key: KeyEvent) -> Option<Input> {
    if key.kind == KeyEventKind::Release {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(Input::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Input::Direction(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Input::Direction(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Input::Direction(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Input::Direction(Direction::Right))
        }
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Input::Quit),
        _ => None,
    }
}

impl Renderer for CliRenderer {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        self.active = true;
        Ok(())
    }

    fn render(&mut self, frame: &Frame) -> io::Result<()> {
        let mut stdout = io::stdout();

        queue!(stdout, cursor::MoveTo(0, 0), terminal::Clear(ClearType::All))?;

        for y in 0..frame.height {
            for x in 0..frame.width {
                self.draw_glyph(frame.glyph_at(x, y), &mut stdout)?;
            }
            queue!(stdout, ResetColor, Print("\r\n"))?;
        }

        queue!(stdout, Print(frame.status_line()), Print("\r\n"))?;

        stdout.flush()?;
        Ok(())
    }

    fn show_game_over(&mut self, frame: &Frame, state: GameState) -> io::Result<()> {
        let mut stdout = io::stdout();
        let (message, color) = match state {
            GameState::Won => (format!("You won! Score: {}", frame.score), Color::Green),
            _ => (format!("Game Over! Score: {}", frame.score), Color::Red),
        };

        let row = (frame.height / 2) as u16;
        self.prompt_at = ((frame.width / 2 - 10).max(0) as u16, row + 2);

        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo((frame.width / 2 - 5).max(0) as u16, row),
            SetForegroundColor(color),
            Print(message),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let mut stdout = io::stdout();
        execute!(
            stdout,
            cursor::Show,
            terminal::LeaveAlternateScreen,
            ResetColor
        )?;
        terminal::disable_raw_mode()?;
        Ok(())
    }
}

impl InputProvider for CliRenderer {
    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        let mut latest = None;

        // Drain everything queued since the last tick, keeping the newest key
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                match map_key(key) {
                    Some(Input::Quit) => return Ok(Some(Input::Quit)),
                    Some(input) => latest = Some(input),
                    None => {}
                }
            }
        }

        Ok(latest)
    }
}

impl RestartPrompt for CliRenderer {
    fn ask_restart(&mut self) -> io::Result<bool> {
        let mut stdout = io::stdout();
        queue!(
            stdout,
            cursor::MoveTo(self.prompt_at.0, self.prompt_at.1),
            Print("Do you want to play again? (y/n)")
        )?;
        stdout.flush()?;

        loop {
            if let Event::Key(KeyEvent { code, modifiers, kind, .. }) = event::read()? {
                if kind == KeyEventKind::Release {
                    continue;
                }
                match code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                        return Ok(false)
                    }
                    _ => {}
                }
            }
        }
    }
}

impl Drop for CliRenderer {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
