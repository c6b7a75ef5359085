use crate::Coords;
use std::io::{self, Stdout, Write, stdout};

use crossterm::{cursor, execute, queue, style, terminal};
use crossterm::terminal::{ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::event::{Event, KeyEvent, KeyEventKind, read};

/// Everything the game needs from the screen and keyboard.
pub trait Terminal {
    fn setup(&mut self) -> io::Result<()>;
    fn restore(&mut self) -> io::Result<()>;

    /// Current size as (columns, rows).
    fn size(&self) -> io::Result<Coords>;

    /// Blocks until a key is pressed.
    fn read_key_blocking(&mut self) -> io::Result<KeyEvent>;

    fn clear(&mut self) -> io::Result<()>;
    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()>;
    fn print_str_at(&mut self, pos: Coords, s: &str) -> io::Result<()>;
    fn flush(&mut self) -> io::Result<()>;
}

pub struct TermManager {
    stdout: Stdout,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout() }
    }

    fn set_cursor_visibility(&mut self, option: bool) -> io::Result<()> {
        if option {
            execute!(self.stdout, cursor::Show)
        } else {
            execute!(self.stdout, cursor::Hide)
        }
    }

    fn set_cursor_blink(&mut self, option: bool) -> io::Result<()> {
        if option {
            execute!(self.stdout, cursor::EnableBlinking)
        } else {
            execute!(self.stdout, cursor::DisableBlinking)
        }
    }
}

impl Terminal for TermManager {
    fn setup(&mut self) -> io::Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        self.set_cursor_visibility(false)?;
        self.set_cursor_blink(false)
    }

    fn restore(&mut self) -> io::Result<()> {
        terminal::disable_raw_mode()?;
        self.set_cursor_visibility(true)?;
        self.set_cursor_blink(true)?;
        execute!(self.stdout, LeaveAlternateScreen)
    }

    fn size(&self) -> io::Result<Coords> {
        terminal::size()
    }

    fn read_key_blocking(&mut self) -> io::Result<KeyEvent> {
        loop {
            // Some platforms report releases too; only presses count as input
            if let Event::Key(ev) = read()? {
                if ev.kind == KeyEventKind::Press {
                    return Ok(ev);
                }
            }
        }
    }

    fn clear(&mut self) -> io::Result<()> {
        execute!(self.stdout, terminal::Clear(ClearType::All), cursor::MoveTo(0, 0))
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))
    }

    fn print_str_at(&mut self, pos: Coords, s: &str) -> io::Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(s))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.stdout.flush()
    }
}

/// In-memory terminal for tests: replays queued keys and records what is drawn.
#[cfg(test)]
pub struct FakeTerm {
    pub width: crate::TermInt,
    pub height: crate::TermInt,
    pub keys: std::collections::VecDeque<KeyEvent>,
    pub screen: std::collections::HashMap<Coords, char>,
    pub clears: usize,
    pub active: bool,
}

#[cfg(test)]
impl FakeTerm {
    pub fn new(width: crate::TermInt, height: crate::TermInt) -> Self {
        FakeTerm {
            width,
            height,
            keys: Default::default(),
            screen: Default::default(),
            clears: 0,
            active: false,
        }
    }

    pub fn with_keys(mut self, keys: &[crossterm::event::KeyCode]) -> Self {
        use crossterm::event::KeyModifiers;

        self.keys.extend(keys.iter().map(|&code| KeyEvent::new(code, KeyModifiers::NONE)));
        self
    }

    pub fn char_at(&self, pos: Coords) -> Option<char> {
        self.screen.get(&pos).copied()
    }
}

#[cfg(test)]
impl Terminal for FakeTerm {
    fn setup(&mut self) -> io::Result<()> {
        self.active = true;
        Ok(())
    }

    fn restore(&mut self) -> io::Result<()> {
        self.active = false;
        Ok(())
    }

    fn size(&self) -> io::Result<Coords> {
        Ok((self.width, self.height))
    }

    fn read_key_blocking(&mut self) -> io::Result<KeyEvent> {
        self.keys
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more scripted keys"))
    }

    fn clear(&mut self) -> io::Result<()> {
        self.screen.clear();
        self.clears += 1;
        Ok(())
    }

    fn print_at(&mut self, pos: Coords, ch: char) -> io::Result<()> {
        self.screen.insert(pos, ch);
        Ok(())
    }

    fn print_str_at(&mut self, pos: Coords, s: &str) -> io::Result<()> {
        for (i, ch) in s.chars().enumerate() {
            self.screen.insert((pos.0 + i as crate::TermInt, pos.1), ch);
        }
        Ok(())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
