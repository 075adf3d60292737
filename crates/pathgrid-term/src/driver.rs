//! Terminal back-ends.
//!
//! [`CrosstermDriver`] maps the glyph buffer and input events onto a real
//! terminal through crossterm.

use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::{Color as CtColor, Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, ClearType},
};

use crate::messages::{Key, Msg, MouseAction};
use crate::screen::{Color, Frame};

/// Back-end driver (terminal, or a scripted stand-in for tests).
pub trait Driver {
    /// Initialise the back-end.
    fn init(&mut self) -> io::Result<()>;

    /// Wait up to `timeout` for input and append every available message to
    /// `out`.
    fn poll_msgs(&mut self, timeout: Duration, out: &mut Vec<Msg>) -> io::Result<()>;

    /// Write a computed frame to the screen.
    fn flush(&mut self, frame: &Frame) -> io::Result<()>;

    /// Clean up / restore the terminal.
    fn close(&mut self);
}

/// Maps a [`Color`] to a [`crossterm::style::Color`].
fn to_ct_color(c: Color) -> CtColor {
    if c == Color::DEFAULT {
        CtColor::Reset
    } else {
        CtColor::Rgb {
            r: c.r(),
            g: c.g(),
            b: c.b(),
        }
    }
}

/// Maps a crossterm key event to a message.
fn key_msg(ev: KeyEvent) -> Option<Msg> {
    if ev.kind != KeyEventKind::Press {
        return None;
    }
    if ev.modifiers.contains(KeyModifiers::CONTROL) && ev.code == KeyCode::Char('c') {
        return Some(Msg::Quit);
    }
    let key = match ev.code {
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Char(c) => Key::Char(c),
        KeyCode::Esc => Key::Escape,
        _ => return None,
    };
    Some(Msg::KeyDown(key))
}

/// Maps a crossterm event to a message.
fn to_msg(ev: Event) -> Option<Msg> {
    match ev {
        Event::Key(k) => key_msg(k),
        Event::Mouse(me) => {
            let action = match me.kind {
                MouseEventKind::Down(MouseButton::Left) => MouseAction::Main,
                MouseEventKind::Down(MouseButton::Right) => MouseAction::Secondary,
                MouseEventKind::Up(_) => MouseAction::Release,
                MouseEventKind::Moved | MouseEventKind::Drag(_) => MouseAction::Move,
                _ => return None,
            };
            Some(Msg::mouse(action, me.column as i32, me.row as i32))
        }
        Event::Resize(w, h) => Some(Msg::Resize {
            width: w as i32,
            height: h as i32,
        }),
        _ => None,
    }
}

/// A terminal back-end using crossterm.
pub struct CrosstermDriver {
    mouse_enabled: bool,
}

impl CrosstermDriver {
    /// Create a new driver.
    pub fn new() -> Self {
        Self {
            mouse_enabled: true,
        }
    }

    /// Configure whether mouse events are captured.
    pub fn with_mouse(mut self, enabled: bool) -> Self {
        self.mouse_enabled = enabled;
        self
    }
}

impl Default for CrosstermDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl Driver for CrosstermDriver {
    fn init(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(ClearType::All)
        )?;
        if self.mouse_enabled {
            execute!(stdout, event::EnableMouseCapture)?;
        }
        log::info!("terminal initialised (mouse: {})", self.mouse_enabled);
        Ok(())
    }

    fn poll_msgs(&mut self, timeout: Duration, out: &mut Vec<Msg>) -> io::Result<()> {
        if !event::poll(timeout)? {
            return Ok(());
        }
        while event::poll(Duration::ZERO)? {
            if let Some(msg) = to_msg(event::read()?) {
                out.push(msg);
            }
        }
        Ok(())
    }

    fn flush(&mut self, frame: &Frame) -> io::Result<()> {
        let mut stdout = io::stdout();
        for fg in &frame.glyphs {
            queue!(
                stdout,
                cursor::MoveTo(fg.x as u16, fg.y as u16),
                SetForegroundColor(to_ct_color(fg.glyph.fg)),
                SetBackgroundColor(to_ct_color(fg.glyph.bg)),
                Print(fg.glyph.ch)
            )?;
        }
        stdout.flush()
    }

    fn close(&mut self) {
        let mut stdout = io::stdout();
        if self.mouse_enabled {
            let _ = execute!(stdout, event::DisableMouseCapture);
        }
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();
        log::info!("terminal restored");
    }
}
