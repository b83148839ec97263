use std::io::{self, Write};
use std::time::Duration;

use crossterm::{
    cursor, event, execute, queue,
    style::{
        Attribute, Color as CtColor, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal,
};

use crate::buffer::Buffer;
use crate::event::Event;
use crate::render::{render_to_buffer, Viewport};
use crate::scene::Scene;
use crate::text::char_width;
use crate::types::Rgb;

/// Full-screen terminal backend with double-buffered, diffed output.
pub struct Terminal {
    stdout: io::Stdout,
    current_buffer: Buffer,
    previous_buffer: Buffer,
    /// Force a full repaint on the next render.
    dirty: bool,
}

impl Terminal {
    pub fn new() -> io::Result<Self> {
        let mut stdout = io::stdout();

        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            event::EnableMouseCapture
        )?;

        let (width, height) = terminal::size()?;
        let current_buffer = Buffer::new(width, height);
        let previous_buffer = Buffer::new(width, height);

        Ok(Self {
            stdout,
            current_buffer,
            previous_buffer,
            dirty: true,
        })
    }

    pub fn size(&self) -> (u16, u16) {
        (self.current_buffer.width(), self.current_buffer.height())
    }

    /// Viewport that puts a `scene_size` scene over the whole screen.
    pub fn viewport(&self, scene_size: (f64, f64)) -> Viewport {
        let (cols, rows) = self.size();
        Viewport::new(scene_size.0, scene_size.1, cols, rows)
    }

    /// Wait up to `timeout` for input, then drain whatever else is pending.
    pub fn poll(&self, timeout: Duration) -> io::Result<Vec<Event>> {
        let mut events = Vec::new();

        if event::poll(timeout)? {
            events.extend(Event::from_crossterm(event::read()?));
            // Drain any additional pending events
            while event::poll(Duration::ZERO)? {
                events.extend(Event::from_crossterm(event::read()?));
            }
        }

        Ok(events)
    }

    /// Draw `scene`, whose pixel space is `scene_size`, over the whole screen.
    pub fn render(&mut self, scene: &Scene, scene_size: (f64, f64)) -> io::Result<()> {
        // Check if terminal size changed
        let (width, height) = terminal::size()?;
        if width != self.current_buffer.width() || height != self.current_buffer.height() {
            self.current_buffer = Buffer::new(width, height);
            self.previous_buffer = Buffer::new(width, height);
            self.dirty = true;
        }

        self.current_buffer.clear();

        let viewport = Viewport::new(scene_size.0, scene_size.1, width, height);
        render_to_buffer(scene, &viewport, &mut self.current_buffer);

        if self.dirty {
            // Make every cell differ so the diff repaints the whole screen.
            for y in 0..height {
                for x in 0..width {
                    if let Some(cell) = self.previous_buffer.get_mut(x, y) {
                        cell.char = '\0';
                    }
                }
            }
            self.dirty = false;
        }

        // Diff and write changes
        self.flush_diff()?;

        // Swap buffers
        std::mem::swap(&mut self.current_buffer, &mut self.previous_buffer);

        Ok(())
    }

    /// Queue the cells that changed since the last frame, then flush once.
    fn flush_diff(&mut self) -> io::Result<()> {
        let mut cursor_at: Option<(u16, u16)> = None;
        let mut colors: Option<(Rgb, Rgb)> = None;

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;

        for (x, y, cell) in self.current_buffer.diff(&self.previous_buffer) {
            // The wide char to the left already covers this cell.
            if cell.wide_continuation {
                continue;
            }
            if cursor_at != Some((x, y)) {
                queue!(self.stdout, cursor::MoveTo(x, y))?;
            }
            if colors != Some((cell.fg, cell.bg)) {
                queue!(
                    self.stdout,
                    SetForegroundColor(ct_color(cell.fg)),
                    SetBackgroundColor(ct_color(cell.bg))
                )?;
                colors = Some((cell.fg, cell.bg));
            }
            queue!(self.stdout, Print(cell.char))?;
            cursor_at = Some((x + char_width(cell.char).max(1) as u16, y));
        }

        queue!(self.stdout, SetAttribute(Attribute::Reset))?;
        self.stdout.flush()
    }
}

fn ct_color(rgb: Rgb) -> CtColor {
    CtColor::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.stdout,
            event::DisableMouseCapture,
            cursor::Show,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}
