//! Terminal input, reduced to what chart hosts react to.

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind, KeyModifiers, MouseEventKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Key { key: Key, modifiers: Modifiers },
    /// Pointer moved to cell `(x, y)`, for hover tracking.
    MouseMove { x: u16, y: u16 },
    Resize { width: u16, height: u16 },
}

/// Keys a chart can bind. Anything else arrives as `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        match code {
            KeyCode::Char(c) => Key::Char(c),
            KeyCode::Enter => Key::Enter,
            KeyCode::Esc => Key::Escape,
            KeyCode::Up => Key::Up,
            KeyCode::Down => Key::Down,
            KeyCode::Left => Key::Left,
            KeyCode::Right => Key::Right,
            KeyCode::Home => Key::Home,
            KeyCode::End => Key::End,
            _ => Key::Other,
        }
    }
}

impl From<KeyModifiers> for Modifiers {
    fn from(mods: KeyModifiers) -> Self {
        Self {
            ctrl: mods.contains(KeyModifiers::CONTROL),
            shift: mods.contains(KeyModifiers::SHIFT),
        }
    }
}

impl Event {
    /// Translate a raw crossterm event. Key releases, clicks and scrolling
    /// are dropped.
    pub fn from_crossterm(event: CtEvent) -> Option<Self> {
        match event {
            CtEvent::Key(key) if key.kind != KeyEventKind::Release => Some(Event::Key {
                key: key.code.into(),
                modifiers: key.modifiers.into(),
            }),
            CtEvent::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Moved | MouseEventKind::Drag(_) => Some(Event::MouseMove {
                    x: mouse.column,
                    y: mouse.row,
                }),
                _ => None,
            },
            CtEvent::Resize(width, height) => Some(Event::Resize { width, height }),
            _ => None,
        }
    }

    /// `q`, Esc or Ctrl+C.
    pub fn is_quit(&self) -> bool {
        match self {
            Event::Key {
                key: Key::Char('q') | Key::Escape,
                ..
            } => true,
            Event::Key {
                key: Key::Char('c'),
                modifiers,
            } => modifiers.ctrl,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyEvent, MouseButton, MouseEvent};

    fn mouse(kind: MouseEventKind) -> CtEvent {
        CtEvent::Mouse(MouseEvent {
            kind,
            column: 12,
            row: 3,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_key_press_translates() {
        let raw = CtEvent::Key(KeyEvent::new(KeyCode::Left, KeyModifiers::NONE));
        assert_eq!(
            Event::from_crossterm(raw),
            Some(Event::Key {
                key: Key::Left,
                modifiers: Modifiers::default()
            })
        );
    }

    #[test]
    fn test_mouse_motion_translates() {
        assert_eq!(
            Event::from_crossterm(mouse(MouseEventKind::Moved)),
            Some(Event::MouseMove { x: 12, y: 3 })
        );
        assert_eq!(
            Event::from_crossterm(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(Event::MouseMove { x: 12, y: 3 })
        );
        assert_eq!(Event::from_crossterm(mouse(MouseEventKind::ScrollUp)), None);
    }

    #[test]
    fn test_unbound_keys_become_other() {
        assert_eq!(Key::from(KeyCode::F(5)), Key::Other);
    }

    #[test]
    fn test_quit_keys() {
        let key = |key, ctrl| Event::Key {
            key,
            modifiers: Modifiers { ctrl, shift: false },
        };
        assert!(key(Key::Char('q'), false).is_quit());
        assert!(key(Key::Escape, false).is_quit());
        assert!(key(Key::Char('c'), true).is_quit());
        assert!(!key(Key::Char('c'), false).is_quit());
        assert!(!Event::Resize { width: 1, height: 1 }.is_quit());
        assert!(!Event::MouseMove { x: 0, y: 0 }.is_quit());
    }
}
