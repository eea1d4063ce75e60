use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::{App, Message, Model};
use crate::editor::Direction;
use crate::markup::StyleKind;

impl App {
    pub(super) fn handle_event(event: &Event, model: &Model) -> Option<Message> {
        match event {
            Event::Key(key) if key.kind != KeyEventKind::Release => Self::handle_key(*key, model),
            Event::Resize(w, h) => Some(Message::Resize(*w, *h)),
            Event::FocusGained => Some(Message::Redraw),
            _ => None,
        }
    }

    pub(super) fn handle_key(key: KeyEvent, model: &Model) -> Option<Message> {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        let alt = key.modifiers.contains(KeyModifiers::ALT);
        let extend = key.modifiers.contains(KeyModifiers::SHIFT);

        if alt {
            return match key.code {
                KeyCode::Char('b' | 'B') => Some(Message::ApplyStyle(StyleKind::Bold)),
                KeyCode::Char('i' | 'I') => Some(Message::ApplyStyle(StyleKind::Italic)),
                KeyCode::Char('u' | 'U') => Some(Message::ApplyStyle(StyleKind::Underline)),
                KeyCode::Char('s' | 'S') => Some(Message::ApplyStyle(StyleKind::Strikethrough)),
                _ => None,
            };
        }

        if ctrl {
            return match key.code {
                KeyCode::Char('s') => Some(Message::Save),
                KeyCode::Char('q') => Some(Message::Quit),
                KeyCode::Char('p') => Some(Message::TogglePreview),
                KeyCode::Char('a') => Some(Message::SelectAll),
                KeyCode::Char('l') => Some(Message::Redraw),
                KeyCode::Home => Some(Message::BufferStart { extend }),
                KeyCode::End => Some(Message::BufferEnd { extend }),
                _ => None,
            };
        }

        let moving = |direction| Some(Message::Move { direction, extend });
        match key.code {
            KeyCode::Esc => Some(Message::Quit),
            KeyCode::Left => moving(Direction::Left),
            KeyCode::Right => moving(Direction::Right),
            KeyCode::Up => moving(Direction::Up),
            KeyCode::Down => moving(Direction::Down),
            KeyCode::Home => Some(Message::Home { extend }),
            KeyCode::End => Some(Message::End { extend }),
            _ if model.is_read_only() => None,
            KeyCode::Enter => Some(Message::InsertNewline),
            KeyCode::Backspace => Some(Message::Backspace),
            KeyCode::Delete => Some(Message::Delete),
            KeyCode::Tab => Some(Message::Insert('\t')),
            KeyCode::Char(c) => Some(Message::Insert(c)),
            _ => None,
        }
    }
}
