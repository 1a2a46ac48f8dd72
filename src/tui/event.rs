use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TuiEvent {
    Quit,
    Submit,
    Escape,
    CursorUp,
    CursorDown,
    CursorLeft,
    CursorRight,
    // Left button, screen (column, row)
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),
    Resize,
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> Option<TuiEvent> {
    poll_event_timeout(std::time::Duration::ZERO)
}

pub fn poll_event_timeout(timeout: std::time::Duration) -> Option<TuiEvent> {
    match event::poll(timeout) {
        Ok(true) => match event::read() {
            Ok(event) => map_event(event),
            Err(e) => {
                log::warn!("Failed to read terminal event: {}", e);
                None
            }
        },
        Ok(false) => None,
        Err(e) => {
            log::warn!("Failed to poll terminal events: {}", e);
            None
        }
    }
}

/// Translates a crossterm event. Key releases and repeats are ignored.
pub fn map_event(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => map_key(key_event),
        Event::Mouse(mouse_event) => map_mouse(mouse_event),
        Event::Resize(_, _) => Some(TuiEvent::Resize),
        _ => None,
    }
}

fn map_key(key_event: KeyEvent) -> Option<TuiEvent> {
    if key_event.kind != KeyEventKind::Press {
        return None;
    }
    log::debug!("Key event: {:?} with modifiers {:?}", key_event.code, key_event.modifiers);
    match (key_event.modifiers, key_event.code) {
        (KeyModifiers::CONTROL, KeyCode::Char('c')) => Some(TuiEvent::Quit),
        (_, KeyCode::Char('q')) => Some(TuiEvent::Quit),
        (_, KeyCode::Enter) | (_, KeyCode::Char(' ')) => Some(TuiEvent::Submit),
        (_, KeyCode::Esc) => Some(TuiEvent::Escape),
        (_, KeyCode::Up) | (_, KeyCode::Char('k')) => Some(TuiEvent::CursorUp),
        (_, KeyCode::Down) | (_, KeyCode::Char('j')) => Some(TuiEvent::CursorDown),
        (_, KeyCode::Left) | (_, KeyCode::Char('h')) => Some(TuiEvent::CursorLeft),
        (_, KeyCode::Right) | (_, KeyCode::Char('l')) => Some(TuiEvent::CursorRight),
        _ => None,
    }
}

fn map_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    let (column, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::MouseDown(column, row)),
        MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::MouseDrag(column, row)),
        MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::MouseUp(column, row)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind) -> Event {
        Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind,
            state: KeyEventState::NONE,
        })
    }

    fn mouse(kind: MouseEventKind) -> Event {
        Event::Mouse(MouseEvent {
            kind,
            column: 4,
            row: 9,
            modifiers: KeyModifiers::NONE,
        })
    }

    #[test]
    fn test_arrow_keys_map_to_cursor_moves() {
        assert_eq!(map_event(key(KeyCode::Up, KeyEventKind::Press)), Some(TuiEvent::CursorUp));
        assert_eq!(map_event(key(KeyCode::Left, KeyEventKind::Press)), Some(TuiEvent::CursorLeft));
        assert_eq!(map_event(key(KeyCode::Enter, KeyEventKind::Press)), Some(TuiEvent::Submit));
        assert_eq!(map_event(key(KeyCode::Char('q'), KeyEventKind::Press)), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_key_release_is_ignored() {
        assert_eq!(map_event(key(KeyCode::Enter, KeyEventKind::Release)), None);
    }

    #[test]
    fn test_ctrl_c_quits() {
        let event = Event::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(map_event(event), Some(TuiEvent::Quit));
    }

    #[test]
    fn test_left_button_drag_sequence() {
        assert_eq!(
            map_event(mouse(MouseEventKind::Down(MouseButton::Left))),
            Some(TuiEvent::MouseDown(4, 9))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::Drag(MouseButton::Left))),
            Some(TuiEvent::MouseDrag(4, 9))
        );
        assert_eq!(
            map_event(mouse(MouseEventKind::Up(MouseButton::Left))),
            Some(TuiEvent::MouseUp(4, 9))
        );
        assert_eq!(map_event(mouse(MouseEventKind::Down(MouseButton::Right))), None);
    }
}
