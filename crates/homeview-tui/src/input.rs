use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};

/// Input action that can be performed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    /// Step the panel stack by whole panels
    PanelNext,
    PanelPrev,
    /// Jump straight to a panel (0-based)
    JumpToPanel(usize),
    /// Step the news strip by whole cards
    NewsNext,
    NewsPrev,
    ToggleRotation,
    RefreshNews,
    None,
}

/// Handle a key event and return the corresponding action
pub fn handle_key_event(key: KeyEvent) -> Action {
    match (key.code, key.modifiers) {
        // Quit
        (KeyCode::Char('q'), KeyModifiers::NONE) => Action::Quit,
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => Action::Quit,
        (KeyCode::Esc, _) => Action::Quit,

        // Panel stack
        (KeyCode::Char('j'), KeyModifiers::NONE) => Action::PanelNext,
        (KeyCode::Char('k'), KeyModifiers::NONE) => Action::PanelPrev,
        (KeyCode::Down, _) | (KeyCode::PageDown, _) => Action::PanelNext,
        (KeyCode::Up, _) | (KeyCode::PageUp, _) => Action::PanelPrev,
        (KeyCode::Char(c), KeyModifiers::NONE) if ('1'..='9').contains(&c) => {
            Action::JumpToPanel(c as usize - '1' as usize)
        }

        // News strip
        (KeyCode::Char('l'), KeyModifiers::NONE) | (KeyCode::Right, _) => Action::NewsNext,
        (KeyCode::Char('h'), KeyModifiers::NONE) | (KeyCode::Left, _) => Action::NewsPrev,

        (KeyCode::Char('p'), KeyModifiers::NONE) | (KeyCode::Char(' '), _) => Action::ToggleRotation,
        (KeyCode::Char('r'), KeyModifiers::NONE) => Action::RefreshNews,

        _ => Action::None,
    }
}

/// Mouse input reduced to what the kiosk cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseAction {
    /// Left button went down at (column, row)
    Press { column: u16, row: u16 },
    Release,
    /// Wheel notch; positive scrolls forward
    Wheel { column: u16, row: u16, delta: i8, horizontal: bool },
    /// Pointer moved or dragged
    Move,
}

pub fn handle_mouse_event(mouse: MouseEvent) -> MouseAction {
    let (column, row) = (mouse.column, mouse.row);
    let shift = mouse.modifiers.contains(KeyModifiers::SHIFT);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => MouseAction::Press { column, row },
        MouseEventKind::Up(MouseButton::Left) => MouseAction::Release,
        MouseEventKind::ScrollDown => MouseAction::Wheel { column, row, delta: 1, horizontal: shift },
        MouseEventKind::ScrollUp => MouseAction::Wheel { column, row, delta: -1, horizontal: shift },
        MouseEventKind::ScrollRight => MouseAction::Wheel { column, row, delta: 1, horizontal: true },
        MouseEventKind::ScrollLeft => MouseAction::Wheel { column, row, delta: -1, horizontal: true },
        _ => MouseAction::Move,
    }
}
