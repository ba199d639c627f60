//! Key mapping from terminal events to client intents.

use crate::types::{Direction, Intent};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Map keyboard input to an intent.
pub fn map_key(key: KeyEvent) -> Option<Intent> {
    if should_quit(key) {
        return Some(Intent::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => {
            Some(Intent::Move(Direction::Up))
        }
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => {
            Some(Intent::Move(Direction::Down))
        }
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => {
            Some(Intent::Move(Direction::Left))
        }
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => {
            Some(Intent::Move(Direction::Right))
        }
        _ => None,
    }
}

/// Check if key should quit the client.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    #[test]
    fn test_wasd_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('w'))),
            Some(Intent::Move(Direction::Up))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('s'))),
            Some(Intent::Move(Direction::Down))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('a'))),
            Some(Intent::Move(Direction::Left))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('d'))),
            Some(Intent::Move(Direction::Right))
        );
    }

    #[test]
    fn test_uppercase_and_arrow_keys() {
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('W'))),
            Some(Intent::Move(Direction::Up))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Char('D'))),
            Some(Intent::Move(Direction::Right))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Left)),
            Some(Intent::Move(Direction::Left))
        );
        assert_eq!(
            map_key(KeyEvent::from(KeyCode::Down)),
            Some(Intent::Move(Direction::Down))
        );
    }

    #[test]
    fn test_quit_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('q'))), Some(Intent::Quit));
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('Q'))), Some(Intent::Quit));
        assert_eq!(
            map_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            Some(Intent::Quit)
        );
        assert!(!should_quit(KeyEvent::from(KeyCode::Char('c'))));
    }

    #[test]
    fn test_unbound_keys() {
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char('x'))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Char(' '))), None);
        assert_eq!(map_key(KeyEvent::from(KeyCode::Enter)), None);
    }
}
