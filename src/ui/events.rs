// ============================================================================
// Gestion des événements
// ============================================================================
// Lit les événements clavier et les ticks de l'application
//
// CONCEPTS RUST :
// 1. Enums avec variants : représenter différents types d'événements
// 2. Pattern matching : identifier une touche avec matches!
// 3. Error handling avec Result
// ============================================================================

use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyEventKind};

/// Événements de l'application
#[derive(Debug, Clone)]
pub enum Event {
    /// Touche pressée
    Key(KeyEvent),

    /// Tick régulier (expiration des messages de statut)
    Tick,
}

/// Gestionnaire d'événements
pub struct EventHandler {
    tick_rate: Duration,
}

impl EventHandler {
    /// Crée un nouveau gestionnaire d'événements (tick de 250ms)
    pub fn new() -> Self {
        Self {
            tick_rate: Duration::from_millis(250),
        }
    }

    /// Lit le prochain événement (bloquant avec timeout)
    ///
    /// CONCEPT : Non-blocking I/O avec timeout
    /// - poll(timeout) attend au maximum tick_rate
    /// - Si pas d'événement, retourne Ok(Event::Tick)
    pub fn next(&self) -> Result<Event> {
        if !event::poll(self.tick_rate)? {
            return Ok(Event::Tick);
        }

        match event::read()? {
            // Sur certains OS, on reçoit Press ET Release
            // On ne garde que Press pour éviter les achats en double
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => Ok(Event::Key(key)),

            // Resize, souris, Release : on redessine simplement au prochain tour
            _ => Ok(Event::Tick),
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Helpers : Convertir KeyEvent en action
// ============================================================================

/// Extrait le KeyCode d'un événement clavier
fn key_code(event: &Event) -> Option<KeyCode> {
    match event {
        Event::Key(key) => Some(key.code),
        Event::Tick => None,
    }
}

/// 'q' : quitter
pub fn is_quit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('q') | KeyCode::Char('Q')))
}

pub fn is_escape_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Esc))
}

pub fn is_enter_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Enter))
}

pub fn is_backspace_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Backspace))
}

/// Flèche vers le haut ou 'k' (vim)
pub fn is_up_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K')))
}

/// Flèche vers le bas ou 'j' (vim)
pub fn is_down_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J')))
}

/// Acheter : flèche droite, 'l', '+' ou 'b'
pub fn is_buy_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') | KeyCode::Char('b'))
    )
}

/// Vendre : flèche gauche, 'h', '-' ou 's'
pub fn is_sell_event(event: &Event) -> bool {
    matches!(
        key_code(event),
        Some(KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') | KeyCode::Char('s'))
    )
}

/// 'e' : éditer la quantité (Enter fonctionne aussi, voir handler)
pub fn is_edit_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('e') | KeyCode::Char('E')))
}

/// 'R' (majuscule uniquement) : tout revendre et repartir de zéro
pub fn is_reset_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char('R')))
}

/// Caractère accepté dans la saisie de quantité : chiffres et signe moins
pub fn is_quantity_char_event(event: &Event) -> bool {
    matches!(key_code(event), Some(KeyCode::Char(c)) if c.is_ascii_digit() || c == '-')
}

/// Extrait le caractère d'un événement clavier si c'est un caractère
pub fn get_char_from_event(event: &Event) -> Option<char> {
    match key_code(event) {
        Some(KeyCode::Char(c)) => Some(c),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    #[test]
    fn test_is_quit_event() {
        assert!(is_quit_event(&key(KeyCode::Char('q'))));
        assert!(!is_quit_event(&key(KeyCode::Char('a'))));
        assert!(!is_quit_event(&Event::Tick));
    }

    #[test]
    fn test_buy_and_sell_keys() {
        assert!(is_buy_event(&key(KeyCode::Right)));
        assert!(is_buy_event(&key(KeyCode::Char('+'))));
        assert!(is_sell_event(&key(KeyCode::Left)));
        assert!(is_sell_event(&key(KeyCode::Char('-'))));
        assert!(!is_sell_event(&key(KeyCode::Char('+'))));
    }

    #[test]
    fn test_reset_requires_uppercase() {
        assert!(is_reset_event(&key(KeyCode::Char('R'))));
        assert!(!is_reset_event(&key(KeyCode::Char('r'))));
    }

    #[test]
    fn test_quantity_chars() {
        assert!(is_quantity_char_event(&key(KeyCode::Char('7'))));
        assert!(is_quantity_char_event(&key(KeyCode::Char('-'))));
        assert!(!is_quantity_char_event(&key(KeyCode::Char('x'))));
        assert_eq!(get_char_from_event(&key(KeyCode::Char('7'))), Some('7'));
        assert_eq!(get_char_from_event(&key(KeyCode::Enter)), None);
    }
}
