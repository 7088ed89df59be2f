// ============================================================================
// Dispatch des événements
// ============================================================================
// Traduit chaque événement en exactement une opération sur App
//
// CONCEPT : Event Handler Pattern
// - Sépare la lecture des touches (events.rs) de la logique (app.rs)
// - Les arms du mode saisie passent en premier : '-' y est un caractère,
//   pas une vente
// ============================================================================

use tracing::{debug, info};

use crate::app::App;
use crate::ui::events::{
    get_char_from_event, is_backspace_event, is_buy_event, is_down_event, is_edit_event,
    is_enter_event, is_escape_event, is_quantity_char_event, is_quit_event, is_reset_event,
    is_sell_event, is_up_event, Event,
};

/// Traite un événement et met à jour l'état de l'application
pub fn handle_event(app: &mut App, event: Event) {
    if matches!(event, Event::Tick) {
        app.tick();
        return;
    }

    if app.is_in_input_mode() {
        handle_input_event(app, &event);
        return;
    }

    // Toute touche autre que celle attendue annule une confirmation en cours
    if !is_quit_event(&event) {
        app.cancel_quit();
    }
    if !is_reset_event(&event) {
        app.cancel_reset();
    }

    match event {
        Event::Key(_) if is_quit_event(&event) => {
            if app.is_awaiting_quit_confirmation() {
                info!("User confirmed quit");
                app.quit();
            } else {
                info!("User requested quit (awaiting confirmation)");
                app.request_quit();
            }
        }

        Event::Key(_) if is_reset_event(&event) => {
            if app.is_awaiting_reset_confirmation() {
                info!("User confirmed reset");
                app.confirm_reset();
            } else {
                info!("User requested reset (awaiting confirmation)");
                app.request_reset();
            }
        }

        Event::Key(_) if is_up_event(&event) => app.navigate_up(),
        Event::Key(_) if is_down_event(&event) => app.navigate_down(),

        Event::Key(_) if is_buy_event(&event) => {
            let bought = app.buy_selected();
            if let Some(product) = app.selected_product() {
                debug!(product = %product.name, bought, "User pressed buy");
            }
        }

        Event::Key(_) if is_sell_event(&event) => {
            let sold = app.sell_selected();
            if let Some(product) = app.selected_product() {
                debug!(product = %product.name, sold, "User pressed sell");
            }
        }

        Event::Key(_) if is_edit_event(&event) || is_enter_event(&event) => {
            app.start_quantity_edit();
        }

        _ => {}
    }
}

/// Mode saisie : chiffres, Backspace, Enter, ESC
fn handle_input_event(app: &mut App, event: &Event) {
    if is_escape_event(event) {
        debug!("User cancelled quantity edit");
        app.cancel_input();
    } else if is_enter_event(event) {
        // L'erreur est déjà reportée dans le status par submit_quantity
        let _ = app.submit_quantity();
    } else if is_backspace_event(event) {
        app.backspace();
    } else if is_quantity_char_event(event) {
        if let Some(c) = get_char_from_event(event) {
            app.append_char(c);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::Screen;
    use crate::ledger::Ledger;
    use crate::models::{Catalog, Product, ProductId};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::empty()))
    }

    fn press(app: &mut App, codes: &[KeyCode]) {
        for code in codes {
            handle_event(app, key(*code));
        }
    }

    fn coffee_app(balance: u64) -> App {
        let catalog = Catalog::new(vec![
            Product::new(1, "Big Mac", 2, ""),
            Product::new(2, "Cup of Coffee", 4, ""),
        ])
        .unwrap();
        App::new(Ledger::new(catalog, balance))
    }

    #[test]
    fn test_two_step_quit() {
        let mut app = coffee_app(100);

        press(&mut app, &[KeyCode::Char('q')]);
        assert!(app.is_running());
        assert!(app.is_awaiting_quit_confirmation());

        // Une autre touche annule
        press(&mut app, &[KeyCode::Down]);
        assert!(!app.is_awaiting_quit_confirmation());

        press(&mut app, &[KeyCode::Char('q'), KeyCode::Char('q')]);
        assert!(!app.is_running());
    }

    #[test]
    fn test_buy_sell_keys() {
        let mut app = coffee_app(10);

        press(&mut app, &[KeyCode::Down, KeyCode::Right, KeyCode::Char('+'), KeyCode::Char('b')]);
        let snapshot = app.snapshot();
        assert_eq!(snapshot.quantity_of(ProductId(2)), 2);
        assert_eq!(snapshot.balance, 2);

        press(&mut app, &[KeyCode::Left]);
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 1);
        assert_eq!(app.snapshot().balance, 6);
    }

    #[test]
    fn test_quantity_edit_flow() {
        let mut app = coffee_app(100);

        press(&mut app, &[KeyCode::Down, KeyCode::Enter]);
        assert_eq!(app.current_screen, Screen::QuantityInput);

        // '-' est un caractère en mode saisie, pas une vente ; 'x' est ignoré
        press(&mut app, &[KeyCode::Backspace, KeyCode::Char('3'), KeyCode::Char('x'), KeyCode::Enter]);

        assert_eq!(app.current_screen, Screen::Store);
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 3);
        assert_eq!(app.snapshot().balance, 88);

        press(&mut app, &[KeyCode::Char('e'), KeyCode::Backspace, KeyCode::Char('-'), KeyCode::Char('2'), KeyCode::Enter]);
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 0);
        assert_eq!(app.snapshot().balance, 100);
    }

    #[test]
    fn test_quantity_edit_rejected() {
        let mut app = coffee_app(100);

        press(&mut app, &[KeyCode::Down, KeyCode::Char('e'), KeyCode::Backspace, KeyCode::Char('5'), KeyCode::Char('0'), KeyCode::Enter]);

        assert_eq!(app.snapshot().balance, 100);
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 0);
        assert!(app.status().is_some());
    }

    #[test]
    fn test_escape_cancels_edit() {
        let mut app = coffee_app(100);

        press(&mut app, &[KeyCode::Enter, KeyCode::Char('9'), KeyCode::Esc]);
        assert_eq!(app.current_screen, Screen::Store);
        assert_eq!(app.snapshot().total_spent, 0);
    }

    #[test]
    fn test_two_step_reset() {
        let mut app = coffee_app(100);
        press(&mut app, &[KeyCode::Right, KeyCode::Right]);
        assert_eq!(app.snapshot().balance, 96);

        press(&mut app, &[KeyCode::Char('R')]);
        assert!(app.is_awaiting_reset_confirmation());
        assert_eq!(app.snapshot().balance, 96);

        press(&mut app, &[KeyCode::Char('R')]);
        assert_eq!(app.snapshot().balance, 100);
        assert!(app.snapshot().is_empty());
    }

    #[test]
    fn test_tick_is_forwarded() {
        let mut app = coffee_app(100);
        app.set_status(crate::app::StatusKind::Info, "hi".to_string());
        for _ in 0..100 {
            handle_event(&mut app, Event::Tick);
        }
        assert!(app.status().is_none());
    }
}
