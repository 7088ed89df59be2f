// ============================================================================
// Structure : App
// ============================================================================
// Gère l'état global de l'application TUI
//
// CONCEPTS RUST :
// 1. State Management : centraliser l'état dans une seule structure
// 2. Ownership : App possède le Ledger, pas de variable globale
// 3. Encapsulation : le ledger n'est modifié qu'au travers des méthodes de App
//
// PATTERN : Cette structure suit le pattern "Application State"
// - Tous les composants de l'UI lisent depuis App (via le snapshot du ledger)
// - Toutes les modifications passent par les méthodes de App
// - Garantit la cohérence de l'état
// ============================================================================

use tracing::{debug, info};

use crate::ledger::{parse_quantity, Ledger, LedgerError, Snapshot};
use crate::models::{Catalog, Product, DEFAULT_STARTING_BALANCE};

/// Nombre de ticks (250ms) pendant lesquels un message de statut reste affiché
const STATUS_TTL_TICKS: u32 = 16;

// ============================================================================
// Enum : Screen
// ============================================================================
// CONCEPT RUST : Enums pour state machines
// - Un seul écran actif à la fois
// - Le compilateur force à gérer tous les cas (exhaustivité)
// ============================================================================

/// Écrans de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    /// Vue principale : catalogue + ticket de caisse
    Store,

    /// Mode saisie : édition directe de la quantité du produit sélectionné
    /// - Enter valide, ESC annule
    QuantityInput,
}

/// Type de message de statut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Error,
}

/// Message affiché temporairement dans le footer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusMessage {
    pub kind: StatusKind,
    pub text: String,
    ttl: u32,
}

/// État principal de l'application
pub struct App {
    /// Indique si l'application doit continuer à tourner
    pub running: bool,

    /// Solde et panier : seule source de vérité pour l'affichage
    ledger: Ledger,

    /// Index du produit sélectionné dans le catalogue
    pub selected_index: usize,

    /// Écran actuellement affiché
    pub current_screen: Screen,

    /// Two-step quit pour éviter les sorties accidentelles
    /// - Première pression de 'q' : confirm_quit = true
    /// - Deuxième pression de 'q' : running = false (quit réel)
    pub confirm_quit: bool,

    /// Two-step reset : même principe avec 'R'
    pub confirm_reset: bool,

    /// Buffer de saisie pour le mode QuantityInput
    pub input_buffer: String,

    /// Prompt affiché en mode saisie (ex: "Quantity for Big Mac: ")
    pub input_prompt: String,

    status: Option<StatusMessage>,
}

impl App {
    /// Crée une App qui possède le ledger donné
    pub fn new(ledger: Ledger) -> Self {
        Self {
            running: true,
            ledger,
            selected_index: 0,
            current_screen: Screen::Store,
            confirm_quit: false,
            confirm_reset: false,
            input_buffer: String::new(),
            input_prompt: String::new(),
            status: None,
        }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Vue en lecture seule pour le rendu
    pub fn snapshot(&self) -> Snapshot {
        self.ledger.snapshot()
    }

    pub fn quit(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tick : appelé à chaque itération de la boucle
    ///
    /// Fait expirer le message de statut
    pub fn tick(&mut self) {
        if let Some(status) = &mut self.status {
            status.ttl = status.ttl.saturating_sub(1);
            if status.ttl == 0 {
                self.status = None;
            }
        }
    }

    // ========================================================================
    // Navigation
    // ========================================================================

    /// CONCEPT RUST : Saturating arithmetic
    /// - saturating_sub() : ne descend pas en dessous de 0
    pub fn navigate_up(&mut self) {
        self.selected_index = self.selected_index.saturating_sub(1);
    }

    pub fn navigate_down(&mut self) {
        let max_index = self.ledger.catalog().len().saturating_sub(1);
        self.selected_index = (self.selected_index + 1).min(max_index);
    }

    /// Retourne le produit sélectionné (None si catalogue vide)
    pub fn selected_product(&self) -> Option<&Product> {
        self.ledger.catalog().get(self.selected_index)
    }

    // ========================================================================
    // Achat / Vente
    // ========================================================================

    /// Achète un exemplaire du produit sélectionné
    ///
    /// Silencieux si le solde est insuffisant (le bouton est déjà grisé)
    pub fn buy_selected(&mut self) -> bool {
        let Some(id) = self.selected_product().map(|product| product.id) else {
            return false;
        };
        self.ledger.buy_one(id)
    }

    /// Vend un exemplaire du produit sélectionné
    pub fn sell_selected(&mut self) -> bool {
        let Some(id) = self.selected_product().map(|product| product.id) else {
            return false;
        };
        self.ledger.sell_one(id)
    }

    // ========================================================================
    // Input Mode Management
    // ========================================================================

    /// Entre en mode saisie, pré-rempli avec la quantité actuelle
    pub fn start_quantity_edit(&mut self) {
        let Some(product) = self.selected_product() else {
            return;
        };

        let prompt = format!("Quantity for {}: ", product.name);
        let current = self.ledger.quantity_of(product.id);

        self.input_prompt = prompt;
        self.input_buffer = current.to_string();
        self.current_screen = Screen::QuantityInput;
    }

    /// Annule la saisie et retourne au magasin
    pub fn cancel_input(&mut self) {
        self.current_screen = Screen::Store;
        self.input_buffer.clear();
        self.input_prompt.clear();
    }

    /// Valide la saisie et applique la nouvelle quantité
    ///
    /// CONCEPT : Rollback gratuit
    /// - En cas d'erreur le ledger n'est pas modifié
    /// - L'affichage relit le snapshot : la quantité affichée revient seule
    pub fn submit_quantity(&mut self) -> Result<(), LedgerError> {
        let raw = std::mem::take(&mut self.input_buffer);
        self.current_screen = Screen::Store;
        self.input_prompt.clear();

        let Some(id) = self.selected_product().map(|product| product.id) else {
            return Ok(());
        };

        let result = parse_quantity(&raw).and_then(|quantity| self.ledger.set_quantity(id, quantity));

        match &result {
            Ok(()) => self.status = None,
            Err(e) => {
                info!(error = %e, "Quantity edit rejected");
                self.set_status(StatusKind::Error, e.to_string());
            }
        }

        result
    }

    /// Ajoute un caractère au buffer d'input
    pub fn append_char(&mut self, c: char) {
        self.input_buffer.push(c);
    }

    /// Supprime le dernier caractère du buffer
    pub fn backspace(&mut self) {
        self.input_buffer.pop();
    }

    pub fn is_in_input_mode(&self) -> bool {
        self.current_screen == Screen::QuantityInput
    }

    // ========================================================================
    // Confirmations (quit / reset)
    // ========================================================================

    pub fn request_quit(&mut self) {
        self.confirm_quit = true;
    }

    pub fn cancel_quit(&mut self) {
        self.confirm_quit = false;
    }

    pub fn is_awaiting_quit_confirmation(&self) -> bool {
        self.confirm_quit
    }

    pub fn request_reset(&mut self) {
        self.confirm_reset = true;
    }

    pub fn cancel_reset(&mut self) {
        self.confirm_reset = false;
    }

    pub fn is_awaiting_reset_confirmation(&self) -> bool {
        self.confirm_reset
    }

    /// Remet le ledger à zéro (solde de départ, panier vide)
    pub fn confirm_reset(&mut self) {
        self.ledger.reset();
        self.confirm_reset = false;
        self.set_status(StatusKind::Info, "Fresh start: all purchases refunded".to_string());
    }

    // ========================================================================
    // Status
    // ========================================================================

    pub fn status(&self) -> Option<&StatusMessage> {
        self.status.as_ref()
    }

    pub fn set_status(&mut self, kind: StatusKind, text: String) {
        debug!(?kind, %text, "Status message");
        self.status = Some(StatusMessage {
            kind,
            text,
            ttl: STATUS_TTL_TICKS,
        });
    }
}

// ============================================================================
// Trait Default
// ============================================================================
// Convention Rust : si new() a une configuration "évidente", implémenter Default
// Ici : catalogue intégré + 100 milliards
// ============================================================================

impl Default for App {
    fn default() -> Self {
        Self::new(Ledger::new(Catalog::default_catalog(), DEFAULT_STARTING_BALANCE))
    }
}

// ============================================================================
// Tests unitaires
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProductId;

    fn small_app(balance: u64) -> App {
        let catalog = Catalog::new(vec![
            Product::new(1, "Big Mac", 2, ""),
            Product::new(2, "Cup of Coffee", 4, ""),
            Product::new(3, "Yacht", 7_500_000, ""),
        ])
        .unwrap();
        App::new(Ledger::new(catalog, balance))
    }

    #[test]
    fn test_app_creation() {
        let app = App::default();
        assert!(app.is_running());
        assert_eq!(app.selected_index, 0);
        assert_eq!(app.current_screen, Screen::Store);
        assert_eq!(app.ledger().balance(), DEFAULT_STARTING_BALANCE);
    }

    #[test]
    fn test_navigation() {
        let mut app = small_app(100);

        app.navigate_down();
        assert_eq!(app.selected_index, 1);
        app.navigate_down();
        assert_eq!(app.selected_index, 2);

        // Au max : reste à 2
        app.navigate_down();
        assert_eq!(app.selected_index, 2);
        assert_eq!(app.selected_product().unwrap().name, "Yacht");

        app.navigate_up();
        app.navigate_up();
        app.navigate_up();
        assert_eq!(app.selected_index, 0);
    }

    #[test]
    fn test_buy_and_sell_selected() {
        let mut app = small_app(10);
        app.navigate_down(); // Cup of Coffee

        assert!(app.buy_selected());
        assert!(app.buy_selected());
        assert!(!app.buy_selected());
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 2);
        assert_eq!(app.snapshot().balance, 2);

        assert!(app.sell_selected());
        assert_eq!(app.snapshot().balance, 6);
    }

    #[test]
    fn test_quantity_edit_success() {
        let mut app = small_app(100);
        app.navigate_down();
        app.buy_selected();

        app.start_quantity_edit();
        assert!(app.is_in_input_mode());
        assert_eq!(app.input_buffer, "1");
        assert_eq!(app.input_prompt, "Quantity for Cup of Coffee: ");

        app.backspace();
        app.append_char('3');
        assert_eq!(app.submit_quantity(), Ok(()));

        assert!(!app.is_in_input_mode());
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.snapshot().quantity_of(ProductId(2)), 3);
        assert_eq!(app.snapshot().balance, 88);
    }

    #[test]
    fn test_quantity_edit_insufficient_funds_reverts() {
        let mut app = small_app(100);
        app.navigate_down();
        let before = app.snapshot();

        app.start_quantity_edit();
        app.backspace();
        app.append_char('5');
        app.append_char('0');

        let result = app.submit_quantity();
        assert!(matches!(result, Err(LedgerError::InsufficientFunds { .. })));
        assert_eq!(app.snapshot(), before);

        let status = app.status().unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert!(status.text.starts_with("You don't have enough money!"));
    }

    #[test]
    fn test_quantity_edit_invalid_input() {
        let mut app = small_app(100);
        let before = app.snapshot();

        app.start_quantity_edit();
        app.append_char('x');

        assert!(matches!(app.submit_quantity(), Err(LedgerError::InvalidQuantity(_))));
        assert_eq!(app.snapshot(), before);
    }

    #[test]
    fn test_cancel_input() {
        let mut app = small_app(100);
        app.start_quantity_edit();
        app.append_char('9');

        app.cancel_input();
        assert_eq!(app.current_screen, Screen::Store);
        assert!(app.input_buffer.is_empty());
        assert_eq!(app.snapshot().total_spent, 0);
    }

    #[test]
    fn test_reset() {
        let mut app = small_app(100);
        app.buy_selected();
        app.request_reset();
        assert!(app.is_awaiting_reset_confirmation());

        app.confirm_reset();
        assert!(!app.is_awaiting_reset_confirmation());
        assert!(app.snapshot().is_empty());
        assert_eq!(app.snapshot().balance, 100);
        assert_eq!(app.status().unwrap().kind, StatusKind::Info);
    }

    #[test]
    fn test_status_expires_after_ticks() {
        let mut app = small_app(100);
        app.set_status(StatusKind::Info, "hello".to_string());

        for _ in 0..STATUS_TTL_TICKS - 1 {
            app.tick();
        }
        assert!(app.status().is_some());

        app.tick();
        assert!(app.status().is_none());
    }

    #[test]
    fn test_app_quit() {
        let mut app = small_app(100);
        app.quit();
        assert!(!app.is_running());
    }
}
