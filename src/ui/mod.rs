// ============================================================================
// Module : ui
// ============================================================================
// Gère toute l'interface utilisateur (Terminal User Interface)
// C'est le "Presenter" : il lit le snapshot du ledger et n'a aucune logique
// de décision propre
// ============================================================================

pub mod events;  // Lecture des événements clavier
pub mod handler; // Dispatch des événements vers App
pub mod receipt; // Rendu du ticket de caisse
pub mod store;   // Rendu de l'interface principale

// Re-exports pour simplifier les imports
pub use events::{Event, EventHandler};
pub use handler::handle_event;
pub use store::render;
