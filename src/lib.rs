// ============================================================================
// LazySpend - Library
// ============================================================================
// Expose les modules publics pour le binaire et les tests
// ============================================================================

pub mod app;    // État de l'application (possède le ledger)
pub mod config; // Configuration par variables d'environnement
pub mod ledger; // Solde + panier et leurs opérations
pub mod models; // Structures de données (catalogue, produits, montants)
pub mod ui;     // Interface utilisateur
