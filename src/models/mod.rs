// ============================================================================
// Module : models
// ============================================================================
// Ce module contient les structures de données du simulateur
//
// CONCEPT RUST : Modules et visibilité
// - "pub mod" : déclare un sous-module publique (accessible depuis l'extérieur)
// - Sans "pub", le module serait privé au crate
// ============================================================================

pub mod catalog; // Catalogue statique de produits
pub mod money;   // Montants entiers et formatage
pub mod product; // Article du catalogue

// Re-export des structures principales pour simplifier les imports
// Au lieu de : use lazyspend::models::product::Product;
// On peut faire : use lazyspend::models::Product;
pub use catalog::{Catalog, CatalogError};
pub use money::{format_money, format_price, Money, DEFAULT_STARTING_BALANCE};
pub use product::{Product, ProductId};
