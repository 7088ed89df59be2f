// ============================================================================
// Structure : Product
// ============================================================================
// Représente un article du catalogue (Big Mac, Yacht, Mona Lisa, ...)
//
// CONCEPTS RUST :
// 1. Newtype pattern : ProductId(u32) empêche de confondre un id et une quantité
// 2. #[serde(transparent)] : ProductId est sérialisé comme un simple nombre
// 3. Immutabilité : un Product n'est jamais modifié après chargement
// ============================================================================

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::models::Money;

/// Identifiant unique d'un produit du catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u32);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Article achetable du catalogue
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Identifiant unique (ex: 1)
    pub id: ProductId,

    /// Nom affiché (ex: "Big Mac")
    pub name: String,

    /// Prix unitaire en dollars entiers
    pub price: Money,

    /// Référence de l'image (URL), conservée même si le TUI ne l'affiche pas
    #[serde(default)]
    pub image: String,
}

impl Product {
    /// Crée un nouveau produit
    pub fn new(id: u32, name: impl Into<String>, price: Money, image: impl Into<String>) -> Self {
        Self {
            id: ProductId(id),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}
