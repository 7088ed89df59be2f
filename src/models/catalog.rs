// ============================================================================
// Structure : Catalog
// ============================================================================
// Liste statique des produits achetables, chargée au démarrage
//
// CONCEPTS RUST :
// 1. Encapsulation : le Vec est privé, le catalogue ne peut pas être modifié
// 2. thiserror : erreurs typées avec messages lisibles
// 3. Iterator : iter() expose les produits sans les copier
// ============================================================================

use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use thiserror::Error;

use crate::models::{Money, Product, ProductId};

/// Erreurs de construction du catalogue
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Deux produits partagent le même identifiant
    #[error("duplicate product id {0} in catalog")]
    DuplicateProduct(ProductId),
}

/// Catalogue de produits (ordre d'affichage = ordre du catalogue)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Crée un catalogue en vérifiant l'unicité des identifiants
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::with_capacity(products.len());
        for product in &products {
            if !seen.insert(product.id) {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products })
    }

    /// Parse un catalogue JSON : `[{"id": 1, "name": "Big Mac", "price": 2, "image": "..."}]`
    pub fn from_json_str(json: &str) -> Result<Self> {
        let products: Vec<Product> =
            serde_json::from_str(json).context("Catalogue JSON invalide")?;
        Ok(Self::new(products)?)
    }

    /// Charge un catalogue JSON depuis un fichier
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Impossible de lire le catalogue {}", path.display()))?;
        Self::from_json_str(&json)
            .with_context(|| format!("Catalogue {} invalide", path.display()))
    }

    /// Catalogue intégré : du Big Mac à l'équipe NBA
    pub fn default_catalog() -> Self {
        const ITEMS: &[(&str, &str, Money)] = &[
            ("Big Mac", "big-mac", 2),
            ("Cup of Coffee", "coffee", 4),
            ("Flip Flops", "flip-flops", 3),
            ("Coca-Cola Pack", "coca-cola-pack", 5),
            ("Movie Ticket", "movie-ticket", 12),
            ("Book", "book", 15),
            ("Lobster Dinner", "lobster-dinner", 45),
            ("Video Game", "video-game", 60),
            ("Amazon Echo", "amazon-echo", 99),
            ("Year of Netflix", "year-of-netflix", 100),
            ("Air Jordans", "air-jordans", 125),
            ("Airpods", "airpods", 199),
            ("Gaming Console", "gaming-console", 299),
            ("Drone", "drone", 350),
            ("Smartphone", "smartphone", 699),
            ("Bike", "bike", 800),
            ("Kitten", "kitten", 1_500),
            ("Puppy", "puppy", 1_500),
            ("Auto Rickshaw", "auto-rickshaw", 2_300),
            ("Horse", "horse", 2_500),
            ("Acre of Farmland", "acre-of-farmland", 3_000),
            ("Designer Handbag", "designer-handbag", 5_500),
            ("Hot Tub", "hot-tub", 6_000),
            ("Luxury Wine", "luxury-wine", 7_000),
            ("Diamond Ring", "diamond-ring", 10_000),
            ("Jet Ski", "jet-ski", 12_000),
            ("Rolex", "rolex", 15_000),
            ("Ford F-150", "ford-f-150", 30_000),
            ("Tesla", "tesla", 75_000),
            ("Monster Truck", "monster-truck", 150_000),
            ("Ferrari", "ferrari", 250_000),
            ("Single Family Home", "single-family-home", 300_000),
            ("Gold Bar", "gold-bar", 700_000),
            ("McDonalds Franchise", "mcdonalds-franchise", 1_500_000),
            ("Superbowl Ad", "superbowl-ad", 5_250_000),
            ("Yacht", "yacht", 7_500_000),
            ("M1 Abrams", "m1-abrams", 8_000_000),
            ("Formula 1 Car", "formula-1-car", 15_000_000),
            ("Apache Helicopter", "apache-helicopter", 31_000_000),
            ("Mansion", "mansion", 45_000_000),
            ("Make a Movie", "make-a-movie", 100_000_000),
            ("Boeing 747", "boeing-747", 148_000_000),
            ("Mona Lisa", "mona-lisa", 780_000_000),
            ("Skyscraper", "skyscraper", 850_000_000),
            ("Cruise Ship", "cruise-ship", 930_000_000),
            ("NBA Team", "nba-team", 2_120_000_000),
        ];

        // Les ids sont séquentiels : l'unicité est garantie par construction
        let products = ITEMS
            .iter()
            .zip(1u32..)
            .map(|(&(name, slug, price), id)| {
                Product::new(
                    id,
                    name,
                    price,
                    format!("https://neal.fun/spend/images/{}.jpg", slug),
                )
            })
            .collect();

        Self { products }
    }

    /// Cherche un produit par identifiant
    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|product| product.id == id)
    }

    /// Retourne le produit à une position d'affichage donnée
    pub fn get(&self, index: usize) -> Option<&Product> {
        self.products.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::default_catalog()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_order_and_prices() {
        let catalog = Catalog::default_catalog();
        assert_eq!(catalog.len(), 46);

        let first = catalog.get(0).unwrap();
        assert_eq!(first.name, "Big Mac");
        assert_eq!(first.price, 2);

        let coffee = catalog.find(ProductId(2)).unwrap();
        assert_eq!(coffee.name, "Cup of Coffee");
        assert_eq!(coffee.price, 4);
        assert_eq!(coffee.image, "https://neal.fun/spend/images/coffee.jpg");

        let last = catalog.iter().last().unwrap();
        assert_eq!(last.name, "NBA Team");
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let products = vec![
            Product::new(1, "Big Mac", 2, ""),
            Product::new(1, "Cup of Coffee", 4, ""),
        ];

        assert_eq!(
            Catalog::new(products),
            Err(CatalogError::DuplicateProduct(ProductId(1)))
        );
    }

    #[test]
    fn test_from_json_str() {
        let json = r#"[
            {"id": 10, "name": "Yacht", "price": 7500000, "image": "yacht.jpg"},
            {"id": 3, "name": "Book", "price": 15}
        ]"#;

        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
        // L'ordre du fichier est conservé, pas l'ordre des ids
        assert_eq!(catalog.get(0).unwrap().id, ProductId(10));
        assert_eq!(catalog.find(ProductId(3)).unwrap().price, 15);
    }

    #[test]
    fn test_from_json_str_invalid() {
        assert!(Catalog::from_json_str("not json").is_err());
        assert!(Catalog::from_json_str(r#"[{"id": 1, "name": "Bad", "price": -3}]"#).is_err());

        let duplicate = r#"[{"id": 1, "name": "A", "price": 1}, {"id": 1, "name": "B", "price": 2}]"#;
        assert!(Catalog::from_json_str(duplicate).is_err());
    }

    #[test]
    fn test_find_unknown() {
        let catalog = Catalog::default_catalog();
        assert!(catalog.find(ProductId(9999)).is_none());
    }
}
