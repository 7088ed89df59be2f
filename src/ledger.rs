// ============================================================================
// Structure : Ledger
// ============================================================================
// Solde + panier, et les seules opérations autorisées à les modifier
//
// INVARIANT :
// - solde + Σ(quantité × prix unitaire) == solde de départ, après chaque opération
// - le solde ne descend jamais sous 0 (garanti par le type u64 + vérifications)
//
// CONCEPTS RUST :
// 1. Encapsulation : balance et cart sont privés, seules les méthodes les modifient
// 2. Arithmétique vérifiée : checked_mul() au lieu de laisser déborder
// 3. Result<(), LedgerError> : le seul cas d'échec (fonds insuffisants) est typé
// ============================================================================

use std::collections::HashMap;

use thiserror::Error;
use tracing::{debug, info, warn};

use crate::models::{format_money, Catalog, Money, ProductId};

/// Quantité d'un produit dans le panier
pub type Quantity = u64;

/// Erreurs récupérables du ledger
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LedgerError {
    /// Modification directe de quantité plus chère que le solde disponible
    #[error("You don't have enough money! {product} would cost {}, you have {}", format_money(*.required), format_money(*.available))]
    InsufficientFunds {
        product: String,
        required: Money,
        available: Money,
    },

    /// Saisie de quantité non numérique
    #[error("Invalid quantity: {0:?}")]
    InvalidQuantity(String),
}

/// Ligne du ticket de caisse, calculée pour l'affichage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    pub unit_price: Money,
    pub quantity: Quantity,
    pub subtotal: Money,
}

/// Vue en lecture seule de l'état du ledger
///
/// CONCEPT : Snapshot
/// - Le Presenter ne lit jamais le ledger directement pour décider d'un état
/// - Boutons actifs/inactifs, ticket, solde : tout dérive du snapshot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub balance: Money,
    pub starting_balance: Money,
    /// Lignes du panier, dans l'ordre du catalogue
    pub lines: Vec<LineItem>,
    pub total_spent: Money,
}

impl Snapshot {
    /// Quantité détenue pour un produit (0 si absent du panier)
    pub fn quantity_of(&self, id: ProductId) -> Quantity {
        self.lines
            .iter()
            .find(|line| line.product_id == id)
            .map(|line| line.quantity)
            .unwrap_or(0)
    }

    /// Le bouton "vendre" est actif seulement si on possède l'article
    pub fn can_sell(&self, id: ProductId) -> bool {
        self.quantity_of(id) > 0
    }

    /// Le bouton "acheter" est actif seulement si le solde couvre le prix
    pub fn can_afford(&self, price: Money) -> bool {
        self.balance >= price
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Pourcentage du solde de départ déjà dépensé
    pub fn spent_percent(&self) -> f64 {
        if self.starting_balance == 0 {
            return 0.0;
        }
        self.total_spent as f64 / self.starting_balance as f64 * 100.0
    }
}

/// Solde et panier du simulateur
#[derive(Debug, Clone)]
pub struct Ledger {
    catalog: Catalog,
    starting_balance: Money,
    balance: Money,
    cart: HashMap<ProductId, Quantity>,
}

impl Ledger {
    /// Crée un ledger avec un panier vide
    pub fn new(catalog: Catalog, starting_balance: Money) -> Self {
        Self {
            catalog,
            starting_balance,
            balance: starting_balance,
            cart: HashMap::new(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn balance(&self) -> Money {
        self.balance
    }

    pub fn starting_balance(&self) -> Money {
        self.starting_balance
    }

    /// Quantité détenue pour un produit (0 si absent du panier)
    pub fn quantity_of(&self, id: ProductId) -> Quantity {
        self.cart.get(&id).copied().unwrap_or(0)
    }

    /// Total dépensé : Σ(quantité × prix unitaire)
    pub fn total_spent(&self) -> Money {
        self.catalog
            .iter()
            .map(|product| self.quantity_of(product.id).saturating_mul(product.price))
            .fold(0, Money::saturating_add)
    }

    /// Vérifie l'invariant de conservation de l'argent
    pub fn is_conserved(&self) -> bool {
        self.balance.checked_add(self.total_spent()) == Some(self.starting_balance)
    }

    /// Achète un exemplaire
    ///
    /// Retourne false (sans rien modifier) si le produit est inconnu ou trop cher
    pub fn buy_one(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.find(id) else {
            warn!(product = %id, "Buy ignored: unknown product");
            return false;
        };

        if self.balance < product.price {
            debug!(product = %product.name, price = product.price, balance = self.balance, "Buy rejected: insufficient balance");
            return false;
        }

        self.balance -= product.price;
        *self.cart.entry(id).or_insert(0) += 1;

        debug!(product = %product.name, quantity = self.quantity_of(id), balance = self.balance, "Bought one");
        true
    }

    /// Vend un exemplaire
    ///
    /// Retourne false (sans rien modifier) si la quantité est déjà 0
    pub fn sell_one(&mut self, id: ProductId) -> bool {
        let Some(product) = self.catalog.find(id) else {
            warn!(product = %id, "Sell ignored: unknown product");
            return false;
        };

        let Some(quantity) = self.cart.get_mut(&id) else {
            debug!(product = %product.name, "Sell ignored: nothing to sell");
            return false;
        };

        *quantity -= 1;
        if *quantity == 0 {
            self.cart.remove(&id);
        }
        self.balance += product.price;

        debug!(product = %product.name, quantity = self.quantity_of(id), balance = self.balance, "Sold one");
        true
    }

    /// Fixe directement la quantité d'un produit
    ///
    /// CONCEPT : Tout ou rien
    /// - Une quantité négative est ramenée à 0
    /// - Si l'augmentation coûte plus que le solde : Err, état inchangé
    /// - Sinon le solde absorbe la différence (dans un sens ou dans l'autre)
    pub fn set_quantity(&mut self, id: ProductId, new_quantity: i64) -> Result<(), LedgerError> {
        let Some(product) = self.catalog.find(id) else {
            warn!(product = %id, "Quantity change ignored: unknown product");
            return Ok(());
        };
        let price = product.price;

        let new_quantity = Quantity::try_from(new_quantity).unwrap_or(0);
        let old_quantity = self.quantity_of(id);

        if new_quantity > old_quantity {
            // Un débordement signifie forcément un coût supérieur au solde
            let cost = (new_quantity - old_quantity)
                .checked_mul(price)
                .unwrap_or(Money::MAX);

            if cost > self.balance {
                info!(product = %product.name, cost, balance = self.balance, "Quantity change rejected: insufficient funds");
                return Err(LedgerError::InsufficientFunds {
                    product: product.name.clone(),
                    required: cost,
                    available: self.balance,
                });
            }

            self.balance -= cost;
        } else {
            // Le remboursement ne dépasse jamais la valeur détenue
            let refund = (old_quantity - new_quantity).saturating_mul(price);
            self.balance = self.balance.saturating_add(refund);
        }

        if new_quantity == 0 {
            self.cart.remove(&id);
        } else {
            self.cart.insert(id, new_quantity);
        }

        debug!(product = %product.name, old_quantity, new_quantity, balance = self.balance, "Quantity set");
        Ok(())
    }

    /// Revient à l'état initial (équivalent d'un rechargement de page)
    pub fn reset(&mut self) {
        self.balance = self.starting_balance;
        self.cart.clear();
        info!(balance = self.balance, "Ledger reset");
    }

    /// Construit la vue en lecture seule pour l'affichage
    pub fn snapshot(&self) -> Snapshot {
        let lines: Vec<LineItem> = self
            .catalog
            .iter()
            .filter_map(|product| {
                let quantity = self.quantity_of(product.id);
                (quantity > 0).then(|| LineItem {
                    product_id: product.id,
                    name: product.name.clone(),
                    unit_price: product.price,
                    quantity,
                    subtotal: quantity.saturating_mul(product.price),
                })
            })
            .collect();

        let total_spent = lines
            .iter()
            .map(|line| line.subtotal)
            .fold(0, Money::saturating_add);

        Snapshot {
            balance: self.balance,
            starting_balance: self.starting_balance,
            lines,
            total_spent,
        }
    }
}

/// Parse une quantité saisie au clavier
///
/// - "" : 0 (champ vidé)
/// - "-3" : accepté, le ledger ramènera la valeur à 0
/// - "abc" : erreur, rien n'est modifié
pub fn parse_quantity(input: &str) -> Result<i64, LedgerError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0);
    }

    trimmed
        .parse::<i64>()
        .map_err(|_| LedgerError::InvalidQuantity(trimmed.to_string()))
}

// ============================================================================
// Tests unitaires
// ============================================================================
