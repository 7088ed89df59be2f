// ============================================================================
// Money : montants entiers et formatage
// ============================================================================
// Les montants sont des dollars entiers (pas de centimes dans le simulateur)
//
// CONCEPTS RUST :
// 1. Type alias : `Money` documente l'intention sans coût à l'exécution
// 2. u64 : non signé, un solde ne peut jamais être négatif
// ============================================================================

/// Montant en dollars entiers
pub type Money = u64;

/// Solde de départ par défaut : 100 milliards de dollars
pub const DEFAULT_STARTING_BALANCE: Money = 100_000_000_000;

/// Formate un montant avec le symbole dollar et des séparateurs de milliers
///
/// Exemple : 100000000000 -> "$100,000,000,000"
pub fn format_money(amount: Money) -> String {
    format!("${}", format_price(amount))
}

/// Formate un prix avec des séparateurs de milliers, sans symbole
///
/// CONCEPT RUST : Itération sur les chars en sens inverse
/// - On insère une virgule toutes les 3 positions depuis la droite
/// - On reconstruit la chaîne dans le bon ordre à la fin
///
/// Exemple : 1500000 -> "1,500,000"
pub fn format_price(amount: Money) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped.chars().rev().collect()
}
