// ============================================================================
// Configuration
// ============================================================================
// Lue depuis les variables d'environnement au démarrage
//
// - LAZYSPEND_BALANCE : solde de départ (ex: "100_000_000_000" ou "1,000")
// - LAZYSPEND_CATALOG : chemin vers un catalogue JSON personnalisé
// - LAZYSPEND_LOG_DIR : répertoire des logs
// ============================================================================

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::models::{Catalog, Money, DEFAULT_STARTING_BALANCE};

pub const BALANCE_VAR: &str = "LAZYSPEND_BALANCE";
pub const CATALOG_VAR: &str = "LAZYSPEND_CATALOG";
pub const LOG_DIR_VAR: &str = "LAZYSPEND_LOG_DIR";

/// Configuration de l'application
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub starting_balance: Money,
    /// None : catalogue intégré
    pub catalog_path: Option<PathBuf>,
    pub log_dir: PathBuf,
}

impl Config {
    /// Lit la configuration depuis l'environnement du processus
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Lit la configuration via une fonction de lookup
    ///
    /// CONCEPT RUST : Closure en paramètre (impl Fn)
    /// - Les tests passent une HashMap au lieu de modifier l'environnement
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let starting_balance = match lookup(BALANCE_VAR) {
            Some(raw) => parse_balance(&raw)
                .with_context(|| format!("{} invalide : {:?}", BALANCE_VAR, raw))?,
            None => DEFAULT_STARTING_BALANCE,
        };

        let catalog_path = lookup(CATALOG_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        let log_dir = lookup(LOG_DIR_VAR)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_log_dir);

        Ok(Self {
            starting_balance,
            catalog_path,
            log_dir,
        })
    }

    /// Charge le catalogue configuré (fichier JSON ou catalogue intégré)
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog_path {
            Some(path) => Catalog::load(path),
            None => Ok(Catalog::default_catalog()),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
            catalog_path: None,
            log_dir: default_log_dir(),
        }
    }
}

/// Répertoire de logs par défaut
///
/// - Linux/WSL : ~/.local/share/lazyspend/logs
/// - macOS : ~/Library/Application Support/lazyspend/logs
/// - Windows : C:\Users\<user>\AppData\Local\lazyspend\logs
/// - Sinon : ./logs
pub fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("lazyspend").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Parse un solde en acceptant les séparateurs "_" et ","
fn parse_balance(raw: &str) -> Result<Money> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != '_' && *c != ',')
        .collect();

    if cleaned.is_empty() {
        bail!("solde vide");
    }

    cleaned
        .parse::<Money>()
        .context("le solde doit être un entier positif")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.starting_balance, 100_000_000_000);
        assert!(config.catalog_path.is_none());
        assert_eq!(config.log_dir, default_log_dir());
    }

    #[test]
    fn test_balance_with_separators() {
        let config = config_from(&[(BALANCE_VAR, "$1,000_000")]).unwrap();
        assert_eq!(config.starting_balance, 1_000_000);
    }

    #[test]
    fn test_invalid_balance() {
        assert!(config_from(&[(BALANCE_VAR, "lots")]).is_err());
        assert!(config_from(&[(BALANCE_VAR, "-5")]).is_err());
        assert!(config_from(&[(BALANCE_VAR, "  ")]).is_err());
    }

    #[test]
    fn test_paths() {
        let config = config_from(&[
            (CATALOG_VAR, "/tmp/catalog.json"),
            (LOG_DIR_VAR, "/tmp/lazyspend-logs"),
        ])
        .unwrap();

        assert_eq!(config.catalog_path, Some(PathBuf::from("/tmp/catalog.json")));
        assert_eq!(config.log_dir, PathBuf::from("/tmp/lazyspend-logs"));
    }

    #[test]
    fn test_load_default_catalog() {
        let catalog = Config::default().load_catalog().unwrap();
        assert_eq!(catalog, Catalog::default_catalog());
    }

    #[test]
    fn test_load_missing_catalog_file() {
        let config = Config {
            catalog_path: Some(PathBuf::from("/nonexistent/lazyspend/catalog.json")),
            ..Config::default()
        };
        assert!(config.load_catalog().is_err());
    }
}
