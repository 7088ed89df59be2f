// ============================================================================
// LazySpend - Simulateur de dépenses dans le terminal
// ============================================================================
// Commence avec 100 milliards, achète et revend des articles du catalogue,
// et regarde le solde fondre sur le ticket de caisse
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui lit un événement, l'applique, redessine
// 3. Ownership : la boucle possède App, qui possède le Ledger (pas de global)
// ============================================================================

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info};

use lazyspend::app::App;
use lazyspend::config::Config;
use lazyspend::ledger::Ledger;
use lazyspend::models::format_money;
use lazyspend::ui::{handle_event, render, EventHandler};

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// # Utilisation
/// ```bash
/// # Voir les logs en temps réel
/// tail -f ~/.local/share/lazyspend/logs/lazyspend.log
///
/// # Contrôler le niveau de log
/// RUST_LOG=lazyspend=trace cargo run
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "lazyspend.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender) // Écrit dans le fichier
                .with_ansi(false) // Pas de codes couleur dans le fichier
                .with_target(true) // Inclut le module (ex: lazyspend::ledger)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG=debug : tous les logs debug+
            // Par défaut : debug pour lazyspend, info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lazyspend=debug,info".into()),
        )
        .try_init()
        .context("Un subscriber tracing est déjà installé")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::from_env().context("Configuration invalide")?;

    // Si le logging échoue, on continue quand même sans logs
    init_logging(&config.log_dir).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?config, "LazySpend starting up");

    let catalog = config.load_catalog()?;
    info!(products = catalog.len(), balance = %format_money(config.starting_balance), "Catalog loaded");

    let mut app = App::new(Ledger::new(catalog, config.starting_balance));

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(()) => {
            let snapshot = app.snapshot();
            info!(
                balance = %format_money(snapshot.balance),
                spent = %format_money(snapshot.total_spent),
                lines = snapshot.lines.len(),
                "Application exited normally"
            );
        }
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop Principal
// ============================================================================
// À chaque itération :
//   1. Dessiner l'interface depuis le snapshot (render)
//   2. Lire un événement et l'appliquer jusqu'au bout (input + update)
//
// Une seule opération du ledger à la fois : pas de thread, pas de verrou
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    while app.is_running() {
        terminal.draw(|frame| render(frame, app))?;

        let event = events.next().context("Lecture du clavier impossible")?;
        handle_event(app, event);
    }

    Ok(())
}

// ============================================================================
// Setup et restauration du terminal
// ============================================================================
// IMPORTANT : Toujours restaurer le terminal avant de quitter !
// ============================================================================

/// Configure le terminal en mode TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Impossible d'activer le raw mode")?;

    // Alternate screen : quand on quitte, l'écran précédent est restauré
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Impossible de créer le terminal")
}

/// Restaure le terminal à son état normal
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
