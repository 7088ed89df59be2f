// ============================================================================
// Store - Rendu de l'interface principale
// ============================================================================
// Dessine le magasin : solde, grille de produits, ticket de caisse, footer
//
// CONCEPTS RATATUI :
// 1. Frame : surface de dessin
// 2. Layout : découpage de l'espace en zones
// 3. ListState : sélection + défilement automatique de la liste
//
// RÈGLE : tout ce qui est actif/inactif à l'écran dérive du Snapshot
// ============================================================================

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::app::{App, StatusKind};
use crate::ledger::Snapshot;
use crate::models::{format_money, Product};
use crate::ui::receipt;

/// Largeur maximale du nom de produit dans la grille
const NAME_WIDTH: usize = 22;

/// Dessine l'interface complète
///
/// Le snapshot est calculé une seule fois par frame et partagé par tous les widgets
pub fn render(frame: &mut Frame, app: &App) {
    let snapshot = app.snapshot();
    let chunks = create_layout(frame.size());

    render_header(frame, &snapshot, chunks[0]);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(62), Constraint::Percentage(38)])
        .split(chunks[1]);

    render_products(frame, app, &snapshot, body[0]);
    receipt::render_receipt(frame, &snapshot, body[1]);

    if app.is_in_input_mode() {
        render_input_footer(frame, app, chunks[2]);
    } else {
        render_footer(frame, app, chunks[2]);
    }
}

/// Crée le layout principal (header, content, footer)
fn create_layout(area: Rect) -> Vec<Rect> {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header : solde
            Constraint::Min(0),    // Content : produits + ticket
            Constraint::Length(4), // Footer : raccourcis ou saisie
        ])
        .split(area)
        .to_vec()
}

// ============================================================================
// Header : Solde
// ============================================================================

fn render_header(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" LazySpend ")
        .title_alignment(Alignment::Center);

    let balance_color = if snapshot.balance == 0 {
        Color::Red
    } else {
        Color::Green
    };

    let text = Line::from(vec![
        Span::styled(
            format_money(snapshot.balance),
            Style::default().fg(balance_color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  left to spend  ·  {:.6}% spent", snapshot.spent_percent()),
            Style::default().fg(Color::Gray),
        ),
    ]);

    let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

// ============================================================================
// Grille de produits
// ============================================================================

fn render_products(frame: &mut Frame, app: &App, snapshot: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(" Products ");

    let items: Vec<ListItem> = app
        .ledger()
        .catalog()
        .iter()
        .map(|product| ListItem::new(product_row(product, snapshot)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));

    // ListState fait défiler la liste pour garder la sélection visible
    let mut state = ListState::default().with_selected(Some(app.selected_index));
    frame.render_stateful_widget(list, area, &mut state);
}

/// Une ligne de la grille : nom, prix, [-] quantité [+]
///
/// [-] est grisé si la quantité est 0, [+] si le solde ne couvre pas le prix
fn product_row<'a>(product: &Product, snapshot: &Snapshot) -> Line<'a> {
    let quantity = snapshot.quantity_of(product.id);

    let sell_style = if snapshot.can_sell(product.id) {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let buy_style = if snapshot.can_afford(product.price) {
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let quantity_style = if quantity > 0 {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };

    Line::from(vec![
        Span::raw(format!(" {:<width$} ", truncate_name(&product.name), width = NAME_WIDTH)),
        Span::styled(
            format!("{:>16}", format_money(product.price)),
            Style::default().fg(Color::White),
        ),
        Span::raw("  "),
        Span::styled("[-]", sell_style),
        Span::styled(format!(" {:>6} ", quantity), quantity_style),
        Span::styled("[+]", buy_style),
    ])
}

/// Tronque le nom avec ellipse si nécessaire
fn truncate_name(name: &str) -> String {
    if name.chars().count() <= NAME_WIDTH {
        name.to_string()
    } else {
        let truncated: String = name.chars().take(NAME_WIDTH - 1).collect();
        format!("{}…", truncated)
    }
}

// ============================================================================
// Footer : Instructions, confirmations, statut
// ============================================================================

fn render_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    let warning = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);
    let blinking_key = Style::default()
        .fg(Color::Red)
        .add_modifier(Modifier::BOLD)
        .add_modifier(Modifier::SLOW_BLINK);

    let first_line = if app.is_awaiting_reset_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[R]", blinking_key),
            Span::styled(" again to sell everything and start over, any other key to cancel ⚠", warning),
        ])
    } else if app.is_awaiting_quit_confirmation() {
        Line::from(vec![
            Span::styled("⚠  Press ", warning),
            Span::styled("[q]", blinking_key),
            Span::styled(" again to quit, any other key to cancel ⚠", warning),
        ])
    } else {
        shortcuts_line()
    };

    let mut lines = vec![first_line];
    if let Some(status) = app.status() {
        let color = match status.kind {
            StatusKind::Info => Color::Green,
            StatusKind::Error => Color::Red,
        };
        lines.push(Line::from(Span::styled(
            status.text.clone(),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));
    }

    let paragraph = Paragraph::new(lines).block(block).alignment(Alignment::Center);
    frame.render_widget(paragraph, area);
}

fn shortcuts_line<'a>() -> Line<'a> {
    let key = Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD);

    Line::from(vec![
        Span::styled("[q]", key),
        Span::raw(" Quit  "),
        Span::styled("[↑↓ / j k]", key),
        Span::raw(" Navigate  "),
        Span::styled("[→ / +]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Buy  "),
        Span::styled("[← / -]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Sell  "),
        Span::styled("[e / Enter]", key),
        Span::raw(" Quantity  "),
        Span::styled("[R]", key),
        Span::raw(" Reset"),
    ])
}

/// Footer en mode saisie : prompt + buffer + curseur
fn render_input_footer(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Green)); // Vert pour indiquer mode input

    let input_line = Line::from(vec![
        Span::styled(
            app.input_prompt.as_str(),
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        Span::styled(app.input_buffer.as_str(), Style::default().fg(Color::White)),
        Span::styled(
            "█", // Curseur
            Style::default().fg(Color::White).add_modifier(Modifier::SLOW_BLINK),
        ),
    ]);

    let help_line = Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
        Span::raw(" Confirm  "),
        Span::styled("[ESC]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
        Span::raw(" Cancel"),
    ]);

    let paragraph = Paragraph::new(vec![input_line, help_line])
        .block(block)
        .alignment(Alignment::Left);

    frame.render_widget(paragraph, area);
}

// ============================================================================
// Tests
// ============================================================================
