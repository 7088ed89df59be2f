// ============================================================================
// Receipt - Ticket de caisse
// ============================================================================
// Lignes achetées, sous-totaux et total, dans l'ordre du catalogue
// ============================================================================

use chrono::Local;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ledger::{LineItem, Snapshot};
use crate::models::format_money;

/// Message affiché quand le panier est vide
pub const EMPTY_RECEIPT: &str = "You haven't bought anything yet.";

/// Libellé d'une ligne : "Big Mac × 3"
pub fn item_label(line: &LineItem) -> String {
    format!("{} × {}", line.name, line.quantity)
}

/// Dessine le ticket de caisse
pub fn render_receipt(frame: &mut Frame, snapshot: &Snapshot, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Receipt · {} ", Local::now().format("%Y-%m-%d %H:%M")));

    if snapshot.is_empty() {
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(EMPTY_RECEIPT, Style::default().fg(Color::Gray))),
        ];
        let paragraph = Paragraph::new(text).block(block).alignment(Alignment::Center);
        frame.render_widget(paragraph, area);
        return;
    }

    // Largeur utile : on retire les 2 bordures et 1 espace de chaque côté
    let width = usize::from(area.width.saturating_sub(4));

    let mut lines: Vec<Line> = snapshot
        .lines
        .iter()
        .map(|line| receipt_row(&item_label(line), &format_money(line.subtotal), width, Style::default()))
        .collect();

    lines.push(Line::from(Span::styled(
        "─".repeat(width),
        Style::default().fg(Color::DarkGray),
    )));
    lines.push(receipt_row(
        "TOTAL:",
        &format_money(snapshot.total_spent),
        width,
        Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
    ));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

/// Une ligne "libellé ......... montant" alignée à droite
fn receipt_row<'a>(label: &str, amount: &str, width: usize, style: Style) -> Line<'a> {
    let label_width = label.chars().count();
    let amount_width = amount.chars().count();
    let padding = width.saturating_sub(label_width + amount_width).max(1);

    Line::from(vec![
        Span::raw(" "),
        Span::styled(label.to_string(), style),
        Span::raw(" ".repeat(padding)),
        Span::styled(amount.to_string(), style),
    ])
}
