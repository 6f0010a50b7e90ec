use colored::Colorize;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;

use crate::action::ActionType;
use crate::cards::GRID_RANKS;
use crate::comparator::{Classification, ComparisonResult, HandComparison, ALL_CLASSIFICATIONS};
use crate::distribution::{ActionDistribution, HandStrategy};
use crate::hand::{all_hands, HandClass};

fn grid<F>(title: &str, mut cell_for: F) -> String
where
    F: FnMut(HandClass) -> String,
{
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![Cell::new("")];
    for r in GRID_RANKS {
        header.push(Cell::new(r.to_char()).set_alignment(CellAlignment::Center));
    }
    table.set_header(header);

    for (r1, hands) in GRID_RANKS.iter().zip(all_hands().chunks(13)) {
        let mut row = vec![Cell::new(r1.to_char().to_string().bold().to_string())];
        for hand in hands {
            row.push(Cell::new(cell_for(*hand)).set_alignment(CellAlignment::Center));
        }
        table.add_row(row);
    }

    format!("  {}\n{}", title.bold(), table)
}

pub fn styled_classification(label: &str, classification: Classification) -> String {
    match classification {
        Classification::Correct => label.green().to_string(),
        Classification::FrequencyError => label.yellow().bold().to_string(),
        Classification::ExtraAction => label.red().bold().to_string(),
        Classification::MissingAction => label.magenta().bold().to_string(),
    }
}

/// 13x13 grid with each hand coloured by its verdict.
pub fn classification_grid(result: &ComparisonResult, title: &str) -> String {
    grid(title, |hand| {
        let cmp = result.hand(&hand);
        styled_classification(&hand.to_string(), cmp.classification)
    })
}

fn dominant_action(strategy: &HandStrategy) -> (ActionType, bool) {
    let totals: Vec<(ActionType, f64)> = strategy
        .keys()
        .map(|k| k.action)
        .unique()
        .map(|a| (a, strategy.action_total(a)))
        .collect();
    let dominant = totals
        .iter()
        .copied()
        .max_by(|a, b| a.1.total_cmp(&b.1))
        .map(|(a, _)| a)
        .unwrap_or(ActionType::Fold);
    (dominant, totals.len() > 1)
}

/// 13x13 grid coloured by each hand's most frequent action. Mixed hands are
/// marked with `*`.
pub fn strategy_grid(distribution: &ActionDistribution, title: &str) -> String {
    grid(title, |hand| {
        let (action, mixed) = dominant_action(distribution.strategy(&hand));
        let label = if mixed { format!("{}*", hand) } else { hand.to_string() };
        styled_action_text(&label, action)
    })
}

pub fn styled_action_text(text: &str, action: ActionType) -> String {
    match action {
        ActionType::Raise | ActionType::Bet => text.red().bold().to_string(),
        ActionType::Call => text.green().bold().to_string(),
        ActionType::Check => text.yellow().bold().to_string(),
        ActionType::Fold => text.dimmed().to_string(),
    }
}

pub fn summary_table(result: &ComparisonResult) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Verdict").set_alignment(CellAlignment::Left),
        Cell::new("Hands").set_alignment(CellAlignment::Right),
        Cell::new("Combos").set_alignment(CellAlignment::Right),
    ]);

    for classification in ALL_CLASSIFICATIONS {
        let hands: Vec<&HandComparison> = result.with_classification(classification).collect();
        let combos: u32 = hands.iter().map(|h| h.weight).sum();
        table.add_row(vec![
            Cell::new(styled_classification(classification.as_str(), classification)),
            Cell::new(hands.len()).set_alignment(CellAlignment::Right),
            Cell::new(combos).set_alignment(CellAlignment::Right),
        ]);
    }
    table.add_row(vec![
        Cell::new("Score".bold().to_string()),
        Cell::new(""),
        Cell::new(format!("{:.1}%", result.accuracy_pct())).set_alignment(CellAlignment::Right),
    ]);

    table.to_string()
}

fn delta_details(hand: &HandComparison) -> String {
    hand.deltas
        .iter()
        .filter(|d| d.delta > 0.0)
        .map(|d| format!("{} {:.0}% vs {:.0}%", d.action, d.submitted, d.reference))
        .join(", ")
}

/// Incorrect hands, worst first (verdict, then largest delta, then combos).
pub fn mistakes_table(result: &ComparisonResult, limit: usize) -> String {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![
        Cell::new("Hand"),
        Cell::new("Verdict"),
        Cell::new("Max Δ").set_alignment(CellAlignment::Right),
        Cell::new("You vs reference"),
    ]);

    let mistakes = result
        .hands
        .iter()
        .filter(|h| !h.is_correct())
        .sorted_by(|a, b| {
            b.classification
                .cmp(&a.classification)
                .then(b.max_delta.total_cmp(&a.max_delta))
                .then(b.weight.cmp(&a.weight))
        })
        .take(limit);

    for hand in mistakes {
        table.add_row(vec![
            Cell::new(hand.hand.to_string().bold().to_string()),
            Cell::new(styled_classification(hand.classification.as_str(), hand.classification)),
            Cell::new(format!("{:.1}", hand.max_delta)).set_alignment(CellAlignment::Right),
            Cell::new(delta_details(hand)),
        ]);
    }

    table.to_string()
}

pub fn print_section(title: &str, content: &str) {
    println!("\n{}", title.cyan().bold());
    println!("  {}", content);
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", "Error:".red().bold(), msg);
}
