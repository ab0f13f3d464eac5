use capmix_core::api::MixOutcome;
use capmix_protocol::color::rgb_to_hex;
use capmix_protocol::table::TableDocument;
use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Table};
use itertools::Itertools;
use std::collections::HashMap;

pub fn print_summary(outcome: &MixOutcome) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let improvement = if outcome.initial_cost > 0 {
        100.0 * (outcome.initial_cost as f64 - outcome.cost as f64)
            / outcome.initial_cost as f64
    } else {
        0.0
    };

    table.add_row(vec![
        Cell::new("Sites").add_attribute(Attribute::Bold),
        Cell::new(outcome.sites.len()),
    ]);
    table.add_row(vec![
        Cell::new("Initial cost").add_attribute(Attribute::Bold),
        Cell::new(outcome.initial_cost),
    ]);
    table.add_row(vec![
        Cell::new("Final cost").add_attribute(Attribute::Bold),
        Cell::new(outcome.cost),
    ]);
    table.add_row(vec![
        Cell::new("Improvement").add_attribute(Attribute::Bold),
        Cell::new(format!("{improvement:.1}%")),
    ]);
    table.add_row(vec![
        Cell::new("Steps").add_attribute(Attribute::Bold),
        Cell::new(outcome.steps),
    ]);
    table.add_row(vec![
        Cell::new("Seed").add_attribute(Attribute::Bold),
        Cell::new(outcome.seed),
    ]);

    println!("\n{table}");
}

pub fn print_color_histogram(outcome: &MixOutcome) {
    // Count placed caps by color; any label seen for a color will do.
    let mut counts: HashMap<String, (u64, String)> = HashMap::new();
    for &cap_idx in &outcome.assignment {
        let cap = &outcome.caps[cap_idx as usize];
        let entry = counts
            .entry(rgb_to_hex(cap.color))
            .or_insert_with(|| (0, cap.label.clone()));
        entry.0 += 1;
    }

    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table.add_row(vec![
        Cell::new("Color").add_attribute(Attribute::Bold),
        Cell::new("Label").add_attribute(Attribute::Bold),
        Cell::new("Placed").add_attribute(Attribute::Bold),
    ]);
    if let Some(col) = table.column_mut(2) {
        col.set_cell_alignment(CellAlignment::Right);
    }

    for (color, (count, label)) in counts
        .into_iter()
        .sorted_by(|a, b| b.1 .0.cmp(&a.1 .0).then_with(|| a.0.cmp(&b.0)))
    {
        table.add_row(vec![Cell::new(color), Cell::new(label), Cell::new(count)]);
    }

    println!("{table}");
}

pub fn print_validation(
    doc: &TableDocument,
    recomputed: u64,
    mean_degree: f32,
    fingerprint_ok: bool,
) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Placements").add_attribute(Attribute::Bold),
        Cell::new(doc.placements.len()),
    ]);
    table.add_row(vec![
        Cell::new("Recorded cost").add_attribute(Attribute::Bold),
        Cell::new(doc.cost),
    ]);
    table.add_row(vec![
        Cell::new("Recomputed cost").add_attribute(Attribute::Bold),
        Cell::new(recomputed),
    ]);
    table.add_row(vec![
        Cell::new("Mean neighbors").add_attribute(Attribute::Bold),
        Cell::new(format!("{mean_degree:.2}")),
    ]);
    table.add_row(vec![
        Cell::new("Fingerprint").add_attribute(Attribute::Bold),
        Cell::new(if fingerprint_ok { "ok" } else { "MISMATCH" }),
    ]);

    println!("\n{table}");
}
