use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use packforge::config::ScoringWeights;
use packforge::optimizer::{RunFailure, RunSummary};
use packforge::scorer::ScoreDetails;
use packforge::verifier::GroupMetrics;

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn right_align(table: &mut Table, from: usize, to: usize) {
    for i in from..=to {
        if let Some(col) = table.column_mut(i) {
            col.set_cell_alignment(CellAlignment::Right);
        }
    }
}

/// The six terms, their weights and weighted contribution.
pub fn print_score_report(details: &ScoreDetails, weights: &ScoringWeights) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Metric").add_attribute(Attribute::Bold),
        Cell::new("Value"),
        Cell::new("Weight"),
        Cell::new("Contribution"),
    ]);

    let rows: [(&str, f64, f64, Color); 6] = [
        (
            "Surface Area",
            details.total_surface_area as f64,
            weights.weight_surface_area,
            Color::Green,
        ),
        (
            "Interconnection Balance",
            details.interconnection_balance,
            weights.weight_interconnection,
            Color::Green,
        ),
        (
            "Edge Cooling",
            details.edge_cooling as f64,
            weights.weight_edge_cooling,
            Color::Green,
        ),
        ("Spread", details.spread, -weights.weight_spread, Color::Red),
        (
            "Current Path",
            details.current_path_length,
            -weights.weight_current_path,
            Color::Red,
        ),
        (
            "Degradation Balance",
            details.degradation_balance,
            -weights.weight_degradation,
            Color::Red,
        ),
    ];

    for (name, value, weight, color) in rows {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.4}", value)),
            Cell::new(format!("{:+.1}", weight)),
            Cell::new(format!("{:.4}", value * weight)).fg(color),
        ]);
    }
    table.add_row(vec![
        Cell::new("Combined").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(format!("{:.4}", details.combined))
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
    ]);
    right_align(&mut table, 1, 3);

    println!("\n=== SCORE ({}) ===", weights.profile);
    println!("{}", table);
    println!(
        "Surface areas: min {} | max {} | std dev {:.4}",
        details.min_surface_area(),
        details.max_surface_area(),
        details.surface_area_std_dev()
    );
}

pub fn print_group_report(rows: &[GroupMetrics]) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Group").add_attribute(Attribute::Bold),
        Cell::new("Edge"),
        Cell::new("Spread"),
        Cell::new("Stress"),
        Cell::new("Surface→Next"),
        Cell::new("Centroid"),
        Cell::new("Cells"),
    ]);

    for row in rows {
        table.add_row(vec![
            Cell::new(row.group).add_attribute(Attribute::Bold),
            Cell::new(row.edge_cells),
            Cell::new(format!("{:.3}", row.spread)),
            Cell::new(row.stress),
            Cell::new(row.surface_to_next),
            Cell::new(format!("({:.2}, {:.2})", row.centroid_x, row.centroid_y)),
            Cell::new(&row.cells),
        ]);
    }
    right_align(&mut table, 1, 4);

    println!("\n=== GROUPS ===");
    println!("{}", table);
}

pub fn print_run_report(runs: &[RunSummary], failures: &[RunFailure], best_run: usize) {
    let mut table = new_table();
    table.set_header(vec![
        Cell::new("Run").add_attribute(Attribute::Bold),
        Cell::new("Seed"),
        Cell::new("Start"),
        Cell::new("Best"),
        Cell::new("Accepted"),
        Cell::new("Rejected"),
        Cell::new("Invalid"),
        Cell::new("Pinned"),
        Cell::new("Final T"),
    ]);

    for r in runs {
        let best = Cell::new(format!("{:.4}", r.best_score));
        let best = if r.run == best_run {
            best.fg(Color::Cyan).add_attribute(Attribute::Bold)
        } else {
            best
        };
        table.add_row(vec![
            Cell::new(r.run),
            Cell::new(r.seed),
            Cell::new(format!("{:.4}", r.initial_score)),
            best,
            Cell::new(r.stats.accepted),
            Cell::new(r.stats.rejected),
            Cell::new(r.stats.invalid),
            Cell::new(r.stats.pinned_skips),
            Cell::new(format!("{:.3e}", r.stats.final_temperature)),
        ]);
    }
    for f in failures {
        table.add_row(vec![
            Cell::new(f.run).fg(Color::Red),
            Cell::new(f.seed),
            Cell::new("-"),
            Cell::new(&f.reason).fg(Color::Red),
        ]);
    }
    right_align(&mut table, 2, 8);

    println!("\n=== RUNS ===");
    println!("{}", table);
}
