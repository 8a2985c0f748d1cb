//! Output formatting for table and JSON modes.

use comfy_table::{presets::UTF8_FULL, Cell, ContentArrangement, Table};
use serde::Serialize;

use bracket_core::{BracketGroup, BracketLayout, Match};

use crate::cli::OutputFormat;

/// Output handler based on format selection.
pub struct Output {
    format: OutputFormat,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn print_json<T: Serialize>(&self, data: &T) {
        println!("{}", serde_json::to_string_pretty(data).unwrap());
    }
}

/// Render match positions and layout totals as tables.
pub fn render_layout_table(layout: &BracketLayout, matches: &[Match]) {
    println!();
    println!(
        "Layout: {} matches, {} connectors, {:.0}x{:.0}px",
        layout.match_positions.len(),
        layout.connectors.len(),
        layout.total_width,
        layout.total_height
    );
    println!("{}", "=".repeat(60));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Match"),
            Cell::new("Group"),
            Cell::new("Col"),
            Cell::new("Lane"),
            Cell::new("X"),
            Cell::new("Y"),
        ]);

    let mut rows: Vec<&Match> = matches.iter().collect();
    rows.sort_by(|a, b| {
        let (pa, pb) = (&layout.match_positions[&a.id], &layout.match_positions[&b.id]);
        pa.x_round
            .cmp(&pb.x_round)
            .then(pa.y_lane.cmp(&pb.y_lane))
            .then_with(|| a.id.cmp(&b.id))
    });

    for m in rows {
        let p = &layout.match_positions[&m.id];
        table.add_row(vec![
            Cell::new(&m.id),
            Cell::new(format!("{:?}", BracketGroup::classify(&m.group_id))),
            Cell::new(p.x_round),
            Cell::new(p.y_lane),
            Cell::new(format!("{:.0}", p.x_px)),
            Cell::new(format!("{:.0}", p.y_px)),
        ]);
    }

    println!("{table}");

    if let Some(panels) = &layout.panel_positions {
        println!();
        println!("Record panels:");
        let mut panel_table = Table::new();
        panel_table
            .load_preset(UTF8_FULL)
            .set_content_arrangement(ContentArrangement::Dynamic)
            .set_header(vec![
                Cell::new("Record"),
                Cell::new("Round"),
                Cell::new("Matches"),
                Cell::new("Zone"),
                Cell::new("X"),
            ]);
        for p in panels {
            panel_table.add_row(vec![
                Cell::new(&p.key),
                Cell::new(p.round_number),
                Cell::new(p.match_count),
                Cell::new(format!("{:?}", p.zone)),
                Cell::new(format!("{:.0}", p.x_px)),
            ]);
        }
        println!("{panel_table}");
    }
    println!();
}

/// Summary row: matches per group and round.
#[derive(Serialize)]
pub struct SummaryRow {
    pub group_id: String,
    pub bracket_group: BracketGroup,
    pub round_number: u32,
    pub match_count: usize,
}

/// JSON output for the summary command.
#[derive(Serialize)]
pub struct SummaryJsonOutput {
    pub stage_id: String,
    pub stage_kind: bracket_core::BracketKind,
    pub participant_count: usize,
    pub edge_count: usize,
    pub rows: Vec<SummaryRow>,
}

/// Render the summary rows as a table.
pub fn render_summary_table(summary: &SummaryJsonOutput) {
    println!();
    println!(
        "Stage {} ({:?}): {} participants, {} edges",
        summary.stage_id, summary.stage_kind, summary.participant_count, summary.edge_count
    );
    println!("{}", "=".repeat(60));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            Cell::new("Group"),
            Cell::new("Bracket"),
            Cell::new("Round"),
            Cell::new("Matches"),
        ]);

    for row in &summary.rows {
        table.add_row(vec![
            Cell::new(&row.group_id),
            Cell::new(format!("{:?}", row.bracket_group)),
            Cell::new(row.round_number),
            Cell::new(row.match_count),
        ]);
    }

    println!("{table}");
    println!();
}

/// Render converted viewer data as tables.
pub fn render_viewer_data_table(data: &bracket_convert::ViewerData) {
    println!();
    let stage = &data.stages[0];
    println!(
        "Stage {} ({:?}): {} groups, {} matches, {} edges",
        stage.id,
        stage.kind,
        stage.settings.group_count,
        data.matches.len(),
        data.edges.len()
    );
    println!("{}", "=".repeat(60));

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![Cell::new("#"), Cell::new("Participant")]);
    for p in &data.participants {
        table.add_row(vec![Cell::new(p.id), Cell::new(&p.name)]);
    }
    println!("{table}");
    println!();
}
