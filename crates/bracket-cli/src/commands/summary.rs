//! Summary command implementation.

use std::collections::BTreeMap;

use bracket_convert::convert_stage;
use bracket_core::BracketGroup;

use crate::cli::{OutputFormat, SummaryArgs};
use crate::data;
use crate::error::Result;
use crate::output::{render_summary_table, Output, SummaryJsonOutput, SummaryRow};

pub fn run_summary(args: &SummaryArgs, format: OutputFormat) -> Result<()> {
    let output = Output::new(format);

    let stage = data::load_stage(&args.stage)?;
    let viewer = convert_stage(&stage, None)?;

    let mut counts: BTreeMap<(String, u32), usize> = BTreeMap::new();
    for m in &viewer.matches {
        *counts
            .entry((m.group_id.clone(), m.round_number()))
            .or_default() += 1;
    }

    let rows: Vec<SummaryRow> = counts
        .into_iter()
        .map(|((group_id, round_number), match_count)| SummaryRow {
            bracket_group: BracketGroup::classify(&group_id),
            group_id,
            round_number,
            match_count,
        })
        .collect();

    let summary = SummaryJsonOutput {
        stage_id: viewer.stages[0].id.clone(),
        stage_kind: viewer.stages[0].kind,
        participant_count: viewer.participants.len(),
        edge_count: viewer.edges.len(),
        rows,
    };

    if output.is_json() {
        output.print_json(&summary);
    } else {
        render_summary_table(&summary);
    }

    Ok(())
}
