//! Layout command implementation.

use bracket_convert::convert_stage;
use bracket_core::{BracketKind, LayoutConfig};
use bracket_layout::{compute_layout, compute_swiss_layout, detect_profile};

use crate::cli::{LayoutArgs, OutputFormat};
use crate::data;
use crate::error::Result;
use crate::output::{render_layout_table, Output};

pub fn run_layout(args: &LayoutArgs, config: &LayoutConfig, format: OutputFormat) -> Result<()> {
    let output = Output::new(format);

    let stage = data::load_stage(&args.stage)?;
    let standings = data::load_standings(args.standings.as_deref())?;
    let viewer = convert_stage(&stage, standings.as_ref())?;

    let mut config = config.clone();
    if let Some(alignment) = args.alignment {
        config.bracket_alignment = alignment.into();
    }

    let kind = viewer
        .stages
        .first()
        .map(|s| s.kind)
        .unwrap_or(BracketKind::SingleElimination);

    let (layout, matches) = if kind == BracketKind::Swiss {
        let mut matches = viewer.matches.clone();
        let layout = compute_swiss_layout(&mut matches, &config);
        (layout, matches)
    } else {
        let profile = args
            .profile
            .then(|| detect_profile(&viewer.matches))
            .flatten();
        let layout = compute_layout(&viewer.matches, &viewer.edges, kind, &config, profile);
        (layout, viewer.matches)
    };

    if output.is_json() {
        output.print_json(&layout);
    } else {
        render_layout_table(&layout, &matches);
    }

    Ok(())
}
