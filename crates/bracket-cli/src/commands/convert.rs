//! Convert command implementation.

use bracket_convert::convert_stage;

use crate::cli::{ConvertArgs, OutputFormat};
use crate::data;
use crate::error::Result;
use crate::output::{render_viewer_data_table, Output};

pub fn run_convert(args: &ConvertArgs, format: OutputFormat) -> Result<()> {
    let output = Output::new(format);

    let stage = data::load_stage(&args.stage)?;
    let standings = data::load_standings(args.standings.as_deref())?;
    let viewer = convert_stage(&stage, standings.as_ref())?;

    if output.is_json() {
        output.print_json(&viewer);
    } else {
        render_viewer_data_table(&viewer);
    }

    Ok(())
}
