use std::io::Write;

use serde::Serialize;

use crate::error::Result;
use crate::planner::{ComparisonTable, Evaluation};

/// Write the full evaluation as pretty-printed JSON.
pub fn write_json<W: Write>(evaluation: &Evaluation, mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, evaluation)?;
    writeln!(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct ComparisonCsvRow {
    macro_name: &'static str,
    target_g: f64,
    exchanges_g: f64,
    difference_g: f64,
    percent_achieved: Option<f64>,
}

/// Write the comparison table as CSV with a header row.
pub fn write_comparison_csv<W: Write>(table: &ComparisonTable, writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);

    for row in &table.rows {
        wtr.serialize(ComparisonCsvRow {
            macro_name: row.nutrient.label(),
            target_g: row.target_g,
            exchanges_g: row.tallied_g,
            difference_g: row.difference_g,
            percent_achieved: row.percent_achieved,
        })?;
    }

    wtr.flush()?;
    Ok(())
}
