//! CSV export for simulation hour results.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::sim::types::HourResult;

/// Schema v1 column header for CSV telemetry export.
const HEADER: &str = "hour,mode,server_kwh,flex_kwh,facility_kwh,\
                      onsite_consumption_l,onsite_blowdown_l,onsite_withdrawal_l,\
                      offsite_water_l,carbon_kg";

/// Exports simulation results to a CSV file at the given path.
///
/// Writes a header row followed by one data row per hour. Produces
/// deterministic output for identical inputs.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_csv(results: &[HourResult], path: &Path) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_csv(results, buf)
}

/// Writes simulation results as CSV to any writer.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_csv(results: &[HourResult], writer: impl Write) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);

    wtr.write_record(HEADER.split(',').map(str::trim))?;

    for r in results {
        wtr.write_record(&[
            r.hour.to_string(),
            r.mode.clone(),
            format!("{:.4}", r.server_kwh),
            format!("{:.4}", r.flex_kwh),
            format!("{:.4}", r.facility_kwh),
            format!("{:.4}", r.onsite_consumption_l),
            format!("{:.4}", r.onsite_blowdown_l),
            format!("{:.4}", r.onsite_withdrawal_l),
            format!("{:.4}", r.offsite_water_l),
            format!("{:.4}", r.carbon_kg),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
