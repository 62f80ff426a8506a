use std::io::Write;

use crate::{errors::TimelapseError, timeline::DailyCountMatrix};

/// Writes the matrix as CSV: a `date` column followed by one column per entity.
pub fn write_matrix_csv<W: Write>(writer: W, matrix: &DailyCountMatrix) -> Result<(), TimelapseError> {
    let mut writer = csv::Writer::from_writer(writer);

    let mut header = Vec::with_capacity(matrix.entities().len() + 1);
    header.push("date".to_string());
    header.extend(matrix.entities().iter().cloned());
    writer.write_record(&header)?;

    for (date, row) in matrix.dates().iter().zip(matrix.rows()) {
        let mut record = Vec::with_capacity(row.len() + 1);
        record.push(date.format("%Y-%m-%d").to_string());
        record.extend(row.iter().map(|v| v.to_string()));
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}
