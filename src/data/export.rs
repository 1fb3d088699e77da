use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

use super::model::{Column, ContactTable};

/// Write the table as CSV: a header of column names, then one record per row.
/// Lists are joined with `", "`; missing numbers become empty cells.
pub fn write_csv<W: Write>(table: &ContactTable, writer: W) -> Result<()> {
    let mut csv = csv::Writer::from_writer(writer);
    csv.write_record(Column::ALL.iter().map(|c| c.name()))
        .context("writing CSV header")?;

    for (i, row) in table.iter().enumerate() {
        csv.write_record(Column::ALL.iter().map(|&c| row.display(c)))
            .with_context(|| format!("writing CSV row {i}"))?;
    }
    csv.flush().context("flushing CSV")?;
    Ok(())
}

pub fn export_csv(table: &ContactTable, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    write_csv(table, file)?;
    log::info!("exported {} contacts to {}", table.len(), path.display());
    Ok(())
}
