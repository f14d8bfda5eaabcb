use std::path::Path;

use anyhow::{Context, Result, bail};

use super::table::{Column, Table};

// ---------------------------------------------------------------------------
// CSV reading
// ---------------------------------------------------------------------------

/// Read a delimited-text file into a [`Table`].
///
/// Layout: a header row of column names followed by all-numeric rows. Any
/// header set is accepted; no schema is enforced here, a column mismatch
/// with the selected model surfaces later at prediction time.
pub fn read_csv(path: &Path) -> Result<Table> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    if headers.is_empty() {
        bail!("CSV has no columns");
    }

    let mut values: Vec<Vec<f64>> = vec![Vec::new(); headers.len()];

    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        if record.len() != headers.len() {
            bail!(
                "CSV row {row_no}: has {} fields, header has {}",
                record.len(),
                headers.len()
            );
        }
        for (col_idx, cell) in record.iter().enumerate() {
            let parsed: f64 = cell.trim().parse().with_context(|| {
                format!(
                    "Row {row_no}, column '{}': '{cell}' is not a number",
                    headers[col_idx]
                )
            })?;
            values[col_idx].push(parsed);
        }
    }

    let columns = headers
        .into_iter()
        .zip(values)
        .map(|(name, vals)| Column::new(name, vals))
        .collect::<Vec<_>>();

    let mut table = Table::new();
    for col in columns {
        // Lengths are equal by construction.
        table.push_column(col).context("assembling table")?;
    }
    Ok(table)
}

// ---------------------------------------------------------------------------
// CSV writing
// ---------------------------------------------------------------------------

/// Write a [`Table`] to a CSV file: header row, then one record per row,
/// preserving column and row order.
pub fn write_csv(path: &Path, table: &Table) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;

    writer
        .write_record(table.column_names())
        .context("writing CSV header")?;

    for row in 0..table.n_rows() {
        let record: Vec<String> = table
            .columns()
            .iter()
            .map(|c| format_value(c.values[row]))
            .collect();
        writer
            .write_record(&record)
            .with_context(|| format!("writing CSV row {row}"))?;
    }

    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Render a value without float noise: integral values print bare.
fn format_value(v: f64) -> String {
    if v.fract() == 0.0 && v.abs() < 1e12 {
        format!("{v:.0}")
    } else {
        format!("{v}")
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::io::Write as _;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut f = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn reads_headers_and_numeric_rows() {
        let f = write_temp("alcohol,pH,quality\n9.4,3.3,5\n12.8,3.1,7\n");
        let table = read_csv(f.path()).unwrap();

        let names: Vec<&str> = table.column_names().collect();
        assert_eq!(names, vec!["alcohol", "pH", "quality"]);
        assert_eq!(table.n_rows(), 2);
        assert_relative_eq!(table.column("alcohol").unwrap().values[1], 12.8);
        assert_relative_eq!(table.column("quality").unwrap().values[0], 5.0);
    }

    #[test]
    fn rejects_non_numeric_cells() {
        let f = write_temp("alcohol,pH\n9.4,acidic\n");
        let err = read_csv(f.path()).unwrap_err();
        assert!(err.to_string().contains("pH"), "error was: {err:#}");
    }

    #[test]
    fn rejects_ragged_rows() {
        // The csv crate itself flags the length mismatch.
        let f = write_temp("a,b\n1.0\n");
        assert!(read_csv(f.path()).is_err());
    }

    #[test]
    fn round_trip_preserves_shape_and_order() {
        let f = write_temp("b,a\n2,1\n4,3\n6,5\n");
        let table = read_csv(f.path()).unwrap();

        let out = tempfile::Builder::new()
            .suffix(".csv")
            .tempfile()
            .unwrap();
        write_csv(out.path(), &table).unwrap();
        let reread = read_csv(out.path()).unwrap();

        assert_eq!(reread, table);
        let names: Vec<&str> = reread.column_names().collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(reread.column("a").unwrap().values, vec![1.0, 3.0, 5.0]);
    }
}
