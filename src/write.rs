// 💾 Write - Export query results as CSV or JSON
// Row shapes come from LinkedApproach::{csv_serialize, json_serialize}.

use crate::entities::{ApproachJson, LinkedApproach, CSV_FIELDS};
use anyhow::{bail, Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Csv,
    Json,
}

impl OutputFormat {
    /// Pick the format from a file extension (.csv / .json)
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());

        match extension.as_deref() {
            Some("csv") => Ok(OutputFormat::Csv),
            Some("json") => Ok(OutputFormat::Json),
            _ => bail!(
                "Unsupported output file {}: use a .csv or .json extension",
                path.display()
            ),
        }
    }
}

/// Write approaches as CSV (header row + one row per approach); returns the row count
pub fn write_to_csv<'a, I, W>(results: I, writer: W) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
    W: Write,
{
    let mut wtr = csv::Writer::from_writer(writer);
    let mut count = 0;

    for approach in results {
        wtr.serialize(approach.csv_serialize())
            .context("Failed to write CSV row")?;
        count += 1;
    }

    // An empty result still gets its header
    if count == 0 {
        wtr.write_record(CSV_FIELDS)
            .context("Failed to write CSV header")?;
    }

    wtr.flush().context("Failed to flush CSV output")?;
    Ok(count)
}

/// Write approaches as a pretty-printed JSON array; returns the element count
pub fn write_to_json<'a, I, W>(results: I, mut writer: W) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
    W: Write,
{
    let rows: Vec<ApproachJson> = results
        .into_iter()
        .map(|approach| approach.json_serialize())
        .collect();

    serde_json::to_writer_pretty(&mut writer, &rows).context("Failed to write JSON output")?;
    writeln!(writer).context("Failed to write JSON output")?;
    writer.flush().context("Failed to flush JSON output")?;

    Ok(rows.len())
}

/// Save approaches to `path`, choosing CSV or JSON by its extension
pub fn save<'a, I>(results: I, path: &Path) -> Result<usize>
where
    I: IntoIterator<Item = LinkedApproach<'a>>,
{
    let format = OutputFormat::from_path(path)?;
    let file = File::create(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let count = match format {
        OutputFormat::Csv => write_to_csv(results, writer)?,
        OutputFormat::Json => write_to_json(results, writer)?,
    };

    info!(count, path = %path.display(), "saved query results");
    Ok(count)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::NeoDatabase;
    use crate::entities::{ApproachRecord, CloseApproach, NearEarthObject, NeoRecord};

    fn create_test_database() -> NeoDatabase {
        let neos = vec![
            NearEarthObject::new(NeoRecord::new("433", "Eros", "16.84", "N")).unwrap(),
            NearEarthObject::new(NeoRecord::new("2020 AB", "", "", "Y")).unwrap(),
        ];
        let approaches = vec![
            CloseApproach::new(ApproachRecord::new("433", "2020-Jan-01 12:30", "0.25", "5.5"))
                .unwrap(),
            CloseApproach::new(ApproachRecord::new("2020 AB", "2021-Mar-15 06:05", "0.01", "12.75"))
                .unwrap(),
        ];
        NeoDatabase::new(neos, approaches).unwrap()
    }

    #[test]
    fn test_write_to_csv() {
        let db = create_test_database();
        let mut output = Vec::new();

        let count = write_to_csv(db.query(&[]), &mut output).unwrap();
        assert_eq!(count, 2);

        let text = String::from_utf8(output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec![
                "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous",
                "2020-Jan-01 12:30,0.25,5.5,433,Eros,16.84,False",
                "2021-Mar-15 06:05,0.01,12.75,2020 AB,,nan,True",
            ]
        );
    }

    #[test]
    fn test_write_to_csv_empty_has_header() {
        let mut output = Vec::new();
        let count = write_to_csv(Vec::new(), &mut output).unwrap();

        assert_eq!(count, 0);
        assert_eq!(
            String::from_utf8(output).unwrap().trim_end(),
            "datetime_utc,distance_au,velocity_km_s,designation,name,diameter_km,potentially_hazardous"
        );
    }

    #[test]
    fn test_write_to_json() {
        let db = create_test_database();
        let mut output = Vec::new();

        let count = write_to_json(db.query(&[]), &mut output).unwrap();
        assert_eq!(count, 2);

        let value: serde_json::Value = serde_json::from_slice(&output).unwrap();
        let rows = value.as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["neo"]["name"], "Eros");
        assert_eq!(rows[0]["distance_au"], 0.25);
        assert!(rows[1]["neo"]["name"].is_null());
        assert!(rows[1]["neo"]["diameter_km"].is_null());
        assert_eq!(rows[1]["neo"]["potentially_hazardous"], true);

        let parsed: Vec<ApproachJson> = serde_json::from_slice(&output).unwrap();
        assert_eq!(parsed[0].datetime_utc, "2020-Jan-01 12:30");
    }

    #[test]
    fn test_output_format_from_path() {
        assert_eq!(OutputFormat::from_path(Path::new("out.csv")).unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path(Path::new("OUT.JSON")).unwrap(), OutputFormat::Json);
        assert!(OutputFormat::from_path(Path::new("out.txt")).is_err());
        assert!(OutputFormat::from_path(Path::new("out")).is_err());
    }
}
