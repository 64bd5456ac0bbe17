// 📂 Extract - NASA data files → raw records → entities
//
// Two sources:
// - neos.csv  (SBDB export, header row): pdes, name, diameter, pha, ...
// - cad.json  (JPL close-approach API): {"fields": [...], "data": [[...], ...]}
//
// Columns the model does not use are preserved in each record's `extra` map.

use crate::config::DataPaths;
use crate::database::NeoDatabase;
use crate::entities::{ApproachRecord, CloseApproach, NearEarthObject, NeoRecord};
use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::info;

// ============================================================================
// SOURCE COLUMNS
// ============================================================================

const NEO_DESIGNATION: &str = "pdes";
const NEO_NAME: &str = "name";
const NEO_DIAMETER: &str = "diameter";
const NEO_HAZARDOUS: &str = "pha";

const CAD_DESIGNATION: &str = "des";
const CAD_TIME: &str = "cd";
const CAD_DISTANCE: &str = "dist";
const CAD_VELOCITY: &str = "v_rel";

// ============================================================================
// DATABASE
// ============================================================================

/// Load both data files and link them into a database
pub fn load_database(paths: &DataPaths) -> Result<NeoDatabase> {
    let neos = load_neos(&paths.neos)?;
    let approaches = load_approaches(&paths.approaches)?;

    NeoDatabase::new(neos, approaches).context("Failed to link close approaches to NEOs")
}

// ============================================================================
// NEOS (CSV)
// ============================================================================

/// Load NEOs from a CSV file on disk
pub fn load_neos(path: &Path) -> Result<Vec<NearEarthObject>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open NEO file: {}", path.display()))?;
    let neos = read_neos(BufReader::new(file))?;

    info!(count = neos.len(), path = %path.display(), "loaded NEOs");
    Ok(neos)
}

/// Read NEOs from any CSV source with a header row
pub fn read_neos<R: Read>(reader: R) -> Result<Vec<NearEarthObject>> {
    let mut rdr = csv::Reader::from_reader(reader);
    let headers = rdr.headers().context("Failed to read NEO CSV header")?.clone();

    if !headers.iter().any(|h| h == NEO_DESIGNATION) {
        bail!("NEO CSV is missing the '{}' column", NEO_DESIGNATION);
    }

    let mut neos = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let line = row + 2; // header is line 1
        let record = result.with_context(|| format!("Failed to read NEO CSV line {}", line))?;

        let mut fields: HashMap<String, String> = headers
            .iter()
            .zip(record.iter())
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();

        let neo_record = NeoRecord {
            designation: fields.remove(NEO_DESIGNATION).unwrap_or_default(),
            name: fields.remove(NEO_NAME).unwrap_or_default(),
            diameter: fields.remove(NEO_DIAMETER).unwrap_or_default(),
            hazardous: fields.remove(NEO_HAZARDOUS).unwrap_or_default(),
            extra: fields,
        };

        let neo = NearEarthObject::new(neo_record)
            .with_context(|| format!("Invalid NEO on CSV line {}", line))?;
        neos.push(neo);
    }

    Ok(neos)
}

// ============================================================================
// CLOSE APPROACHES (JSON)
// ============================================================================

/// Top-level shape of the close-approach JSON file
#[derive(Debug, Deserialize)]
struct CadFile {
    fields: Vec<String>,
    #[serde(default)]
    data: Vec<Vec<serde_json::Value>>,
}

/// Load close approaches from a JSON file on disk
pub fn load_approaches(path: &Path) -> Result<Vec<CloseApproach>> {
    let file = File::open(path)
        .with_context(|| format!("Failed to open close-approach file: {}", path.display()))?;
    let approaches = read_approaches(BufReader::new(file))?;

    info!(count = approaches.len(), path = %path.display(), "loaded close approaches");
    Ok(approaches)
}

/// Read close approaches from any JSON source
pub fn read_approaches<R: Read>(reader: R) -> Result<Vec<CloseApproach>> {
    let cad: CadFile =
        serde_json::from_reader(reader).context("Failed to parse close-approach JSON")?;

    for required in [CAD_DESIGNATION, CAD_TIME, CAD_DISTANCE, CAD_VELOCITY] {
        if !cad.fields.iter().any(|f| f == required) {
            bail!("close-approach JSON is missing the '{}' field", required);
        }
    }

    let mut approaches = Vec::with_capacity(cad.data.len());

    for (index, row) in cad.data.into_iter().enumerate() {
        if row.len() != cad.fields.len() {
            bail!(
                "close-approach row {} has {} values, expected {}",
                index,
                row.len(),
                cad.fields.len()
            );
        }

        let mut fields: HashMap<String, String> = cad
            .fields
            .iter()
            .cloned()
            .zip(row.into_iter().map(value_to_string))
            .collect();

        let record = ApproachRecord {
            designation: fields.remove(CAD_DESIGNATION).unwrap_or_default(),
            time: fields.remove(CAD_TIME).unwrap_or_default(),
            distance: fields.remove(CAD_DISTANCE).unwrap_or_default(),
            velocity: fields.remove(CAD_VELOCITY).unwrap_or_default(),
            extra: fields,
        };

        let approach = CloseApproach::new(record)
            .with_context(|| format!("Invalid close approach at row {}", index))?;
        approaches.push(approach);
    }

    Ok(approaches)
}

/// JSON scalar → source-style string (null becomes empty)
fn value_to_string(value: serde_json::Value) -> String {
    match value {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s,
        other => other.to_string(),
    }
}

// ============================================================================
// TESTS
// ============================================================================
