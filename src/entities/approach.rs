// 🛰️ CloseApproach Entity - One pass of a NEO near Earth
//
// Lifecycle:
// 1. Built from a raw record holding only the NEO's designation string
// 2. Linked once by the database (NeoId back-reference, never reassigned)
// 3. Read through LinkedApproach views, which pair it with its NEO
//
// Serialization needs the NEO, so it is only available once linked.

use super::{NearEarthObject, NeoId};
use crate::database::NeoDatabase;
use crate::error::{ModelError, ModelResult};
use crate::temporal::{cd_to_datetime, datetime_to_str};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

// ============================================================================
// RAW RECORD
// ============================================================================

/// ApproachRecord - String-typed fields from the close-approach data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ApproachRecord {
    pub designation: String,
    pub time: String,
    pub distance: String,
    pub velocity: String,

    /// Unused source fields (ignored by all logic)
    pub extra: HashMap<String, String>,
}

impl ApproachRecord {
    pub fn new(
        designation: impl Into<String>,
        time: impl Into<String>,
        distance: impl Into<String>,
        velocity: impl Into<String>,
    ) -> Self {
        ApproachRecord {
            designation: designation.into(),
            time: time.into(),
            distance: distance.into(),
            velocity: velocity.into(),
            extra: HashMap::new(),
        }
    }

    /// Builder pattern: keep an extra source field
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// CLOSE APPROACH ENTITY
// ============================================================================

#[derive(Debug, Clone)]
pub struct CloseApproach {
    /// Designation of the approaching NEO, as given in the source data
    designation: String,

    /// Time of closest approach (UTC, minute precision)
    pub time: NaiveDateTime,

    /// Nominal approach distance in astronomical units
    pub distance: f64,

    /// Relative approach velocity in km/s
    pub velocity: f64,

    neo: Option<NeoId>,
}

impl CloseApproach {
    /// Create an unlinked close approach from a raw record
    pub fn new(record: ApproachRecord) -> ModelResult<Self> {
        let time = cd_to_datetime(&record.time)?;
        let distance = parse_float("distance", &record.distance)?;
        let velocity = parse_float("velocity", &record.velocity)?;

        Ok(CloseApproach {
            designation: record.designation.trim().to_string(),
            time,
            distance,
            velocity,
            neo: None,
        })
    }

    /// Designation of the NEO this approach belongs to
    pub fn designation(&self) -> &str {
        &self.designation
    }

    /// Approach time in the source layout ("2020-Jan-01 12:30")
    pub fn time_str(&self) -> String {
        datetime_to_str(&self.time)
    }

    pub fn neo_id(&self) -> Option<NeoId> {
        self.neo
    }

    pub fn is_linked(&self) -> bool {
        self.neo.is_some()
    }

    /// Drop a link carried over from another database
    pub(crate) fn unlink(&mut self) {
        self.neo = None;
    }

    /// Set the back-reference; refuses to reassign an existing link
    pub(crate) fn link(&mut self, neo: NeoId) -> bool {
        if self.neo.is_some() {
            return false;
        }
        self.neo = Some(neo);
        true
    }

    /// "<designation>: <NEO summary>"
    pub fn fullname(&self, db: &NeoDatabase) -> ModelResult<String> {
        Ok(db.resolve(self)?.fullname())
    }

    /// Nested mapping for JSON output; fails if not linked
    pub fn json_serialize(&self, db: &NeoDatabase) -> ModelResult<ApproachJson> {
        Ok(db.resolve(self)?.json_serialize())
    }

    /// Flat mapping for CSV output; fails if not linked
    pub fn csv_serialize(&self, db: &NeoDatabase) -> ModelResult<ApproachCsv> {
        Ok(db.resolve(self)?.csv_serialize())
    }
}

impl fmt::Display for CloseApproach {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.time_str(),
            self.designation,
            self.distance,
            self.velocity
        )
    }
}

fn parse_float(field: &'static str, raw: &str) -> ModelResult<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|source| ModelError::invalid_number(field, raw, source))
}

// ============================================================================
// LINKED VIEW
// ============================================================================

/// A close approach together with its NEO
///
/// Only the database hands these out, so the pair is always consistent.
#[derive(Debug, Clone, Copy)]
pub struct LinkedApproach<'a> {
    approach: &'a CloseApproach,
    neo: &'a NearEarthObject,
}

impl<'a> LinkedApproach<'a> {
    pub(crate) fn new(approach: &'a CloseApproach, neo: &'a NearEarthObject) -> Self {
        LinkedApproach { approach, neo }
    }

    pub fn approach(&self) -> &'a CloseApproach {
        self.approach
    }

    pub fn neo(&self) -> &'a NearEarthObject {
        self.neo
    }

    /// "<designation>: <NEO summary>", embedding the NEO's Display output
    pub fn fullname(&self) -> String {
        format!("{}: {}", self.approach.designation, self.neo)
    }

    pub fn json_serialize(&self) -> ApproachJson {
        ApproachJson {
            datetime_utc: self.approach.time_str(),
            distance_au: self.approach.distance,
            velocity_km_s: self.approach.velocity,
            neo: NeoJson {
                designation: self.neo.designation.clone(),
                name: self.neo.name.clone(),
                diameter_km: known_diameter(self.neo),
                potentially_hazardous: self.neo.hazardous,
            },
        }
    }

    pub fn csv_serialize(&self) -> ApproachCsv {
        ApproachCsv {
            datetime_utc: self.approach.time_str(),
            distance_au: self.approach.distance,
            velocity_km_s: self.approach.velocity,
            designation: self.neo.designation.clone(),
            name: self.neo.name.clone().unwrap_or_default(),
            diameter_km: self.neo.diameter,
            potentially_hazardous: self.neo.hazardous,
        }
    }
}

impl Deref for LinkedApproach<'_> {
    type Target = CloseApproach;

    fn deref(&self) -> &CloseApproach {
        self.approach
    }
}

impl fmt::Display for LinkedApproach<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "At {}, '{}' approaches Earth at a distance of {:.2} au and a velocity of {:.2} km/s.",
            self.approach.time_str(),
            self.neo.fullname(),
            self.approach.distance,
            self.approach.velocity
        )
    }
}

fn known_diameter(neo: &NearEarthObject) -> Option<f64> {
    if neo.is_diameter_known() {
        Some(neo.diameter)
    } else {
        None
    }
}

// ============================================================================
// SERIALIZED SHAPES
// ============================================================================

/// JSON shape: NEO fields nested under `neo`
///
/// Unknown diameter and missing name are written as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproachJson {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub neo: NeoJson,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NeoJson {
    pub designation: String,
    pub name: Option<String>,
    pub diameter_km: Option<f64>,
    pub potentially_hazardous: bool,
}

/// CSV shape: NEO fields inlined; field order is the column order
///
/// Unknown diameter is written as `nan`, missing name as an empty field,
/// and the hazard flag as `True`/`False`.
#[derive(Debug, Clone, Serialize)]
pub struct ApproachCsv {
    pub datetime_utc: String,
    pub distance_au: f64,
    pub velocity_km_s: f64,
    pub designation: String,
    pub name: String,
    #[serde(serialize_with = "serialize_diameter")]
    pub diameter_km: f64,
    #[serde(serialize_with = "serialize_flag")]
    pub potentially_hazardous: bool,
}

/// Column names of the CSV output, in order
pub const CSV_FIELDS: [&str; 7] = [
    "datetime_utc",
    "distance_au",
    "velocity_km_s",
    "designation",
    "name",
    "diameter_km",
    "potentially_hazardous",
];

fn serialize_diameter<S: Serializer>(diameter: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if diameter.is_nan() {
        serializer.serialize_str("nan")
    } else {
        serializer.serialize_f64(*diameter)
    }
}

fn serialize_flag<S: Serializer>(flag: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(if *flag { "True" } else { "False" })
}

// ============================================================================
// TESTS
// ============================================================================
