// ☄️ NearEarthObject Entity - Identity + physical attributes
//
// "Designation is IDENTITY (never empty, never changes), everything else is a VALUE"
//
// Quirks of the NASA data handled here:
// - Missing names → None (never "")
// - Unknown diameters → NaN (never 0.0)
// - Hazard flag is the literal "Y", anything else is false

use super::ApproachId;
use crate::error::{ModelError, ModelResult};
use std::collections::HashMap;
use std::fmt;

// ============================================================================
// RAW RECORD
// ============================================================================

/// NeoRecord - String-typed fields as they come out of the source file
///
/// Columns the model does not use are kept in `extra` and ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NeoRecord {
    pub designation: String,
    pub name: String,
    pub diameter: String,
    pub hazardous: String,

    /// Unused source columns (ignored by all logic)
    pub extra: HashMap<String, String>,
}

impl NeoRecord {
    pub fn new(
        designation: impl Into<String>,
        name: impl Into<String>,
        diameter: impl Into<String>,
        hazardous: impl Into<String>,
    ) -> Self {
        NeoRecord {
            designation: designation.into(),
            name: name.into(),
            diameter: diameter.into(),
            hazardous: hazardous.into(),
            extra: HashMap::new(),
        }
    }

    /// Builder pattern: keep an extra source column
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

// ============================================================================
// NEO ENTITY
// ============================================================================

/// A near-Earth object
///
/// `approaches` is empty on construction; the database resets and fills it
/// while linking and nothing touches it afterwards.
#[derive(Debug, Clone)]
pub struct NearEarthObject {
    /// Primary designation (unique, never empty)
    pub designation: String,

    /// IAU name, if the object has one
    pub name: Option<String>,

    /// Diameter in kilometers; NaN when unknown
    pub diameter: f64,

    /// NASA "potentially hazardous" flag
    pub hazardous: bool,

    approaches: Vec<ApproachId>,
}

impl NearEarthObject {
    /// Create a NEO from a raw record, normalizing the data set's quirks
    pub fn new(record: NeoRecord) -> ModelResult<Self> {
        let designation = record.designation.trim().to_string();
        if designation.is_empty() {
            return Err(ModelError::EmptyDesignation);
        }

        let name = if record.name.trim().is_empty() {
            None
        } else {
            Some(record.name.trim().to_string())
        };

        let diameter = parse_optional_float("diameter", &record.diameter)?;

        Ok(NearEarthObject {
            designation,
            name,
            diameter,
            hazardous: record.hazardous == "Y",
            approaches: Vec::new(),
        })
    }

    /// "<designation> (<name>)", or just the designation for unnamed objects
    pub fn fullname(&self) -> String {
        match &self.name {
            Some(name) => format!("{} ({})", self.designation, name),
            None => self.designation.clone(),
        }
    }

    /// False when the diameter is the NaN "unknown" sentinel
    pub fn is_diameter_known(&self) -> bool {
        !self.diameter.is_nan()
    }

    /// Indices of this NEO's close approaches, in load order
    pub fn approach_ids(&self) -> &[ApproachId] {
        &self.approaches
    }

    pub fn approach_count(&self) -> usize {
        self.approaches.len()
    }

    /// Forget approaches recorded by another database
    pub(crate) fn clear_approaches(&mut self) {
        self.approaches.clear();
    }

    /// Append an approach; the same approach is never recorded twice
    pub(crate) fn add_approach(&mut self, id: ApproachId) -> bool {
        if self.approaches.contains(&id) {
            return false;
        }
        self.approaches.push(id);
        true
    }
}

impl fmt::Display for NearEarthObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hazard = if self.hazardous { "is" } else { "is not" };
        if self.is_diameter_known() {
            write!(
                f,
                "NEO {} has a diameter of {:.3} km and {} potentially hazardous.",
                self.fullname(),
                self.diameter,
                hazard
            )
        } else {
            write!(
                f,
                "NEO {} has an unknown diameter and {} potentially hazardous.",
                self.fullname(),
                hazard
            )
        }
    }
}

/// Empty string → NaN, otherwise a float or a conversion error
fn parse_optional_float(field: &'static str, raw: &str) -> ModelResult<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|source| ModelError::invalid_number(field, raw, source))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eros() {
        let neo = NearEarthObject::new(NeoRecord::new("433", "Eros", "16.84", "N")).unwrap();

        assert_eq!(neo.designation, "433");
        assert_eq!(neo.name.as_deref(), Some("Eros"));
        assert_eq!(neo.diameter, 16.84);
        assert!(!neo.hazardous);
        assert_eq!(neo.fullname(), "433 (Eros)");
        assert_eq!(neo.approach_count(), 0);
    }

    #[test]
    fn test_missing_name_and_diameter() {
        let neo = NearEarthObject::new(NeoRecord::new("2020 AB", "", "", "Y")).unwrap();

        assert!(neo.name.is_none(), "Empty name should normalize to None");
        assert!(neo.diameter.is_nan(), "Empty diameter should be NaN");
        assert!(!neo.is_diameter_known());
        assert!(neo.hazardous);
        assert_eq!(neo.fullname(), "2020 AB");
    }

    #[test]
    fn test_hazardous_only_exact_y() {
        for (raw, expected) in [
            ("Y", true),
            ("N", false),
            ("y", false),
            ("", false),
            ("Yes", false),
            ("true", false),
        ] {
            let neo = NearEarthObject::new(NeoRecord::new("1", "", "", raw)).unwrap();
            assert_eq!(neo.hazardous, expected, "hazardous input {:?}", raw);
        }
    }

    #[test]
    fn test_zero_diameter_is_known() {
        let neo = NearEarthObject::new(NeoRecord::new("1", "", "0", "N")).unwrap();
        assert!(neo.is_diameter_known());
        assert_eq!(neo.diameter, 0.0);
    }

    #[test]
    fn test_bad_diameter_is_conversion_error() {
        let err = NearEarthObject::new(NeoRecord::new("1", "", "big", "N")).unwrap_err();
        assert!(matches!(
            err,
            ModelError::InvalidNumber { field: "diameter", .. }
        ));
    }

    #[test]
    fn test_empty_designation_rejected() {
        let err = NearEarthObject::new(NeoRecord::new("  ", "Eros", "1", "N")).unwrap_err();
        assert!(matches!(err, ModelError::EmptyDesignation));
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let record = NeoRecord::new("433", "Eros", "16.84", "N")
            .with_extra("spkid", "2000433")
            .with_extra("H", "10.4");
        let neo = NearEarthObject::new(record).unwrap();
        assert_eq!(neo.fullname(), "433 (Eros)");
    }

    #[test]
    fn test_display_summary() {
        let eros = NearEarthObject::new(NeoRecord::new("433", "Eros", "16.84", "N")).unwrap();
        assert_eq!(
            eros.to_string(),
            "NEO 433 (Eros) has a diameter of 16.840 km and is not potentially hazardous."
        );

        let unknown = NearEarthObject::new(NeoRecord::new("2020 AB", "", "", "Y")).unwrap();
        assert_eq!(
            unknown.to_string(),
            "NEO 2020 AB has an unknown diameter and is potentially hazardous."
        );
    }

    #[test]
    fn test_add_approach_no_duplicates() {
        let mut neo = NearEarthObject::new(NeoRecord::new("433", "Eros", "", "N")).unwrap();

        assert!(neo.add_approach(ApproachId(3)));
        assert!(neo.add_approach(ApproachId(7)));
        assert!(!neo.add_approach(ApproachId(3)));

        assert_eq!(neo.approach_ids(), &[ApproachId(3), ApproachId(7)]);

        neo.clear_approaches();
        assert_eq!(neo.approach_count(), 0);
    }
}
