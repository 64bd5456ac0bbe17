// 🔎 Query Filters - Predicates as data
// Each filter compares one attribute of a linked approach against a reference value.
// A query is the conjunction of its filters.

use crate::entities::LinkedApproach;
use chrono::NaiveDate;
use std::cmp::Ordering;
use std::fmt;

// ============================================================================
// COMPARISON
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    AtLeast,
    AtMost,
}

impl Comparison {
    pub fn symbol(&self) -> &'static str {
        match self {
            Comparison::Equal => "==",
            Comparison::AtLeast => ">=",
            Comparison::AtMost => "<=",
        }
    }

    /// Incomparable values (NaN) never satisfy any comparison
    pub fn holds<T: PartialOrd>(&self, value: &T, reference: &T) -> bool {
        match (self, value.partial_cmp(reference)) {
            (_, None) => false,
            (Comparison::Equal, Some(ordering)) => ordering == Ordering::Equal,
            (Comparison::AtLeast, Some(ordering)) => ordering != Ordering::Less,
            (Comparison::AtMost, Some(ordering)) => ordering != Ordering::Greater,
        }
    }
}

// ============================================================================
// FILTER
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// Calendar day of the approach
    Date(Comparison, NaiveDate),

    /// Approach distance in au
    Distance(Comparison, f64),

    /// Approach velocity in km/s
    Velocity(Comparison, f64),

    /// NEO diameter in km (unknown diameters never match)
    Diameter(Comparison, f64),

    /// NEO hazard flag
    Hazardous(bool),
}

impl Filter {
    /// Check if a linked approach passes this filter
    pub fn matches(&self, approach: &LinkedApproach<'_>) -> bool {
        match self {
            Filter::Date(op, date) => op.holds(&approach.time.date(), date),
            Filter::Distance(op, value) => op.holds(&approach.distance, value),
            Filter::Velocity(op, value) => op.holds(&approach.velocity, value),
            Filter::Diameter(op, value) => op.holds(&approach.neo().diameter, value),
            Filter::Hazardous(flag) => approach.neo().hazardous == *flag,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Date(..) => "DateFilter",
            Filter::Distance(..) => "DistanceFilter",
            Filter::Velocity(..) => "VelocityFilter",
            Filter::Diameter(..) => "DiameterFilter",
            Filter::Hazardous(..) => "HazardousFilter",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Filter::Date(op, date) => write!(f, "{}(op={}, value={})", self.name(), op.symbol(), date),
            Filter::Distance(op, value)
            | Filter::Velocity(op, value)
            | Filter::Diameter(op, value) => {
                write!(f, "{}(op={}, value={})", self.name(), op.symbol(), value)
            }
            Filter::Hazardous(flag) => write!(f, "{}(op==, value={})", self.name(), flag),
        }
    }
}

// ============================================================================
// CRITERIA
// ============================================================================

/// User-facing query options; every bound is inclusive and optional
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Criteria {
    pub date: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub distance_min: Option<f64>,
    pub distance_max: Option<f64>,
    pub velocity_min: Option<f64>,
    pub velocity_max: Option<f64>,
    pub diameter_min: Option<f64>,
    pub diameter_max: Option<f64>,
    pub hazardous: Option<bool>,
}

/// Turn query options into the filters a database query applies
pub fn create_filters(criteria: &Criteria) -> Vec<Filter> {
    let mut filters = Vec::new();

    if let Some(date) = criteria.date {
        filters.push(Filter::Date(Comparison::Equal, date));
    }
    if let Some(date) = criteria.start_date {
        filters.push(Filter::Date(Comparison::AtLeast, date));
    }
    if let Some(date) = criteria.end_date {
        filters.push(Filter::Date(Comparison::AtMost, date));
    }
    if let Some(value) = criteria.distance_min {
        filters.push(Filter::Distance(Comparison::AtLeast, value));
    }
    if let Some(value) = criteria.distance_max {
        filters.push(Filter::Distance(Comparison::AtMost, value));
    }
    if let Some(value) = criteria.velocity_min {
        filters.push(Filter::Velocity(Comparison::AtLeast, value));
    }
    if let Some(value) = criteria.velocity_max {
        filters.push(Filter::Velocity(Comparison::AtMost, value));
    }
    if let Some(value) = criteria.diameter_min {
        filters.push(Filter::Diameter(Comparison::AtLeast, value));
    }
    if let Some(value) = criteria.diameter_max {
        filters.push(Filter::Diameter(Comparison::AtMost, value));
    }
    if let Some(flag) = criteria.hazardous {
        filters.push(Filter::Hazardous(flag));
    }

    filters
}

/// Cap an iterator at `n` items; `None` or `Some(0)` leaves it unbounded
pub fn limit<I: Iterator>(iter: I, n: Option<usize>) -> std::iter::Take<I> {
    match n {
        None | Some(0) => iter.take(usize::MAX),
        Some(n) => iter.take(n),
    }
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
            NearEarthObject::new(NeoRecord::new("99942", "Apophis", "0.37", "Y")).unwrap(),
            NearEarthObject::new(NeoRecord::new("2020 AB", "", "", "N")).unwrap(),
        ];
        let approaches = [
            ("433", "2020-Jan-01 00:00", "0.31", "5.58"),
            ("99942", "2020-Jan-01 23:59", "0.0003", "7.42"),
            ("2020 AB", "2020-Jan-02 08:15", "0.04", "11.2"),
            ("433", "2020-Mar-10 12:18", "0.15", "6.1"),
        ]
        .into_iter()
        .map(|(d, t, dist, v)| CloseApproach::new(ApproachRecord::new(d, t, dist, v)).unwrap())
        .collect();

        NeoDatabase::new(neos, approaches).unwrap()
    }

    fn run(db: &NeoDatabase, criteria: Criteria) -> Vec<String> {
        let filters = create_filters(&criteria);
        db.query(&filters)
            .map(|a| format!("{} {}", a.designation(), a.time_str()))
            .collect()
    }

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_comparison_with_nan() {
        assert!(!Comparison::Equal.holds(&f64::NAN, &1.0));
        assert!(!Comparison::AtLeast.holds(&f64::NAN, &0.0));
        assert!(!Comparison::AtMost.holds(&f64::NAN, &100.0));
        assert!(Comparison::AtLeast.holds(&1.0, &1.0));
        assert!(Comparison::AtMost.holds(&1.0, &1.0));
    }

    #[test]
    fn test_no_criteria_no_filters() {
        assert!(create_filters(&Criteria::default()).is_empty());
    }

    #[test]
    fn test_date_matches_whole_day() {
        let db = create_test_database();
        let results = run(
            &db,
            Criteria {
                date: Some(day(2020, 1, 1)),
                ..Criteria::default()
            },
        );
        assert_eq!(results, vec!["433 2020-Jan-01 00:00", "99942 2020-Jan-01 23:59"]);
    }

    #[test]
    fn test_date_range_inclusive() {
        let db = create_test_database();
        let results = run(
            &db,
            Criteria {
                start_date: Some(day(2020, 1, 2)),
                end_date: Some(day(2020, 3, 10)),
                ..Criteria::default()
            },
        );
        assert_eq!(results, vec!["2020 AB 2020-Jan-02 08:15", "433 2020-Mar-10 12:18"]);
    }

    #[test]
    fn test_unknown_diameter_never_matches() {
        let db = create_test_database();
        let results = run(
            &db,
            Criteria {
                diameter_min: Some(0.0),
                ..Criteria::default()
            },
        );
        assert!(results.iter().all(|r| !r.starts_with("2020 AB")));
        assert_eq!(results.len(), 3);

        let small = run(
            &db,
            Criteria {
                diameter_max: Some(1.0),
                ..Criteria::default()
            },
        );
        assert_eq!(small, vec!["99942 2020-Jan-01 23:59"]);
    }

    #[test]
    fn test_hazardous_filter() {
        let db = create_test_database();

        let hazardous = run(
            &db,
            Criteria {
                hazardous: Some(true),
                ..Criteria::default()
            },
        );
        assert_eq!(hazardous, vec!["99942 2020-Jan-01 23:59"]);

        let safe = run(
            &db,
            Criteria {
                hazardous: Some(false),
                ..Criteria::default()
            },
        );
        assert_eq!(safe.len(), 3);
    }

    #[test]
    fn test_velocity_and_distance_bounds() {
        let db = create_test_database();
        let results = run(
            &db,
            Criteria {
                distance_min: Some(0.04),
                distance_max: Some(0.2),
                velocity_max: Some(7.0),
                ..Criteria::default()
            },
        );
        assert_eq!(results, vec!["433 2020-Mar-10 12:18"]);
    }

    #[test]
    fn test_limit() {
        let items = [1, 2, 3, 4, 5];

        assert_eq!(limit(items.iter(), Some(2)).count(), 2);
        assert_eq!(limit(items.iter(), Some(0)).count(), 5);
        assert_eq!(limit(items.iter(), None).count(), 5);
        assert_eq!(limit(items.iter(), Some(10)).count(), 5);
    }

    #[test]
    fn test_filter_display() {
        let filter = Filter::Distance(Comparison::AtLeast, 0.1);
        assert_eq!(filter.to_string(), "DistanceFilter(op=>=, value=0.1)");

        let filter = Filter::Date(Comparison::Equal, day(2020, 1, 1));
        assert_eq!(filter.to_string(), "DateFilter(op===, value=2020-01-01)");
    }
}
