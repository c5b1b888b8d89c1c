//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::value_objects::{CityQuery, GeoLocation, HistoryGranularity, MAX_QUESTION_LENGTH, Question};
use proptest::prelude::*;

// ============================================================================
// GeoLocation Property Tests
// ============================================================================

mod geo_location_tests {
    use super::*;

    proptest! {
        #[test]
        fn valid_coordinates_create_location(
            lat in -90.0f64..=90.0f64,
            lon in -180.0f64..=180.0f64
        ) {
            let result = GeoLocation::new(lat, lon);
            prop_assert!(result.is_ok());

            let loc = result.unwrap();
            prop_assert!((loc.latitude() - lat).abs() < f64::EPSILON);
            prop_assert!((loc.longitude() - lon).abs() < f64::EPSILON);
        }

        #[test]
        fn invalid_latitude_rejected(
            lat in prop_oneof![
                (-1000.0f64..-90.1f64),
                (90.1f64..1000.0f64)
            ],
            lon in -180.0f64..=180.0f64
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }

        #[test]
        fn invalid_longitude_rejected(
            lat in -90.0f64..=90.0f64,
            lon in prop_oneof![
                (-1000.0f64..-180.1f64),
                (180.1f64..1000.0f64)
            ]
        ) {
            prop_assert!(GeoLocation::new(lat, lon).is_err());
        }
    }
}

// ============================================================================
// Question Property Tests
// ============================================================================

mod question_tests {
    use super::*;

    proptest! {
        #[test]
        fn question_is_always_trimmed(text in "\\s{0,3}[a-zA-Z?]{1,50}\\s{0,3}") {
            let q = Question::new(text.clone()).unwrap();
            prop_assert_eq!(q.as_str(), text.trim());
        }

        #[test]
        fn whitespace_only_rejected(text in "\\s{0,20}") {
            prop_assert!(Question::new(text).is_err());
        }

        #[test]
        fn accepted_questions_respect_length_bound(len in 1usize..5000) {
            let result = Question::new("x".repeat(len));
            prop_assert_eq!(result.is_ok(), len <= MAX_QUESTION_LENGTH);
        }
    }
}

// ============================================================================
// CityQuery Property Tests
// ============================================================================

mod city_query_tests {
    use super::*;

    proptest! {
        #[test]
        fn query_string_starts_with_city(
            city in "[A-Za-z][A-Za-z ]{0,20}[A-Za-z]",
            state in proptest::option::of("[A-Z]{2}"),
            country in proptest::option::of("[A-Z]{2}")
        ) {
            let query = CityQuery::new(city.clone(), state.clone(), country.clone()).unwrap();
            let rendered = query.to_query_string();
            let parts: Vec<&str> = rendered.split(',').collect();

            prop_assert_eq!(parts[0], city.as_str());
            let expected_parts = 1 + usize::from(state.is_some()) + usize::from(country.is_some());
            prop_assert_eq!(parts.len(), expected_parts);
        }
    }
}

// ============================================================================
// HistoryGranularity Property Tests
// ============================================================================

mod history_granularity_tests {
    use super::*;

    proptest! {
        #[test]
        fn clamped_count_is_within_bounds(requested in any::<i64>()) {
            for granularity in [HistoryGranularity::Hour, HistoryGranularity::Day] {
                let count = granularity.clamp_count(requested);
                prop_assert!(count >= 1);
                prop_assert!(count <= granularity.max_count());
            }
        }
    }
}
