//! Project identifiers
//!
//! IDs have the form `FMR-YYYY-NNNN`: the submission year and a four-digit
//! suffix drawn at random. Uniqueness is checked by the caller against the
//! repository.

use std::sync::OnceLock;

use rand::Rng;
use regex::Regex;

/// Prefix shared by every project ID
pub const ID_PREFIX: &str = "FMR";

fn id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^FMR-(\d{4})-(\d{4})$").unwrap())
}

/// Format an ID from its parts
pub fn format_project_id(year: i32, serial: u16) -> String {
    format!("{}-{:04}-{:04}", ID_PREFIX, year, serial)
}

/// Check that `id` has the `FMR-YYYY-NNNN` shape
pub fn is_valid_project_id(id: &str) -> bool {
    id_regex().is_match(id)
}

/// Year component of a well-formed ID
pub fn project_id_year(id: &str) -> Option<i32> {
    id_regex()
        .captures(id)
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse().ok())
}

/// Draw a candidate ID for `year` with a suffix in 0001..=9999
pub fn random_project_id<R: Rng>(year: i32, rng: &mut R) -> String {
    format_project_id(year, rng.random_range(1..=9999))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_pads_serial() {
        assert_eq!(format_project_id(2026, 7), "FMR-2026-0007");
        assert_eq!(format_project_id(2026, 1234), "FMR-2026-1234");
    }

    #[test]
    fn test_is_valid_project_id() {
        assert!(is_valid_project_id("FMR-2026-0001"));
        assert!(!is_valid_project_id("FMR-26-0001"));
        assert!(!is_valid_project_id("FMR-2026-001"));
        assert!(!is_valid_project_id("fmr-2026-0001"));
        assert!(!is_valid_project_id("FMR-2026-0001-x"));
    }

    #[test]
    fn test_project_id_year() {
        assert_eq!(project_id_year("FMR-2025-0420"), Some(2025));
        assert_eq!(project_id_year("nope"), None);
    }

    #[test]
    fn test_random_ids_are_well_formed() {
        let mut rng = rand::rng();
        for _ in 0..200 {
            let id = random_project_id(2026, &mut rng);
            assert!(is_valid_project_id(&id), "{}", id);
            assert_ne!(id, "FMR-2026-0000");
        }
    }
}
