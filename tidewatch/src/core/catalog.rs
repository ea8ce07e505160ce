//! Hard-coded catalog of cleanup sites.

use crate::core::types::{Cleanup, Location};

/// All scheduled cleanups, ordered by id.
pub fn cleanup_catalog() -> Vec<Cleanup> {
    vec![
        cleanup(
            1,
            "Venice Beach",
            33.985,
            -118.4695,
            "2026-11-07",
            "9:00 AM",
            "Heal the Bay",
            "Boardwalk and breakwater sweep, gloves and bags provided.",
        ),
        cleanup(
            2,
            "Santa Monica Pier",
            34.0083,
            -118.4988,
            "2026-11-14",
            "8:30 AM",
            "Surfrider LA",
            "Under-pier microplastics survey followed by a shoreline pickup.",
        ),
        cleanup(
            3,
            "Malibu Lagoon",
            34.0326,
            -118.6822,
            "2026-11-21",
            "10:00 AM",
            "Malibu Coast Keepers",
            "Lagoon edge cleanup; wear closed shoes.",
        ),
        cleanup(
            4,
            "Manhattan Beach",
            33.8847,
            -118.4109,
            "2026-12-05",
            "9:30 AM",
            "South Bay Stewards",
            "Family-friendly cleanup with a sorting station for recyclables.",
        ),
        cleanup(
            5,
            "Long Beach Shoreline",
            33.7623,
            -118.1894,
            "2026-12-12",
            "8:00 AM",
            "Port Tide Crew",
            "Storm drain outflow cleanup after the first winter rains.",
        ),
    ]
}

/// Find a cleanup by name, ignoring ASCII case and surrounding whitespace.
pub fn find_cleanup<'a>(catalog: &'a [Cleanup], name: &str) -> Option<&'a Cleanup> {
    let name = name.trim();
    catalog
        .iter()
        .find(|cleanup| cleanup.name.eq_ignore_ascii_case(name))
}

#[allow(clippy::too_many_arguments)]
fn cleanup(
    id: u32,
    name: &str,
    lat: f64,
    lng: f64,
    date: &str,
    time: &str,
    organizer: &str,
    description: &str,
) -> Cleanup {
    Cleanup {
        id,
        name: name.to_string(),
        location: Location { lat, lng },
        date: date.to_string(),
        time: time.to_string(),
        organizer: organizer.to_string(),
        description: description.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_unique_and_ordered() {
        let catalog = cleanup_catalog();
        let ids: Vec<u32> = catalog.iter().map(|cleanup| cleanup.id).collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();
        sorted.dedup();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn find_is_case_insensitive() {
        let catalog = cleanup_catalog();
        let found = find_cleanup(&catalog, "  venice beach ").expect("venice");
        assert_eq!(found.id, 1);
        assert!(find_cleanup(&catalog, "Atlantis").is_none());
    }
}
