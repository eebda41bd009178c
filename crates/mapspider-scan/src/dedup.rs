//! Collapse results collected across overlapping search circles.

use std::collections::HashSet;

use mapspider_places::Place;

/// Keeps the first occurrence of each place ID, preserving input order.
///
/// Overlap between sibling search circles is by design, so the same place
/// routinely arrives from several regions; the earliest payload wins.
/// Records with a missing or empty ID are never merged with each other —
/// there is no evidence two ID-less records describe the same place.
#[must_use]
pub fn dedup_places(places: Vec<Place>) -> Vec<Place> {
    let mut seen: HashSet<String> = HashSet::with_capacity(places.len());
    places
        .into_iter()
        .filter(|place| match place.id.as_deref() {
            Some(id) if !id.is_empty() => seen.insert(id.to_owned()),
            _ => true,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: Option<&str>) -> Place {
        serde_json::from_value(serde_json::json!({ "id": id })).unwrap()
    }

    fn ids(places: &[Place]) -> Vec<Option<&str>> {
        places.iter().map(|p| p.id.as_deref()).collect()
    }

    #[test]
    fn keeps_first_occurrence_in_order() {
        let input = vec![place(Some("1")), place(Some("1")), place(Some("2"))];
        let output = dedup_places(input);
        assert_eq!(ids(&output), vec![Some("1"), Some("2")]);
    }

    #[test]
    fn is_idempotent() {
        let input = vec![
            place(Some("a")),
            place(Some("b")),
            place(Some("a")),
            place(None),
        ];
        let once = dedup_places(input);
        let twice = dedup_places(once.clone());
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn never_merges_idless_records() {
        let input = vec![place(None), place(None), place(Some("")), place(Some(""))];
        let output = dedup_places(input);
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert!(dedup_places(Vec::new()).is_empty());
    }
}
