//! Shallow merge of a stored state snapshot over the default state.

use anyhow::{Context, Result, anyhow};
use serde_json::Value;

use crate::core::types::ApplicationState;

/// Overlay every top-level field of `stored` onto `base`.
///
/// Same-named fields are replaced wholesale; nested objects are not merged.
/// Top-level keys that `ApplicationState` does not know are dropped.
/// Fails when `stored` is not a JSON object or the merged value no longer
/// deserializes into `ApplicationState`.
pub fn shallow_merge(base: &ApplicationState, stored: Value) -> Result<ApplicationState> {
    let Value::Object(fields) = stored else {
        return Err(anyhow!("stored state is not a JSON object"));
    };
    let mut merged = serde_json::to_value(base).context("serialize base state")?;
    let target = merged
        .as_object_mut()
        .ok_or_else(|| anyhow!("base state did not serialize to an object"))?;
    for (key, value) in fields {
        target.insert(key, value);
    }
    serde_json::from_value(merged).context("deserialize merged state")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::{CrewMember, Location, UserStats};
    use serde_json::json;

    #[test]
    fn empty_object_keeps_defaults() {
        let merged = shallow_merge(&ApplicationState::default(), json!({})).expect("merge");
        assert_eq!(merged, ApplicationState::default());
    }

    #[test]
    fn partial_stats_replace_the_whole_object() {
        let merged = shallow_merge(
            &ApplicationState::default(),
            json!({ "userStats": { "pointsEarned": 50 } }),
        )
        .expect("merge");
        assert_eq!(
            merged.user_stats,
            UserStats {
                cleanups_joined: None,
                trash_collected: None,
                points_earned: Some(50),
            }
        );
        assert!(merged.crew.is_empty());
    }

    #[test]
    fn present_fields_override_and_absent_fields_keep_base() {
        let mut base = ApplicationState::default();
        base.crew.push(CrewMember {
            name: "Sam".to_string(),
            cleanup: "Malibu".to_string(),
            joined: "1/2/2026".to_string(),
        });
        let merged = shallow_merge(&base, json!({ "userLocation": { "lat": 1.5, "lng": 2.5 } }))
            .expect("merge");
        assert_eq!(merged.user_location, Some(Location { lat: 1.5, lng: 2.5 }));
        assert_eq!(merged.crew, base.crew);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let merged = shallow_merge(
            &ApplicationState::default(),
            json!({ "theme": "dark", "userStats": { "cleanupsJoined": 2 } }),
        )
        .expect("merge");
        assert_eq!(merged.user_stats.cleanups_joined, Some(2));
    }

    #[test]
    fn non_object_is_rejected() {
        let err = shallow_merge(&ApplicationState::default(), json!([1, 2])).unwrap_err();
        assert!(err.to_string().contains("not a JSON object"));
    }

    #[test]
    fn mistyped_field_is_rejected() {
        let result = shallow_merge(&ApplicationState::default(), json!({ "crew": "nobody" }));
        assert!(result.is_err());
    }
}
