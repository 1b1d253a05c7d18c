use poise::serenity_prelude as serenity;

/// Pulls the free-text custom status out of a presence, lowercased.
///
/// Activities are scanned in gateway order and only the custom-status kind
/// is considered. The text lives in `state` for statuses set through the
/// client, with `name` as a fallback used by some platforms. A custom
/// entry with no text in either field does not stop the scan.
pub fn custom_status_text(presence: &serenity::Presence) -> Option<String> {
    for activity in &presence.activities {
        if activity.kind != serenity::ActivityType::Custom {
            continue;
        }
        let text = activity
            .state
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| Some(activity.name.as_str()).filter(|s| !s.is_empty()));
        if let Some(text) = text {
            return Some(text.to_lowercase());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn presence(activities: serde_json::Value) -> serenity::Presence {
        serde_json::from_value(json!({
            "user": { "id": "1" },
            "status": "online",
            "activities": activities,
        }))
        .expect("presence fixture")
    }

    fn custom(name: &str, state: Option<&str>) -> serde_json::Value {
        json!({ "type": 4, "name": name, "state": state, "created_at": 0 })
    }

    fn game(name: &str) -> serde_json::Value {
        json!({ "type": 0, "name": name, "created_at": 0 })
    }

    #[test]
    fn no_activities_means_no_status() {
        assert_eq!(custom_status_text(&presence(json!([]))), None);
    }

    #[test]
    fn non_custom_activities_are_ignored() {
        let p = presence(json!([game("Factorio")]));
        assert_eq!(custom_status_text(&p), None);
    }

    #[test]
    fn state_text_is_returned_lowercased() {
        let p = presence(json!([custom("Custom Status", Some("Supporting The Project 🩷"))]));
        assert_eq!(
            custom_status_text(&p).as_deref(),
            Some("supporting the project 🩷")
        );
    }

    #[test]
    fn state_is_preferred_over_name() {
        let p = presence(json!([custom("Fallback Name", Some("real status"))]));
        assert_eq!(custom_status_text(&p).as_deref(), Some("real status"));
    }

    #[test]
    fn name_is_used_when_state_is_absent() {
        let p = presence(json!([custom("From Name", None)]));
        assert_eq!(custom_status_text(&p).as_deref(), Some("from name"));
    }

    #[test]
    fn empty_custom_entry_does_not_mask_a_later_one() {
        let p = presence(json!([custom("", Some("")), custom("second", None)]));
        assert_eq!(custom_status_text(&p).as_deref(), Some("second"));
    }

    #[test]
    fn first_textual_custom_entry_wins() {
        let p = presence(json!([
            game("Factorio"),
            custom("", Some("first")),
            custom("", Some("second")),
        ]));
        assert_eq!(custom_status_text(&p).as_deref(), Some("first"));
    }
}
