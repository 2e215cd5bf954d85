use serde_json::Value;

const ADDRESS_PARTS: &[&[&str]] = &[
    &["road"],
    &["suburb", "neighbourhood"],
    &["city", "town", "village"],
    &["state"],
    &["postcode"],
    &["country"],
];

fn non_empty<'a>(value: Option<&'a Value>) -> Option<&'a str> {
    value
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

/// Picks a display label for an upstream reverse-geocoding document.
///
/// Prefers `display_name`, then `name`, then the address components joined
/// with `", "`. Returns an empty string when nothing usable is present.
pub fn build_label(document: &Value) -> String {
    if let Some(label) = non_empty(document.get("display_name")) {
        return label.to_string();
    }
    if let Some(label) = non_empty(document.get("name")) {
        return label.to_string();
    }

    let Some(address) = document.get("address") else {
        return String::new();
    };

    ADDRESS_PARTS
        .iter()
        .filter_map(|alternatives| {
            alternatives
                .iter()
                .find_map(|key| non_empty(address.get(*key)))
        })
        .collect::<Vec<_>>()
        .join(", ")
}
