use super::OptionTable;
use crate::model::{AttributeDescriptor, AttributeValue, CustomAttribute};

pub const LABEL_DELIMITER: &str = ", ";

/// Best display text for a custom attribute. Never fails; falls back to the raw value.
pub fn resolve_label(attribute: &CustomAttribute, table: &OptionTable) -> String {
    match attribute {
        CustomAttribute::Plain(text) => text.clone(),
        CustomAttribute::Described(descriptor) => resolve_descriptor(descriptor, table),
    }
}

fn resolve_descriptor(descriptor: &AttributeDescriptor, table: &OptionTable) -> String {
    if let Some(label) = descriptor.label.as_deref().filter(|l| !l.is_empty()) {
        return label.to_string();
    }

    let code = descriptor.attribute_code.as_str();
    let label = match &descriptor.value {
        AttributeValue::List(values) => values
            .iter()
            .map(|value| table.option_label(code, value).unwrap_or(value.as_str()))
            .collect::<Vec<_>>()
            .join(LABEL_DELIMITER),
        AttributeValue::Object(map) => match map.get("file") {
            Some(file) if !table.has_code(code) => file.clone(),
            _ => map
                .values()
                .map(String::as_str)
                .collect::<Vec<_>>()
                .join(LABEL_DELIMITER),
        },
        AttributeValue::Scalar(value) => table
            .option_label(code, value)
            .map(str::to_string)
            .unwrap_or_default(),
    };

    if label.is_empty() {
        descriptor.value.raw_text()
    } else {
        label
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeOption;
    use std::collections::BTreeMap;

    fn described(code: &str, value: AttributeValue, label: Option<&str>) -> CustomAttribute {
        CustomAttribute::Described(AttributeDescriptor {
            attribute_code: code.to_string(),
            value,
            label: label.map(str::to_string),
        })
    }

    fn table() -> OptionTable {
        OptionTable::new().with_options(
            "color",
            vec![
                AttributeOption::new("red", "Red"),
                AttributeOption::new("blue", "Blue"),
            ],
        )
    }

    #[test]
    fn plain_string_is_returned_as_is() {
        let attr = CustomAttribute::Plain("Back door".into());
        assert_eq!(resolve_label(&attr, &table()), "Back door");
    }

    #[test]
    fn explicit_label_wins() {
        let attr = described("color", AttributeValue::Scalar("red".into()), Some("Crimson"));
        assert_eq!(resolve_label(&attr, &table()), "Crimson");
    }

    #[test]
    fn empty_label_is_ignored() {
        let attr = described("color", AttributeValue::Scalar("red".into()), Some(""));
        assert_eq!(resolve_label(&attr, &table()), "Red");
    }

    #[test]
    fn list_values_join_option_labels() {
        let attr = described(
            "color",
            AttributeValue::List(vec!["red".into(), "blue".into()]),
            None,
        );
        assert_eq!(resolve_label(&attr, &table()), "Red, Blue");
    }

    #[test]
    fn list_values_fall_back_to_raw_elements() {
        let attr = described(
            "color",
            AttributeValue::List(vec!["red".into(), "green".into()]),
            None,
        );
        assert_eq!(resolve_label(&attr, &table()), "Red, green");
    }

    #[test]
    fn object_values_are_joined() {
        let mut map = BTreeMap::new();
        map.insert("a".to_string(), "North".to_string());
        map.insert("b".to_string(), "Wing".to_string());
        let attr = described("color", AttributeValue::Object(map), None);
        assert_eq!(resolve_label(&attr, &table()), "North, Wing");
    }

    #[test]
    fn file_object_without_options_returns_file() {
        let mut map = BTreeMap::new();
        map.insert("file".to_string(), "proof.pdf".to_string());
        map.insert("size".to_string(), "1024".to_string());
        let attr = described("proof", AttributeValue::Object(map), None);
        assert_eq!(resolve_label(&attr, &table()), "proof.pdf");
    }

    #[test]
    fn scalar_uses_option_label() {
        let attr = described("color", AttributeValue::Scalar("blue".into()), None);
        assert_eq!(resolve_label(&attr, &table()), "Blue");
    }

    #[test]
    fn scalar_without_option_falls_back_to_raw() {
        let attr = described("floor", AttributeValue::Scalar("3".into()), None);
        assert_eq!(resolve_label(&attr, &table()), "3");
    }

    fn from_json(json: &str) -> CustomAttribute {
        serde_json::from_str(json).unwrap()
    }

    fn floors() -> OptionTable {
        OptionTable::new().with_options(
            "floor",
            vec![
                AttributeOption::new("5", "Fifth"),
                AttributeOption::new("12", "Twelfth"),
            ],
        )
    }

    #[test]
    fn numeric_option_id_resolves_to_label() {
        let attr = from_json(r#"{"attribute_code": "floor", "value": 5}"#);
        assert_eq!(resolve_label(&attr, &floors()), "Fifth");
    }

    #[test]
    fn numeric_option_list_resolves_with_raw_fallback() {
        let attr = from_json(r#"{"attribute_code": "floor", "value": [12, 13]}"#);
        assert_eq!(resolve_label(&attr, &floors()), "Twelfth, 13");
    }

    #[test]
    fn numeric_scalar_without_option_falls_back_to_raw() {
        let attr = from_json(r#"{"attribute_code": "gate", "value": 7}"#);
        assert_eq!(resolve_label(&attr, &floors()), "7");
    }

    #[test]
    fn file_object_with_size_returns_file() {
        let attr = from_json(
            r#"{"attribute_code": "proof", "value": {"file": "a.pdf", "size": 1024}}"#,
        );
        assert_eq!(resolve_label(&attr, &floors()), "a.pdf");
    }

    #[test]
    fn missing_value_resolves_to_empty() {
        let attr = described("floor", AttributeValue::default(), None);
        assert_eq!(resolve_label(&attr, &table()), "");
    }
}
