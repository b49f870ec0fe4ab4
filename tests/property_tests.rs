//! Property-based tests for colorful_logger using proptest

use colorful_logger::prelude::*;
use proptest::prelude::*;

fn any_severity() -> impl Strategy<Value = Severity> {
    prop_oneof![
        Just(Severity::Trace),
        Just(Severity::Debug),
        Just(Severity::Info),
        Just(Severity::Warning),
        Just(Severity::Error),
        Just(Severity::Fatal),
    ]
}

fn render(mode: RenderMode, record: &Record) -> String {
    Formatter::new(FormatterConfig::new(mode))
        .render(record)
        .expect("render failed")
}

// ============================================================================
// Severity Tests
// ============================================================================

proptest! {
    #[test]
    fn test_severity_str_roundtrip(level in any_severity()) {
        let parsed: Severity = level.to_str().parse().unwrap();
        prop_assert_eq!(level, parsed);
    }

    #[test]
    fn test_severity_tag_roundtrip(level in any_severity()) {
        let tag = level.tag();
        prop_assert_eq!(tag.len(), 3);
        prop_assert_eq!(tag.parse::<Severity>().unwrap(), level);
    }

    #[test]
    fn test_severity_parse_is_case_insensitive(level in any_severity()) {
        let lower = level.to_str().to_lowercase();
        prop_assert_eq!(lower.parse::<Severity>().unwrap(), level);
    }

    #[test]
    fn test_severity_ordering_matches_discriminant(a in any_severity(), b in any_severity()) {
        prop_assert_eq!(a <= b, (a as u8) <= (b as u8));
        prop_assert_eq!(a > b, (a as u8) > (b as u8));
    }

    #[test]
    fn test_unknown_level_names_are_rejected(name in "[a-z]{6,12}") {
        prop_assume!(!["critical", "warning"].contains(&name.as_str()));
        let is_unknown = matches!(name.parse::<Severity>(), Err(LoggerError::UnknownLevel { .. }));
        prop_assert!(is_unknown);
    }
}

// ============================================================================
// Record Tests
// ============================================================================

proptest! {
    /// A record always renders as exactly one line, whatever the message,
    /// logger name or field values
    #[test]
    fn test_message_never_breaks_lines(
        message in ".*",
        name in prop_oneof![".*", "[a-z\n\r\t ]{1,20}"],
        values in prop::collection::vec(prop_oneof![".*", "[a-z=\"\n\r\t ]{0,20}"], 0..4),
    ) {
        let fields: Fields = values
            .into_iter()
            .enumerate()
            .map(|(i, value)| (format!("k{}", i), value))
            .collect();
        let record = Record::new(Severity::Error, &name, message, fields);
        for mode in [RenderMode::FileText, RenderMode::Console] {
            let line = render(mode, &record);
            prop_assert!(!line.contains('\n'));
            prop_assert!(!line.contains('\r'));
        }
    }

    #[test]
    fn test_text_line_shape(level in any_severity(), message in "[a-zA-Z0-9 ]{1,40}") {
        let record = Record::new(level, "root", message.clone(), Fields::new());
        let line = render(RenderMode::FileText, &record);
        let tag = format!(" [{}] ", level.tag());
        prop_assert!(line.contains(&tag));
        let suffix = format!(" - {}", message);
        prop_assert!(line.ends_with(&suffix));
    }
}

// ============================================================================
// JSON Tests
// ============================================================================

proptest! {
    /// Every supplied field comes back, with underscores turned into hyphens
    #[test]
    fn test_json_fields_roundtrip(
        entries in prop::collection::btree_map("[a-z]{1,4}(_[a-z]{1,4}){0,2}", any::<i64>(), 0..6),
        message in ".*",
    ) {
        let fields: Fields = entries.iter().map(|(k, v)| (k.clone(), *v)).collect();
        let record = Record::new(Severity::Info, "app", message, fields);
        let line = render(RenderMode::FileJson, &record);

        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        let object = value.as_object().unwrap();

        for key in ["level", "time", "message", "caller"] {
            prop_assert!(object.contains_key(key));
        }
        for (key, number) in &entries {
            let mut expected_key = key.replace('_', "-");
            if ["level", "time", "message", "caller"].contains(&expected_key.as_str()) {
                expected_key = format!("field-{}", expected_key);
            }
            prop_assert_eq!(object[&expected_key].as_i64(), Some(*number));
        }
        prop_assert_eq!(object.len(), 4 + entries.len());
    }

    #[test]
    fn test_json_message_is_preserved(message in "[^\n\r\t]*") {
        let record = Record::new(Severity::Warning, "app", message.clone(), Fields::new());
        let line = render(RenderMode::FileJson, &record);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        prop_assert_eq!(value["message"].as_str(), Some(message.as_str()));
    }
}

// ============================================================================
// Fields Tests
// ============================================================================

proptest! {
    /// Insertion order is kept and a repeated key keeps its first position
    #[test]
    fn test_fields_keep_first_position(keys in prop::collection::vec("[a-e]", 1..20)) {
        let mut fields = Fields::new();
        for (i, key) in keys.iter().enumerate() {
            fields.add_field(key.clone(), i as i64);
        }

        let mut expected_order: Vec<&str> = Vec::new();
        for key in &keys {
            if !expected_order.contains(&key.as_str()) {
                expected_order.push(key);
            }
        }
        let order: Vec<&str> = fields.iter().map(|(k, _)| k).collect();
        prop_assert_eq!(order, expected_order);

        let last = keys.len() - 1;
        prop_assert_eq!(fields.get(&keys[last]), Some(&FieldValue::Int(last as i64)));
    }
}
