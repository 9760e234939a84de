use proptest::prelude::*;
use wrapconf::infrastructure::config::{to_ini_string, ConfigLoader};
use wrapconf::{ConfigError, DEFAULT_SECTION};

fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

fn plain_value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9_./-]{0,24}"
}

proptest! {
    /// Property: a reference resolves to exactly the referenced value
    #[test]
    fn prop_reference_substitutes_value(
        base in plain_value(),
        suffix in plain_value(),
    ) {
        let text = format!("[DEFAULT]\nbase = {base}\nderived = %(base)s{suffix}\n");
        let doc = ConfigLoader::parse_str(&text, "prop").unwrap();
        prop_assert_eq!(doc.get(DEFAULT_SECTION, "derived").unwrap(), format!("{base}{suffix}"));
    }

    /// Property: get is deterministic for any chain of references
    #[test]
    fn prop_chain_resolution_is_deterministic(
        keys in prop::collection::hash_set(key(), 1..8),
        leaf in plain_value(),
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut text = String::from("[DEFAULT]\n");
        for pair in keys.windows(2) {
            text.push_str(&format!("{} = %({})s/\n", pair[0], pair[1]));
        }
        let last = keys.last().unwrap();
        text.push_str(&format!("{last} = {leaf}\n"));

        let doc = ConfigLoader::parse_str(&text, "prop").unwrap();
        let first = doc.get(DEFAULT_SECTION, &keys[0]).unwrap();
        prop_assert_eq!(doc.get(DEFAULT_SECTION, &keys[0]).unwrap(), first.clone());
        let expected_suffix = format!("{}{leaf}", "/".repeat(keys.len() - 1));
        prop_assert!(first.ends_with(&expected_suffix));
    }

    /// Property: closing any chain into a loop is reported, never looped on
    #[test]
    fn prop_cycles_are_rejected(keys in prop::collection::hash_set(key(), 1..8)) {
        let keys: Vec<String> = keys.into_iter().collect();
        let mut text = String::from("[DEFAULT]\n");
        for (idx, key) in keys.iter().enumerate() {
            let next = &keys[(idx + 1) % keys.len()];
            text.push_str(&format!("{key} = %({next})s\n"));
        }

        let is_parse_error = matches!(
            ConfigLoader::parse_str(&text, "prop"),
            Err(ConfigError::Parse { .. })
        );
        prop_assert!(is_parse_error);
    }

    /// Property: serialising and reparsing preserves every effective value
    #[test]
    fn prop_serialisation_preserves_values(
        entries in prop::collection::btree_map(key(), plain_value(), 0..6),
        local in prop::collection::btree_map(key(), plain_value(), 0..6),
    ) {
        let mut text = String::from("[DEFAULT]\n");
        for (key, value) in &entries {
            text.push_str(&format!("{key} = {value}\n"));
        }
        text.push_str("[Local]\n");
        for (key, value) in &local {
            text.push_str(&format!("{key} = {value}\n"));
        }

        let doc = ConfigLoader::parse_str(&text, "prop").unwrap();
        let reparsed = ConfigLoader::parse_str(&to_ini_string(&doc), "reparsed").unwrap();
        prop_assert_eq!(reparsed.items("Local").unwrap(), doc.items("Local").unwrap());
        prop_assert_eq!(
            reparsed.items(DEFAULT_SECTION).unwrap(),
            doc.items(DEFAULT_SECTION).unwrap()
        );
    }
}
