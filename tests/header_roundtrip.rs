// tests/header_roundtrip.rs

use std::io::Cursor;

use proptest::prelude::*;
use reprochart::data::loader::read_header;
use reprochart::data::model::{OptionValue, Options};

fn option_value() -> impl Strategy<Value = OptionValue> {
    prop_oneof![
        any::<bool>().prop_map(OptionValue::Bool),
        (-1.0e9..1.0e9f64).prop_map(OptionValue::Number),
        any::<i32>().prop_map(|i| OptionValue::Number(f64::from(i))),
        // no quotes or colons inside quoted text
        "[A-Za-z0-9 ()%.,_-]{0,16}".prop_map(OptionValue::Text),
    ]
}

fn options() -> impl Strategy<Value = Options> {
    prop::collection::btree_map("[a-z][a-z0-9]{0,9}", option_value(), 0..8).prop_map(|map| {
        let mut options = Options::new();
        for (key, value) in map {
            options.insert(&key, value);
        }
        options
    })
}

proptest! {
    #[test]
    fn serialized_header_parses_back(opts in options()) {
        let text = opts.to_header();
        let parsed = read_header(&mut Cursor::new(text.as_bytes())).unwrap();
        prop_assert_eq!(parsed, opts);
    }

    #[test]
    fn quoted_text_is_verbatim(inner in "[A-Za-z0-9 .+-]{0,12}") {
        let text = format!("k: \"{inner}\"\n===\n");
        let parsed = read_header(&mut Cursor::new(text.as_bytes())).unwrap();
        prop_assert_eq!(parsed.get("k"), Some(&OptionValue::Text(inner.clone())));
    }

    #[test]
    fn boolean_literals_in_any_case(upper in prop::collection::vec(any::<bool>(), 5), value in any::<bool>()) {
        let word: String = value
            .to_string()
            .chars()
            .zip(upper.iter().cycle())
            .map(|(c, &up)| if up { c.to_ascii_uppercase() } else { c })
            .collect();
        let text = format!("flag: {word}\n===\n");
        let parsed = read_header(&mut Cursor::new(text.as_bytes())).unwrap();
        prop_assert_eq!(parsed.get("flag"), Some(&OptionValue::Bool(value)));
    }
}
