use super::*;
use proptest::prelude::*;

#[test]
fn absent_field_keeps_current_value() {
    let mut port = 2775_u16;
    merge_field(&mut port, None);

    assert_eq!(port, 2775);
}

#[test]
fn falsy_values_still_overwrite() {
    let mut port = 2775_u16;
    merge_field(&mut port, Some(0));
    assert_eq!(port, 0);

    let mut enabled = true;
    merge_field(&mut enabled, Some(false));
    assert!(!enabled);

    let mut host = "localhost".to_string();
    merge_field(&mut host, Some(String::new()));
    assert!(host.is_empty());

    let mut filters = vec!["f1".to_string()];
    merge_field(&mut filters, Some(Vec::new()));
    assert!(filters.is_empty());
}

#[test]
fn option_patch_distinguishes_clear_from_absent() {
    let mut username = Some("smppclient1".to_string());

    merge_option(&mut username, None);
    assert_eq!(username.as_deref(), Some("smppclient1"));

    merge_option(&mut username, Some(None));
    assert_eq!(username, None);

    merge_option(&mut username, Some(Some("bob".to_string())));
    assert_eq!(username.as_deref(), Some("bob"));
}

#[test]
fn key_change_names_both_keys() {
    let err = MergePatchError::KeyChanged {
        expected: "conn-1".to_string(),
        found: "hijack".to_string(),
    };

    assert_eq!(
        err.to_string(),
        "patch changed the record key: expected 'conn-1', found 'hijack'"
    );
}

proptest! {
    #[test]
    fn merge_field_result_is_patch_or_current(current: i64, patch: Option<i64>) {
        let mut value = current;
        merge_field(&mut value, patch);

        prop_assert_eq!(value, patch.unwrap_or(current));
    }
}
