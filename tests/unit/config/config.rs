use std::collections::HashMap;

use super::*;
use crate::foundation::core::Rgba8;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |name| map.get(name).cloned()
}

#[test]
fn defaults_validate_and_match_documented_values() {
    let cfg = WeaveConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.poll_interval(), Duration::from_millis(1500));
    assert_eq!(cfg.fetch_timeout(), Duration::from_secs(5));
    assert_eq!(cfg.notice_ttl(), Duration::from_secs(4));
    assert_eq!(cfg.max_submissions, 2);
    assert_eq!(cfg.quota_key, "userWordCount");

    let style = cfg.style().unwrap();
    assert_eq!(style.background, Rgba8::new(0x11, 0x18, 0x27, 0xff));
    assert_eq!(style, WeaveStyle::default());
}

#[test]
fn file_fields_are_partial() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weave.json");
    std::fs::write(&path, r#"{ "poll_interval_ms": 250, "store_url": "http://store:9000" }"#)
        .unwrap();

    let cfg = WeaveConfig::from_path(&path).unwrap();
    assert_eq!(cfg.poll_interval_ms, 250);
    assert_eq!(cfg.store_url, "http://store:9000");
    assert_eq!(cfg.max_text_chars, 50);
}

#[test]
fn malformed_file_is_a_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weave.json");
    std::fs::write(&path, "{ not json").unwrap();
    assert!(matches!(
        WeaveConfig::from_path(&path).unwrap_err(),
        WeaveError::Serde(_)
    ));
    assert!(WeaveConfig::from_path(dir.path().join("missing.json")).is_err());
}

#[test]
fn overrides_replace_file_values() {
    let cfg = WeaveConfig::default()
        .with_overrides(lookup(&[
            ("WORDWEAVE_POLL_INTERVAL_MS", " 900 "),
            ("WORDWEAVE_MAX_SUBMISSIONS", "5"),
            ("WORDWEAVE_BACKGROUND_RGBA", "#000000"),
            ("WORDWEAVE_STROKE_OPACITY", "0.5"),
        ]))
        .unwrap();
    assert_eq!(cfg.poll_interval_ms, 900);
    assert_eq!(cfg.max_submissions, 5);
    assert_eq!(cfg.stroke_opacity, 0.5);
    assert_eq!(cfg.style().unwrap().background, Rgba8::new(0, 0, 0, 255));
}

#[test]
fn unparseable_override_names_the_variable() {
    let err = WeaveConfig::default()
        .with_overrides(lookup(&[("WORDWEAVE_FETCH_TIMEOUT_MS", "soon")]))
        .unwrap_err();
    assert!(err.to_string().contains("WORDWEAVE_FETCH_TIMEOUT_MS"));
}

#[test]
fn validate_rejects_out_of_range_values() {
    let bad = [
        WeaveConfig {
            poll_interval_ms: 0,
            ..WeaveConfig::default()
        },
        WeaveConfig {
            max_submissions: 0,
            ..WeaveConfig::default()
        },
        WeaveConfig {
            stroke_width: 0.0,
            ..WeaveConfig::default()
        },
        WeaveConfig {
            stroke_opacity: 1.5,
            ..WeaveConfig::default()
        },
        WeaveConfig {
            background_rgba: "midnight".to_owned(),
            ..WeaveConfig::default()
        },
    ];
    for cfg in bad {
        assert!(matches!(cfg.validate(), Err(WeaveError::Validation(_))));
    }
}

#[test]
fn word_markers_and_label_font_are_opt_in() {
    let cfg = WeaveConfig::default();
    assert!(!cfg.show_words);
    assert!(cfg.backend().unwrap().label_font().is_none());

    let cfg = cfg
        .with_overrides(lookup(&[
            ("WORDWEAVE_SHOW_WORDS", "true"),
            ("WORDWEAVE_LABEL_FONT", "/definitely/missing.ttf"),
        ]))
        .unwrap();
    assert!(cfg.style().unwrap().show_words);
    assert_eq!(cfg.label_font, Some(PathBuf::from("/definitely/missing.ttf")));
    assert!(matches!(cfg.backend(), Err(WeaveError::Validation(_))));
}
