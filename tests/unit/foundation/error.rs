use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        WeaveError::invalid_input("x")
            .to_string()
            .contains("invalid input:")
    );
    assert!(
        WeaveError::fetch_failed("x")
            .to_string()
            .contains("fetch failed:")
    );
    assert!(
        WeaveError::submission_failed("x")
            .to_string()
            .contains("submission failed:")
    );
    assert!(
        WeaveError::reset_failed("x")
            .to_string()
            .contains("reset failed:")
    );
    assert!(WeaveError::render("x").to_string().contains("render error:"));
    assert!(
        WeaveError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        WeaveError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn quota_exceeded_reports_usage() {
    let err = WeaveError::QuotaExceeded { used: 2, limit: 2 };
    assert_eq!(err.to_string(), "quota exceeded: 2/2 contributions used");
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = WeaveError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}

#[test]
fn json_errors_map_to_serde() {
    let err: WeaveError = serde_json::from_str::<u32>("nope").unwrap_err().into();
    assert!(matches!(err, WeaveError::Serde(_)));
}
