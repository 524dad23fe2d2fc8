use super::*;

#[test]
fn complete_body_becomes_placement() {
    let w = placement_from_body(&json!({
        "text": "hello", "x": 0.25, "y": "0.75", "color": "hsl(1, 80%, 60%)"
    }))
    .unwrap();
    assert_eq!(w, WordPlacement::new("hello", 0.25, 0.75, "hsl(1, 80%, 60%)"));
}

#[test]
fn missing_or_null_fields_are_dropped() {
    assert!(placement_from_body(&json!({"text": "a", "x": 0.1, "y": 0.2})).is_none());
    assert!(
        placement_from_body(&json!({"text": "a", "x": null, "y": 0.2, "color": "#000000"}))
            .is_none()
    );
    assert!(
        placement_from_body(&json!({"text": "a", "x": "left", "y": 0.2, "color": "#000000"}))
            .is_none()
    );
    assert!(placement_from_body(&json!([])).is_none());
}
