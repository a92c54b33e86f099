//! Tests for the description grammar normalization

use rigscaffold::domain::{Description, DomainError, NodeDesc};
use rstest::rstest;
use serde_json::{json, Value};

// ============================================================
// Well-Formed Literals
// ============================================================

#[test]
fn given_nested_literal_when_parsing_then_canonical_shape_matches() {
    let desc = Description::parse(&json!(["ROOT", ["A", ["B", "C"]]])).unwrap();

    let Description::Nodes(roots) = desc else {
        panic!("expected explicit nodes, got a template root");
    };
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].name, "ROOT");

    let a = &roots[0].children[0];
    assert_eq!(a.name, "A");
    let grandchildren: Vec<_> = a.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(grandchildren, ["B", "C"]);
}

#[test]
fn given_bare_string_when_parsing_then_template_root_is_returned() {
    let desc = Description::parse(&json!("MyRig")).unwrap();
    assert_eq!(desc, Description::TemplateRoot("MyRig".to_string()));
}

#[test]
fn given_run_with_multiple_branches_when_parsing_then_each_sequence_attaches_to_preceding_name() {
    // Mirrors the stock-template literal layout: name, children, name, children...
    let desc = Description::parse(&json!([
        "ROOT",
        ["GLOBAL_MOVE", ["CTL", "IK", "JNT", ["BONE", "DRIVER"]], "SCRIPT_NODES"]
    ]))
    .unwrap();

    let Description::Nodes(roots) = desc else {
        panic!("expected nodes");
    };
    let root = &roots[0];
    let top: Vec<_> = root.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(top, ["GLOBAL_MOVE", "SCRIPT_NODES"]);

    let global_move = &root.children[0];
    let mids: Vec<_> = global_move.children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(mids, ["CTL", "IK", "JNT"]);
    assert_eq!(global_move.children[2].children.len(), 2);
}

#[test]
fn given_mapping_literal_when_parsing_then_key_order_is_preserved() {
    let text = r#"{"GLOBAL_MOVE": {"IK": null, "CTL": null}, "GEO": null, "PLACEMENT": "Global_CTL"}"#;
    let desc = Description::from_json(text).unwrap();

    let Description::Nodes(roots) = desc else {
        panic!("expected nodes");
    };
    let top: Vec<_> = roots.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(top, ["GLOBAL_MOVE", "GEO", "PLACEMENT"]);

    let mids: Vec<_> = roots[0].children.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(mids, ["IK", "CTL"]);
    // String value is a single child
    assert_eq!(roots[2].children, vec![NodeDesc::leaf("Global_CTL")]);
}

// ============================================================
// Malformed Literals (fail fast, no partial result)
// ============================================================

#[test]
fn given_three_element_sequence_when_parsing_then_malformed_description_is_raised() {
    let err = Description::parse(&json!(["X", ["Y"], "extra"])).unwrap_err();
    assert!(
        matches!(err, DomainError::MalformedDescription(_)),
        "expected MalformedDescription, got {err:?}"
    );
}

#[rstest]
#[case::single_element(json!(["X"]))]
#[case::non_string_head(json!([1, ["Y"]]))]
#[case::scalar_children(json!(["X", "Y"]))]
#[case::number_leaf(json!(["X", ["A", 42]]))]
#[case::orphan_child_sequence(json!(["X", [["Y"]]]))]
#[case::adjacent_child_sequences(json!(["X", ["A", ["B"], ["C"]]]))]
#[case::top_level_number(json!(7))]
#[case::mapping_number_value(json!({"X": 3}))]
fn given_malformed_literal_when_parsing_then_error_is_raised(#[case] value: Value) {
    let err = Description::parse(&value).unwrap_err();
    assert!(matches!(err, DomainError::MalformedDescription(_)));
}

#[test]
fn given_invalid_json_text_when_parsing_then_error_is_raised() {
    let err = Description::from_json("[\"ROOT\", [").unwrap_err();
    assert!(matches!(err, DomainError::MalformedDescription(_)));
}
