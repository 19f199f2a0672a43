use dqm_core::errors::*;
use dqm_core::models::{AggregateKind, Axis};

#[test]
fn invalid_operation_names_container_and_operation() {
    let err = DqmError::container("Tracker/Layers", "fill");
    let msg = err.to_string();
    assert!(msg.contains("operation not defined on container elements"));
    assert!(msg.contains("Tracker/Layers"));
    assert!(msg.contains("fill"));
}

#[test]
fn unsupported_fill_carries_kind_and_arity() {
    let err = DqmError::UnsupportedFill {
        kind: AggregateKind::Histogram1D,
        arity: 3,
    };
    let msg = err.to_string();
    assert!(msg.contains("histogram_1d"));
    assert!(msg.contains('3'));
}

#[test]
fn bin_out_of_range_carries_axis_and_limits() {
    let err = DqmError::BinOutOfRange {
        axis: Axis::Y,
        bin: 12,
        max: 11,
    };
    let msg = err.to_string();
    assert!(msg.contains("axis y"));
    assert!(msg.contains("12"));
    assert!(msg.contains("11"));
}

#[test]
fn invalid_name_reports_folder_not_aggregate() {
    let err = DqmError::InvalidName {
        folder: "tracker".into(),
        name: "a/b".into(),
    };
    assert_eq!(err.to_string(), "invalid node name \"a/b\" in folder tracker");

    let err = DqmError::InvalidDefinition {
        reason: "empty interval".into(),
    };
    assert!(!err.to_string().contains("aggregate"));
}

// --- From impls ---

#[test]
fn registry_error_converts_to_dqm_error() {
    let registry_err = RegistryError::Unavailable {
        element: "rate".into(),
        reason: "connection refused".into(),
    };
    let err: DqmError = registry_err.clone().into();
    assert!(matches!(err, DqmError::Registry(ref inner) if *inner == registry_err));
    assert!(err.to_string().contains("connection refused"));
}

#[test]
fn serde_json_error_converts_to_dqm_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
    let err: DqmError = json_err.into();
    assert!(matches!(err, DqmError::SerializationError(_)));
}

#[test]
fn registry_error_exposes_test_name() {
    let failed = RegistryError::ExecutionFailed {
        test: "xrange".into(),
        reason: "boom".into(),
    };
    assert_eq!(failed.test_name(), Some("xrange"));
    let unavailable = RegistryError::Unavailable {
        element: "e".into(),
        reason: "down".into(),
    };
    assert_eq!(unavailable.test_name(), None);
}
