//! Tests for catalog validation.

use rust_decimal::Decimal;

use super::*;

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

fn element(name: &str, min: &str, max: &str, step: &str) -> Element {
    Element::new(name, dec("1"), dec("1"), dec(min), dec(max), dec(step))
}

#[test]
fn test_valid_catalog() {
    let catalog = ElementCatalog::new(
        vec![element("Cr", "14.5", "22", "0.5"), element("Ni", "0", "100", "1")],
        "Ni",
    )
    .unwrap();

    assert_eq!(catalog.base_index(), 1);
    assert!(catalog.is_base(1));
    assert!(!catalog.is_base(0));
    assert_eq!(catalog.get("Cr").map(|e| e.name()), Some("Cr"));
    assert!(catalog.get("Fe").is_none());
    assert_eq!(catalog.iter().count(), 2);
}

#[test]
fn test_unknown_base_element() {
    let result = validate_catalog(&[element("Cr", "0", "10", "1")], "Ni");
    match result {
        Err(AlloyForgeError::UnknownBaseElement(name)) => assert_eq!(name, "Ni"),
        other => panic!("expected UnknownBaseElement, got {other:?}"),
    }
}

#[test]
fn test_base_name_is_case_sensitive() {
    let result = validate_catalog(&[element("Ni", "0", "100", "1")], "ni");
    assert!(matches!(result, Err(AlloyForgeError::UnknownBaseElement(_))));
}

#[test]
fn test_empty_catalog_has_no_base() {
    let result = ElementCatalog::new(Vec::new(), "Ni");
    assert!(matches!(result, Err(AlloyForgeError::UnknownBaseElement(_))));
}

#[test]
fn test_invalid_element_reported_before_base() {
    let result = validate_catalog(&[element("Cr", "5", "1", "1")], "Missing");
    match result {
        Err(AlloyForgeError::InvalidElementSpec { element, .. }) => assert_eq!(element, "Cr"),
        other => panic!("expected InvalidElementSpec, got {other:?}"),
    }
}

#[test]
fn test_non_positive_step_rejected() {
    let result = validate_catalog(
        &[element("Cr", "0", "10", "0"), element("Ni", "0", "100", "1")],
        "Ni",
    );
    assert!(matches!(result, Err(AlloyForgeError::InvalidElementSpec { .. })));
}

#[test]
fn test_duplicate_names_rejected() {
    let result = validate_catalog(
        &[element("Ni", "0", "10", "1"), element("Ni", "0", "100", "1")],
        "Ni",
    );
    match result {
        Err(AlloyForgeError::InvalidElementSpec { element, reason }) => {
            assert_eq!(element, "Ni");
            assert!(reason.contains("duplicate"));
        }
        other => panic!("expected InvalidElementSpec, got {other:?}"),
    }
}

#[test]
fn test_catalog_totals_must_be_representable() {
    let large = Decimal::from_scientific("5e26").unwrap();
    let strong = |name: &str| Element::new(name, large, dec("1"), dec("0"), dec("100"), dec("1"));

    // each element alone reaches 5e28, two of them exceed the decimal range
    assert!(strong("A").validate().is_ok());
    let result = validate_catalog(
        &[strong("A"), strong("B"), element("Ni", "0", "100", "1")],
        "Ni",
    );
    match result {
        Err(AlloyForgeError::InvalidElementSpec { element, reason }) => {
            assert_eq!(element, "B");
            assert!(reason.contains("creep"), "{reason}");
        }
        other => panic!("expected InvalidElementSpec, got {other:?}"),
    }
}
