//! Unit tests for cycle paths and validation reports
//!
//! The path stores entries most-recently-discovered first and restores
//! discovery order for rendering and serialization.

use bindery_domain::diagnostics::{CyclePath, DiscoveryEntry, ValidationReport};

#[test]
fn test_head_insertion_restores_discovery_order() {
    let mut path = CyclePath::new();
    path.push_head(DiscoveryEntry::new("OrderService"));
    path.push_head(DiscoveryEntry::new("PaymentService"));
    path.push_head(DiscoveryEntry::new("LedgerService"));

    assert_eq!(
        path.type_names(),
        vec!["OrderService", "PaymentService", "LedgerService"]
    );
}

#[test]
fn test_from_entries_preserves_discovery_order() {
    let path = CyclePath::from_entries([
        DiscoveryEntry::new("OrderService"),
        DiscoveryEntry::new("PaymentService"),
    ]);

    assert_eq!(path.type_names(), vec!["OrderService", "PaymentService"]);
    assert_eq!(path.len(), 2);
}

#[test]
fn test_origin_prefers_the_bound_type() {
    let direct = CyclePath::from_entries([DiscoveryEntry::new("OrderService")]);
    assert_eq!(direct.origin(), Some("OrderService"));

    let bound = CyclePath::from_entries([DiscoveryEntry::implemented_by(
        "PaymentService",
        "StripePayments",
    )]);
    assert_eq!(bound.origin(), Some("StripePayments"));

    assert_eq!(CyclePath::new().origin(), None);
}

#[test]
fn test_render_draws_the_boxed_diagram() {
    let path = CyclePath::from_entries([
        DiscoveryEntry::new("OrderService"),
        DiscoveryEntry::implemented_by("PaymentService", "StripePayments"),
    ]);

    let rendered = path.render();
    let lines: Vec<_> = rendered.lines().collect();
    assert_eq!(
        lines,
        vec![
            "Cyclic dependency detected for component 'OrderService'",
            "\u{250c}\u{2500}\u{2500}\u{25b6} OrderService",
            "\u{2502}      \u{2193}",
            "\u{2502}    PaymentService (implemented by StripePayments)",
            "\u{2514}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2500}\u{2518}",
        ]
    );
}

#[test]
fn test_serialization_uses_discovery_order() {
    let mut path = CyclePath::new();
    path.push_head(DiscoveryEntry::new("OrderService"));
    path.push_head(DiscoveryEntry::implemented_by(
        "PaymentService",
        "StripePayments",
    ));

    let json = serde_json::to_value(&path).expect("path should serialize");
    assert_eq!(
        json,
        serde_json::json!([
            { "type_name": "OrderService", "implemented_by": null },
            { "type_name": "PaymentService", "implemented_by": "StripePayments" },
        ])
    );
}

#[test]
fn test_validation_report_completeness() {
    assert!(ValidationReport::default().is_complete());

    let report = ValidationReport {
        missing: vec!["Mailer".to_string()],
    };
    assert!(!report.is_complete());
}
