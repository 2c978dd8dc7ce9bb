// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_admin_actor, create_test_cause};
use crate::{AvailabilityTransition, Command, CoreError, apply_availability};
use canteen_domain::{AvailabilitySet, Catalog, DomainError};

fn toggle(catalog: &Catalog, availability: &AvailabilitySet, item_id: &str) -> AvailabilityTransition {
    apply_availability(
        catalog,
        availability,
        Command::ToggleSoldOut {
            item_id: item_id.to_string(),
        },
        create_test_admin_actor(),
        create_test_cause(),
    )
    .unwrap()
}

#[test]
fn test_toggle_marks_sold_out_and_audits() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::new();

    let result: AvailabilityTransition = toggle(&catalog, &availability, "f4");

    assert!(result.sold_out);
    assert_eq!(result.item_id, "f4");
    assert!(result.new_availability.is_sold_out("f4"));
    assert!(!availability.is_sold_out("f4"));
    assert_eq!(result.audit_event.action.name, "ToggleSoldOut");
    assert_eq!(result.audit_event.before.data, "item_id=f4,sold_out=false");
    assert_eq!(result.audit_event.after.data, "item_id=f4,sold_out=true");
    assert_eq!(result.audit_event.order_id, None);
}

#[test]
fn test_toggle_twice_restores_availability() {
    let catalog: Catalog = Catalog::default_menu();
    let availability: AvailabilitySet = AvailabilitySet::from_ids(["d2"]);

    let first: AvailabilityTransition = toggle(&catalog, &availability, "s1");
    let second: AvailabilityTransition = toggle(&catalog, &first.new_availability, "s1");

    assert!(!second.sold_out);
    assert_eq!(second.new_availability, availability);
}

#[test]
fn test_toggle_unknown_item_fails() {
    let catalog: Catalog = Catalog::default_menu();

    let result: Result<AvailabilityTransition, CoreError> = apply_availability(
        &catalog,
        &AvailabilitySet::new(),
        Command::ToggleSoldOut {
            item_id: String::from("zz"),
        },
        create_test_admin_actor(),
        create_test_cause(),
    );

    assert_eq!(
        result,
        Err(CoreError::DomainViolation(DomainError::ItemNotFound {
            item_id: String::from("zz")
        }))
    );
}
