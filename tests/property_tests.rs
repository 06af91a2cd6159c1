//! Property tests for the availability filter.

use printmapper::queues::{build_printer_queue_list, QueueFilter};
use printmapper::{QueueCatalog, QueueRecord};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,11}"
}

fn record_strategy() -> impl Strategy<Value = QueueRecord> {
    (
        name_strategy(),
        proptest::option::of(name_strategy()),
        "[A-Za-z0-9 ]{0,16}",
    )
        .prop_map(|(display_name, cups_name, location)| QueueRecord {
            uri: format!("lpd://10.0.0.5/{display_name}"),
            display_name,
            driver: String::new(),
            driver_trigger: String::new(),
            location,
            cups_name,
            options: BTreeMap::new(),
        })
}

fn catalog_strategy() -> impl Strategy<Value = QueueCatalog> {
    proptest::collection::vec(record_strategy(), 0..12).prop_map(|records| {
        let mut catalog = QueueCatalog::new();
        for r in records {
            catalog.insert(r);
        }
        catalog
    })
}

proptest! {
    #[test]
    fn result_is_sorted_subset_of_catalog(
        catalog in catalog_strategy(),
        mapped in proptest::collection::vec(name_strategy(), 0..8),
    ) {
        let result = build_printer_queue_list(&catalog, &mapped, None);

        let mut sorted = result.clone();
        sorted.sort();
        prop_assert_eq!(&result, &sorted);

        for name in &result {
            prop_assert!(catalog.get(name).is_some());
            prop_assert!(!mapped.contains(name));
        }
    }

    #[test]
    fn mapped_names_never_appear(
        catalog in catalog_strategy(),
        mapped in proptest::collection::vec(name_strategy(), 0..8),
    ) {
        let result = build_printer_queue_list(&catalog, &mapped, None);
        for record in catalog.records() {
            let mapped_by_cups = record
                .cups_name
                .as_deref()
                .is_some_and(|c| !c.is_empty() && mapped.iter().any(|m| m == c));
            if mapped.contains(&record.display_name) || mapped_by_cups {
                prop_assert!(!result.contains(&record.display_name));
            } else {
                prop_assert!(result.contains(&record.display_name));
            }
        }
    }

    #[test]
    fn filter_is_substring_restriction(
        catalog in catalog_strategy(),
        value in "[A-Za-z0-9 ]{0,4}",
    ) {
        let filter = QueueFilter { key: "Location".to_string(), value: value.clone() };
        let filtered = build_printer_queue_list(&catalog, &[], Some(&filter));
        let unfiltered = build_printer_queue_list(&catalog, &[], None);

        for name in &filtered {
            prop_assert!(unfiltered.contains(name));
            let record = catalog.get(name).unwrap();
            prop_assert!(!record.location.is_empty());
            prop_assert!(record.location.contains(&value));
        }
    }

    #[test]
    fn filtering_is_idempotent(
        catalog in catalog_strategy(),
        mapped in proptest::collection::vec(name_strategy(), 0..8),
    ) {
        let first = build_printer_queue_list(&catalog, &mapped, None);
        let second = build_printer_queue_list(&catalog, &mapped, None);
        prop_assert_eq!(first, second);
    }
}
