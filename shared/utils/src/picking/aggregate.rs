//! Requirement scaling and cross-request aggregation.
//!
//! One aggregation core serves both presentation modes: `aggregate` merges
//! scaled requirements per `(supply_destination, part_key)`, and `combine`
//! folds those aggregates by part key alone for the consolidated
//! multi-destination view. Totals are sums, so they are independent of
//! request order; only the display fields seeding a key are
//! order-dependent, and those always come from the first line encountered
//! in request-then-line order.

use std::collections::HashMap;

use partspick_models::{AggregatedPart, BomLine, BomSheet, CombinedPart};

/// Scaled requirement for one BOM line at a requested build quantity.
pub fn scale(line: &BomLine, quantity: u32) -> f64 {
    line.unit_requirement * f64::from(quantity)
}

/// Merge scaled requirements across requests into per-(destination, part)
/// totals. Output is in first-seen order.
pub fn aggregate(boms: &[(BomSheet, u32)]) -> Vec<AggregatedPart> {
    let mut parts: Vec<AggregatedPart> = Vec::new();
    let mut index: HashMap<(String, String), usize> = HashMap::new();

    for (sheet, quantity) in boms {
        if *quantity == 0 {
            continue;
        }
        for line in &sheet.lines {
            let required = scale(line, *quantity);
            let key = (line.supply_destination.clone(), line.part_key.clone());

            match index.get(&key) {
                Some(&at) => parts[at].required_quantity += required,
                None => {
                    index.insert(key, parts.len());
                    parts.push(AggregatedPart {
                        management_number: line.management_number.clone(),
                        part_key: line.part_key.clone(),
                        manufacturer: line.manufacturer.clone(),
                        part_name: line.part_name.clone(),
                        unit: line.unit.clone(),
                        procurement: line.procurement.clone(),
                        supply_destination: line.supply_destination.clone(),
                        required_quantity: required,
                    });
                }
            }
        }
    }

    parts
}

/// Fold per-destination aggregates by part key for the combined view,
/// keeping a per-destination requirement breakdown. Input order is
/// first-seen order, so display-field seeding stays deterministic.
pub fn combine(parts: &[AggregatedPart]) -> Vec<CombinedPart> {
    let mut combined: Vec<CombinedPart> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for part in parts {
        let at = match index.get(&part.part_key) {
            Some(&at) => at,
            None => {
                index.insert(part.part_key.clone(), combined.len());
                combined.push(CombinedPart {
                    management_number: part.management_number.clone(),
                    part_key: part.part_key.clone(),
                    manufacturer: part.manufacturer.clone(),
                    part_name: part.part_name.clone(),
                    unit: part.unit.clone(),
                    procurement: part.procurement.clone(),
                    quantities: Default::default(),
                    total_required: 0.0,
                });
                combined.len() - 1
            }
        };

        let entry = combined[at]
            .quantities
            .entry(part.supply_destination.clone())
            .or_insert(0.0);
        *entry += part.required_quantity;
        combined[at].total_required += part.required_quantity;
    }

    combined
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn line(part_key: &str, destination: &str, unit_requirement: f64) -> BomLine {
        BomLine {
            management_number: format!("M-{part_key}"),
            part_key: part_key.to_string(),
            manufacturer: "Acme".to_string(),
            part_name: format!("Part {part_key}"),
            unit: "EA".to_string(),
            procurement: "Acme Trading".to_string(),
            supply_destination: destination.to_string(),
            unit_requirement,
        }
    }

    fn sheet(product_id: &str, destination: &str, lines: Vec<BomLine>) -> BomSheet {
        BomSheet {
            product_id: product_id.to_string(),
            supply_destination: destination.to_string(),
            lines,
        }
    }

    #[test]
    fn test_scale() {
        assert_eq!(scale(&line("P1", "S1", 2.0), 5), 10.0);
        assert_eq!(scale(&line("P1", "S1", 2.0), 0), 0.0);
    }

    #[test]
    fn test_shared_part_is_summed_not_duplicated() {
        // Two products share P2 under the same destination: 4 and 6.
        let boms = vec![
            (sheet("A", "S1", vec![line("P2", "S1", 4.0)]), 1),
            (sheet("B", "S1", vec![line("P2", "S1", 6.0)]), 1),
        ];
        let parts = aggregate(&boms);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].required_quantity, 10.0);
    }

    #[test]
    fn test_same_part_different_destination_stays_separate() {
        let boms = vec![
            (sheet("A", "S1", vec![line("P1", "S1", 1.0)]), 2),
            (sheet("B", "S2", vec![line("P1", "S2", 1.0)]), 3),
        ];
        let parts = aggregate(&boms);
        assert_eq!(parts.len(), 2);
    }

    #[test]
    fn test_zero_quantity_request_contributes_nothing() {
        let boms = vec![
            (sheet("A", "S1", vec![line("P1", "S1", 2.0)]), 0),
            (sheet("B", "S1", vec![line("P2", "S1", 1.0)]), 1),
        ];
        let parts = aggregate(&boms);
        assert_eq!(parts.len(), 1);
        assert_eq!(parts[0].part_key, "P2");
    }

    #[test]
    fn test_display_fields_seed_from_first_seen() {
        let mut other = line("P1", "S1", 3.0);
        other.part_name = "Renamed later".to_string();
        let boms = vec![
            (sheet("A", "S1", vec![line("P1", "S1", 2.0)]), 1),
            (sheet("B", "S1", vec![other]), 1),
        ];
        let parts = aggregate(&boms);
        assert_eq!(parts[0].part_name, "Part P1");
        assert_eq!(parts[0].required_quantity, 5.0);
    }

    #[test]
    fn test_combine_folds_destinations() {
        let boms = vec![
            (sheet("A", "S1", vec![line("P1", "S1", 2.0)]), 5),
            (sheet("B", "S2", vec![line("P1", "S2", 1.0)]), 4),
        ];
        let combined = combine(&aggregate(&boms));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].quantities["S1"], 10.0);
        assert_eq!(combined[0].quantities["S2"], 4.0);
        assert_eq!(combined[0].total_required, 14.0);
    }

    proptest! {
        /// scale is exactly unit_requirement * q and monotonic in q.
        #[test]
        fn prop_scale(unit_requirement in 0.0f64..1000.0, q in 0u32..10_000) {
            let l = line("P1", "S1", unit_requirement);
            prop_assert_eq!(scale(&l, q), unit_requirement * f64::from(q));
            if q > 0 {
                prop_assert!(scale(&l, q) >= scale(&l, q - 1));
            }
        }

        /// Totals per key are invariant under request permutation.
        #[test]
        fn prop_aggregation_is_order_independent(
            quantities in proptest::collection::vec((1u32..20, 1u32..100), 2..6)
        ) {
            let boms: Vec<(BomSheet, u32)> = quantities
                .iter()
                .enumerate()
                .map(|(i, (unit, q))| {
                    // Every sheet contributes to the shared key (S1, P1)
                    // and to its own key.
                    let own = format!("OWN-{i}");
                    (
                        sheet(
                            &format!("prod-{i}"),
                            "S1",
                            vec![line("P1", "S1", f64::from(*unit)), line(&own, "S1", 1.0)],
                        ),
                        *q,
                    )
                })
                .collect();

            let forward = aggregate(&boms);
            let reversed: Vec<_> = boms.iter().rev().cloned().collect();
            let backward = aggregate(&reversed);

            let total = |parts: &[AggregatedPart], key: &str| -> f64 {
                parts
                    .iter()
                    .filter(|p| p.part_key == key)
                    .map(|p| p.required_quantity)
                    .sum()
            };

            prop_assert_eq!(total(&forward, "P1"), total(&backward, "P1"));
            for (i, _) in quantities.iter().enumerate() {
                let own = format!("OWN-{i}");
                prop_assert_eq!(total(&forward, &own), total(&backward, &own));
            }
        }

        /// The combined total always equals the sum of the breakdown.
        #[test]
        fn prop_combine_total_matches_breakdown(
            quantities in proptest::collection::vec((1u32..20, 1u32..100), 1..5)
        ) {
            let boms: Vec<(BomSheet, u32)> = quantities
                .iter()
                .enumerate()
                .map(|(i, (unit, q))| {
                    let dest = format!("S{i}");
                    (
                        sheet(&format!("prod-{i}"), &dest, vec![line("P1", &dest, f64::from(*unit))]),
                        *q,
                    )
                })
                .collect();

            for part in combine(&aggregate(&boms)) {
                let sum: f64 = part.quantities.values().sum();
                prop_assert_eq!(sum, part.total_required);
            }
        }
    }
}
