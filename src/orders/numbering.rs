//! Garment numbering
//!
//! On a work sheet two pants on the same bill must be told apart, so they are
//! shown as "Pant 1" and "Pant 2". A garment that is alone of its type on the
//! bill keeps its bare name.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::ExpandedOrderRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GarmentLabel {
    /// Line key (`expanded_id` or order id)
    pub key: String,
    pub display: String,
    /// Line items of this garment type on the same bill
    pub same_type_count: usize,
    /// 1-based position among them
    pub garment_number: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum BillKey {
    Id(i64),
    Number(String),
}

fn bill_key(line: &ExpandedOrderRecord) -> BillKey {
    match line.order.bill_id.as_id() {
        Some(id) => BillKey::Id(id),
        None => BillKey::Number(line.order.billnumberinput2.key()),
    }
}

fn garment_name(line: &ExpandedOrderRecord) -> &str {
    match line.order.garment_type_str().trim() {
        "" => "N/A",
        name => name,
    }
}

/// Label every line item. Output is in input order.
pub fn number_garments(lines: &[ExpandedOrderRecord]) -> Vec<GarmentLabel> {
    let mut groups: BTreeMap<(BillKey, String), Vec<usize>> = BTreeMap::new();
    for (i, line) in lines.iter().enumerate() {
        let kind = garment_name(line).to_lowercase();
        groups.entry((bill_key(line), kind)).or_default().push(i);
    }

    let mut numbers = vec![(1usize, 1usize); lines.len()];
    for members in groups.values_mut() {
        members.sort_by_key(|&i| {
            let line = &lines[i];
            (line.source_id(), line.source_key(), line.garment_index.unwrap_or(0), i)
        });
        let count = members.len();
        for (position, &i) in members.iter().enumerate() {
            numbers[i] = (position + 1, count);
        }
    }

    lines
        .iter()
        .zip(numbers)
        .map(|(line, (garment_number, same_type_count))| {
            let name = garment_name(line);
            let display = if same_type_count > 1 {
                format!("{} {}", name, garment_number)
            } else {
                name.to_string()
            };
            GarmentLabel {
                key: line.line_key(),
                display,
                same_type_count,
                garment_number,
            }
        })
        .collect()
}

/// Workers that can be assigned to one garment
pub fn max_workers(garment_type: &str) -> u32 {
    if garment_type.to_lowercase().contains("shirt") {
        3
    } else {
        2
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OrderRecord;
    use crate::orders::split;

    #[test]
    fn test_same_type_numbered_by_id() {
        let lines = split(&[
            OrderRecord::new(21, "pant", 400.0).with_bill_id(7),
            OrderRecord::new(20, "Pant", 400.0).with_bill_id(7),
            OrderRecord::new(22, "Shirt", 300.0).with_bill_id(7),
        ]);
        let labels = number_garments(&lines);

        let by_key: BTreeMap<&str, &str> = labels
            .iter()
            .map(|l| (l.key.as_str(), l.display.as_str()))
            .collect();
        assert_eq!(by_key["20"], "Pant 1");
        assert_eq!(by_key["21"], "pant 2");
        assert_eq!(by_key["22"], "Shirt");
    }

    #[test]
    fn test_fragments_numbered_in_entry_order() {
        let lines = split(&[
            OrderRecord::new(5, "Pant, Pant, Shirt", 900.0).with_bill_number("42"),
            OrderRecord::new(6, "Pant", 300.0).with_bill_number("42"),
        ]);
        let labels = number_garments(&lines);
        let displays: Vec<(&str, &str)> = labels
            .iter()
            .map(|l| (l.key.as_str(), l.display.as_str()))
            .collect();

        assert_eq!(
            displays,
            vec![
                ("6", "Pant 3"),
                ("5_split_0", "Pant 1"),
                ("5_split_1", "Pant 2"),
                ("5_split_2", "Shirt"),
            ]
        );
        assert!(labels.iter().take(3).all(|l| l.same_type_count == 3));
    }

    #[test]
    fn test_bills_numbered_separately() {
        let lines = split(&[
            OrderRecord::new(1, "Suit", 1000.0).with_bill_id(1),
            OrderRecord::new(2, "Suit", 1000.0).with_bill_id(2),
            OrderRecord::new(3, "", 0.0).with_bill_id(2),
        ]);
        let labels = number_garments(&lines);
        assert!(labels.iter().all(|l| l.same_type_count == 1));
        assert_eq!(labels.iter().find(|l| l.key == "3").unwrap().display, "N/A");
    }

    #[test]
    fn test_max_workers() {
        assert_eq!(max_workers("Shirt"), 3);
        assert_eq!(max_workers("N.Shirt"), 3);
        assert_eq!(max_workers("Pant"), 2);
        assert_eq!(max_workers(""), 2);
    }
}
