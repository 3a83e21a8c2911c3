//! Itemized bill snapshot
//!
//! Six quantity/amount pairs stored alongside a bill when it is printed.

use serde::{Deserialize, Serialize};

use super::category::{CategoryTotal, GarmentCategory};
use super::lenient::{self, round2};

/// Stored itemized bill. Values may arrive as strings ("0", "1500.00") or
/// numbers; missing values are zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemizedBill {
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub suit_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub suit_amount: f64,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub safari_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub safari_amount: f64,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub pant_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub pant_amount: f64,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub shirt_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub shirt_amount: f64,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub n_shirt_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub n_shirt_amount: f64,
    #[serde(default, deserialize_with = "lenient::quantity")]
    pub sadri_qty: u32,
    #[serde(default, deserialize_with = "lenient::amount")]
    pub sadri_amount: f64,
    /// Stored grand quantity, if the snapshot recorded one
    #[serde(default, deserialize_with = "lenient::opt_quantity", skip_serializing_if = "Option::is_none")]
    pub total_qty: Option<u32>,
    /// Stored grand amount, if the snapshot recorded one
    #[serde(default, deserialize_with = "lenient::opt_amount", skip_serializing_if = "Option::is_none")]
    pub total_amt: Option<f64>,
}

/// Grand totals of an itemized bill
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemizedTotals {
    pub total_qty: u32,
    pub total_amt: f64,
}

impl ItemizedBill {
    /// Build a snapshot from category totals (totals filled in)
    pub fn from_totals(totals: &[CategoryTotal]) -> Self {
        let mut bill = Self::default();
        for total in totals {
            bill.set(total.category, total.quantity, total.amount);
        }
        let summed = bill.summed();
        bill.total_qty = Some(summed.total_qty);
        bill.total_amt = Some(summed.total_amt);
        bill
    }

    /// Quantity and amount for one category
    pub fn get(&self, category: GarmentCategory) -> (u32, f64) {
        match category {
            GarmentCategory::Suit => (self.suit_qty, self.suit_amount),
            GarmentCategory::SafariJacket => (self.safari_qty, self.safari_amount),
            GarmentCategory::Pant => (self.pant_qty, self.pant_amount),
            GarmentCategory::Shirt => (self.shirt_qty, self.shirt_amount),
            GarmentCategory::NShirt => (self.n_shirt_qty, self.n_shirt_amount),
            GarmentCategory::Sadri => (self.sadri_qty, self.sadri_amount),
        }
    }

    pub fn set(&mut self, category: GarmentCategory, quantity: u32, amount: f64) {
        let (qty, amt) = match category {
            GarmentCategory::Suit => (&mut self.suit_qty, &mut self.suit_amount),
            GarmentCategory::SafariJacket => (&mut self.safari_qty, &mut self.safari_amount),
            GarmentCategory::Pant => (&mut self.pant_qty, &mut self.pant_amount),
            GarmentCategory::Shirt => (&mut self.shirt_qty, &mut self.shirt_amount),
            GarmentCategory::NShirt => (&mut self.n_shirt_qty, &mut self.n_shirt_amount),
            GarmentCategory::Sadri => (&mut self.sadri_qty, &mut self.sadri_amount),
        };
        *qty = quantity;
        *amt = amount;
    }

    /// Rows in bill order, zero rows included
    pub fn rows(&self) -> Vec<CategoryTotal> {
        GarmentCategory::ALL
            .iter()
            .map(|&category| {
                let (quantity, amount) = self.get(category);
                CategoryTotal {
                    category,
                    quantity,
                    amount,
                }
            })
            .collect()
    }

    /// Totals summed from the six rows, ignoring stored totals
    pub fn summed(&self) -> ItemizedTotals {
        let (total_qty, total_amt) = GarmentCategory::ALL
            .iter()
            .map(|&category| self.get(category))
            .fold((0u32, 0.0f64), |(q, a), (qty, amt)| {
                (q.saturating_add(qty), a + amt)
            });
        ItemizedTotals {
            total_qty,
            total_amt: round2(total_amt),
        }
    }

    /// Stored totals where present, summed rows otherwise
    pub fn totals(&self) -> ItemizedTotals {
        let summed = self.summed();
        ItemizedTotals {
            total_qty: self.total_qty.unwrap_or(summed.total_qty),
            total_amt: self.total_amt.map(round2).unwrap_or(summed.total_amt),
        }
    }

    /// Comma-joined names of categories with a positive quantity, in bill order
    pub fn garment_types(&self) -> String {
        GarmentCategory::ALL
            .iter()
            .filter(|&&category| self.get(category).0 > 0)
            .map(|category| category.display_name())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Amount still owed after an advance payment. Negative means overpaid.
    pub fn balance_due(&self, advance: f64) -> f64 {
        let advance = if advance.is_finite() { advance } else { 0.0 };
        round2(self.totals().total_amt - advance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> ItemizedBill {
        serde_json::from_value(json!({
            "suit_qty": "1",
            "suit_amount": "5000",
            "pant_qty": 2,
            "pant_amount": 1200.5,
            "shirt_qty": "",
            "shirt_amount": null,
            "sadri_qty": "1",
            "sadri_amount": "800.25"
        }))
        .unwrap()
    }

    #[test]
    fn test_lenient_snapshot_fields() {
        let bill = sample();
        assert_eq!(bill.get(GarmentCategory::Suit), (1, 5000.0));
        assert_eq!(bill.get(GarmentCategory::Pant), (2, 1200.5));
        assert_eq!(bill.get(GarmentCategory::Shirt), (0, 0.0));
        assert_eq!(bill.get(GarmentCategory::NShirt), (0, 0.0));
        assert_eq!(bill.total_qty, None);
        assert_eq!(bill.total_amt, None);
    }

    #[test]
    fn test_totals() {
        let bill = sample();
        let totals = bill.totals();
        assert_eq!(totals.total_qty, 4);
        assert!((totals.total_amt - 7000.75).abs() < 1e-9);
    }

    #[test]
    fn test_stored_totals_take_precedence() {
        let mut bill = sample();
        bill.total_qty = Some(5);
        bill.total_amt = Some(7100.0);
        assert_eq!(bill.totals().total_qty, 5);
        assert_eq!(bill.totals().total_amt, 7100.0);
        assert_eq!(bill.summed().total_qty, 4);
    }

    #[test]
    fn test_garment_types() {
        assert_eq!(sample().garment_types(), "Suit, Pant, Sadri");
        assert_eq!(ItemizedBill::default().garment_types(), "");
    }

    #[test]
    fn test_balance_due() {
        let bill = sample();
        assert!((bill.balance_due(2000.0) - 5000.75).abs() < 1e-9);
        assert!((bill.balance_due(8000.0) + 999.25).abs() < 1e-9);
        assert!((bill.balance_due(f64::NAN) - 7000.75).abs() < 1e-9);
    }

    #[test]
    fn test_from_totals_and_rows() {
        let totals = vec![
            CategoryTotal { category: GarmentCategory::Shirt, quantity: 2, amount: 900.0 },
            CategoryTotal { category: GarmentCategory::NShirt, quantity: 1, amount: 450.0 },
        ];
        let bill = ItemizedBill::from_totals(&totals);
        assert_eq!(bill.total_qty, Some(3));
        assert_eq!(bill.total_amt, Some(1350.0));

        let rows = bill.rows();
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[3].quantity, 2);
        assert_eq!(rows[4].category, GarmentCategory::NShirt);
        assert_eq!(rows[0], CategoryTotal::empty(GarmentCategory::Suit));
    }
}
