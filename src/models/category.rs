//! Garment categories
//!
//! The six fixed columns of an itemized bill, and the substring rules that
//! map a free-form garment label onto one of them.

use serde::{Deserialize, Serialize};

/// Itemized bill category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GarmentCategory {
    Suit,
    #[serde(rename = "Safari/Jacket")]
    SafariJacket,
    Pant,
    Shirt,
    #[serde(rename = "N.Shirt")]
    NShirt,
    Sadri,
}

impl GarmentCategory {
    /// All categories in bill order
    pub const ALL: [GarmentCategory; 6] = [
        GarmentCategory::Suit,
        GarmentCategory::SafariJacket,
        GarmentCategory::Pant,
        GarmentCategory::Shirt,
        GarmentCategory::NShirt,
        GarmentCategory::Sadri,
    ];

    /// Column prefix used by stored itemized bills (`suit_qty`, `safari_amount`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            GarmentCategory::Suit => "suit",
            GarmentCategory::SafariJacket => "safari",
            GarmentCategory::Pant => "pant",
            GarmentCategory::Shirt => "shirt",
            GarmentCategory::NShirt => "n_shirt",
            GarmentCategory::Sadri => "sadri",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            GarmentCategory::Suit => "Suit",
            GarmentCategory::SafariJacket => "Safari/Jacket",
            GarmentCategory::Pant => "Pant",
            GarmentCategory::Shirt => "Shirt",
            GarmentCategory::NShirt => "N.Shirt",
            GarmentCategory::Sadri => "Sadri",
        }
    }

    /// Parse a column prefix or display name
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "suit" => Some(GarmentCategory::Suit),
            "safari" | "jacket" | "safari/jacket" => Some(GarmentCategory::SafariJacket),
            "pant" => Some(GarmentCategory::Pant),
            "shirt" => Some(GarmentCategory::Shirt),
            "n_shirt" | "n.shirt" => Some(GarmentCategory::NShirt),
            "sadri" => Some(GarmentCategory::Sadri),
            _ => None,
        }
    }

    /// Position in bill order
    pub fn index(&self) -> usize {
        match self {
            GarmentCategory::Suit => 0,
            GarmentCategory::SafariJacket => 1,
            GarmentCategory::Pant => 2,
            GarmentCategory::Shirt => 3,
            GarmentCategory::NShirt => 4,
            GarmentCategory::Sadri => 5,
        }
    }

    /// Classify a garment label. First matching rule wins:
    /// suit, safari|jacket, pant, n.shirt, shirt, sadri.
    pub fn classify(garment_type: &str) -> Option<Self> {
        let lower = garment_type.to_lowercase();

        if lower.contains("suit") {
            Some(GarmentCategory::Suit)
        } else if lower.contains("safari") || lower.contains("jacket") {
            Some(GarmentCategory::SafariJacket)
        } else if lower.contains("pant") {
            Some(GarmentCategory::Pant)
        } else if lower.contains("n.shirt") {
            Some(GarmentCategory::NShirt)
        } else if lower.contains("shirt") {
            Some(GarmentCategory::Shirt)
        } else if lower.contains("sadri") {
            Some(GarmentCategory::Sadri)
        } else {
            None
        }
    }
}

impl std::fmt::Display for GarmentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Quantity and amount for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: GarmentCategory,
    pub quantity: u32,
    pub amount: f64,
}

impl CategoryTotal {
    pub fn empty(category: GarmentCategory) -> Self {
        Self {
            category,
            quantity: 0,
            amount: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_priority() {
        assert_eq!(GarmentCategory::classify("Suit"), Some(GarmentCategory::Suit));
        assert_eq!(GarmentCategory::classify("Safari suit"), Some(GarmentCategory::Suit));
        assert_eq!(GarmentCategory::classify("Nehru Jacket"), Some(GarmentCategory::SafariJacket));
        assert_eq!(GarmentCategory::classify("SAFARI"), Some(GarmentCategory::SafariJacket));
        assert_eq!(GarmentCategory::classify("Pant"), Some(GarmentCategory::Pant));
        assert_eq!(GarmentCategory::classify("N.Shirt"), Some(GarmentCategory::NShirt));
        assert_eq!(GarmentCategory::classify("n.shirt half"), Some(GarmentCategory::NShirt));
        assert_eq!(GarmentCategory::classify("Shirt"), Some(GarmentCategory::Shirt));
        assert_eq!(GarmentCategory::classify("Sadri"), Some(GarmentCategory::Sadri));
        assert_eq!(GarmentCategory::classify("Kurta"), None);
        assert_eq!(GarmentCategory::classify(""), None);
    }

    #[test]
    fn test_pant_shirt_combo_counts_as_pant() {
        assert_eq!(GarmentCategory::classify("Pant, Shirt"), Some(GarmentCategory::Pant));
    }

    #[test]
    fn test_from_str_and_display() {
        for category in GarmentCategory::ALL {
            assert_eq!(GarmentCategory::from_str(category.as_str()), Some(category));
            assert_eq!(GarmentCategory::from_str(category.display_name()), Some(category));
            assert_eq!(GarmentCategory::ALL[category.index()], category);
        }
        assert_eq!(GarmentCategory::NShirt.to_string(), "N.Shirt");
    }

    #[test]
    fn test_serializes_as_display_name() {
        let json = serde_json::to_string(&GarmentCategory::SafariJacket).unwrap();
        assert_eq!(json, "\"Safari/Jacket\"");
        let back: GarmentCategory = serde_json::from_str("\"N.Shirt\"").unwrap();
        assert_eq!(back, GarmentCategory::NShirt);
    }
}
