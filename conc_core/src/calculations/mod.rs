//! # Section Calculations
//!
//! Each calculation follows the pattern:
//!
//! - `*Input` - Input parameters (JSON-serializable)
//! - `*Result` - Calculation results (JSON-serializable)
//! - `calculate(input) -> Result<*Result, CalcError>` - Pure calculation function
//!
//! ## Available Calculations
//!
//! - [`capacity`] - Plastic centroid and N-M interaction curve

pub mod capacity;

use serde::{Deserialize, Serialize};

pub use capacity::{CapacityInput, CapacityResult};

/// Enum wrapper for all calculation types, tagged by `"type"` in JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum CalculationItem {
    /// N-M capacity of a reinforced concrete section
    Capacity(CapacityInput),
}

impl CalculationItem {
    /// User-provided label for this calculation
    pub fn label(&self) -> &str {
        match self {
            CalculationItem::Capacity(c) => &c.section.label,
        }
    }

    /// Calculation type as a string
    pub fn calc_type(&self) -> &'static str {
        match self {
            CalculationItem::Capacity(_) => "Capacity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_from_json() {
        let json = r#"{
            "type": "Capacity",
            "section": {
                "label": "W-3",
                "outline": [{"x": 0, "y": 0}, {"x": 200, "y": 0}, {"x": 200, "y": -1000}, {"x": 0, "y": -1000}],
                "fck": 35,
                "fyk": 500
            }
        }"#;
        let item: CalculationItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.label(), "W-3");
        assert_eq!(item.calc_type(), "Capacity");
        let CalculationItem::Capacity(input) = item;
        assert_eq!(input.sweep.points_per_side, 30);
    }
}
