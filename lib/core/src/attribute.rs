use serde::{Deserialize, Serialize};
use std::fmt;

/// Integer code identifying a fiscal or demographic measure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeId(pub u32);

impl AttributeId {
    /// Default normalize-by attribute
    pub const POPULATION: AttributeId = AttributeId(1);
    pub const TOTAL_REVENUE: AttributeId = AttributeId(2);
    pub const TOTAL_TAXES: AttributeId = AttributeId(3);
    pub const TOTAL_EXPENDITURE: AttributeId = AttributeId(4);
    pub const PROPERTY_TAX: AttributeId = AttributeId(5);
    pub const SALES_TAX: AttributeId = AttributeId(6);
    pub const INCOME_TAX: AttributeId = AttributeId(7);
    pub const INTERGOVERNMENTAL_REVENUE: AttributeId = AttributeId(8);
    pub const TOTAL_DEBT: AttributeId = AttributeId(9);

    /// Display name for well-known codes
    pub fn name(self) -> Option<&'static str> {
        KNOWN_ATTRIBUTES
            .iter()
            .find(|known| known.id == self)
            .map(|known| known.name)
    }
}

impl From<u32> for AttributeId {
    fn from(code: u32) -> Self {
        AttributeId(code)
    }
}

impl fmt::Display for AttributeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A named attribute code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct KnownAttribute {
    pub id: AttributeId,
    pub name: &'static str,
}

/// Codes the source data is known to use. Data may carry codes outside this
/// list; those are still queryable, just unnamed.
pub const KNOWN_ATTRIBUTES: &[KnownAttribute] = &[
    KnownAttribute { id: AttributeId::POPULATION, name: "Population" },
    KnownAttribute { id: AttributeId::TOTAL_REVENUE, name: "Total Revenue" },
    KnownAttribute { id: AttributeId::TOTAL_TAXES, name: "Total Taxes" },
    KnownAttribute { id: AttributeId::TOTAL_EXPENDITURE, name: "Total Expenditure" },
    KnownAttribute { id: AttributeId::PROPERTY_TAX, name: "Property Tax" },
    KnownAttribute { id: AttributeId::SALES_TAX, name: "General Sales Tax" },
    KnownAttribute { id: AttributeId::INCOME_TAX, name: "Individual Income Tax" },
    KnownAttribute { id: AttributeId::INTERGOVERNMENTAL_REVENUE, name: "Intergovernmental Revenue" },
    KnownAttribute { id: AttributeId::TOTAL_DEBT, name: "Total Debt Outstanding" },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_names() {
        assert_eq!(AttributeId::POPULATION.name(), Some("Population"));
        assert_eq!(AttributeId::TOTAL_REVENUE.name(), Some("Total Revenue"));
        assert_eq!(AttributeId(999).name(), None);
    }

    #[test]
    fn test_known_codes_unique() {
        let mut codes: Vec<u32> = KNOWN_ATTRIBUTES.iter().map(|a| a.id.0).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), KNOWN_ATTRIBUTES.len());
    }
}
