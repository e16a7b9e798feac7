//! Cost Table - Monthly operating cost components per alternative.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AlternativeId, ValidationError};

/// A named monthly cost component (rent, utilities, maintenance...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub name: String,
    pub amount: f64,
}

impl CostComponent {
    /// Creates a new cost component.
    pub fn new(name: impl Into<String>, amount: f64) -> Self {
        Self {
            name: name.into(),
            amount,
        }
    }
}

/// The cost components of one alternative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeCosts {
    pub alternative: AlternativeId,
    pub components: Vec<CostComponent>,
}

impl AlternativeCosts {
    /// Total monthly operating cost, identical for every scenario.
    pub fn total(&self) -> f64 {
        self.components.iter().map(|c| c.amount).sum()
    }
}

/// Cost components keyed by alternative, in canonical input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CostTable {
    entries: Vec<AlternativeCosts>,
}

impl CostTable {
    /// Creates a builder for constructing a cost table.
    pub fn builder() -> CostTableBuilder {
        CostTableBuilder::new()
    }

    /// Returns the rows in canonical order.
    pub fn entries(&self) -> &[AlternativeCosts] {
        &self.entries
    }

    /// Returns the alternatives in canonical order.
    pub fn alternatives(&self) -> impl Iterator<Item = &AlternativeId> {
        self.entries.iter().map(|e| &e.alternative)
    }

    /// Gets the row of one alternative.
    pub fn get(&self, alternative: &AlternativeId) -> Option<&AlternativeCosts> {
        self.entries.iter().find(|e| &e.alternative == alternative)
    }

    /// Total monthly cost of one alternative.
    pub fn total_cost(&self, alternative: &AlternativeId) -> Option<f64> {
        self.get(alternative).map(AlternativeCosts::total)
    }

    /// Returns true if the table has no alternatives.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of alternatives.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Builder for constructing CostTable instances.
#[derive(Debug, Default)]
pub struct CostTableBuilder {
    entries: Vec<AlternativeCosts>,
}

impl CostTableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an alternative with its cost components.
    pub fn alternative(
        mut self,
        alternative: AlternativeId,
        components: Vec<CostComponent>,
    ) -> Self {
        self.entries.push(AlternativeCosts {
            alternative,
            components,
        });
        self
    }

    /// Builds the cost table, rejecting duplicates and non-finite amounts.
    pub fn build(self) -> Result<CostTable, ValidationError> {
        for (index, entry) in self.entries.iter().enumerate() {
            if self.entries[..index]
                .iter()
                .any(|e| e.alternative == entry.alternative)
            {
                return Err(ValidationError::duplicate(
                    "cost table",
                    entry.alternative.as_str(),
                ));
            }
            for component in &entry.components {
                if !component.amount.is_finite() {
                    return Err(ValidationError::not_finite(
                        format!("cost '{}' of '{}'", component.name, entry.alternative),
                        component.amount,
                    ));
                }
            }
        }

        Ok(CostTable {
            entries: self.entries,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn aid(id: &str) -> AlternativeId {
        AlternativeId::new(id).unwrap()
    }

    fn santa_marta_costs() -> Vec<CostComponent> {
        vec![
            CostComponent::new("rent", 2_000_000.0),
            CostComponent::new("utilities", 3_500_000.0),
            CostComponent::new("maintenance", 4_000_000.0),
        ]
    }

    #[test]
    fn total_cost_sums_components() {
        let table = CostTable::builder()
            .alternative(aid("Santa Marta"), santa_marta_costs())
            .build()
            .unwrap();

        assert_eq!(table.total_cost(&aid("Santa Marta")), Some(9_500_000.0));
    }

    #[test]
    fn total_cost_of_unknown_alternative_is_none() {
        let table = CostTable::builder()
            .alternative(aid("Santa Marta"), santa_marta_costs())
            .build()
            .unwrap();

        assert!(table.total_cost(&aid("Cartagena")).is_none());
    }

    #[test]
    fn alternative_without_components_costs_nothing() {
        let table = CostTable::builder()
            .alternative(aid("A"), vec![])
            .build()
            .unwrap();

        assert_eq!(table.total_cost(&aid("A")), Some(0.0));
    }

    #[test]
    fn builder_keeps_input_order() {
        let table = CostTable::builder()
            .alternative(aid("Santa Marta"), vec![])
            .alternative(aid("Barranquilla"), vec![])
            .alternative(aid("Cartagena"), vec![])
            .build()
            .unwrap();

        let names: Vec<_> = table.alternatives().map(|a| a.as_str()).collect();
        assert_eq!(names, vec!["Santa Marta", "Barranquilla", "Cartagena"]);
        assert_eq!(table.len(), 3);
    }

    #[test]
    fn builder_rejects_duplicate_alternative() {
        let result = CostTable::builder()
            .alternative(aid("A"), vec![])
            .alternative(aid("A"), vec![])
            .build();

        assert!(matches!(result, Err(ValidationError::Duplicate { .. })));
    }

    #[test]
    fn builder_rejects_non_finite_amount() {
        let result = CostTable::builder()
            .alternative(aid("A"), vec![CostComponent::new("rent", f64::NAN)])
            .build();

        assert!(matches!(result, Err(ValidationError::NotFinite { .. })));
    }
}
