use crate::fp::Itemset;
use serde::Serialize;
use std::fmt;

/// `antecedent => consequent`, where the union of both sides is a frequent
/// itemset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationRule<T> {
    pub antecedent: Itemset<T>,
    pub consequent: Itemset<T>,
    /// `support(antecedent ∪ consequent) / support(antecedent)`.
    pub confidence: f64,
    /// Support count of `antecedent ∪ consequent`.
    pub support: usize,
    /// Confidence relative to the consequent's base rate. NaN when the
    /// transaction count is unknown.
    pub lift: f64,
}

impl<T: Ord + Clone> AssociationRule<T> {
    pub fn itemset(&self) -> Itemset<T> {
        self.antecedent.union(&self.consequent)
    }
}

impl<T: fmt::Display> fmt::Display for AssociationRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_items(f, &self.antecedent)?;
        f.write_str(" => ")?;
        write_items(f, &self.consequent)?;
        write!(f, " (confidence {:.3})", self.confidence)
    }
}

fn write_items<T: fmt::Display>(f: &mut fmt::Formatter<'_>, items: &[T]) -> fmt::Result {
    f.write_str("{")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", item)?;
    }
    f.write_str("}")
}
