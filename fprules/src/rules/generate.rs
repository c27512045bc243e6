use super::rule::AssociationRule;
use crate::config::check_min_confidence;
use crate::error::{MiningError, Result};
use crate::fp::{FrequentItemsets, Itemset};
use crate::Item;
use rayon::prelude::*;
use std::collections::HashSet;

/// Derives every rule with confidence at least `min_confidence` from a
/// complete set of frequent itemsets.
///
/// Itemsets are processed in parallel; the result is sorted by confidence
/// descending, then by antecedent and consequent, so it does not depend on
/// scheduling.
pub fn generate_rules<T: Item>(
    itemsets: &FrequentItemsets<T>,
    min_confidence: f64,
) -> Result<Vec<AssociationRule<T>>> {
    check_min_confidence(min_confidence)?;

    let candidates: Vec<(&Itemset<T>, usize)> = itemsets
        .iter()
        .filter(|(itemset, _)| itemset.len() >= 2)
        .collect();
    log::debug!(
        "generating rules from {} itemsets of size >= 2, min confidence {}",
        candidates.len(),
        min_confidence
    );

    let per_itemset: Vec<Vec<AssociationRule<T>>> = candidates
        .par_iter()
        .map(|&(itemset, support)| -> Result<Vec<AssociationRule<T>>> {
            let mut search = RuleSearch::new(itemsets, itemset, support, min_confidence);
            search.descend(itemset)?;
            Ok(search.rules)
        })
        .collect::<Result<_>>()?;

    let mut rules: Vec<AssociationRule<T>> = per_itemset.into_iter().flatten().collect();
    sort_rules(&mut rules);
    log::debug!("generated {} rules", rules.len());
    Ok(rules)
}

/// Confidence descending; ties by antecedent, then consequent.
pub fn sort_rules<T: Ord>(rules: &mut [AssociationRule<T>]) {
    rules.sort_by(|a, b| {
        b.confidence
            .total_cmp(&a.confidence)
            .then_with(|| a.antecedent.cmp(&b.antecedent))
            .then_with(|| a.consequent.cmp(&b.consequent))
    });
}

/// Walks the antecedents of one itemset by removing one item at a time.
struct RuleSearch<'a, T> {
    itemsets: &'a FrequentItemsets<T>,
    itemset: &'a Itemset<T>,
    support: usize,
    min_confidence: f64,
    // Antecedents already evaluated; each split is scored once.
    visited: HashSet<Itemset<T>>,
    rules: Vec<AssociationRule<T>>,
}

impl<'a, T: Item> RuleSearch<'a, T> {
    fn new(
        itemsets: &'a FrequentItemsets<T>,
        itemset: &'a Itemset<T>,
        support: usize,
        min_confidence: f64,
    ) -> Self {
        Self {
            itemsets,
            itemset,
            support,
            min_confidence,
            visited: HashSet::new(),
            rules: Vec::new(),
        }
    }

    /// Scores every antecedent obtained by dropping one item from `current`,
    /// then recurses into those still holding two or more items, whether or
    /// not they qualified.
    fn descend(&mut self, current: &Itemset<T>) -> Result<()> {
        for item in current.iter() {
            let subset = current.without(item);
            if !self.visited.insert(subset.clone()) {
                continue;
            }

            let subset_support = self.subset_support(&subset)?;
            let confidence = self.support as f64 / subset_support as f64;
            if confidence >= self.min_confidence {
                let consequent = self.itemset.difference(&subset);
                let consequent_support = self.subset_support(&consequent)?;
                self.rules.push(AssociationRule {
                    antecedent: subset.clone(),
                    consequent,
                    confidence,
                    support: self.support,
                    lift: self.lift(confidence, consequent_support),
                });
            }

            if subset.len() >= 2 {
                self.descend(&subset)?;
            }
        }
        Ok(())
    }

    fn subset_support(&self, subset: &Itemset<T>) -> Result<usize> {
        let subset_support =
            self.itemsets
                .support(subset)
                .ok_or_else(|| MiningError::MissingSupport {
                    itemset: format!("{:?}", subset.as_slice()),
                })?;

        if subset_support == 0 || subset_support < self.support {
            return Err(MiningError::InconsistentSupport {
                itemset: format!("{:?}", self.itemset.as_slice()),
                support: self.support,
                subset: format!("{:?}", subset.as_slice()),
                subset_support,
            });
        }
        Ok(subset_support)
    }

    fn lift(&self, confidence: f64, consequent_support: usize) -> f64 {
        match self.itemsets.num_transactions() {
            0 => f64::NAN,
            n => confidence * n as f64 / consequent_support as f64,
        }
    }
}
