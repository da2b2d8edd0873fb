//! Per-stat explanation of how a final value was reached.

use crate::engine::{StatContribution, saturate};

/// One named term of a stat formula.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BreakdownEntry {
    pub label: String,
    pub amount: i32,
}

/// Ordered terms that sum to `value`.
///
/// Clamps and manual overrides appear as explicit adjustment entries, so the
/// sum of `entries` always equals `value` (saturated to `i32` when the terms
/// run past it). `formula_value` keeps what the formula produced before any
/// override.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatBreakdown {
    pub value: i32,
    pub formula_value: i32,
    pub overridden: bool,
    pub entries: Vec<BreakdownEntry>,
}

impl StatBreakdown {
    pub fn builder() -> StatBreakdownBuilder {
        StatBreakdownBuilder::default()
    }

    /// Sum of every entry. Equal to `value` for any built breakdown.
    pub fn entries_total(&self) -> i32 {
        saturate(self.entries.iter().map(|entry| i64::from(entry.amount)).sum())
    }
}

/// Accumulates breakdown entries while tracking the running total.
#[derive(Clone, Debug, Default)]
pub struct StatBreakdownBuilder {
    /// Exact sum of `entries`.
    total: i64,
    formula_value: Option<i32>,
    entries: Vec<BreakdownEntry>,
}

impl StatBreakdownBuilder {
    pub fn entry(mut self, label: impl Into<String>, amount: i32) -> Self {
        self.total += i64::from(amount);
        self.entries.push(BreakdownEntry {
            label: label.into(),
            amount,
        });
        self
    }

    /// Moves the running total to `target` with adjustment entries.
    ///
    /// Gaps wider than one `i32` are split across several entries.
    fn adjust_to(mut self, label: impl Into<String>, target: i64) -> Self {
        let label = label.into();
        while self.total != target {
            let step = saturate(target - self.total);
            self = self.entry(label.clone(), step);
        }
        self
    }

    /// One entry per effect contribution, labelled with its source name.
    pub fn contributions<'c, I>(self, contributions: I) -> Self
    where
        I: IntoIterator<Item = &'c StatContribution>,
    {
        contributions
            .into_iter()
            .fold(self, |builder, contribution| {
                builder.entry(contribution.source.name.as_str(), contribution.amount)
            })
    }

    /// Raises the running total to `min` with an adjustment entry if needed.
    pub fn clamp_min(self, label: impl Into<String>, min: i32) -> Self {
        let min = i64::from(min);
        if self.total < min {
            self.adjust_to(label, min)
        } else {
            self
        }
    }

    /// Replaces the running total with `value` when an override is present.
    pub fn override_with(mut self, value: Option<i32>) -> Self {
        match value {
            Some(value) => {
                self.formula_value = Some(saturate(self.total));
                self.adjust_to("Manual override", i64::from(value))
            }
            None => self,
        }
    }

    pub fn total(&self) -> i32 {
        saturate(self.total)
    }

    pub fn build(self) -> StatBreakdown {
        let value = saturate(self.total);
        StatBreakdown {
            value,
            formula_value: self.formula_value.unwrap_or(value),
            overridden: self.formula_value.is_some(),
            entries: self.entries,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_adds_adjustment_entry() {
        let breakdown = StatBreakdown::builder()
            .entry("Agility / 2", -1)
            .clamp_min("Minimum", 1)
            .build();

        assert_eq!(breakdown.value, 1);
        assert_eq!(breakdown.entries_total(), 1);
        assert_eq!(breakdown.entries.last().map(|e| e.amount), Some(2));
    }

    #[test]
    fn override_keeps_formula_value() {
        let breakdown = StatBreakdown::builder()
            .entry("Base", 8)
            .entry("Combat Mastery", 1)
            .override_with(Some(15))
            .build();

        assert_eq!(breakdown.value, 15);
        assert_eq!(breakdown.formula_value, 9);
        assert!(breakdown.overridden);
        assert_eq!(breakdown.entries_total(), 15);
    }

    #[test]
    fn huge_terms_saturate_and_still_sum() {
        let breakdown = StatBreakdown::builder()
            .entry("Class base", 9)
            .entry("Might", i32::MAX)
            .entry("Level", 0)
            .build();
        assert_eq!(breakdown.value, i32::MAX);
        assert_eq!(breakdown.entries_total(), breakdown.value);

        let overridden = StatBreakdown::builder()
            .entry("Base", 8)
            .entry("Might", i32::MAX)
            .entry("Charisma", i32::MAX)
            .override_with(Some(12))
            .build();
        assert_eq!(overridden.value, 12);
        assert_eq!(overridden.formula_value, i32::MAX);
        assert_eq!(overridden.entries_total(), 12);
    }
}
