use std::collections::BTreeSet;

/// Distinct non-empty values observed across sources.
///
/// Ordered so any value picked from the set is deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinctValues<'a> {
    values: BTreeSet<&'a str>,
    contributors: usize,
}

impl<'a> DistinctValues<'a> {
    /// Collect values, one slot per source; `None` and empty strings are skipped.
    pub fn collect<I>(slots: I) -> Self
    where
        I: IntoIterator<Item = Option<&'a str>>,
    {
        let mut out = Self::default();
        for value in slots.into_iter().flatten() {
            if value.is_empty() {
                continue;
            }
            out.values.insert(value);
            out.contributors += 1;
        }
        out
    }

    /// Number of distinct values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Number of sources that supplied a value.
    pub fn contributors(&self) -> usize {
        self.contributors
    }

    /// Values in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.values.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_absent_and_empty() {
        let v = DistinctValues::collect([None, Some(""), Some("1990")]);
        assert_eq!(v.len(), 1);
        assert_eq!(v.contributors(), 1);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec!["1990"]);
    }

    #[test]
    fn duplicates_collapse_but_contributors_count() {
        let v = DistinctValues::collect([Some("a"), Some("a"), Some("a")]);
        assert_eq!(v.len(), 1);
        assert_eq!(v.contributors(), 3);
    }

    #[test]
    fn disagreement_is_ordered() {
        let v = DistinctValues::collect([Some("b"), None, Some("a")]);
        assert_eq!(v.len(), 2);
        assert_eq!(v.iter().collect::<Vec<_>>(), vec!["a", "b"]);
    }

    #[test]
    fn nothing_supplied() {
        let v = DistinctValues::collect([None, None, None]);
        assert!(v.is_empty());
        assert_eq!(v.contributors(), 0);
    }
}
