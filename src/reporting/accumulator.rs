use crate::reporting::rounding;
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet};

/// Running report totals keyed by settlement day or by entity.
///
/// Each added line total is folded into its key's running amount with
/// [`rounding::accumulate`], so every stored amount carries exactly two
/// decimals. Keys iterate in ascending order.
///
/// A key whose running amount leaves the range of [`Decimal`] is moved
/// out of the totals and into the overflowed set. Later lines for that
/// key are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Accumulator<K: Ord> {
    totals: BTreeMap<K, Decimal>,
    overflowed: BTreeSet<K>,
}

impl<K: Ord> Default for Accumulator<K> {
    fn default() -> Self {
        Self {
            totals: BTreeMap::new(),
            overflowed: BTreeSet::new(),
        }
    }
}

impl<K: Ord> Accumulator<K> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a three-decimal line total into the running amount for `key`.
    ///
    /// Returns `false` if the key has overflowed, now or earlier.
    pub fn add(&mut self, key: K, line_total: Decimal) -> bool {
        if self.overflowed.contains(&key) {
            return false;
        }
        let running = self.totals.get(&key).copied().unwrap_or(Decimal::ZERO);
        match rounding::accumulate(running, line_total) {
            Some(next) => {
                self.totals.insert(key, next);
                true
            }
            None => {
                self.totals.remove(&key);
                self.overflowed.insert(key);
                false
            }
        }
    }

    /// The running amount for `key`, or zero if nothing was added for it.
    pub fn get(&self, key: &K) -> Decimal {
        self.totals.get(key).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn is_overflowed(&self, key: &K) -> bool {
        self.overflowed.contains(key)
    }

    pub fn len(&self) -> usize {
        self.totals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.totals.is_empty() && self.overflowed.is_empty()
    }

    /// Sum of all running amounts, `None` if it cannot be represented.
    pub fn total(&self) -> Option<Decimal> {
        rounding::checked_sum(self.totals.values().copied())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &Decimal)> {
        self.totals.iter()
    }

    /// The representable totals and the overflowed keys.
    pub fn into_parts(self) -> (BTreeMap<K, Decimal>, BTreeSet<K>) {
        (self.totals, self.overflowed)
    }
}

impl<K: Ord> FromIterator<(K, Decimal)> for Accumulator<K> {
    fn from_iter<T: IntoIterator<Item = (K, Decimal)>>(iter: T) -> Self {
        let mut acc = Self::new();
        for (key, line_total) in iter {
            acc.add(key, line_total);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    /// 7 * 10^25 at three decimals, close to the largest line total.
    fn big_line() -> Decimal {
        Decimal::from_i128_with_scale(7 * 10i128.pow(28), 3)
    }

    #[test]
    fn test_first_line_is_rounded_to_cents() {
        let mut acc = Accumulator::new();
        assert!(acc.add("foo", dec!(10.125)));
        assert_eq!(acc.get(&"foo"), dec!(10.12));
        assert_eq!(acc.get(&"foo").scale(), 2);
    }

    #[test]
    fn test_running_total_per_key() {
        let mut acc = Accumulator::new();
        acc.add("foo", dec!(100.001));
        acc.add("bar", dec!(50.000));
        acc.add("foo", dec!(0.004));
        assert_eq!(acc.get(&"foo"), dec!(100.00));
        assert_eq!(acc.get(&"bar"), dec!(50.00));
        assert_eq!(acc.get(&"baz"), Decimal::ZERO);
        assert_eq!(acc.total(), Some(dec!(150.00)));
        assert_eq!(acc.len(), 2);
    }

    #[test]
    fn test_keys_iterate_ascending() {
        let acc: Accumulator<u32> = vec![(3, dec!(1)), (1, dec!(1)), (2, dec!(1))]
            .into_iter()
            .collect();
        let keys: Vec<u32> = acc.iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec![1, 2, 3]);
    }

    #[test]
    fn test_overflowing_key_is_set_aside() {
        let mut acc = Accumulator::new();
        acc.add("small", dec!(1.005));
        assert!(acc.add("big", big_line()));
        // 1.4 * 10^26 cannot be added exactly at three decimals.
        assert!(!acc.add("big", big_line()));
        assert!(acc.is_overflowed(&"big"));
        assert!(!acc.add("big", dec!(1)));
        assert_eq!(acc.get(&"big"), Decimal::ZERO);
        assert_eq!(acc.get(&"small"), dec!(1.00));
        assert_eq!(acc.len(), 1);

        let (totals, overflowed) = acc.into_parts();
        assert_eq!(totals.keys().copied().collect::<Vec<_>>(), vec!["small"]);
        assert_eq!(overflowed.into_iter().collect::<Vec<_>>(), vec!["big"]);
    }

    #[test]
    fn test_total_overflow_is_none() {
        let mut acc = Accumulator::new();
        for key in 0..12 {
            assert!(acc.add(key, big_line()));
        }
        assert_eq!(acc.len(), 12);
        // Each key fits; their sum, 8.4 * 10^26, does not fit at two decimals.
        assert_eq!(acc.total(), None);
    }
}
