//! Byte frequency counting.

/// Occurrence count of every byte value in an input.
///
/// Only byte values that actually occur are considered present; iteration
/// visits them in ascending byte order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
}

impl FrequencyTable {
    /// Count the bytes of `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &b in data {
            counts[b as usize] += 1;
        }
        Self { counts }
    }

    /// Count for `symbol`, or `None` if it never occurs.
    pub fn get(&self, symbol: u8) -> Option<u64> {
        match self.counts[symbol as usize] {
            0 => None,
            n => Some(n),
        }
    }

    /// Present byte values and their counts, in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &n)| n > 0)
            .map(|(s, &n)| (s as u8, n))
    }

    /// Number of distinct byte values present.
    pub fn distinct(&self) -> usize {
        self.counts.iter().filter(|&&n| n > 0).count()
    }

    /// Sum of all counts, equal to the input length.
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// True if no byte was counted.
    pub fn is_empty(&self) -> bool {
        self.distinct() == 0
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self { counts: [0; 256] }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_distinct_bytes() {
        let table = FrequencyTable::from_bytes(b"aaabbc");
        assert_eq!(table.get(b'a'), Some(3));
        assert_eq!(table.get(b'b'), Some(2));
        assert_eq!(table.get(b'c'), Some(1));
        assert_eq!(table.get(b'd'), None);
        assert_eq!(table.distinct(), 3);
        assert_eq!(table.total(), 6);
    }

    #[test]
    fn test_iter_ascending() {
        let table = FrequencyTable::from_bytes(&[9, 0, 255, 9]);
        let entries: Vec<_> = table.iter().collect();
        assert_eq!(entries, vec![(0, 1), (9, 2), (255, 1)]);
    }

    #[test]
    fn test_empty_input() {
        let table = FrequencyTable::from_bytes(&[]);
        assert!(table.is_empty());
        assert_eq!(table.iter().count(), 0);
        assert_eq!(table, FrequencyTable::default());
    }
}
