/// Number of distinct byte symbols.
pub const SYMBOL_COUNT: usize = 256;

/// Occurrence count for every possible byte value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; SYMBOL_COUNT],
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; SYMBOL_COUNT],
        }
    }

    /// Count every byte of `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        bytes.iter().fold(Self::new(), |mut table, &byte| {
            table.increment(byte);
            table
        })
    }

    pub fn get(&self, symbol: u8) -> u64 {
        self.counts[symbol as usize]
    }

    pub fn set(&mut self, symbol: u8, count: u64) {
        self.counts[symbol as usize] = count;
    }

    pub fn increment(&mut self, symbol: u8) {
        let slot = &mut self.counts[symbol as usize];
        *slot = slot.saturating_add(1);
    }

    /// Number of symbols with a non-zero count.
    pub fn distinct_symbols(&self) -> usize {
        self.counts.iter().filter(|&&count| count > 0).count()
    }

    /// Sum of all counts, `None` on overflow.
    pub fn total(&self) -> Option<u64> {
        self.counts
            .iter()
            .try_fold(0u64, |acc, &count| acc.checked_add(count))
    }

    pub fn is_empty(&self) -> bool {
        self.distinct_symbols() == 0
    }

    /// `(symbol, count)` for every present symbol, ascending by symbol.
    pub fn present(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(symbol, &count)| (symbol as u8, count))
    }

    pub fn as_array(&self) -> &[u64; SYMBOL_COUNT] {
        &self.counts
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[u64; SYMBOL_COUNT]> for FrequencyTable {
    fn from(counts: [u64; SYMBOL_COUNT]) -> Self {
        FrequencyTable { counts }
    }
}

impl FromIterator<(u8, u64)> for FrequencyTable {
    fn from_iter<I: IntoIterator<Item = (u8, u64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (symbol, count) in iter {
            table.set(symbol, count);
        }
        table
    }
}
