use serde::{Deserialize, Serialize};

/// Number of symbols tallied at every pileup position
pub const NUM_SYMBOLS: usize = 5;

/// A base symbol tallied in the pileup.
///
/// Declaration order doubles as the tie-break priority when two symbols have
/// the same count: A ranks before C, C before G, G before T, T before N.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Base {
    A,
    C,
    G,
    T,
    N,
}

impl Base {
    /// All symbols in priority order
    pub const ALL: [Base; NUM_SYMBOLS] = [Base::A, Base::C, Base::G, Base::T, Base::N];

    /// Map a raw sequence byte to a symbol.
    ///
    /// Lowercase bases are folded to uppercase; anything that is not A/C/G/T
    /// (IUPAC ambiguity codes, `.`, `*`) is tallied as N.
    #[must_use]
    pub fn from_byte(byte: u8) -> Self {
        match byte.to_ascii_uppercase() {
            b'A' => Base::A,
            b'C' => Base::C,
            b'G' => Base::G,
            b'T' => Base::T,
            _ => Base::N,
        }
    }

    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Base::A => 'A',
            Base::C => 'C',
            Base::G => 'G',
            Base::T => 'T',
            Base::N => 'N',
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl std::fmt::Display for Base {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Per-symbol observation counts at a single reference position
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseCounts([u32; NUM_SYMBOLS]);

impl BaseCounts {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one observation of `base`
    pub fn observe(&mut self, base: Base) {
        self.0[base.index()] += 1;
    }

    #[must_use]
    pub fn get(&self, base: Base) -> u32 {
        self.0[base.index()]
    }

    /// Total depth across all five symbols
    #[must_use]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// (symbol, count) pairs sorted by count, highest first.
    ///
    /// The sort is stable over [`Base::ALL`], so equal counts keep the
    /// A < C < G < T < N priority order.
    #[must_use]
    pub fn ranked(&self) -> [(Base, u32); NUM_SYMBOLS] {
        let mut pairs = Base::ALL.map(|base| (base, self.get(base)));
        pairs.sort_by(|a, b| b.1.cmp(&a.1));
        pairs
    }
}

impl FromIterator<(Base, u32)> for BaseCounts {
    fn from_iter<I: IntoIterator<Item = (Base, u32)>>(iter: I) -> Self {
        let mut counts = Self::new();
        for (base, count) in iter {
            counts.0[base.index()] += count;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_byte() {
        assert_eq!(Base::from_byte(b'A'), Base::A);
        assert_eq!(Base::from_byte(b'c'), Base::C);
        assert_eq!(Base::from_byte(b'g'), Base::G);
        assert_eq!(Base::from_byte(b'T'), Base::T);
        assert_eq!(Base::from_byte(b'N'), Base::N);
        // Ambiguity codes collapse to N
        assert_eq!(Base::from_byte(b'R'), Base::N);
        assert_eq!(Base::from_byte(b'*'), Base::N);
    }

    #[test]
    fn test_observe_and_total() {
        let mut counts = BaseCounts::new();
        assert_eq!(counts.total(), 0);
        counts.observe(Base::A);
        counts.observe(Base::A);
        counts.observe(Base::T);
        assert_eq!(counts.get(Base::A), 2);
        assert_eq!(counts.get(Base::T), 1);
        assert_eq!(counts.get(Base::C), 0);
        assert_eq!(counts.total(), 3);
    }

    #[test]
    fn test_ranked_descending() {
        let counts: BaseCounts = [(Base::A, 3), (Base::C, 7)].into_iter().collect();
        let ranked = counts.ranked();
        assert_eq!(ranked[0], (Base::C, 7));
        assert_eq!(ranked[1], (Base::A, 3));
    }

    #[test]
    fn test_ranked_ties_follow_symbol_priority() {
        let counts: BaseCounts = [(Base::N, 2), (Base::T, 2), (Base::G, 2)]
            .into_iter()
            .collect();
        let ranked = counts.ranked();
        assert_eq!(
            ranked,
            [
                (Base::G, 2),
                (Base::T, 2),
                (Base::N, 2),
                (Base::A, 0),
                (Base::C, 0)
            ]
        );
    }
}
