/// A single named reference contig, loaded once and read-only afterwards
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceSequence {
    /// Contig name as it appears in the FASTA header (first token)
    pub name: String,

    /// Uppercased bases, indexed by zero-based position
    bases: Vec<u8>,
}

impl ReferenceSequence {
    /// Build a reference from raw bases. Bases are uppercased so that
    /// soft-masked regions compare equal to observed read bases.
    pub fn new(name: impl Into<String>, bases: impl Into<Vec<u8>>) -> Self {
        let mut bases = bases.into();
        bases.make_ascii_uppercase();
        Self {
            name: name.into(),
            bases,
        }
    }

    /// Reference base at a zero-based position, or `None` past the contig end
    #[must_use]
    pub fn base_at(&self, position: u64) -> Option<char> {
        usize::try_from(position)
            .ok()
            .and_then(|i| self.bases.get(i))
            .map(|&b| char::from(b))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bases.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bases.is_empty()
    }
}
