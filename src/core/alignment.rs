use serde::{Deserialize, Serialize};

/// CIGAR operation kinds (SAM codes `MIDNSHP=X`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CigarOpKind {
    Match,
    Insertion,
    Deletion,
    Skip,
    SoftClip,
    HardClip,
    Pad,
    SequenceMatch,
    SequenceMismatch,
}

impl CigarOpKind {
    /// Parse a SAM CIGAR operation code
    #[must_use]
    pub fn from_code(code: char) -> Option<Self> {
        match code {
            'M' => Some(Self::Match),
            'I' => Some(Self::Insertion),
            'D' => Some(Self::Deletion),
            'N' => Some(Self::Skip),
            'S' => Some(Self::SoftClip),
            'H' => Some(Self::HardClip),
            'P' => Some(Self::Pad),
            '=' => Some(Self::SequenceMatch),
            'X' => Some(Self::SequenceMismatch),
            _ => None,
        }
    }

    #[must_use]
    pub fn code(self) -> char {
        match self {
            Self::Match => 'M',
            Self::Insertion => 'I',
            Self::Deletion => 'D',
            Self::Skip => 'N',
            Self::SoftClip => 'S',
            Self::HardClip => 'H',
            Self::Pad => 'P',
            Self::SequenceMatch => '=',
            Self::SequenceMismatch => 'X',
        }
    }
}

impl From<noodles::sam::alignment::record::cigar::op::Kind> for CigarOpKind {
    fn from(kind: noodles::sam::alignment::record::cigar::op::Kind) -> Self {
        use noodles::sam::alignment::record::cigar::op::Kind;

        match kind {
            Kind::Match => Self::Match,
            Kind::Insertion => Self::Insertion,
            Kind::Deletion => Self::Deletion,
            Kind::Skip => Self::Skip,
            Kind::SoftClip => Self::SoftClip,
            Kind::HardClip => Self::HardClip,
            Kind::Pad => Self::Pad,
            Kind::SequenceMatch => Self::SequenceMatch,
            Kind::SequenceMismatch => Self::SequenceMismatch,
        }
    }
}

/// One run-length CIGAR element
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CigarOp {
    pub kind: CigarOpKind,
    pub len: usize,
}

impl CigarOp {
    #[must_use]
    pub fn new(kind: CigarOpKind, len: usize) -> Self {
        Self { kind, len }
    }
}

impl std::fmt::Display for CigarOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.len, self.kind.code())
    }
}

/// The fields of one alignment record the scanner needs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlignmentRecord {
    /// Reference sequence name (RNAME); `*` for unplaced reads
    pub contig: String,

    /// Zero-based leftmost aligned reference position; `None` when unmapped
    pub start: Option<u64>,

    /// Alignment encoding, in record order
    pub cigar: Vec<CigarOp>,

    /// Read bases (SEQ); empty when the record carries `*`
    pub sequence: Vec<u8>,
}

impl AlignmentRecord {
    pub fn new(
        contig: impl Into<String>,
        start: Option<u64>,
        cigar: Vec<CigarOp>,
        sequence: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            contig: contig.into(),
            start,
            cigar,
            sequence: sequence.into(),
        }
    }
}
