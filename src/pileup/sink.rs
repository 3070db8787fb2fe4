//! Destinations for accepted candidates.

use std::io::{self, Write};

use crate::pileup::candidate::Candidate;

/// Append-only receiver of candidate sites, in emission order
pub trait CandidateSink {
    /// Append one candidate
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying writer fails.
    fn emit(&mut self, candidate: &Candidate) -> io::Result<()>;

    /// Flush anything buffered once the scan is complete
    ///
    /// # Errors
    ///
    /// Returns an I/O error if the underlying writer fails.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CandidateSink for Vec<Candidate> {
    fn emit(&mut self, candidate: &Candidate) -> io::Result<()> {
        self.push(candidate.clone());
        Ok(())
    }
}

/// Space-separated text lines, one per candidate
pub struct TextSink<W: Write> {
    writer: W,
}

impl<W: Write> TextSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CandidateSink for TextSink<W> {
    fn emit(&mut self, candidate: &Candidate) -> io::Result<()> {
        writeln!(self.writer, "{candidate}")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// JSON Lines: one serialized candidate object per line
pub struct JsonSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> CandidateSink for JsonSink<W> {
    fn emit(&mut self, candidate: &Candidate) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, candidate)?;
        self.writer.write_all(b"\n")
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
