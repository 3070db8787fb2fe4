//! The streaming pileup: from alignment records to candidate sites.
//!
//! - [`cigar`]: read acceptance and the (position, base) walk of a read
//! - [`table`]: per-position tallies with create-on-touch, remove-on-finalize
//! - [`sweep`]: the cursor that finalizes positions behind each new read
//! - [`candidate`]: the accept/reject rule and the emitted record
//! - [`sink`]: text and JSON Lines writers
//!
//! ## Candidate rule
//!
//! With `total` the depth at a position and `p0`, `p1` the frequencies of
//! the two most common symbols, a site is reported when
//! `total >= min_coverage` and
//! `(p0 <= 1 - threshold && p1 >= threshold) || top_symbol != ref_base`.

pub mod candidate;
pub mod cigar;
pub mod sink;
pub mod sweep;
pub mod table;
