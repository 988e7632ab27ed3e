use std::io::Read;

use serde_derive::{Deserialize, Serialize};

use crate::error::SignatureError;
use crate::heap::{BoundedHeap, RetainLargest, RetainSmallest, CAPACITY};
use crate::mixer::fmix32;
use crate::options::Options;
use crate::rolling_hash::RollingHasher;
use crate::whitespace::include_byte;

const READ_BUFFER_SIZE: usize = 4096;

/// An immutable fingerprint of a byte stream: two sorted arrays of
/// [`CAPACITY`] mixed hashes (the smallest and largest ones observed) plus
/// the options it was built with and the number of window positions that
/// contributed to it.
///
/// A `Signature` may be compared against any other `Signature`, regardless
/// of the options each was built with -- see [`crate::compare::compare`].
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
pub struct Signature {
    options: Options,
    considered: u64,
    mins: Vec<u32>,
    maxs: Vec<u32>,
}

// `options` is informational (see the data model's Lifecycle note): two
// signatures built from equivalent content under different option flags
// should still compare structurally equal, which is exactly what property 5
// (IgnoreWhitespace on raw input == Normal on pre-stripped input) asserts.
impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.considered == other.considered && self.mins == other.mins && self.maxs == other.maxs
    }
}

impl Signature {
    pub fn options(&self) -> Options {
        self.options
    }

    pub fn considered(&self) -> u64 {
        self.considered
    }

    pub(crate) fn mins(&self) -> &[u32] {
        &self.mins
    }

    pub(crate) fn maxs(&self) -> &[u32] {
        &self.maxs
    }
}

/// Drives a [`RollingHasher`] across fed byte slices, retaining the
/// `CAPACITY` smallest and largest mixed hashes seen. Consumed by
/// [`SignatureBuilder::finish`] -- the Rust borrow checker enforces the
/// Building/Finalized state machine the spec describes: `feed` borrows,
/// `finish` consumes, so there is no way to feed a finished builder.
pub struct SignatureBuilder {
    options: Options,
    hasher: RollingHasher,
    saw_lf: bool,
    mins: BoundedHeap<RetainSmallest>,
    maxs: BoundedHeap<RetainLargest>,
    considered: u64,
}

impl SignatureBuilder {
    pub fn new(options: Options) -> SignatureBuilder {
        SignatureBuilder {
            options,
            hasher: RollingHasher::new(),
            saw_lf: true,
            mins: BoundedHeap::new(),
            maxs: BoundedHeap::new(),
            considered: 0,
        }
    }

    /// Feeds any number of bytes, including zero. Safe to call repeatedly
    /// with chunks of any size -- the result is bit-identical to a single
    /// call with the concatenation of all chunks.
    pub fn feed(&mut self, bytes: &[u8]) {
        for &b in bytes {
            if !include_byte(b, self.options, &mut self.saw_lf) {
                continue;
            }

            if let Some(state) = self.hasher.push(b) {
                let mixed = fmix32(state as u32);
                self.mins.insert(mixed);
                self.maxs.insert(mixed);
                self.considered += 1;
            }
        }
    }

    /// Finalizes the builder into an immutable [`Signature`]. Fails with
    /// [`SignatureError::InsufficientData`] if fewer than `CAPACITY`
    /// samples were ever emitted.
    pub fn finish(self) -> Result<Signature, SignatureError> {
        if self.mins.len() < CAPACITY {
            return Err(SignatureError::InsufficientData {
                considered: self.considered,
            });
        }

        Ok(Signature {
            options: self.options,
            considered: self.considered,
            mins: self.mins.into_sorted(),
            maxs: self.maxs.into_sorted(),
        })
    }
}

/// Builds a signature from a complete in-memory buffer.
pub fn signature_from_bytes(bytes: &[u8], options: Options) -> Result<Signature, SignatureError> {
    let mut builder = SignatureBuilder::new(options);
    builder.feed(bytes);
    builder.finish()
}

/// Builds a signature by reading `reader` to completion in fixed-size
/// chunks. Any I/O error is propagated and the builder is abandoned.
pub fn signature_from_reader<R: Read>(
    mut reader: R,
    options: Options,
) -> Result<Signature, SignatureError> {
    let mut builder = SignatureBuilder::new(options);
    let mut buf = [0u8; READ_BUFFER_SIZE];

    loop {
        let n = reader.read(&mut buf)?;
        if n == 0 {
            break;
        }
        builder.feed(&buf[..n]);
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_data_short_input() {
        // "Hello, world." is 13 bytes; 13 - 8 + 1 = 6 samples, well short of
        // CAPACITY (127).
        let err = signature_from_bytes(b"Hello, world.", Options::NORMAL).unwrap_err();
        match err {
            SignatureError::InsufficientData { considered } => assert_eq!(considered, 6),
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn empty_input_is_insufficient() {
        let err = signature_from_bytes(b"", Options::NORMAL).unwrap_err();
        match err {
            SignatureError::InsufficientData { considered } => assert_eq!(considered, 0),
            other => panic!("expected InsufficientData, got {:?}", other),
        }
    }

    #[test]
    fn considered_counts_one_sample_per_emission() {
        let source: Vec<u8> = (0..200u8).collect();
        let sig = signature_from_bytes(&source, Options::NORMAL).unwrap();
        assert_eq!(sig.considered(), source.len() as u64 - 8 + 1);
    }

    #[test]
    fn feeding_in_pieces_matches_feeding_as_one_chunk() {
        let source: Vec<u8> = (0u8..=255).cycle().take(500).collect();

        let whole = signature_from_bytes(&source, Options::NORMAL).unwrap();

        let mut builder = SignatureBuilder::new(Options::NORMAL);
        for chunk in source.chunks(7) {
            builder.feed(chunk);
        }
        let pieced = builder.finish().unwrap();

        assert_eq!(whole, pieced);
    }

    #[test]
    fn zero_length_feed_is_a_no_op() {
        let source: Vec<u8> = (0u8..=255).cycle().take(300).collect();

        let whole = signature_from_bytes(&source, Options::NORMAL).unwrap();

        let mut builder = SignatureBuilder::new(Options::NORMAL);
        builder.feed(&[]);
        builder.feed(&source);
        builder.feed(&[]);
        let with_empties = builder.finish().unwrap();

        assert_eq!(whole, with_empties);
    }

    #[test]
    fn reader_matches_bytes() {
        let source: Vec<u8> = (0u8..=255).cycle().take(500).collect();

        let from_bytes = signature_from_bytes(&source, Options::NORMAL).unwrap();
        let from_reader = signature_from_reader(&source[..], Options::NORMAL).unwrap();

        assert_eq!(from_bytes, from_reader);
    }

    #[test]
    fn ignore_whitespace_equals_normal_on_stripped_input() {
        let source = b"fn  main() {\n\tprintln!(\"hi\");\r\n}\n".repeat(20);
        let stripped: Vec<u8> = source
            .iter()
            .copied()
            .filter(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C))
            .collect();

        let ignoring = signature_from_bytes(&source, Options::IGNORE_WHITESPACE).unwrap();
        let normal_on_stripped = signature_from_bytes(&stripped, Options::NORMAL).unwrap();

        assert_eq!(ignoring, normal_on_stripped);
    }
}
