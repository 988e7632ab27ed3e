//! A similarity signature engine for byte streams.
//!
//! Feed a blob of bytes (or anything implementing [`std::io::Read`])
//! through a [`SignatureBuilder`] and finalize it into a [`Signature`]: a
//! compact fingerprint that stays stable under local edits -- insertions,
//! deletions, small reorderings -- and, with the right [`Options`], under
//! whitespace-only differences. Two signatures compare to an integer
//! similarity score in `[0, 100]` via [`compare`].
//!
//! This crate is intentionally narrow: it has no notion of files,
//! repositories, or object ids. A caller wanting to hash a file on disk
//! supplies a reader to [`signature_from_reader`]; everything about where
//! the bytes came from or what happens to the result is the caller's
//! problem.

mod compare;
mod error;
mod heap;
mod mixer;
mod options;
mod rolling_hash;
mod signature;
mod whitespace;

pub use compare::compare;
pub use error::SignatureError;
pub use options::Options;
pub use signature::{signature_from_bytes, signature_from_reader, Signature, SignatureBuilder};

#[cfg(test)]
mod tests {
    use super::*;

    // S3: flipping every LF to CRLF should be invisible to SmartWhitespace.
    #[test]
    fn smart_whitespace_is_blind_to_lf_vs_crlf() {
        let mut lf_body = Vec::new();
        for i in 0..400u32 {
            lf_body.extend_from_slice(format!("line {} of the file\n", i).as_bytes());
        }
        let crlf_body: Vec<u8> = {
            let mut out = Vec::with_capacity(lf_body.len() + lf_body.len() / 16);
            for &b in &lf_body {
                if b == b'\n' {
                    out.push(b'\r');
                }
                out.push(b);
            }
            out
        };

        let a = signature_from_bytes(&lf_body, Options::SMART_WHITESPACE).unwrap();
        let b = signature_from_bytes(&crlf_body, Options::SMART_WHITESPACE).unwrap();

        assert_eq!(compare(&a, &b), 100);
    }

    // S2: a signature always compares identical to itself once it has
    // enough samples to finalize.
    #[test]
    fn self_identity() {
        let source: Vec<u8> = b"abcdefgh".iter().cycle().take(200).copied().collect();
        let sig = signature_from_bytes(&source, Options::NORMAL).unwrap();
        assert_eq!(compare(&sig, &sig), 100);
    }
}
