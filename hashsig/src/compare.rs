use std::cmp::Ordering;

use crate::heap::CAPACITY;
use crate::signature::Signature;

/// Computes a similarity score in `[0, 100]` between two signatures. Scores
/// are symmetric (`compare(a, b) == compare(b, a)`) and require no
/// relationship between the options each signature was built with.
pub fn compare(a: &Signature, b: &Signature) -> u32 {
    (side_score(a.mins(), b.mins()) + side_score(a.maxs(), b.maxs())) / 2
}

// Both `x` and `y` are sorted ascending length-CAPACITY arrays. Counts the
// overlap between them with a merge-style two-pointer walk and scales it
// into [0, 100] with truncating integer division.
fn side_score(x: &[u32], y: &[u32]) -> u32 {
    let (mut i, mut j) = (0usize, 0usize);
    let mut matches = 0u32;

    while i < x.len() && j < y.len() {
        match x[i].cmp(&y[j]) {
            Ordering::Less => i += 1,
            Ordering::Greater => j += 1,
            Ordering::Equal => {
                matches += 1;
                i += 1;
                j += 1;
            }
        }
    }

    (100 * matches) / CAPACITY as u32
}
