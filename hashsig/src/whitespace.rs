use crate::options::Options;

// ASCII whitespace per the spec: space, tab, CR, LF, VT, FF.
#[inline]
fn is_ascii_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\r' | b'\n' | 0x0B | 0x0C)
}

/// Decides whether `b` participates in the rolling hash under `opts`.
///
/// `saw_lf` is the filter's only piece of carried state: it must start
/// `true` (a virtual line start) and is updated only on the branch that is
/// not rejected by the CR/post-LF rule -- a run of "LF LF LF" therefore
/// accepts the first LF and rejects the following ones without refreshing
/// `saw_lf`. This mirrors the reference implementation bit for bit.
#[inline]
pub(crate) fn include_byte(b: u8, opts: Options, saw_lf: &mut bool) -> bool {
    if opts.contains(Options::IGNORE_WHITESPACE) && is_ascii_whitespace(b) {
        return false;
    }

    if opts.contains(Options::SMART_WHITESPACE) {
        if b == b'\r' || (*saw_lf && is_ascii_whitespace(b)) {
            return false;
        }
        *saw_lf = b == b'\n';
    }

    true
}
