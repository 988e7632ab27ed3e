// A rolling hash over a fixed W-byte window. The "rolling" property is that
// pushing byte N+1 updates the hash for window [1..=W] from the hash for
// window [0..W-1] in constant time, without rescanning the window -- see
// `tests::sliding_window_recurrence_matches_a_fresh_hash_of_the_same_window`.
// Chunking independence (feeding the same bytes split across calls produces
// identical output) is exercised one level up, in `signature`'s tests.
//
// Unlike the teacher's Rabin/XOR rolling hash (which keeps a precomputed
// push/pop table per byte value), this recurrence is a masked multiplicative
// polynomial: only the low 20 bits of `state` ever go through the `* SHIFT`
// step, while the additive `byte << 20` term bypasses the mask entirely.
// That split is load-bearing for the recurrence's algebra and must not be
// "simplified" away.

pub(crate) const WINDOW: usize = 8;
const SHIFT_BASE: u64 = 3;
const STATE_MASK: u64 = 0x000F_FFFF;

pub(crate) struct RollingHasher {
    state: u64,
    shift_n: u64,
    window: [u8; WINDOW],
    win_len: usize,
    win_pos: usize,
}

impl RollingHasher {
    pub(crate) fn new() -> RollingHasher {
        RollingHasher {
            state: 0,
            shift_n: 1,
            window: [0; WINDOW],
            win_len: 0,
            win_pos: 0,
        }
    }

    /// Feeds one already-filtered byte into the hasher. Returns the new
    /// 64-bit state once the window has filled (one sample at warm-up, then
    /// one sample per subsequent byte).
    pub(crate) fn push(&mut self, b: u8) -> Option<u64> {
        if self.win_len < WINDOW {
            self.warm_up(b);
            if self.win_len == WINDOW {
                return Some(self.state);
            }
            return None;
        }

        self.advance(b);
        Some(self.state)
    }

    fn warm_up(&mut self, b: u8) {
        let ch = b as u64;

        self.state = (self.state & !STATE_MASK)
            | ((self.state.wrapping_mul(SHIFT_BASE).wrapping_add(ch)) & STATE_MASK);
        self.state = self.state.wrapping_add(ch << 20);

        self.shift_n = if self.win_len == 0 {
            1
        } else {
            self.shift_n.wrapping_mul(SHIFT_BASE) & STATE_MASK
        };

        self.window[self.win_len] = b;
        self.win_len += 1;
    }

    fn advance(&mut self, b: u8) {
        let ch = b as u64;
        let old = self.window[self.win_pos] as u64;

        let rmv = (self.shift_n.wrapping_add(1 << 20)).wrapping_mul(old);

        self.state = self.state.wrapping_sub(rmv);
        self.state =
            (self.state & !STATE_MASK) | (self.state.wrapping_mul(SHIFT_BASE) & STATE_MASK);
        self.state = self.state.wrapping_add(ch).wrapping_add(ch << 20);

        self.window[self.win_pos] = b;
        self.win_pos = (self.win_pos + 1) % WINDOW;
    }
}
