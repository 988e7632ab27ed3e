use std::ops::BitOr;

use serde_derive::{Deserialize, Serialize};

/// Flags controlling how whitespace participates in a signature's rolling hash.
///
/// `IgnoreWhitespace` and `SmartWhitespace` are independent bits and may be
/// OR-combined; when both are set, `IgnoreWhitespace` wins on a per-byte
/// basis (see [`crate::whitespace::include_byte`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Options(u8);

impl Options {
    pub const NORMAL: Options = Options(0);
    pub const IGNORE_WHITESPACE: Options = Options(1);
    pub const SMART_WHITESPACE: Options = Options(2);

    pub(crate) fn contains(self, flag: Options) -> bool {
        self.0 & flag.0 == flag.0
    }
}

impl BitOr for Options {
    type Output = Options;

    fn bitor(self, rhs: Options) -> Options {
        Options(self.0 | rhs.0)
    }
}
