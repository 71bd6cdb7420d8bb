//! Parse and dump configuration.
//!
//! [`ParseOptions::strict`] is the default: malformed arrays, trailing
//! commas and trailing input are errors. [`ParseOptions::compat`]
//! reproduces the historical leniencies for callers that depend on them.

/// Default maximum nesting depth for arrays and objects.
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Parser configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum nesting depth for arrays/objects
    pub max_depth: usize,
    /// Ignore input after the first complete value in [`loads`](crate::loads)
    pub allow_trailing: bool,
    /// Return `null` for an unterminated array instead of failing
    pub lenient_arrays: bool,
    /// Accept a `,` directly before `]` or `}`
    pub allow_trailing_commas: bool,
}

impl ParseOptions {
    /// Fail on every grammar violation.
    pub const fn strict() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: false,
            lenient_arrays: false,
            allow_trailing_commas: false,
        }
    }

    /// Accept trailing input, trailing commas and unterminated arrays.
    pub const fn compat() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            allow_trailing: true,
            lenient_arrays: true,
            allow_trailing_commas: true,
        }
    }

    /// Returns a copy with a different nesting limit.
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::strict()
    }
}

/// Serializer configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DumpOptions {
    /// Emit object keys in byte order instead of map order
    pub sort_keys: bool,
}

impl DumpOptions {
    /// Deterministic output: object keys sorted.
    pub const fn sorted() -> Self {
        Self { sort_keys: true }
    }
}
