/// Default bound on nesting of function bodies and operator chains.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for a single parse pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Maximum recursion depth before the parse fails with
    /// [`crate::ParseErrorKind::NestingTooDeep`].
    pub max_depth: usize,
    /// One-based source lines that trigger a debug event when the
    /// scanner reaches them.
    pub breakpoints: Vec<usize>,
}

impl ParseOptions {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            breakpoints: Vec::new(),
        }
    }

    #[must_use]
    pub const fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    #[must_use]
    pub fn breakpoint(mut self, line: usize) -> Self {
        self.breakpoints.push(line);
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = ParseOptions::default();
        assert_eq!(opts.max_depth, DEFAULT_MAX_DEPTH);
        assert!(opts.breakpoints.is_empty());
    }

    #[test]
    fn chained_setters() {
        let opts = ParseOptions::new().max_depth(4).breakpoint(3).breakpoint(7);
        assert_eq!(opts.max_depth, 4);
        assert_eq!(opts.breakpoints, vec![3, 7]);
    }
}
