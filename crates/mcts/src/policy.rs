//! Tree policy scoring.
//!
//! Pure functions mapping a child's accumulated statistics and its
//! parent's visit count to a selection score. The same formula scores
//! children during selection and computes the per-node score in
//! diagnostic reports.

/// Scoring formula used to pick among fully materialized children.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreePolicy {
    /// `q/n + c * sqrt(2 * ln(n_parent) / n)`.
    ///
    /// This is the canonical logarithmic form. Some UCT variants put the
    /// raw parent visit count inside the square root instead of its
    /// logarithm; callers porting scores from such a variant should
    /// expect different absolute values, though the ranking for any
    /// fixed `n_parent` is unchanged.
    Uct,

    /// `q/n + c * sqrt(ln(n_parent) / n)`.
    Ucb,
}

impl TreePolicy {
    /// Score a child with cumulative reward `q` and `n >= 1` visits
    /// under a parent with `n_parent` visits.
    ///
    /// `c` scales the exploration term; `c == 0` degenerates to pure
    /// exploitation (`q/n`), which is how the final best-child read-out
    /// is computed.
    pub fn score(self, q: f64, n: u32, n_parent: u32, c: f64) -> f64 {
        debug_assert!(n >= 1, "tree policy scored a never-visited child");
        let exploitation = q / f64::from(n);
        if c == 0.0 {
            return exploitation;
        }

        let ratio = (n_parent as f64).ln() / f64::from(n);
        let exploration = match self {
            TreePolicy::Uct => (2.0 * ratio).sqrt(),
            TreePolicy::Ucb => ratio.sqrt(),
        };
        exploitation + c * exploration
    }
}
