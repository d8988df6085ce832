//! Reduction operation helpers
//!
//! This module contains the operator kinds shared by the device kernels and
//! the host fold-down. The operations themselves are defined in the
//! `ReduceOps` trait.

/// Reduction operation kind
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ReduceOp {
    /// Maximum element
    Max,
    /// Minimum element
    Min,
    /// Sum of elements (the mean is derived from it on the host)
    Sum,
}

impl ReduceOp {
    /// All operators, in dispatch order.
    pub const ALL: [ReduceOp; 3] = [ReduceOp::Max, ReduceOp::Min, ReduceOp::Sum];

    /// Operator name, also used as the kernel entry point suffix.
    pub fn name(self) -> &'static str {
        match self {
            ReduceOp::Max => "max",
            ReduceOp::Min => "min",
            ReduceOp::Sum => "sum",
        }
    }

    /// Padding value that can never change this operator's result.
    pub fn neutral(self) -> i32 {
        match self {
            ReduceOp::Max => i32::MIN,
            ReduceOp::Min => i32::MAX,
            ReduceOp::Sum => 0,
        }
    }

    /// Combine two lane values.
    ///
    /// Lanes hold `i64`, so a group of up to 256 `i32` elements sums exactly.
    #[inline]
    pub fn combine(self, a: i64, b: i64) -> i64 {
        match self {
            ReduceOp::Max => a.max(b),
            ReduceOp::Min => a.min(b),
            ReduceOp::Sum => a + b,
        }
    }

    /// Fold every work-group partial into the final scalar.
    ///
    /// Returns `None` when there are no partials.
    pub fn fold_partials(self, partials: &[i64]) -> Option<i64> {
        let partials = partials.iter().copied();
        match self {
            ReduceOp::Max => partials.max(),
            ReduceOp::Min => partials.min(),
            ReduceOp::Sum => partials.reduce(|a, b| a + b),
        }
    }
}

impl std::fmt::Display for ReduceOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_neutral_is_identity() {
        for op in ReduceOp::ALL {
            let neutral = i64::from(op.neutral());
            for v in [i64::from(i32::MIN) + 1, -40, 0, 17, i64::from(i32::MAX) - 1] {
                assert_eq!(op.combine(v, neutral), v, "{op} with {v}");
                assert_eq!(op.combine(neutral, v), v, "{op} with {v}");
            }
        }
    }

    #[test]
    fn test_fold_uses_every_partial() {
        let partials = [5, -3, 12, 7];
        assert_eq!(ReduceOp::Max.fold_partials(&partials), Some(12));
        assert_eq!(ReduceOp::Min.fold_partials(&partials), Some(-3));
        assert_eq!(ReduceOp::Sum.fold_partials(&partials), Some(21));
    }

    #[test]
    fn test_fold_sum_widens() {
        let partials = [i64::from(i32::MAX), i64::from(i32::MAX)];
        assert_eq!(
            ReduceOp::Sum.fold_partials(&partials),
            Some(2 * i64::from(i32::MAX))
        );
    }

    #[test]
    fn test_combine_sum_does_not_wrap() {
        let lane = i64::from(i32::MAX);
        assert_eq!(ReduceOp::Sum.combine(lane, lane), 2 * lane);
    }

    #[test]
    fn test_fold_empty() {
        for op in ReduceOp::ALL {
            assert_eq!(op.fold_partials(&[]), None);
        }
    }
}
