/// Numerical tolerance for geometric computations.
#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
pub struct Tolerance {
    /// Linear tolerance for lengths and distances (in model units)
    pub linear: f64,
}

impl Tolerance {
    pub const DEFAULT_LINEAR: f64 = 1e-12;

    /// True if the non-negative length `v` is larger than the linear
    /// tolerance. NaN is never significant.
    pub fn is_significant(self, v: f64) -> bool {
        v > self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            linear: Self::DEFAULT_LINEAR,
        }
    }
}
