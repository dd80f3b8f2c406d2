//! Numeric precision used by the remote solver.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProblemError;

/// Numeric representation the service uses while optimizing.
///
/// Ordered from cheapest to most faithful. `Float16` is the service
/// default.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum Precision {
    /// IEEE half precision.
    #[default]
    Float16,
    /// bfloat16: half width with the `f32` exponent range.
    BFloat16,
    /// IEEE single precision.
    Float32,
    /// IEEE double precision.
    Float64,
}

impl Precision {
    /// Every precision, in order.
    pub const ALL: [Precision; 4] = [
        Precision::Float16,
        Precision::BFloat16,
        Precision::Float32,
        Precision::Float64,
    ];

    /// Storage width in bits.
    pub fn bits(self) -> u32 {
        match self {
            Precision::Float16 | Precision::BFloat16 => 16,
            Precision::Float32 => 32,
            Precision::Float64 => 64,
        }
    }

    /// Canonical name, as accepted by [`FromStr`].
    pub fn as_str(self) -> &'static str {
        match self {
            Precision::Float16 => "Float16",
            Precision::BFloat16 => "BFloat16",
            Precision::Float32 => "Float32",
            Precision::Float64 => "Float64",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = ProblemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Precision::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ProblemError::InvalidPrecision(s.to_string()))
    }
}
