//! Length units used by DrawingML.

use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign, Mul, Sub};

/// EMUs per inch.
pub const EMU_PER_INCH: i64 = 914_400;

/// EMUs per typographic point.
pub const EMU_PER_POINT: i64 = 12_700;

/// A length in English Metric Units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Emu(pub i64);

impl Emu {
    pub const ZERO: Emu = Emu(0);

    /// Raw EMU value.
    pub fn value(self) -> i64 {
        self.0
    }
}

/// Convert inches to EMUs, truncating toward zero.
pub fn inches(value: f64) -> Emu {
    Emu((value * EMU_PER_INCH as f64) as i64)
}

/// Convert points to EMUs, truncating toward zero.
pub fn points(value: f64) -> Emu {
    Emu((value * EMU_PER_POINT as f64) as i64)
}

impl Add for Emu {
    type Output = Emu;

    fn add(self, rhs: Emu) -> Emu {
        Emu(self.0 + rhs.0)
    }
}

impl AddAssign for Emu {
    fn add_assign(&mut self, rhs: Emu) {
        self.0 += rhs.0;
    }
}

impl Sub for Emu {
    type Output = Emu;

    fn sub(self, rhs: Emu) -> Emu {
        Emu(self.0 - rhs.0)
    }
}

impl Mul<i64> for Emu {
    type Output = Emu;

    fn mul(self, rhs: i64) -> Emu {
        Emu(self.0 * rhs)
    }
}

impl std::fmt::Display for Emu {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
