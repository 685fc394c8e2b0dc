use core::str::FromStr;

use serde::{Deserialize, Serialize};

use bayline_core::DomainError;

use crate::errors;

/// Physical service bay where a work order is performed.
///
/// The set is closed, so an out-of-set member is unrepresentable in the type
/// system; membership validation therefore lives at the parse seam
/// ([`TryFrom<u8>`] / [`FromStr`]), which is where spot codes enter from the
/// excluded web layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Spot {
    A,
    B,
    C,
    D,
}

impl Spot {
    pub const ALL: [Spot; 4] = [Spot::A, Spot::B, Spot::C, Spot::D];

    pub fn as_str(self) -> &'static str {
        match self {
            Spot::A => "A",
            Spot::B => "B",
            Spot::C => "C",
            Spot::D => "D",
        }
    }
}

impl core::fmt::Display for Spot {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for Spot {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Spot::A),
            1 => Ok(Spot::B),
            2 => Ok(Spot::C),
            3 => Ok(Spot::D),
            _ => Err(errors::spot_invalid()),
        }
    }
}

impl FromStr for Spot {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "A" | "a" => Ok(Spot::A),
            "B" | "b" => Ok(Spot::B),
            "C" | "c" => Ok(Spot::C),
            "D" | "d" => Ok(Spot::D),
            _ => Err(errors::spot_invalid()),
        }
    }
}
