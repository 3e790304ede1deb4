//! Ocean and Season labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TidecastError;

/// Five-valued label derived from the Energy axis.
///
/// Variants are ordered from the lowest bucket (-2) to the highest (2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ocean {
    Arctic,
    Southern,
    Indian,
    Atlantic,
    Pacific,
}

impl Ocean {
    /// All oceans in bucket order.
    pub const ALL: [Ocean; 5] = [
        Ocean::Arctic,
        Ocean::Southern,
        Ocean::Indian,
        Ocean::Atlantic,
        Ocean::Pacific,
    ];

    /// Ocean for a normalized Energy bucket. Buckets outside `[-2, 2]`
    /// saturate to the nearest end.
    pub fn from_bucket(bucket: i8) -> Ocean {
        match bucket {
            i8::MIN..=-2 => Ocean::Arctic,
            -1 => Ocean::Southern,
            0 => Ocean::Indian,
            1 => Ocean::Atlantic,
            _ => Ocean::Pacific,
        }
    }

    /// Position in [`Ocean::ALL`].
    pub fn from_index(index: usize) -> Option<Ocean> {
        Ocean::ALL.get(index).copied()
    }

    /// The normalized bucket this ocean corresponds to.
    pub fn bucket(self) -> i8 {
        self.index() as i8 - 2
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Ocean::Arctic => "arctic",
            Ocean::Southern => "southern",
            Ocean::Indian => "indian",
            Ocean::Atlantic => "atlantic",
            Ocean::Pacific => "pacific",
        }
    }
}

impl fmt::Display for Ocean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ocean {
    type Err = TidecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ocean::ALL
            .into_iter()
            .find(|ocean| ocean.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TidecastError::parse(format!("Unknown ocean: {s}")))
    }
}

/// Four-valued label derived from Positivity and Curiosity.
///
/// Variants are ordered from the lowest range to the highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    Winter,
    Autumn,
    Spring,
    Summer,
}

impl Season {
    /// All seasons in ascending range order.
    pub const ALL: [Season; 4] = [Season::Winter, Season::Autumn, Season::Spring, Season::Summer];

    /// Season for the unnormalized `positivity + curiosity` sum.
    ///
    /// Upper bounds are inclusive: `<= -5` Winter, `<= -1` Autumn,
    /// `<= 4` Spring, above that Summer.
    pub fn from_sum(sum: i32) -> Season {
        if sum <= -5 {
            Season::Winter
        } else if sum <= -1 {
            Season::Autumn
        } else if sum <= 4 {
            Season::Spring
        } else {
            Season::Summer
        }
    }

    /// Position in [`Season::ALL`].
    pub fn from_index(index: usize) -> Option<Season> {
        Season::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Autumn => "autumn",
            Season::Spring => "spring",
            Season::Summer => "summer",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = TidecastError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| TidecastError::parse(format!("Unknown season: {s}")))
    }
}

/// Separator between the two labels in a composite code.
pub const CODE_SEPARATOR: char = '-';

/// Composite code for an Ocean × Season pair, e.g. `indian-spring`.
pub fn composite_code(ocean: Ocean, season: Season) -> String {
    format!("{ocean}{CODE_SEPARATOR}{season}")
}
