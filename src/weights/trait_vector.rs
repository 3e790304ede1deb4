//! Three-axis signed trait vector.

use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

/// Signed contributions along the Energy, Positivity and Curiosity axes.
///
/// The same type carries a single choice's weights and the raw totals summed
/// over an answer set. Addition saturates at the `i32` range, so a total
/// never changes sign through overflow.
///
/// # Examples
///
/// ```
/// use tidecast::weights::TraitVector;
///
/// let a = TraitVector::new(1, 1, 0);
/// let b = TraitVector::new(0, 1, 1);
/// assert_eq!(a + b, TraitVector::new(1, 2, 1));
/// ```
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TraitVector {
    pub energy: i32,
    pub positivity: i32,
    pub curiosity: i32,
}

impl TraitVector {
    /// The all-zero vector.
    pub const ZERO: TraitVector = TraitVector {
        energy: 0,
        positivity: 0,
        curiosity: 0,
    };

    pub fn new(energy: i32, positivity: i32, curiosity: i32) -> Self {
        TraitVector {
            energy,
            positivity,
            curiosity,
        }
    }

    /// Sum of the Positivity and Curiosity axes, unnormalized.
    pub fn positivity_plus_curiosity(&self) -> i32 {
        self.positivity.saturating_add(self.curiosity)
    }
}

impl Add for TraitVector {
    type Output = TraitVector;

    fn add(self, rhs: TraitVector) -> TraitVector {
        TraitVector {
            energy: self.energy.saturating_add(rhs.energy),
            positivity: self.positivity.saturating_add(rhs.positivity),
            curiosity: self.curiosity.saturating_add(rhs.curiosity),
        }
    }
}

impl AddAssign for TraitVector {
    fn add_assign(&mut self, rhs: TraitVector) {
        *self = *self + rhs;
    }
}

impl Sum for TraitVector {
    fn sum<I: Iterator<Item = TraitVector>>(iter: I) -> TraitVector {
        iter.fold(TraitVector::ZERO, |acc, v| acc + v)
    }
}

impl<'a> Sum<&'a TraitVector> for TraitVector {
    fn sum<I: Iterator<Item = &'a TraitVector>>(iter: I) -> TraitVector {
        iter.fold(TraitVector::ZERO, |acc, v| acc + *v)
    }
}

impl fmt::Display for TraitVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "(E:{}, P:{}, C:{})",
            self.energy, self.positivity, self.curiosity
        )
    }
}
