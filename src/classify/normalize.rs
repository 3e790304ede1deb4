//! Raw total to bucket mapping.

/// Lowest normalized bucket.
pub const MIN_BUCKET: i8 = -2;

/// Highest normalized bucket.
pub const MAX_BUCKET: i8 = 2;

/// Thresholds checked in order; the first one satisfied wins.
///
/// `(inclusive, bound, bucket)`: an inclusive threshold matches
/// `value >= bound`, an exclusive one `value > bound`.
const THRESHOLDS: [(bool, i32, i8); 4] = [(true, 8, 2), (true, 3, 1), (false, -3, 0), (false, -8, -1)];

/// Map a raw trait total to an integer bucket in `[-2, 2]`.
///
/// This is the only place the raw sum to bucket mapping is defined; every
/// axis goes through it.
///
/// | raw total | bucket |
/// |-----------|--------|
/// | `>= 8`    | 2      |
/// | `>= 3`    | 1      |
/// | `> -3`    | 0      |
/// | `> -8`    | -1     |
/// | otherwise | -2     |
///
/// # Examples
///
/// ```
/// use tidecast::classify::normalize;
///
/// assert_eq!(normalize(8), 2);
/// assert_eq!(normalize(3), 1);
/// assert_eq!(normalize(-3), -1);
/// assert_eq!(normalize(-8), -2);
/// ```
pub fn normalize(value: i32) -> i8 {
    for (inclusive, bound, bucket) in THRESHOLDS {
        let hit = if inclusive {
            value >= bound
        } else {
            value > bound
        };
        if hit {
            return bucket;
        }
    }
    MIN_BUCKET
}
