//! core::types
//!
//! Strong types for numeric command and metadata values.
//!
//! # Types
//!
//! - [`PosInt`] - Strictly positive integer (disc, track and year numbers)
//! - [`TrackCounts`] - Comma-separated per-disc track totals
//!
//! # Validation
//!
//! These types enforce validity at construction time. A `PosInt` of zero
//! cannot be represented, so code holding one never re-checks it.
//!
//! # Examples
//!
//! ```
//! use audio_organizer::core::types::{PosInt, TrackCounts};
//!
//! let track = PosInt::parse("7").unwrap();
//! assert_eq!(track.get(), 7);
//! assert!(PosInt::parse("0").is_err());
//!
//! let counts: TrackCounts = "12,10".parse().unwrap();
//! assert_eq!(counts.total(), 22);
//! ```

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("'{0}' is not a positive integer")]
    NotPositive(String),

    #[error("invalid track count list '{0}': expected comma-separated non-negative integers")]
    InvalidTrackCounts(String),
}

/// A strictly positive integer.
///
/// Parsing ignores surrounding whitespace and rejects zero, negative
/// numbers and anything that is not a base-10 integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PosInt(u32);

impl PosInt {
    /// Create a positive integer, returning `None` for zero.
    pub fn new(value: u32) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    /// Parse a positive integer from text.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::NotPositive` for `"0"`, `"-1"`, `"abc"` and the like.
    pub fn parse(text: &str) -> Result<Self, TypeError> {
        text.trim()
            .parse::<u32>()
            .ok()
            .and_then(Self::new)
            .ok_or_else(|| TypeError::NotPositive(text.to_string()))
    }

    /// Get the underlying value.
    pub fn get(self) -> u32 {
        self.0
    }
}

impl FromStr for PosInt {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PosInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Number of tracks on each disc, in disc order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCounts(Vec<u32>);

impl TrackCounts {
    /// Create from a list of per-disc totals.
    pub fn new(counts: Vec<u32>) -> Self {
        Self(counts)
    }

    /// Total number of tracks across all discs.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|&c| u64::from(c)).sum()
    }

    /// Split a continuous track number into `(disc, track)`.
    ///
    /// `offset` is added to `continuous` before splitting. Returns `None` if
    /// the shifted number is not positive, overflows, or exceeds
    /// [`total`](Self::total).
    ///
    /// ```
    /// use audio_organizer::core::types::{PosInt, TrackCounts};
    ///
    /// let counts = TrackCounts::new(vec![10, 8]);
    /// let (disc, track) = counts.split(PosInt::new(13).unwrap(), 0).unwrap();
    /// assert_eq!((disc.get(), track.get()), (2, 3));
    /// ```
    pub fn split(&self, continuous: PosInt, offset: i64) -> Option<(PosInt, PosInt)> {
        let mut track = i64::from(continuous.get()).checked_add(offset)?;
        if track < 1 {
            return None;
        }
        for (index, &count) in self.0.iter().enumerate() {
            let count = i64::from(count);
            if track > count {
                track -= count;
            } else {
                let disc = u32::try_from(index + 1).ok().and_then(PosInt::new)?;
                let track = u32::try_from(track).ok().and_then(PosInt::new)?;
                return Some((disc, track));
            }
        }
        None
    }

    /// Per-disc totals as a slice.
    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }
}

impl FromStr for TrackCounts {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .map(|part| part.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
            .map_err(|_| TypeError::InvalidTrackCounts(s.to_string()))
    }
}
