//! Normalized page rotation.

use serde::{Deserialize, Serialize};

use crate::error::{PdfRotateError, Result};

/// A page rotation reduced to one of the four quarter-turn orientations.
///
/// The store keeps an unbounded counter per page; this type is what the
/// counter looks like at display and export time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
pub enum PageRotation {
    /// No rotation.
    #[default]
    None,
    /// Rotate 90 degrees clockwise.
    Clockwise90,
    /// Rotate 180 degrees.
    Rotate180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Clockwise270,
}

impl PageRotation {
    /// Reduce an accumulated angle to its orientation.
    ///
    /// Uses the Euclidean remainder so negative counters land in range too.
    /// Angles that are not a multiple of 90 round down to the previous
    /// quarter turn.
    pub fn normalize(degrees: i64) -> Self {
        match degrees.rem_euclid(360) / 90 {
            0 => Self::None,
            1 => Self::Clockwise90,
            2 => Self::Rotate180,
            _ => Self::Clockwise270,
        }
    }

    /// Parse an exact rotation in degrees.
    ///
    /// # Errors
    ///
    /// Returns an error if the value is not 0, 90, 180 or 270.
    pub fn from_degrees(degrees: u16) -> Result<Self> {
        match degrees {
            0 => Ok(Self::None),
            90 => Ok(Self::Clockwise90),
            180 => Ok(Self::Rotate180),
            270 => Ok(Self::Clockwise270),
            _ => Err(PdfRotateError::invalid_config(format!(
                "Invalid rotation: {degrees}. Must be 0, 90, 180, or 270"
            ))),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::None => 0,
            Self::Clockwise90 => 90,
            Self::Rotate180 => 180,
            Self::Clockwise270 => 270,
        }
    }

    /// Number of clockwise quarter turns (0..=3).
    pub fn quarter_turns(&self) -> u8 {
        (self.as_degrees() / 90) as u8
    }

    /// Whether the page's width and height trade places.
    pub fn is_sideways(&self) -> bool {
        matches!(self, Self::Clockwise90 | Self::Clockwise270)
    }

    /// Combine two rotations.
    pub fn then(self, other: Self) -> Self {
        Self::normalize(self.as_degrees() + other.as_degrees())
    }
}

impl From<PageRotation> for u16 {
    fn from(rotation: PageRotation) -> Self {
        rotation.as_degrees() as u16
    }
}

impl TryFrom<u16> for PageRotation {
    type Error = PdfRotateError;

    fn try_from(degrees: u16) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl std::fmt::Display for PageRotation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}
