//! Quarter-turn page rotation.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

use crate::error::{PageKitError, Result};

/// Page rotation, clockwise, restricted to quarter turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Angle {
    /// No rotation.
    #[default]
    Deg0,
    /// Rotate 90 degrees clockwise.
    Deg90,
    /// Rotate 180 degrees.
    Deg180,
    /// Rotate 270 degrees clockwise (90 counter-clockwise).
    Deg270,
}

impl Angle {
    /// Parse an angle from degrees.
    ///
    /// Any value is first normalised into `[0, 360)`, so `-90` and `450`
    /// are accepted as 270 and 90.
    ///
    /// # Errors
    ///
    /// Returns [`PageKitError::InvalidAngle`] if the normalised value is not
    /// 0, 90, 180 or 270.
    ///
    /// # Examples
    ///
    /// ```
    /// use pagekit::geometry::Angle;
    ///
    /// assert_eq!(Angle::from_degrees(-90).unwrap(), Angle::Deg270);
    /// assert!(Angle::from_degrees(45).is_err());
    /// ```
    pub fn from_degrees(degrees: i64) -> Result<Self> {
        match degrees.rem_euclid(360) {
            0 => Ok(Self::Deg0),
            90 => Ok(Self::Deg90),
            180 => Ok(Self::Deg180),
            270 => Ok(Self::Deg270),
            _ => Err(PageKitError::InvalidAngle { degrees }),
        }
    }

    /// Get rotation as degrees.
    pub fn as_degrees(&self) -> i64 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// Number of clockwise quarter turns, `0..4`.
    pub fn quarter_turns(&self) -> usize {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 1,
            Self::Deg180 => 2,
            Self::Deg270 => 3,
        }
    }

    fn from_quarter_turns(turns: usize) -> Self {
        match turns % 4 {
            0 => Self::Deg0,
            1 => Self::Deg90,
            2 => Self::Deg180,
            _ => Self::Deg270,
        }
    }

    /// True for 90 and 270, where presented width and height are swapped.
    pub fn is_sideways(&self) -> bool {
        matches!(self, Self::Deg90 | Self::Deg270)
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Angle) -> Angle {
        Angle::from_quarter_turns(self.quarter_turns() + rhs.quarter_turns())
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Angle) -> Angle {
        Angle::from_quarter_turns(self.quarter_turns() + 4 - rhs.quarter_turns())
    }
}

impl TryFrom<i64> for Angle {
    type Error = PageKitError;

    fn try_from(degrees: i64) -> Result<Self> {
        Self::from_degrees(degrees)
    }
}

impl From<Angle> for i64 {
    fn from(angle: Angle) -> i64 {
        angle.as_degrees()
    }
}

impl std::fmt::Display for Angle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}°", self.as_degrees())
    }
}

/// How a [`RotationSpec`] combines with the rotation a page already has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RotationMode {
    /// Replace the current rotation.
    #[default]
    Absolute,
    /// Add to the current rotation.
    Relative,
}

/// Requested rotation for a set of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotationSpec {
    /// Angle to set or add.
    pub angle: Angle,
    /// Whether `angle` replaces or adds to the current rotation.
    #[serde(default)]
    pub mode: RotationMode,
}

impl RotationSpec {
    /// Rotation that replaces whatever the page has.
    pub fn absolute(angle: Angle) -> Self {
        Self {
            angle,
            mode: RotationMode::Absolute,
        }
    }

    /// Rotation added to whatever the page has.
    pub fn relative(angle: Angle) -> Self {
        Self {
            angle,
            mode: RotationMode::Relative,
        }
    }

    /// Rotation a page with `current` rotation ends up with.
    pub fn resolve(&self, current: Angle) -> Angle {
        match self.mode {
            RotationMode::Absolute => self.angle,
            RotationMode::Relative => current + self.angle,
        }
    }
}
