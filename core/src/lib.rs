#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the poi visualizer engine.
//!
//! This crate defines the value types that connect the excluded state and
//! rendering layers to the pure computation crates. An external state module
//! owns and mutates [`SpinnerState`]; the engine crate evaluates it into
//! angles, positions, and trail points; the VTG system crate maps it to and
//! from the discrete [`VtgDescriptor`] vocabulary. Nothing in this crate
//! performs I/O, owns a clock, or persists anything.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

mod vtg;

pub use vtg::{
    angular_distance, wrap_radians, Element, PhaseReference, QuarterPhase, Relation, SpinDirection,
    Timing, VtgDescriptor,
};

/// Identifies one of the two hands driving a pattern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Hand {
    /// The spinner's left hand.
    Left,
    /// The spinner's right hand.
    Right,
}

impl Hand {
    /// Both hands in canonical iteration order.
    pub const BOTH: [Hand; 2] = [Hand::Left, Hand::Right];
}

/// Oscillator parameters for one hand-and-poi pair.
///
/// Speeds are measured in radians per beat and phases in radians. The poi
/// speed and phase are *relative* to the arm: the absolute head values are
/// derived via [`HandOscillator::head_speed`] and
/// [`HandOscillator::head_phase`], never stored.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HandOscillator {
    /// Signed angular speed of the arm in radians per beat.
    pub arm_speed: f64,
    /// Arm phase at beat zero, in radians.
    pub arm_phase: f64,
    /// Distance from the body center to the hand, non-negative.
    pub arm_radius: f64,
    /// Signed angular speed of the poi head relative to the arm.
    pub poi_speed: f64,
    /// Poi head phase relative to the arm, in radians.
    pub poi_phase: f64,
    /// Tether length from the hand to the poi head, non-negative.
    pub poi_radius: f64,
}

impl HandOscillator {
    /// Absolute angular speed of the poi head in radians per beat.
    #[must_use]
    pub fn head_speed(&self) -> f64 {
        self.arm_speed + self.poi_speed
    }

    /// Absolute poi head phase at beat zero, in radians.
    #[must_use]
    pub fn head_phase(&self) -> f64 {
        self.arm_phase + self.poi_phase
    }

    /// Checks the strict parameter invariants for this hand.
    ///
    /// Every field must be finite and both radii non-negative. Nothing is
    /// defaulted or merged on failure; callers sanitize before retrying.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_finite(self.arm_speed, "arm_speed")?;
        require_finite(self.arm_phase, "arm_phase")?;
        require_finite(self.poi_speed, "poi_speed")?;
        require_finite(self.poi_phase, "poi_phase")?;
        require_non_negative(self.arm_radius, "arm_radius")?;
        require_non_negative(self.poi_radius, "poi_radius")
    }
}

/// Complete two-hand parameter snapshot owned by the external state layer.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpinnerState {
    /// Parameters for the left hand.
    pub left: HandOscillator,
    /// Parameters for the right hand.
    pub right: HandOscillator,
    /// Tempo in beats per minute, strictly positive.
    pub bpm: f64,
}

impl SpinnerState {
    /// Returns the oscillator parameters for the requested hand.
    #[must_use]
    pub const fn hand(&self, hand: Hand) -> &HandOscillator {
        match hand {
            Hand::Left => &self.left,
            Hand::Right => &self.right,
        }
    }

    /// Checks the strict invariants for both hands and the tempo.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.left.validate()?;
        self.right.validate()?;
        require_positive(self.bpm, "bpm")
    }
}

/// Evaluated angles for a single hand at one instant.
///
/// Only the arm angle and the poi angle relative to the arm are stored; the
/// absolute head angle is computed as their sum so the `head == arm + rel`
/// identity holds by construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandAngles {
    arm: f64,
    rel: f64,
}

impl HandAngles {
    /// Builds the angle pair from an arm angle and a relative poi angle.
    #[must_use]
    pub const fn from_arm_and_rel(arm: f64, rel: f64) -> Self {
        Self { arm, rel }
    }

    /// Absolute arm angle in radians.
    #[must_use]
    pub const fn arm(&self) -> f64 {
        self.arm
    }

    /// Poi angle relative to the arm, in radians.
    #[must_use]
    pub const fn rel(&self) -> f64 {
        self.rel
    }

    /// Absolute poi head angle, always `arm + rel`.
    #[must_use]
    pub fn head(&self) -> f64 {
        self.arm + self.rel
    }
}

/// Evaluated angles for both hands at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnglesByHand {
    /// Angles of the left hand.
    pub left: HandAngles,
    /// Angles of the right hand.
    pub right: HandAngles,
}

impl AnglesByHand {
    /// Returns the angles for the requested hand.
    #[must_use]
    pub const fn hand(&self, hand: Hand) -> HandAngles {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }
}

/// Cartesian points for a single hand-and-poi pair at one instant.
///
/// Only the hand point and the head point are stored; the tether vector is
/// computed as their difference so `|tether| == poi_radius` holds exactly up
/// to floating-point rounding.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HandPositions {
    hand: DVec2,
    head: DVec2,
}

impl HandPositions {
    /// Builds the position pair from a hand point and a head point.
    #[must_use]
    pub const fn new(hand: DVec2, head: DVec2) -> Self {
        Self { hand, head }
    }

    /// Position of the hand relative to the body center.
    #[must_use]
    pub const fn hand(&self) -> DVec2 {
        self.hand
    }

    /// Position of the poi head relative to the body center.
    #[must_use]
    pub const fn head(&self) -> DVec2 {
        self.head
    }

    /// Vector from the hand to the poi head.
    #[must_use]
    pub fn tether(&self) -> DVec2 {
        self.head - self.hand
    }
}

/// Cartesian points for both hands at one instant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionsByHand {
    /// Points of the left hand.
    pub left: HandPositions,
    /// Points of the right hand.
    pub right: HandPositions,
}

impl PositionsByHand {
    /// Returns the points for the requested hand.
    #[must_use]
    pub const fn hand(&self, hand: Hand) -> HandPositions {
        match hand {
            Hand::Left => self.left,
            Hand::Right => self.right,
        }
    }
}

/// One recorded poi head position within a trail history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailPoint {
    /// Beat at which the sample was taken.
    pub t_beats: f64,
    /// Sampled head position.
    pub point: DVec2,
}

/// Strict input-validation failures raised at the call site.
///
/// These are synchronous, never retried, and carry the offending field name
/// so callers can sanitize before calling again.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A numeric input was NaN or infinite.
    #[error("`{field}` must be finite")]
    NonFinite {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric input had to be strictly positive but was not.
    #[error("`{field}` must be positive")]
    NonPositive {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric input had to be non-negative but was negative.
    #[error("`{field}` must not be negative")]
    Negative {
        /// Name of the offending field.
        field: &'static str,
    },
}

/// Fails with [`ValidationError::NonFinite`] unless the value is finite.
pub fn require_finite(value: f64, field: &'static str) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::NonFinite { field })
    }
}

/// Fails unless the value is finite and strictly positive.
pub fn require_positive(value: f64, field: &'static str) -> Result<(), ValidationError> {
    require_finite(value, field)?;
    if value > 0.0 {
        Ok(())
    } else {
        Err(ValidationError::NonPositive { field })
    }
}

/// Fails unless the value is finite and non-negative.
pub fn require_non_negative(value: f64, field: &'static str) -> Result<(), ValidationError> {
    require_finite(value, field)?;
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::Negative { field })
    }
}
