//! Discrete vocabulary used to name two-hand spinning patterns.
//!
//! A pattern is described by two [`Element`] labels (one for the arms, one
//! for the poi heads), a quarter-turn phase bucket, and a signed
//! head-cycles-per-arm-cycle count. Each element is a fixed (timing,
//! direction) relation pair; the mapping is bijective in both directions.

use std::f64::consts::{FRAC_PI_2, PI, TAU};
use std::fmt;

use serde::{Deserialize, Serialize};

/// Timing relationship between the two hands of a relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Timing {
    /// Both angles pass the reference direction together.
    Same,
    /// The angles are opposed by half a turn.
    Split,
}

/// Rotation-direction relationship between the two hands of a relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpinDirection {
    /// Both sides rotate with the same sign.
    Same,
    /// The sides rotate with opposite signs.
    Opposite,
}

/// A (timing, direction) pair, bijective with [`Element`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Relation {
    /// Timing half of the relation.
    pub timing: Timing,
    /// Direction half of the relation.
    pub direction: SpinDirection,
}

/// One of the four timing/direction buckets used to label patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Element {
    /// Same time, same direction.
    Earth,
    /// Same time, opposite direction.
    Air,
    /// Split time, same direction.
    Water,
    /// Split time, opposite direction.
    Fire,
}

impl Element {
    /// All elements in canonical order.
    pub const ALL: [Element; 4] = [Element::Earth, Element::Air, Element::Water, Element::Fire];

    /// Returns the fixed relation pair this element names.
    #[must_use]
    pub const fn relation(self) -> Relation {
        match self {
            Element::Earth => Relation {
                timing: Timing::Same,
                direction: SpinDirection::Same,
            },
            Element::Air => Relation {
                timing: Timing::Same,
                direction: SpinDirection::Opposite,
            },
            Element::Water => Relation {
                timing: Timing::Split,
                direction: SpinDirection::Same,
            },
            Element::Fire => Relation {
                timing: Timing::Split,
                direction: SpinDirection::Opposite,
            },
        }
    }

    /// Returns the element naming the provided relation pair.
    ///
    /// The table is total over both halves, so every relation has exactly
    /// one element.
    #[must_use]
    pub const fn from_relation(relation: Relation) -> Self {
        match (relation.timing, relation.direction) {
            (Timing::Same, SpinDirection::Same) => Element::Earth,
            (Timing::Same, SpinDirection::Opposite) => Element::Air,
            (Timing::Split, SpinDirection::Same) => Element::Water,
            (Timing::Split, SpinDirection::Opposite) => Element::Fire,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Element::Earth => "earth",
            Element::Air => "air",
            Element::Water => "water",
            Element::Fire => "fire",
        };
        f.write_str(label)
    }
}

/// One of the four quarter-turn phase buckets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum QuarterPhase {
    /// Zero degrees.
    Deg0,
    /// Ninety degrees.
    Deg90,
    /// One hundred eighty degrees.
    Deg180,
    /// Two hundred seventy degrees.
    Deg270,
}

impl QuarterPhase {
    /// All buckets in ascending order.
    pub const ALL: [QuarterPhase; 4] = [
        QuarterPhase::Deg0,
        QuarterPhase::Deg90,
        QuarterPhase::Deg180,
        QuarterPhase::Deg270,
    ];

    /// The bucket value in whole degrees.
    #[must_use]
    pub const fn degrees(self) -> u16 {
        match self {
            QuarterPhase::Deg0 => 0,
            QuarterPhase::Deg90 => 90,
            QuarterPhase::Deg180 => 180,
            QuarterPhase::Deg270 => 270,
        }
    }

    /// The bucket value in radians.
    #[must_use]
    pub fn radians(self) -> f64 {
        f64::from(self.degrees()).to_radians()
    }

    /// Parses an exact quarter-turn degree value.
    #[must_use]
    pub const fn from_degrees(value: u16) -> Option<Self> {
        match value {
            0 => Some(QuarterPhase::Deg0),
            90 => Some(QuarterPhase::Deg90),
            180 => Some(QuarterPhase::Deg180),
            270 => Some(QuarterPhase::Deg270),
            _ => None,
        }
    }

    /// Returns the bucket closest to the provided angle along with the
    /// wrapped angular distance to it.
    ///
    /// Ties resolve to the lower-degree bucket.
    #[must_use]
    pub fn nearest(radians: f64) -> (Self, f64) {
        let mut best = QuarterPhase::Deg0;
        let mut best_distance = angular_distance(radians, best.radians());

        for candidate in &Self::ALL[1..] {
            let distance = angular_distance(radians, candidate.radians());
            if distance < best_distance {
                best = *candidate;
                best_distance = distance;
            }
        }

        (best, best_distance)
    }

    const fn quarter_turns(self) -> u8 {
        match self {
            QuarterPhase::Deg0 => 0,
            QuarterPhase::Deg90 => 1,
            QuarterPhase::Deg180 => 2,
            QuarterPhase::Deg270 => 3,
        }
    }

    const fn from_quarter_turns(turns: u8) -> Self {
        match turns % 4 {
            0 => QuarterPhase::Deg0,
            1 => QuarterPhase::Deg90,
            2 => QuarterPhase::Deg180,
            _ => QuarterPhase::Deg270,
        }
    }

    /// Rotates this bucket forward by another bucket, modulo a full turn.
    #[must_use]
    pub const fn rotated_by(self, offset: QuarterPhase) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + offset.quarter_turns())
    }

    /// Undoes [`QuarterPhase::rotated_by`] with the same offset.
    #[must_use]
    pub const fn rotated_back(self, offset: QuarterPhase) -> Self {
        Self::from_quarter_turns(self.quarter_turns() + 4 - offset.quarter_turns())
    }
}

impl fmt::Display for QuarterPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}\u{b0}", self.degrees())
    }
}

/// Complete discrete description of a two-hand pattern.
///
/// A transient value object: constructed to request a generation or returned
/// from a classification, never stored by the core.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VtgDescriptor {
    /// Relation bucket of the two arms.
    pub arm_element: Element,
    /// Relation bucket of the two poi heads.
    pub poi_element: Element,
    /// Quarter-turn offset of the right poi head from the right arm.
    pub phase: QuarterPhase,
    /// Signed poi head cycles per arm cycle; nonzero and finite.
    pub poi_cycles_per_arm_cycle: f64,
}

impl fmt::Display for VtgDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{} at {} with {} head cycles per arm cycle",
            self.arm_element, self.poi_element, self.phase, self.poi_cycles_per_arm_cycle
        )
    }
}

/// User-selectable zero direction for displayed phase values.
///
/// Canonical storage always measures phase with `right = 0`; the reference
/// merely shifts values on the way in and out of the user-facing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PhaseReference {
    /// Zero points along the positive x axis.
    Right,
    /// Zero points along the negative y axis.
    Down,
    /// Zero points along the negative x axis.
    Left,
    /// Zero points along the positive y axis.
    Up,
}

impl PhaseReference {
    /// All references in canonical order.
    pub const ALL: [PhaseReference; 4] = [
        PhaseReference::Right,
        PhaseReference::Down,
        PhaseReference::Left,
        PhaseReference::Up,
    ];

    /// Fixed additive offset applied to canonical radians.
    #[must_use]
    pub fn radian_offset(self) -> f64 {
        match self {
            PhaseReference::Right => 0.0,
            PhaseReference::Down => PI + FRAC_PI_2,
            PhaseReference::Left => PI,
            PhaseReference::Up => FRAC_PI_2,
        }
    }

    /// Fixed quarter-turn offset applied to canonical buckets.
    #[must_use]
    pub const fn bucket_offset(self) -> QuarterPhase {
        match self {
            PhaseReference::Right => QuarterPhase::Deg0,
            PhaseReference::Down => QuarterPhase::Deg270,
            PhaseReference::Left => QuarterPhase::Deg180,
            PhaseReference::Up => QuarterPhase::Deg90,
        }
    }

    /// Converts a canonical angle into this reference frame.
    #[must_use]
    pub fn to_reference_radians(self, canonical: f64) -> f64 {
        wrap_radians(canonical + self.radian_offset())
    }

    /// Converts an angle in this reference frame back to canonical.
    #[must_use]
    pub fn from_reference_radians(self, value: f64) -> f64 {
        wrap_radians(value - self.radian_offset())
    }

    /// Converts a canonical phase bucket into this reference frame.
    #[must_use]
    pub const fn to_reference(self, canonical: QuarterPhase) -> QuarterPhase {
        canonical.rotated_by(self.bucket_offset())
    }

    /// Converts a phase bucket in this reference frame back to canonical.
    #[must_use]
    pub const fn from_reference(self, value: QuarterPhase) -> QuarterPhase {
        value.rotated_back(self.bucket_offset())
    }
}

impl fmt::Display for PhaseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PhaseReference::Right => "right",
            PhaseReference::Down => "down",
            PhaseReference::Left => "left",
            PhaseReference::Up => "up",
        };
        f.write_str(label)
    }
}

/// Wraps an angle into the canonical `[0, 2pi)` range.
#[must_use]
pub fn wrap_radians(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to a full turn for tiny negative inputs.
    if wrapped >= TAU {
        0.0
    } else {
        wrapped
    }
}

/// Shortest wrapped distance between two angles, in `[0, pi]`.
#[must_use]
pub fn angular_distance(a: f64, b: f64) -> f64 {
    let diff = wrap_radians(a - b);
    diff.min(TAU - diff)
}
