//! Reduces continuous hand parameters to the discrete VTG vocabulary.

use poi_vis_core::{
    angular_distance, wrap_radians, Element, PhaseReference, QuarterPhase, Relation, SpinDirection,
    SpinnerState, Timing, ValidationError, VtgDescriptor,
};
use std::f64::consts::PI;
use thiserror::Error;

/// Angular speeds below this magnitude have no usable direction sign.
pub const SPEED_EPSILON: f64 = 1e-6;

/// Width of every classification window, in degrees.
///
/// A timing offset must sit within this many degrees of aligned or opposed,
/// and a poi phase within this many degrees of a quarter turn, to be named.
pub const TOLERANCE_DEGREES: f64 = 5.0;

/// An angular relation fell outside the discrete vocabulary.
///
/// Expected and recoverable at the boundary: callers typically suppress a
/// "named pattern" indicator rather than treating this as a defect.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum ClassifyError {
    /// The supplied state failed strict validation.
    #[error("state is invalid: {0}")]
    State(#[from] ValidationError),
    /// An angular speed was too small to carry a direction sign.
    #[error("angular speed below {SPEED_EPSILON} rad/beat has no direction sign")]
    DirectionUndefined,
    /// A hand-to-hand offset was neither aligned nor opposed within tolerance.
    #[error("timing offset of {offset_radians} rad is neither aligned nor opposed")]
    TimingAmbiguous {
        /// The wrapped offset that could not be bucketed.
        offset_radians: f64,
    },
    /// The poi phase was not close enough to any quarter turn.
    #[error("poi phase of {offset_radians} rad is not near a quarter turn")]
    PhaseAmbiguous {
        /// The wrapped offset that could not be bucketed.
        offset_radians: f64,
    },
}

/// Discrete labels extracted from a state, in the canonical frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Classification {
    /// Relation bucket of the two arms.
    pub arm_element: Element,
    /// Relation bucket of the two poi heads.
    pub poi_element: Element,
    /// Quarter-turn offset of the right poi head from the right arm,
    /// measured with the canonical right-is-zero reference.
    pub phase: QuarterPhase,
}

/// Classifies both hands' parameters into Element and phase labels.
///
/// Only relative relationships are consulted: left versus right speeds and
/// phases, and head versus arm phase on the right hand. Rotating both hands
/// by an identical phase offset therefore never changes the result.
pub fn classify(state: &SpinnerState) -> Result<Classification, ClassifyError> {
    state.validate()?;

    let arm_direction = classify_direction(state.left.arm_speed, state.right.arm_speed)?;
    let arm_timing = classify_timing(wrap_radians(state.right.arm_phase - state.left.arm_phase))?;

    let poi_direction = classify_direction(state.left.head_speed(), state.right.head_speed())?;
    let poi_timing =
        classify_timing(wrap_radians(state.right.head_phase() - state.left.head_phase()))?;

    let phase = classify_phase(wrap_radians(
        state.right.head_phase() - state.right.arm_phase,
    ))?;

    Ok(Classification {
        arm_element: Element::from_relation(Relation {
            timing: arm_timing,
            direction: arm_direction,
        }),
        poi_element: Element::from_relation(Relation {
            timing: poi_timing,
            direction: poi_direction,
        }),
        phase,
    })
}

/// Classifies a state and converts its phase bucket into the caller's
/// reference frame, yielding a complete descriptor.
pub fn classify_descriptor(
    state: &SpinnerState,
    reference: PhaseReference,
) -> Result<VtgDescriptor, ClassifyError> {
    let classification = classify(state)?;
    Ok(VtgDescriptor {
        arm_element: classification.arm_element,
        poi_element: classification.poi_element,
        phase: reference.to_reference(classification.phase),
        poi_cycles_per_arm_cycle: cycle_ratio(state),
    })
}

/// Signed poi head cycles per arm cycle, taken from the right hand.
#[must_use]
pub fn cycle_ratio(state: &SpinnerState) -> f64 {
    state.right.head_speed() / state.right.arm_speed
}

/// Buckets two signed speeds into a direction relation.
///
/// Fails when either magnitude is below [`SPEED_EPSILON`], since the sign of
/// a near-zero speed is noise.
pub fn classify_direction(a: f64, b: f64) -> Result<SpinDirection, ClassifyError> {
    if a.abs() < SPEED_EPSILON || b.abs() < SPEED_EPSILON {
        return Err(ClassifyError::DirectionUndefined);
    }

    if (a > 0.0) == (b > 0.0) {
        Ok(SpinDirection::Same)
    } else {
        Ok(SpinDirection::Opposite)
    }
}

/// Buckets a wrapped hand-to-hand offset into a timing relation.
///
/// Within [`TOLERANCE_DEGREES`] of zero is same-time, within the same
/// tolerance of a half turn is split-time, anything else is ambiguous.
pub fn classify_timing(offset: f64) -> Result<Timing, ClassifyError> {
    let tolerance = TOLERANCE_DEGREES.to_radians();
    if angular_distance(offset, 0.0) <= tolerance {
        Ok(Timing::Same)
    } else if angular_distance(offset, PI) <= tolerance {
        Ok(Timing::Split)
    } else {
        Err(ClassifyError::TimingAmbiguous {
            offset_radians: offset,
        })
    }
}

fn classify_phase(offset: f64) -> Result<QuarterPhase, ClassifyError> {
    let (bucket, distance) = QuarterPhase::nearest(offset);
    if distance <= TOLERANCE_DEGREES.to_radians() {
        Ok(bucket)
    } else {
        Err(ClassifyError::PhaseAmbiguous {
            offset_radians: offset,
        })
    }
}
