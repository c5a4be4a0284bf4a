//! Synthesizes oscillator parameters from a discrete VTG descriptor.

use poi_vis_core::{
    wrap_radians, PhaseReference, SpinDirection, SpinnerState, Timing, ValidationError,
    VtgDescriptor,
};
use std::f64::consts::TAU;
use thiserror::Error;

use crate::classify::{classify_descriptor, ClassifyError};

/// Failures raised while synthesizing a state from a descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum GenerateError {
    /// The requested cycle count cannot carry a poi direction sign.
    #[error("poi cycles per arm cycle must be a nonzero finite number, got {value}")]
    InvalidCycleCount {
        /// The rejected cycle count.
        value: f64,
    },
    /// The base state failed strict validation.
    #[error("base state is invalid: {0}")]
    State(#[from] ValidationError),
    /// The generated state did not classify at all. An internal defect:
    /// the synthesis algebra should always land inside every tolerance
    /// window.
    #[error("generated state does not classify: {0}")]
    Unclassifiable(ClassifyError),
    /// The generated state classified as a different descriptor. An
    /// internal defect; callers must surface it, never suppress it.
    #[error("round-trip mismatch: requested {requested}, classified {classified}")]
    RoundTrip {
        /// The descriptor the caller asked for.
        requested: VtgDescriptor,
        /// The descriptor the candidate state classified as.
        classified: VtgDescriptor,
    },
}

/// Builds a state realizing the descriptor, carrying every non-angular
/// field over from `base`.
///
/// The right arm is the canonical baseline (one full turn per beat, phase
/// zero); everything else is derived from the descriptor's relation table
/// entries and the phase bucket, interpreted in the supplied reference
/// frame. Before returning, the candidate state is re-classified and
/// compared against the request; any mismatch is reported as a defect
/// rather than silently returned.
pub fn generate(
    descriptor: &VtgDescriptor,
    base: &SpinnerState,
    reference: PhaseReference,
) -> Result<SpinnerState, GenerateError> {
    let cycles = descriptor.poi_cycles_per_arm_cycle;
    if !cycles.is_finite() || cycles == 0.0 {
        return Err(GenerateError::InvalidCycleCount { value: cycles });
    }
    base.validate()?;

    let arm_relation = descriptor.arm_element.relation();
    let poi_relation = descriptor.poi_element.relation();
    let canonical_phase = reference.from_reference(descriptor.phase);

    let right_arm_speed = TAU;
    let right_arm_phase = 0.0;
    let left_arm_speed = match arm_relation.direction {
        SpinDirection::Same => right_arm_speed,
        SpinDirection::Opposite => -right_arm_speed,
    };
    let left_arm_phase = wrap_radians(right_arm_phase - timing_offset(arm_relation.timing));

    let right_head_speed = cycles * TAU;
    let left_head_speed = match poi_relation.direction {
        SpinDirection::Same => right_head_speed,
        SpinDirection::Opposite => -right_head_speed,
    };
    let right_head_phase = wrap_radians(right_arm_phase + canonical_phase.radians());
    let left_head_phase = wrap_radians(right_head_phase - timing_offset(poi_relation.timing));

    let mut state = *base;
    state.right.arm_speed = right_arm_speed;
    state.right.arm_phase = right_arm_phase;
    state.right.poi_speed = right_head_speed - right_arm_speed;
    state.right.poi_phase = right_head_phase - right_arm_phase;
    state.left.arm_speed = left_arm_speed;
    state.left.arm_phase = left_arm_phase;
    state.left.poi_speed = left_head_speed - left_arm_speed;
    state.left.poi_phase = left_head_phase - left_arm_phase;

    let classified =
        classify_descriptor(&state, reference).map_err(GenerateError::Unclassifiable)?;
    if classified.arm_element != descriptor.arm_element
        || classified.poi_element != descriptor.poi_element
        || classified.phase != descriptor.phase
    {
        return Err(GenerateError::RoundTrip {
            requested: *descriptor,
            classified,
        });
    }

    Ok(state)
}

fn timing_offset(timing: Timing) -> f64 {
    match timing {
        Timing::Same => 0.0,
        Timing::Split => std::f64::consts::PI,
    }
}
