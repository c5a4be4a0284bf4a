#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic oscillator and geometry engine for the poi visualizer.
//!
//! Everything here is a pure function of the supplied [`SpinnerState`] and a
//! beat-domain time value: angle evaluation, polar-to-Cartesian position
//! evaluation, and fixed-step loop sampling. The only stateful value is the
//! [`TrailSampler`], which the caller threads explicitly. Identical inputs
//! always produce identical outputs.

use glam::DVec2;
use poi_vis_core::{
    require_finite, require_non_negative, require_positive, AnglesByHand, HandAngles,
    HandOscillator, HandPositions, PositionsByHand, SpinnerState, ValidationError,
};

mod ring;
mod trail;

pub use ring::RingBuffer;
pub use trail::{TrailConfig, TrailPointsByHand, TrailSampler};

/// Evaluates one hand's angles at the provided beat.
///
/// `arm = arm_speed * t + arm_phase` and `rel = poi_speed * t + poi_phase`;
/// the absolute head angle is their sum by construction. Total over finite
/// inputs; non-finite inputs are the caller's responsibility.
#[must_use]
pub fn hand_angles(osc: &HandOscillator, t_beats: f64) -> HandAngles {
    HandAngles::from_arm_and_rel(
        osc.arm_speed * t_beats + osc.arm_phase,
        osc.poi_speed * t_beats + osc.poi_phase,
    )
}

/// Evaluates both hands' angles at the provided beat.
#[must_use]
pub fn angles(state: &SpinnerState, t_beats: f64) -> AnglesByHand {
    AnglesByHand {
        left: hand_angles(&state.left, t_beats),
        right: hand_angles(&state.right, t_beats),
    }
}

/// Converts one hand's evaluated angles into Cartesian points.
///
/// The hand sits on a circle of radius `arm_radius` around the body center
/// and the head on a circle of radius `poi_radius` around the hand, so both
/// radius identities hold exactly up to floating-point rounding.
#[must_use]
pub fn hand_positions(osc: &HandOscillator, angles: HandAngles) -> HandPositions {
    let hand = osc.arm_radius * DVec2::from_angle(angles.arm());
    let head = hand + osc.poi_radius * DVec2::from_angle(angles.head());
    HandPositions::new(hand, head)
}

/// Evaluates both hands' Cartesian points at the provided beat.
#[must_use]
pub fn positions(state: &SpinnerState, t_beats: f64) -> PositionsByHand {
    PositionsByHand {
        left: hand_positions(&state.left, hand_angles(&state.left, t_beats)),
        right: hand_positions(&state.right, hand_angles(&state.right, t_beats)),
    }
}

/// One fixed-step sample produced by [`sample_loop`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LoopSample {
    /// Beat at which the sample was evaluated.
    pub t_beats: f64,
    /// Evaluated angles for both hands.
    pub angles: AnglesByHand,
    /// Evaluated Cartesian points for both hands.
    pub positions: PositionsByHand,
}

/// Samples both hands across `loop_beats` at a fixed wall-clock rate.
///
/// The step is derived once from the tempo and the sample rate, the sample
/// count is `ceil(loop_beats / step) + 1`, and the final sample is clamped
/// to land exactly on the loop boundary even when uniform stepping would
/// overshoot it. The clamp guarantees the sampled sequence always closes the
/// loop, at the cost of a shorter last interval.
pub fn sample_loop(
    state: &SpinnerState,
    sample_hz: f64,
    loop_beats: f64,
    start_beat: f64,
) -> Result<Vec<LoopSample>, ValidationError> {
    state.validate()?;
    require_positive(sample_hz, "sample_hz")?;
    require_non_negative(loop_beats, "loop_beats")?;
    require_finite(start_beat, "start_beat")?;

    let step = step_beats(state.bpm, sample_hz);
    let end_beat = start_beat + loop_beats;
    let intervals = (loop_beats / step).ceil() as usize;

    let mut samples = Vec::with_capacity(intervals + 1);
    for index in 0..=intervals {
        let t_beats = (start_beat + index as f64 * step).min(end_beat);
        samples.push(LoopSample {
            t_beats,
            angles: angles(state, t_beats),
            positions: positions(state, t_beats),
        });
    }

    Ok(samples)
}

/// Beats covered by one sample interval at the given tempo and rate.
pub(crate) fn step_beats(bpm: f64, sample_hz: f64) -> f64 {
    beats_per_second(bpm) / sample_hz
}

pub(crate) fn beats_per_second(bpm: f64) -> f64 {
    bpm / 60.0
}

pub(crate) fn beats_to_seconds(beats: f64, bpm: f64) -> f64 {
    beats / beats_per_second(bpm)
}

#[cfg(test)]
mod tests {
    use super::{angles, hand_angles, positions, sample_loop, step_beats};
    use poi_vis_core::{Hand, HandOscillator, SpinnerState, ValidationError};
    use std::f64::consts::{PI, TAU};

    const TOLERANCE: f64 = 1e-9;

    fn oscillator() -> HandOscillator {
        HandOscillator {
            arm_speed: TAU,
            arm_phase: 0.25,
            arm_radius: 1.0,
            poi_speed: -2.0 * TAU,
            poi_phase: PI,
            poi_radius: 0.5,
        }
    }

    fn state() -> SpinnerState {
        SpinnerState {
            left: oscillator(),
            right: HandOscillator {
                arm_phase: PI,
                ..oscillator()
            },
            bpm: 120.0,
        }
    }

    #[test]
    fn angles_evaluate_the_linear_oscillators() {
        let osc = oscillator();
        let evaluated = hand_angles(&osc, 0.75);
        assert_eq!(evaluated.arm(), osc.arm_speed * 0.75 + osc.arm_phase);
        assert_eq!(evaluated.rel(), osc.poi_speed * 0.75 + osc.poi_phase);
    }

    #[test]
    fn head_angle_is_arm_plus_rel_for_any_beat() {
        let state = state();
        for t_beats in [-2.5, 0.0, 0.125, 1.0, 7.75] {
            let evaluated = angles(&state, t_beats);
            for hand in Hand::BOTH {
                let angles = evaluated.hand(hand);
                assert_eq!(angles.head(), angles.arm() + angles.rel());
            }
        }
    }

    #[test]
    fn radius_invariants_hold_for_any_beat() {
        let state = state();
        for t_beats in [0.0, 0.2, 0.33, 1.5, 12.0] {
            let evaluated = positions(&state, t_beats);
            for hand in Hand::BOTH {
                let osc = state.hand(hand);
                let points = evaluated.hand(hand);
                assert!((points.hand().length() - osc.arm_radius).abs() < TOLERANCE);
                assert!((points.tether().length() - osc.poi_radius).abs() < TOLERANCE);
            }
        }
    }

    #[test]
    fn loop_sampling_counts_intervals_and_closes_the_loop() {
        let state = state();
        // 120 bpm at 8 Hz: step = 0.25 beats, 16 intervals over 4 beats.
        let samples = sample_loop(&state, 8.0, 4.0, 0.0).expect("sample");
        let step = step_beats(state.bpm, 8.0);
        let expected = (4.0_f64 / step).ceil() as usize + 1;
        assert_eq!(samples.len(), expected);
        assert_eq!(samples[0].t_beats, 0.0);
        assert_eq!(samples[samples.len() - 1].t_beats, 4.0);
    }

    #[test]
    fn loop_sampling_clamps_the_final_overshooting_sample() {
        let state = state();
        // Step 0.3 beats does not divide 1 beat; the last sample is clamped.
        let samples = sample_loop(&state, 120.0 / 60.0 / 0.3, 1.0, 2.0).expect("sample");
        let last = samples[samples.len() - 1];
        let second_to_last = samples[samples.len() - 2];
        assert_eq!(last.t_beats, 3.0);
        assert!(last.t_beats - second_to_last.t_beats < 0.3);
    }

    #[test]
    fn loop_sampling_of_zero_beats_yields_the_start_sample() {
        let samples = sample_loop(&state(), 8.0, 0.0, 1.5).expect("sample");
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].t_beats, 1.5);
    }

    #[test]
    fn loop_sampling_is_deterministic() {
        let state = state();
        let first = sample_loop(&state, 30.0, 4.0, 0.5).expect("sample");
        let second = sample_loop(&state, 30.0, 4.0, 0.5).expect("sample");
        assert_eq!(first, second);
    }

    #[test]
    fn loop_sampling_rejects_invalid_inputs() {
        let state = state();
        assert_eq!(
            sample_loop(&state, 0.0, 4.0, 0.0),
            Err(ValidationError::NonPositive { field: "sample_hz" })
        );
        assert_eq!(
            sample_loop(&state, 8.0, -1.0, 0.0),
            Err(ValidationError::Negative { field: "loop_beats" })
        );
        assert_eq!(
            sample_loop(&state, 8.0, 4.0, f64::NAN),
            Err(ValidationError::NonFinite { field: "start_beat" })
        );

        let mut broken = state;
        broken.bpm = -10.0;
        assert_eq!(
            sample_loop(&broken, 8.0, 4.0, 0.0),
            Err(ValidationError::NonPositive { field: "bpm" })
        );
    }
}
