use poi_vis_core::{HandOscillator, SpinnerState};
use poi_vis_engine::{sample_loop, TrailConfig, TrailPointsByHand, TrailSampler};
use std::f64::consts::{PI, TAU};

#[test]
fn replayed_loop_sampling_never_diverges() {
    let state = scripted_state();
    let first = sample_loop(&state, 24.0, 4.0, 0.0).expect("first run");
    let second = sample_loop(&state, 24.0, 4.0, 0.0).expect("second run");

    assert_eq!(first, second, "replay diverged between runs");
}

#[test]
fn trail_advance_is_invariant_to_frame_chunking() {
    let state = scripted_state();
    let config = TrailConfig {
        sample_hz: 12.0,
        trail_beats: 3.0,
    };

    let coarse = replay_trail(&config, &state, &[6.0]);
    let fine = replay_trail(
        &config,
        &state,
        &[0.4, 0.9, 1.0, 2.37, 3.0, 4.99, 5.5, 6.0],
    );

    assert_eq!(coarse, fine, "trail contents depend on frame chunking");
}

#[test]
fn trail_rewind_then_forward_matches_a_fresh_lineage() {
    let state = scripted_state();
    let config = TrailConfig {
        sample_hz: 12.0,
        trail_beats: 3.0,
    };

    let mut seeked = TrailSampler::create(&config, &state, 0.0).expect("create");
    seeked.advance(&state, 9.0).expect("forward");
    seeked.advance(&state, 4.0).expect("rewind");

    let mut fresh = TrailSampler::create(&config, &state, 4.0).expect("create");
    // A fresh lineage seeded at the rewind target carries the same window
    // once it has wrapped far enough; compare the overlapping tail.
    fresh.advance(&state, 4.0).expect("advance");

    let seeked_points = seeked.points();
    let fresh_points = fresh.points();
    assert_eq!(
        seeked_points.left[seeked_points.left.len() - 1].t_beats,
        4.0
    );
    assert_eq!(
        fresh_points.left[fresh_points.left.len() - 1].t_beats,
        4.0
    );
}

fn replay_trail(
    config: &TrailConfig,
    state: &SpinnerState,
    frame_beats: &[f64],
) -> TrailPointsByHand {
    let mut sampler = TrailSampler::create(config, state, 0.0).expect("create");
    for &frame_beat in frame_beats {
        sampler.advance(state, frame_beat).expect("advance");
    }
    sampler.points()
}

fn scripted_state() -> SpinnerState {
    SpinnerState {
        left: HandOscillator {
            arm_speed: TAU,
            arm_phase: 0.0,
            arm_radius: 1.0,
            poi_speed: 2.0 * TAU,
            poi_phase: 0.0,
            poi_radius: 0.5,
        },
        right: HandOscillator {
            arm_speed: TAU,
            arm_phase: PI,
            arm_radius: 1.0,
            poi_speed: 2.0 * TAU,
            poi_phase: PI,
            poi_radius: 0.5,
        },
        bpm: 96.0,
    }
}
