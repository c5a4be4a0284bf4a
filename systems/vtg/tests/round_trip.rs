use poi_vis_core::{
    Element, HandOscillator, PhaseReference, QuarterPhase, SpinnerState, VtgDescriptor,
};
use poi_vis_system_vtg::{classify_descriptor, generate};
use std::f64::consts::TAU;

fn base() -> SpinnerState {
    let hand = HandOscillator {
        arm_speed: TAU,
        arm_phase: 0.0,
        arm_radius: 1.0,
        poi_speed: 0.0,
        poi_phase: 0.0,
        poi_radius: 0.5,
    };
    SpinnerState {
        left: hand,
        right: hand,
        bpm: 120.0,
    }
}

#[test]
fn every_descriptor_in_the_grid_survives_generate_then_classify() {
    for arm_element in Element::ALL {
        for poi_element in Element::ALL {
            for phase in QuarterPhase::ALL {
                for cycles in [1.0, -1.0, 2.0, -2.0, 3.0, -3.0] {
                    let requested = VtgDescriptor {
                        arm_element,
                        poi_element,
                        phase,
                        poi_cycles_per_arm_cycle: cycles,
                    };

                    let state = generate(&requested, &base(), PhaseReference::Right)
                        .unwrap_or_else(|error| panic!("{requested} failed: {error}"));
                    let classified = classify_descriptor(&state, PhaseReference::Right)
                        .unwrap_or_else(|error| panic!("{requested} unclassifiable: {error}"));

                    assert_eq!(classified.arm_element, requested.arm_element);
                    assert_eq!(classified.poi_element, requested.poi_element);
                    assert_eq!(classified.phase, requested.phase);
                    assert_eq!(
                        classified.poi_cycles_per_arm_cycle,
                        requested.poi_cycles_per_arm_cycle
                    );
                }
            }
        }
    }
}

#[test]
fn round_trips_hold_under_every_phase_reference() {
    let requested = VtgDescriptor {
        arm_element: Element::Fire,
        poi_element: Element::Air,
        phase: QuarterPhase::Deg270,
        poi_cycles_per_arm_cycle: 2.0,
    };

    for reference in PhaseReference::ALL {
        let state = generate(&requested, &base(), reference).expect("generate");
        let classified = classify_descriptor(&state, reference).expect("classify");
        assert_eq!(classified.phase, requested.phase, "reference {reference}");
        assert_eq!(classified.arm_element, requested.arm_element);
        assert_eq!(classified.poi_element, requested.poi_element);
    }
}

#[test]
fn the_same_descriptor_lands_on_different_canonical_phases_per_reference() {
    let requested = VtgDescriptor {
        arm_element: Element::Earth,
        poi_element: Element::Earth,
        phase: QuarterPhase::Deg0,
        poi_cycles_per_arm_cycle: 1.0,
    };

    let canonical = generate(&requested, &base(), PhaseReference::Right).expect("generate");
    let shifted = generate(&requested, &base(), PhaseReference::Up).expect("generate");
    // Deg0 in the up frame is Deg270 canonically, so the poi phases differ.
    assert_ne!(canonical.right.poi_phase, shifted.right.poi_phase);
}

#[test]
fn air_water_quarter_phase_with_negative_triples() {
    let requested = VtgDescriptor {
        arm_element: Element::Air,
        poi_element: Element::Water,
        phase: QuarterPhase::Deg90,
        poi_cycles_per_arm_cycle: -3.0,
    };

    let state = generate(&requested, &base(), PhaseReference::Right).expect("generate");

    // The right head turns exactly minus three cycles per beat.
    assert_eq!(state.right.head_speed(), -3.0 * TAU);

    let classified = classify_descriptor(&state, PhaseReference::Right).expect("classify");
    assert_eq!(classified.arm_element, requested.arm_element);
    assert_eq!(classified.poi_element, requested.poi_element);
    assert_eq!(classified.phase, requested.phase);
    assert_eq!(classified.poi_cycles_per_arm_cycle, -3.0);
}
