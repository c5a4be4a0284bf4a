#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Bridge between continuous oscillator parameters and the discrete VTG
//! pattern vocabulary.
//!
//! The classifier reduces a [`poi_vis_core::SpinnerState`] to two
//! [`poi_vis_core::Element`] labels and a quarter-turn phase bucket; the
//! generator synthesizes oscillator parameters from a
//! [`poi_vis_core::VtgDescriptor`] and validates itself by re-running the
//! classifier on its own output. Both directions consult only relative
//! relationships between the hands, never absolute orientation, so
//! classification is rotation-invariant.

mod classify;
mod generate;

pub use classify::{
    classify, classify_descriptor, classify_direction, classify_timing, cycle_ratio,
    Classification, ClassifyError, SPEED_EPSILON, TOLERANCE_DEGREES,
};
pub use generate::{generate, GenerateError};
