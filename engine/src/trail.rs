//! Bounded, fixed-rate history of poi head positions.
//!
//! Trails sample on a fixed beat-domain grid decoupled from render-frame
//! timing, so their contents are reproducible no matter how the animation
//! loop chunks its frames. Seeking the playhead backward discards the
//! buffers and rebuilds the whole trailing window; an incremental patch
//! cannot represent an arbitrary backward seek.

use poi_vis_core::{
    require_finite, require_positive, SpinnerState, TrailPoint, ValidationError,
};

use crate::ring::RingBuffer;
use crate::{beats_to_seconds, positions, step_beats};

/// Parameters that size a trail history.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrailConfig {
    /// Wall-clock sampling rate of the trail, in samples per second.
    pub sample_hz: f64,
    /// Length of the trailing window measured in beats.
    pub trail_beats: f64,
}

impl TrailConfig {
    /// Checks the strict invariants for the trail parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_positive(self.sample_hz, "sample_hz")?;
        require_positive(self.trail_beats, "trail_beats")
    }
}

/// Trail histories for both hands, oldest to newest.
#[derive(Clone, Debug, PartialEq)]
pub struct TrailPointsByHand {
    /// Recorded left-hand head positions.
    pub left: Vec<TrailPoint>,
    /// Recorded right-hand head positions.
    pub right: Vec<TrailPoint>,
}

/// Stateful fixed-step sampler of both hands' head positions.
///
/// The caller threads one sampler value per visualization lineage and calls
/// [`advance`] exactly once per logical tick. Sample beats are monotonically
/// non-decreasing except at an explicit rewind, which rebuilds the window.
///
/// [`advance`]: TrailSampler::advance
#[derive(Clone, Debug)]
pub struct TrailSampler {
    step_beats: f64,
    origin_beat: f64,
    next_index: u64,
    last_frame_beat: f64,
    left: RingBuffer<TrailPoint>,
    right: RingBuffer<TrailPoint>,
}

impl TrailSampler {
    /// Creates a sampler seeded with one sample at `start_beat`.
    ///
    /// The buffer capacity covers `trail_beats` of history at the configured
    /// rate: `ceil(sample_hz * seconds(trail_beats))` entries per hand.
    pub fn create(
        config: &TrailConfig,
        state: &SpinnerState,
        start_beat: f64,
    ) -> Result<Self, ValidationError> {
        config.validate()?;
        state.validate()?;
        require_finite(start_beat, "start_beat")?;

        let window_seconds = beats_to_seconds(config.trail_beats, state.bpm);
        let capacity = (config.sample_hz * window_seconds).ceil() as usize;

        let mut sampler = Self {
            step_beats: step_beats(state.bpm, config.sample_hz),
            origin_beat: start_beat,
            next_index: 1,
            last_frame_beat: start_beat,
            left: RingBuffer::new(capacity),
            right: RingBuffer::new(capacity),
        };
        sampler.record(state, start_beat);
        Ok(sampler)
    }

    /// Advances the trail to `frame_beat`, sampling any due beats.
    ///
    /// Moving forward appends every pending fixed-step sample up to and
    /// including `frame_beat`. Moving backward (`frame_beat` earlier than
    /// the previous frame) discards the buffers and resamples the entire
    /// trailing window so its newest point lands exactly on `frame_beat`.
    pub fn advance(
        &mut self,
        state: &SpinnerState,
        frame_beat: f64,
    ) -> Result<(), ValidationError> {
        state.validate()?;
        require_finite(frame_beat, "frame_beat")?;

        if frame_beat < self.last_frame_beat {
            self.rewind(state, frame_beat);
        } else {
            self.forward(state, frame_beat);
        }
        Ok(())
    }

    /// Returns both hands' recorded points, oldest to newest.
    #[must_use]
    pub fn points(&self) -> TrailPointsByHand {
        TrailPointsByHand {
            left: self.left.to_vec(),
            right: self.right.to_vec(),
        }
    }

    /// Beats covered by one sample interval.
    #[must_use]
    pub const fn step_beats(&self) -> f64 {
        self.step_beats
    }

    /// Beat at which the next forward sample is due.
    #[must_use]
    pub fn next_sample_beat(&self) -> f64 {
        self.origin_beat + self.next_index as f64 * self.step_beats
    }

    /// Beat supplied to the most recent create or advance call.
    #[must_use]
    pub const fn last_frame_beat(&self) -> f64 {
        self.last_frame_beat
    }

    /// Maximum number of points retained per hand.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.left.capacity()
    }

    fn forward(&mut self, state: &SpinnerState, frame_beat: f64) {
        let next_beat = self.next_sample_beat();
        if frame_beat >= next_beat {
            let pending = ((frame_beat - next_beat) / self.step_beats).floor() as u64 + 1;
            for offset in 0..pending {
                let index = self.next_index + offset;
                self.record(state, self.origin_beat + index as f64 * self.step_beats);
            }
            self.next_index += pending;
        }
        self.last_frame_beat = frame_beat;
    }

    fn rewind(&mut self, state: &SpinnerState, frame_beat: f64) {
        let capacity = self.capacity();
        self.left.clear();
        self.right.clear();

        for index in 0..capacity {
            let steps_back = (capacity - 1 - index) as f64;
            let t_beats = frame_beat - steps_back * self.step_beats;
            // The trailing window never reaches before beat zero.
            if t_beats < 0.0 {
                continue;
            }
            self.record(state, t_beats);
        }

        self.origin_beat = frame_beat;
        self.next_index = 1;
        self.last_frame_beat = frame_beat;
    }

    fn record(&mut self, state: &SpinnerState, t_beats: f64) {
        let evaluated = positions(state, t_beats);
        self.left.push(TrailPoint {
            t_beats,
            point: evaluated.left.head(),
        });
        self.right.push(TrailPoint {
            t_beats,
            point: evaluated.right.head(),
        });
    }
}
