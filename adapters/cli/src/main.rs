#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that exercises the poi visualizer core.
//!
//! All computation lives in the library crates; this binary only parses
//! arguments, calls the pure API, and formats the results. It never decides
//! when to animate and never persists anything.

use anyhow::{anyhow, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use poi_vis_core::{
    Element, Hand, HandOscillator, PhaseReference, QuarterPhase, SpinnerState, VtgDescriptor,
};
use poi_vis_engine::sample_loop;
use poi_vis_system_vtg::{classify_descriptor, generate};

#[derive(Parser)]
#[command(name = "poi-vis", about = "Two-hand poi pattern engine")]
struct Cli {
    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand)]
enum CliCommand {
    /// Synthesizes oscillator parameters from a VTG descriptor.
    Generate(DescriptorArgs),
    /// Classifies oscillator parameters into a VTG descriptor.
    Classify(StateArgs),
    /// Samples one loop of a generated pattern and prints the geometry.
    Sample(SampleArgs),
}

#[derive(Args)]
struct DescriptorArgs {
    /// Relation bucket of the two arms.
    #[arg(long, value_enum)]
    arm_element: ElementArg,
    /// Relation bucket of the two poi heads.
    #[arg(long, value_enum)]
    poi_element: ElementArg,
    /// Quarter-turn phase bucket in degrees: 0, 90, 180 or 270.
    #[arg(long, default_value_t = 0)]
    phase_deg: u16,
    /// Signed poi head cycles per arm cycle.
    #[arg(long, allow_hyphen_values = true)]
    cycles: f64,
    /// Zero direction for the supplied phase value.
    #[arg(long, value_enum, default_value_t = ReferenceArg::Right)]
    reference: ReferenceArg,
    /// Tempo of the synthesized state in beats per minute.
    #[arg(long, default_value_t = 120.0)]
    bpm: f64,
    /// Arm radius carried into the synthesized state.
    #[arg(long, default_value_t = 1.0)]
    arm_radius: f64,
    /// Poi tether length carried into the synthesized state.
    #[arg(long, default_value_t = 0.5)]
    poi_radius: f64,
}

#[derive(Args)]
struct StateArgs {
    /// Left arm speed in radians per beat.
    #[arg(long, allow_hyphen_values = true)]
    left_arm_speed: f64,
    /// Left arm phase in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    left_arm_phase: f64,
    /// Left poi speed relative to the arm, in radians per beat.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    left_poi_speed: f64,
    /// Left poi phase relative to the arm, in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    left_poi_phase: f64,
    /// Right arm speed in radians per beat.
    #[arg(long, allow_hyphen_values = true)]
    right_arm_speed: f64,
    /// Right arm phase in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    right_arm_phase: f64,
    /// Right poi speed relative to the arm, in radians per beat.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    right_poi_speed: f64,
    /// Right poi phase relative to the arm, in radians.
    #[arg(long, default_value_t = 0.0, allow_hyphen_values = true)]
    right_poi_phase: f64,
    /// Zero direction used when reporting the phase bucket.
    #[arg(long, value_enum, default_value_t = ReferenceArg::Right)]
    reference: ReferenceArg,
}

#[derive(Args)]
struct SampleArgs {
    #[command(flatten)]
    descriptor: DescriptorArgs,
    /// Length of the sampled loop in beats.
    #[arg(long, default_value_t = 4.0)]
    beats: f64,
    /// Sampling rate in samples per second.
    #[arg(long, default_value_t = 8.0)]
    hz: f64,
}

#[derive(Clone, Copy, ValueEnum)]
enum ElementArg {
    Earth,
    Air,
    Water,
    Fire,
}

impl From<ElementArg> for Element {
    fn from(value: ElementArg) -> Self {
        match value {
            ElementArg::Earth => Element::Earth,
            ElementArg::Air => Element::Air,
            ElementArg::Water => Element::Water,
            ElementArg::Fire => Element::Fire,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ReferenceArg {
    Right,
    Down,
    Left,
    Up,
}

impl From<ReferenceArg> for PhaseReference {
    fn from(value: ReferenceArg) -> Self {
        match value {
            ReferenceArg::Right => PhaseReference::Right,
            ReferenceArg::Down => PhaseReference::Down,
            ReferenceArg::Left => PhaseReference::Left,
            ReferenceArg::Up => PhaseReference::Up,
        }
    }
}

/// Entry point for the poi visualizer command-line interface.
fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        CliCommand::Generate(args) => run_generate(&args),
        CliCommand::Classify(args) => run_classify(&args),
        CliCommand::Sample(args) => run_sample(&args),
    }
}

fn run_generate(args: &DescriptorArgs) -> Result<()> {
    let state = generate_state(args)?;
    print_state(&state);
    Ok(())
}

fn run_classify(args: &StateArgs) -> Result<()> {
    let state = SpinnerState {
        left: HandOscillator {
            arm_speed: args.left_arm_speed,
            arm_phase: args.left_arm_phase,
            arm_radius: 1.0,
            poi_speed: args.left_poi_speed,
            poi_phase: args.left_poi_phase,
            poi_radius: 0.5,
        },
        right: HandOscillator {
            arm_speed: args.right_arm_speed,
            arm_phase: args.right_arm_phase,
            arm_radius: 1.0,
            poi_speed: args.right_poi_speed,
            poi_phase: args.right_poi_phase,
            poi_radius: 0.5,
        },
        bpm: 120.0,
    };

    match classify_descriptor(&state, args.reference.into()) {
        Ok(descriptor) => println!("{descriptor}"),
        Err(error) => println!("no named pattern: {error}"),
    }
    Ok(())
}

fn run_sample(args: &SampleArgs) -> Result<()> {
    let state = generate_state(&args.descriptor)?;
    let samples = sample_loop(&state, args.hz, args.beats, 0.0)?;

    println!("{:>8}  {:>24}  {:>24}", "beat", "left head", "right head");
    for sample in &samples {
        let left = sample.positions.hand(Hand::Left).head();
        let right = sample.positions.hand(Hand::Right).head();
        println!(
            "{:>8.3}  ({:>10.4}, {:>10.4})  ({:>10.4}, {:>10.4})",
            sample.t_beats, left.x, left.y, right.x, right.y
        );
    }
    Ok(())
}

fn generate_state(args: &DescriptorArgs) -> Result<SpinnerState> {
    let phase = QuarterPhase::from_degrees(args.phase_deg)
        .ok_or_else(|| anyhow!("--phase-deg must be one of 0, 90, 180, 270"))?;
    let descriptor = VtgDescriptor {
        arm_element: args.arm_element.into(),
        poi_element: args.poi_element.into(),
        phase,
        poi_cycles_per_arm_cycle: args.cycles,
    };

    let hand = HandOscillator {
        arm_speed: 0.0,
        arm_phase: 0.0,
        arm_radius: args.arm_radius,
        poi_speed: 0.0,
        poi_phase: 0.0,
        poi_radius: args.poi_radius,
    };
    let base = SpinnerState {
        left: hand,
        right: hand,
        bpm: args.bpm,
    };

    Ok(generate(&descriptor, &base, args.reference.into())?)
}

fn print_state(state: &SpinnerState) {
    for hand in Hand::BOTH {
        let osc = state.hand(hand);
        let label = match hand {
            Hand::Left => "left",
            Hand::Right => "right",
        };
        println!(
            "{label:>5}: arm {:+.4} rad/beat @ {:.4} rad, poi {:+.4} rad/beat @ {:.4} rad",
            osc.arm_speed, osc.arm_phase, osc.poi_speed, osc.poi_phase
        );
    }
    println!("tempo: {} bpm", state.bpm);
}
