//! Property-based tests for ambit-core primitives.
//!
//! Filter stability, delay line integrity and descriptor quantization.

use ambit_core::{
    AllpassFilter, CombFilter, Effect, InterpolatedDelay, ParamDescriptor, ParamUnit,
    StateVariableFilter, SvfOutput,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    /// Any cutoff in the audible range and any output mode stays finite.
    #[test]
    fn svf_stability(
        freq in 20.0f32..20000.0f32,
        q in 0.5f32..10.0f32,
        output_mode in 0usize..4,
        input in prop::array::uniform32(-1.0f32..=1.0f32),
    ) {
        let mut svf = StateVariableFilter::new(48000.0);
        svf.set_cutoff(freq);
        svf.set_resonance(q);
        let mode = match output_mode {
            0 => SvfOutput::Lowpass,
            1 => SvfOutput::Highpass,
            2 => SvfOutput::Bandpass,
            _ => SvfOutput::Notch,
        };
        svf.set_output_type(mode);

        for _ in 0..32 {
            for &sample in &input {
                let out = svf.process(sample);
                prop_assert!(out.is_finite(), "SVF {:?} at {} Hz produced {}", mode, freq, out);
            }
        }
    }

    /// A written sample comes back after exactly `d` further writes.
    #[test]
    fn delay_integer_reads(d in 0usize..63, value in -1.0f32..1.0f32) {
        let mut delay = InterpolatedDelay::new(64);
        delay.write(value);
        for _ in 0..d {
            delay.write(0.0);
        }
        prop_assert_eq!(delay.read(d as f32), value);
    }

    /// Comb and allpass stay bounded for any sub-unity feedback.
    #[test]
    fn reverb_primitives_bounded(
        feedback in 0.0f32..0.98f32,
        damp in 0.0f32..1.0f32,
        len in 10usize..400,
    ) {
        let mut comb = CombFilter::new(len);
        comb.set_feedback(feedback);
        comb.set_damp(damp);
        let mut ap = AllpassFilter::new(len / 2 + 1);
        for i in 0..4000 {
            let x = if i % 97 == 0 { 1.0 } else { 0.0 };
            let y = ap.process(comb.process(x));
            prop_assert!(y.is_finite() && y.abs() < 1000.0, "blew up: {}", y);
        }
    }

    /// Quantized values land in range and on the step grid.
    #[test]
    fn quantize_lands_on_grid(value in -1000.0f32..1000.0f32) {
        let d = ParamDescriptor::float("Centre Delay", "Delay", ParamUnit::Milliseconds, 1.0, 100.0, 10.0)
            .with_step(0.1);
        let q = d.quantize(value);
        prop_assert!((1.0..=100.0).contains(&q));
        let steps = (q - 1.0) / 0.1;
        prop_assert!((steps - steps.round()).abs() < 1e-2, "{} is off-grid", q);
    }
}
