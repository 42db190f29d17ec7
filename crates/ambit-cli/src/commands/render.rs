//! File rendering through the chain.

use std::path::PathBuf;

use ambit_core::{AudioBlock, linear_to_db};
use ambit_engine::{Engine, EngineConfig};
use anyhow::Context;
use clap::Args;

use super::parse_key_val;
use crate::wav::{AudioData, read_wav, write_wav};

#[derive(Args)]
pub struct RenderArgs {
    /// Input WAV file (mono or stereo)
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Engine config (TOML) with parameter overrides
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Parameter override applied after the config (e.g. "CUTOFF=1kHz")
    #[arg(short, long, value_parser = parse_key_val, number_of_values = 1)]
    param: Vec<(String, String)>,

    /// Processing block size (defaults to the config's)
    #[arg(long)]
    block_size: Option<usize>,

    /// Seconds of silence appended so reverb tails ring out
    #[arg(long, default_value = "0")]
    tail: f32,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,
}

pub fn run(args: RenderArgs) -> anyhow::Result<()> {
    let mut audio = read_wav(&args.input)?;
    tracing::info!(
        path = %args.input.display(),
        channels = audio.channels.len(),
        sample_rate = audio.sample_rate,
        frames = audio.num_frames(),
        "input loaded"
    );

    let mut config = match &args.config {
        Some(path) => EngineConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => EngineConfig::default(),
    };
    // The file decides the stream format.
    config.sample_rate = audio.sample_rate;
    config.channels = audio.channels.len();
    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }

    let mut engine = Engine::from_config(&config)?;
    for (key, value) in &args.param {
        let stored = engine
            .set_by_key(key, value)
            .with_context(|| format!("--param {key}={value}"))?;
        tracing::debug!(key, value, stored, "override");
    }

    if args.tail > 0.0 {
        audio.pad((args.tail * audio.sample_rate as f32) as usize);
    }

    let input_level = Levels::measure(&audio);
    render(&mut engine, &mut audio, config.block_size);
    let output_level = Levels::measure(&audio);

    println!(
        "Input:  RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(input_level.rms),
        linear_to_db(input_level.peak)
    );
    println!(
        "Output: RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(output_level.rms),
        linear_to_db(output_level.peak)
    );

    write_wav(&args.output, &audio, args.bit_depth)?;
    tracing::info!(path = %args.output.display(), "output written");
    Ok(())
}

/// Run every channel of `audio` through `engine` in place, `block_size` frames at a time.
pub fn render(engine: &mut Engine, audio: &mut AudioData, block_size: usize) {
    match audio.channels.as_mut_slice() {
        [mono] => {
            for chunk in mono.chunks_mut(block_size) {
                engine.process(&mut AudioBlock::mono(chunk));
            }
        }
        [left, right] => {
            for (l, r) in left.chunks_mut(block_size).zip(right.chunks_mut(block_size)) {
                engine.process(&mut AudioBlock::stereo(l, r));
            }
        }
        _ => unreachable!("read_wav only yields mono or stereo"),
    }
}

struct Levels {
    rms: f32,
    peak: f32,
}

impl Levels {
    fn measure(audio: &AudioData) -> Self {
        let samples = audio.channels.iter().flatten();
        let count = audio.channels.iter().map(Vec::len).sum::<usize>().max(1);
        let sum_sq: f32 = samples.clone().map(|s| s * s).sum();
        Self {
            rms: (sum_sq / count as f32).sqrt(),
            peak: samples.map(|s| s.abs()).fold(0.0, f32::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ambit_engine::Param;

    #[test]
    fn render_bypassed_chain_is_transparent() {
        let mut engine = Engine::new();
        engine.prepare(48000.0, 64, 2).unwrap();
        engine.set(Param::ReverbBypass, 1.0);
        let mut audio = AudioData {
            channels: vec![
                (0..300).map(|i| (i as f32 * 0.05).sin()).collect(),
                (0..300).map(|i| (i as f32 * 0.07).sin()).collect(),
            ],
            sample_rate: 48000,
        };
        let original = audio.clone();
        render(&mut engine, &mut audio, 64);
        assert_eq!(audio, original);
    }

    #[test]
    fn render_mono_reverb_adds_tail() {
        let mut engine = Engine::new();
        engine.prepare(48000.0, 128, 1).unwrap();
        let mut audio = AudioData {
            channels: vec![vec![0.0; 4800]],
            sample_rate: 48000,
        };
        audio.channels[0][0] = 1.0;
        render(&mut engine, &mut audio, 128);
        assert!(audio.channels[0][2000..].iter().any(|s| s.abs() > 1e-6));
    }

    #[test]
    fn levels() {
        let audio = AudioData {
            channels: vec![vec![0.5, -0.5], vec![1.0, -1.0]],
            sample_rate: 48000,
        };
        let l = Levels::measure(&audio);
        assert_eq!(l.peak, 1.0);
        assert!((l.rms - (0.625f32).sqrt()).abs() < 1e-6);
    }
}
