//! WAV file reading and writing.
//!
//! The chain runs mono or stereo only, so files with any other channel count
//! are rejected rather than mixed down.

use std::path::Path;

use anyhow::{Context, bail};
use hound::{SampleFormat, WavReader, WavWriter};

/// Deinterleaved audio with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioData {
    /// One buffer per channel, all the same length.
    pub channels: Vec<Vec<f32>>,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioData {
    /// Frames per channel.
    pub fn num_frames(&self) -> usize {
        self.channels.first().map_or(0, Vec::len)
    }

    /// Append `frames` of silence to every channel.
    pub fn pad(&mut self, frames: usize) {
        for ch in &mut self.channels {
            ch.resize(ch.len() + frames, 0.0);
        }
    }
}

/// Read a mono or stereo WAV file as f32.
pub fn read_wav(path: &Path) -> anyhow::Result<AudioData> {
    let reader =
        WavReader::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if !(1..=2).contains(&channels) {
        bail!(
            "{}: {} channels; only mono and stereo are supported",
            path.display(),
            channels
        );
    }

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max_val))
                .collect::<Result<Vec<_>, _>>()?
        }
    };

    let mut out = vec![Vec::with_capacity(interleaved.len() / channels); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (ch, &s) in out.iter_mut().zip(frame) {
            ch.push(s);
        }
    }

    Ok(AudioData {
        channels: out,
        sample_rate: spec.sample_rate,
    })
}

/// Write `audio` at `bits_per_sample` (16, 24 or 32; 32 is float).
pub fn write_wav(path: &Path, audio: &AudioData, bits_per_sample: u16) -> anyhow::Result<()> {
    if !matches!(bits_per_sample, 16 | 24 | 32) {
        bail!("unsupported bit depth {bits_per_sample}; use 16, 24 or 32");
    }
    let spec = hound::WavSpec {
        channels: audio.channels.len() as u16,
        sample_rate: audio.sample_rate,
        bits_per_sample,
        sample_format: if bits_per_sample == 32 {
            SampleFormat::Float
        } else {
            SampleFormat::Int
        },
    };
    let mut writer = WavWriter::create(path, spec)
        .with_context(|| format!("failed to create {}", path.display()))?;

    let max_val = ((1i64 << (bits_per_sample - 1)) - 1) as f32;
    for i in 0..audio.num_frames() {
        for ch in &audio.channels {
            let sample = ch[i];
            if bits_per_sample == 32 {
                writer.write_sample(sample)?;
            } else {
                writer.write_sample((sample.clamp(-1.0, 1.0) * max_val) as i32)?;
            }
        }
    }
    writer.finalize()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stereo() -> AudioData {
        AudioData {
            channels: vec![
                (0..100).map(|i| (i as f32 * 0.1).sin() * 0.5).collect(),
                (0..100).map(|i| (i as f32 * 0.2).cos() * 0.5).collect(),
            ],
            sample_rate: 44100,
        }
    }

    #[test]
    fn float_write_read_is_lossless() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("f.wav");
        let audio = stereo();
        write_wav(&path, &audio, 32).unwrap();
        assert_eq!(read_wav(&path).unwrap(), audio);
    }

    #[test]
    fn sixteen_bit_is_close() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("i.wav");
        let audio = stereo();
        write_wav(&path, &audio, 16).unwrap();
        let back = read_wav(&path).unwrap();
        assert_eq!(back.channels.len(), 2);
        for (a, b) in audio.channels[1].iter().zip(&back.channels[1]) {
            assert!((a - b).abs() < 1e-3);
        }
    }

    #[test]
    fn rejects_multichannel() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("quad.wav");
        let spec = hound::WavSpec {
            channels: 4,
            sample_rate: 48000,
            bits_per_sample: 16,
            sample_format: SampleFormat::Int,
        };
        let mut w = WavWriter::create(&path, spec).unwrap();
        for _ in 0..16 {
            w.write_sample(0i16).unwrap();
        }
        w.finalize().unwrap();
        let err = read_wav(&path).unwrap_err().to_string();
        assert!(err.contains("4 channels"), "{err}");
    }

    #[test]
    fn pad_extends_all_channels() {
        let mut audio = stereo();
        audio.pad(10);
        assert_eq!(audio.num_frames(), 110);
        assert_eq!(audio.channels[1].len(), 110);
    }

    #[test]
    fn bad_bit_depth() {
        let dir = tempfile::tempdir().unwrap();
        assert!(write_wav(&dir.path().join("x.wav"), &stereo(), 12).is_err());
    }
}
