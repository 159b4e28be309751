//! Audio file decoding
//!
//! [`ClipDecoder`] is the seam between session loading and container parsing.
//! [`WavDecoder`] implements it with hound and converts every supported PCM
//! layout to interleaved `f32`.

use crate::{Result, WavSwitchError};
use std::path::Path;

/// Raw result of decoding one audio file.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedClip {
    /// Interleaved samples, `frames * channels` long
    pub samples: Vec<f32>,
    /// Number of interleaved channels
    pub channels: u16,
    /// Sample rate in Hz
    pub sample_rate: u32,
}

impl DecodedClip {
    /// Number of frames in the clip.
    pub fn frames(&self) -> usize {
        if self.channels == 0 {
            0
        } else {
            self.samples.len() / self.channels as usize
        }
    }
}

/// Turns a file path into decoded samples.
pub trait ClipDecoder {
    /// Decode the whole file at `path`.
    fn decode(&self, path: &Path) -> Result<DecodedClip>;
}

/// WAV decoder backed by hound.
#[derive(Debug, Clone, Copy, Default)]
pub struct WavDecoder;

impl ClipDecoder for WavDecoder {
    fn decode(&self, path: &Path) -> Result<DecodedClip> {
        let load_err = |reason: String| WavSwitchError::Load {
            path: path.to_path_buf(),
            reason,
        };

        let mut reader = hound::WavReader::open(path).map_err(|e| load_err(e.to_string()))?;
        let spec = reader.spec();
        let expected = reader.duration() as usize * spec.channels as usize;

        log::debug!(
            "{}: {:?} {}-bit, {} ch @ {} Hz, {} frames",
            path.display(),
            spec.sample_format,
            spec.bits_per_sample,
            spec.channels,
            spec.sample_rate,
            reader.duration()
        );

        let mut samples = Vec::new();
        samples
            .try_reserve_exact(expected)
            .map_err(|_| WavSwitchError::Resource {
                path: path.to_path_buf(),
                samples: expected,
            })?;

        match spec.sample_format {
            hound::SampleFormat::Float => {
                for sample in reader.samples::<f32>() {
                    samples.push(sample.map_err(|e| load_err(e.to_string()))?);
                }
            }
            hound::SampleFormat::Int => {
                let scale = int_scale(spec.bits_per_sample);
                for sample in reader.samples::<i32>() {
                    let value = sample.map_err(|e| load_err(e.to_string()))?;
                    samples.push(value as f32 * scale);
                }
            }
        }

        if samples.len() != expected {
            return Err(load_err(format!(
                "incorrect frame size: read {} of {} samples",
                samples.len(),
                expected
            )));
        }

        Ok(DecodedClip {
            samples,
            channels: spec.channels,
            sample_rate: spec.sample_rate,
        })
    }
}

/// Factor mapping a signed integer sample of `bits` width into `[-1.0, 1.0)`.
fn int_scale(bits: u16) -> f32 {
    1.0 / (1u64 << (bits.clamp(1, 32) - 1)) as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use tempfile::TempDir;

    fn write_wav<S: hound::Sample + Copy>(
        dir: &TempDir,
        name: &str,
        spec: hound::WavSpec,
        samples: &[S],
    ) -> std::path::PathBuf {
        let path = dir.path().join(name);
        let mut writer = hound::WavWriter::create(&path, spec).expect("create wav");
        for &s in samples {
            writer.write_sample(s).expect("write sample");
        }
        writer.finalize().expect("finalize wav");
        path
    }

    #[test]
    fn test_decode_float_stereo() {
        let dir = TempDir::new().unwrap();
        let spec = hound::WavSpec {
            channels: 2,
            sample_rate: 48000,
            bits_per_sample: 32,
            sample_format: hound::SampleFormat::Float,
        };
        let path = write_wav(&dir, "stereo.wav", spec, &[0.5f32, -0.5, 0.25, -0.25]);

        let clip = WavDecoder.decode(&path).unwrap();
        assert_eq!(clip.channels, 2);
        assert_eq!(clip.sample_rate, 48000);
        assert_eq!(clip.frames(), 2);
        assert_eq!(clip.samples, vec![0.5, -0.5, 0.25, -0.25]);
    }

    #[test]
    fn test_decode_int16_is_scaled() {
        let dir = TempDir::new().unwrap();
        let spec = hound::WavSpec {
            channels: 1,
            sample_rate: 44100,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let path = write_wav(&dir, "pcm16.wav", spec, &[0i16, 16384, -32768]);

        let clip = WavDecoder.decode(&path).unwrap();
        assert_eq!(clip.samples.len(), 3);
        assert_relative_eq!(clip.samples[0], 0.0);
        assert_relative_eq!(clip.samples[1], 0.5);
        assert_relative_eq!(clip.samples[2], -1.0);
    }

    #[test]
    fn test_decode_missing_file_is_load_error() {
        let dir = TempDir::new().unwrap();
        let err = WavDecoder.decode(&dir.path().join("nope.wav")).unwrap_err();
        assert!(matches!(err, WavSwitchError::Load { .. }), "{err}");
    }

    #[test]
    fn test_decode_garbage_is_load_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("junk.wav");
        std::fs::write(&path, b"definitely not a RIFF file").unwrap();

        let err = WavDecoder.decode(&path).unwrap_err();
        assert!(matches!(err, WavSwitchError::Load { .. }), "{err}");
    }

    #[test]
    fn test_int_scale() {
        assert_relative_eq!(int_scale(8), 1.0 / 128.0);
        assert_relative_eq!(int_scale(16), 1.0 / 32768.0);
        assert_relative_eq!(int_scale(24), 1.0 / 8_388_608.0);
    }
}
