use std::path::Path;

use wavers::Wav;

use crate::error::{DropscanError, Result};

/// One decoded input file: raw interleaved samples for rendering, plus the
/// mono-collapsed sequence the analyser runs on.
#[derive(Debug, Clone)]
pub struct WavInput {
    pub sample_rate: i32,
    pub channels: u16,
    pub interleaved: Vec<i16>,
    pub mono: Vec<f64>,
    pub filename: String,
}

impl WavInput {
    pub fn n_frames(&self) -> usize {
        self.mono.len()
    }
}

/// Decode a wav file at its native integer scale.
///
/// Levels are thresholded on raw PCM magnitudes, so samples are not
/// normalized to [-1, 1] here.
pub fn read(path: &Path) -> Result<WavInput> {
    if !path.is_file() {
        return Err(DropscanError::InputNotFound {
            path: path.to_path_buf(),
        });
    }

    let decode = |reason: String| DropscanError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let mut wav: Wav<i16> = Wav::from_path(path).map_err(|e| decode(format!("{e:?}")))?;
    let (_, spec) = wav.wav_spec();
    let sample_rate = spec.fmt_chunk.sample_rate;
    let channels = wav.n_channels();
    let samples = wav.read().map_err(|e| decode(format!("{e:?}")))?;

    let interleaved = samples.to_vec();
    let mono = collapse_mono(&interleaved, channels);

    let filename = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    Ok(WavInput {
        sample_rate,
        channels,
        interleaved,
        mono,
        filename,
    })
}

/// Average every frame's channels into one sample.
pub fn collapse_mono(interleaved: &[i16], channels: u16) -> Vec<f64> {
    let channels = usize::from(channels.max(1));
    interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().map(|s| f64::from(*s)).sum::<f64>() / channels as f64)
        .collect()
}
