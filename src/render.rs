use std::path::{Path, PathBuf};

use plotters::prelude::*;
use rustfft::{FftPlanner, num_complex::Complex};

use crate::error::{DropscanError, Result};
use crate::wav::WavInput;

/// Samples of context shown either side of the problem span in the plots.
pub const PLOT_PAD: usize = 1_000;
/// Samples of context kept either side of the span in the extracted clip.
pub const CLIP_PAD: usize = 48_000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub clip: PathBuf,
    pub plot: PathBuf,
}

/// Render review artifacts for a detected problem span.
///
/// `start` and `end` are frame offsets from the analysis; the padded slice
/// bounds are clamped here, the analyser never adjusts them. The extracted
/// clip keeps the input's own channel layout and sample rate.
pub fn render(input: &WavInput, start: usize, end: usize, out_dir: &Path) -> Result<Artifacts> {
    std::fs::create_dir_all(out_dir)?;

    let n_frames = input.n_frames();
    let (clip_start, clip_end) = clamped_range(start, end, CLIP_PAD, n_frames);
    let (plot_start, plot_end) = clamped_range(start, end, PLOT_PAD, n_frames);

    let clip = out_dir.join(format!("{}_artifact.wav", input.filename));
    let channels = usize::from(input.channels.max(1));
    let clip_frames = &input.interleaved[clip_start * channels..clip_end * channels];
    wavers::write(&clip, clip_frames, input.sample_rate, input.channels)
        .map_err(|e| DropscanError::Render {
            reason: format!("{e:?}"),
        })?;

    let plot = out_dir.join(format!("{}_artifact.png", input.filename));
    let slice = &input.mono[plot_start..plot_end];
    draw_plot(&plot, slice, &magnitude_spectrum(slice), start, end)?;

    Ok(Artifacts { clip, plot })
}

/// Pad a span by `pad` on both sides, clamped to `[0, len)`.
pub fn clamped_range(start: usize, end: usize, pad: usize, len: usize) -> (usize, usize) {
    (start.saturating_sub(pad), end.saturating_add(pad).min(len))
}

/// Half-spectrum magnitudes of the plotted slice.
fn magnitude_spectrum(slice: &[f64]) -> Vec<f64> {
    if slice.is_empty() {
        return Vec::new();
    }

    let mut buf: Vec<Complex<f64>> = slice.iter().map(|s| Complex::new(*s, 0.0)).collect();
    FftPlanner::new().plan_fft_forward(buf.len()).process(&mut buf);
    buf.iter()
        .take(slice.len() / 2 + 1)
        .map(|c| c.norm())
        .collect()
}

fn draw_plot(path: &Path, slice: &[f64], spectrum: &[f64], start: usize, end: usize) -> Result<()> {
    let draw = |reason: String| DropscanError::Render { reason };

    let root = BitMapBackend::new(path, (800, 600)).into_drawing_area();
    root.fill(&WHITE).map_err(|e| draw(e.to_string()))?;
    let (upper, lower) = root.split_vertically(400);

    let amp = slice.iter().fold(1.0_f64, |m, s| m.max(s.abs()));
    let mut waveform = ChartBuilder::on(&upper)
        .caption(
            format!("Time domain: samples {start} -> {end}"),
            ("sans-serif", 18),
        )
        .margin(10)
        .x_label_area_size(24)
        .y_label_area_size(48)
        .build_cartesian_2d(0..slice.len().max(1), -amp..amp)
        .map_err(|e| draw(e.to_string()))?;
    waveform
        .configure_mesh()
        .draw()
        .map_err(|e| draw(e.to_string()))?;
    waveform
        .draw_series(LineSeries::new(
            slice.iter().enumerate().map(|(i, s)| (i, *s)),
            &BLUE,
        ))
        .map_err(|e| draw(e.to_string()))?;

    let peak = spectrum.iter().fold(1.0_f64, |m, s| m.max(*s));
    let mut freq = ChartBuilder::on(&lower)
        .caption("Frequency domain", ("sans-serif", 18))
        .margin(10)
        .x_label_area_size(24)
        .y_label_area_size(48)
        .build_cartesian_2d(0..spectrum.len().max(1), 0.0..peak)
        .map_err(|e| draw(e.to_string()))?;
    freq.configure_mesh()
        .draw()
        .map_err(|e| draw(e.to_string()))?;
    freq.draw_series(LineSeries::new(
        spectrum.iter().enumerate().map(|(i, s)| (i, *s)),
        &RED,
    ))
    .map_err(|e| draw(e.to_string()))?;

    root.present().map_err(|e| draw(e.to_string()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wav::collapse_mono;

    #[test]
    fn padded_ranges_clamp_to_the_sequence() {
        assert_eq!(clamped_range(500, 700, 1_000, 10_000), (0, 1_700));
        assert_eq!(clamped_range(9_500, 9_900, 1_000, 10_000), (8_500, 10_000));
        assert_eq!(clamped_range(5_000, 5_064, 1_000, 10_000), (4_000, 6_064));
    }

    #[test]
    fn spectrum_has_half_plus_one_bins() {
        assert_eq!(magnitude_spectrum(&vec![1.0; 64]).len(), 33);
    }

    #[test]
    fn dc_signal_concentrates_in_the_first_bin() {
        let spectrum = magnitude_spectrum(&vec![1.0; 64]);
        assert!(spectrum[0] > 63.9);
        assert!(spectrum[1..].iter().all(|m| *m < 1e-9));
    }

    #[test]
    fn render_writes_clip_and_plot() {
        let dir = tempfile::tempdir().unwrap();
        let interleaved: Vec<i16> = (0..4_000)
            .map(|i| if i % 2 == 0 { 1_000 } else { -1_000 })
            .collect();
        let mono = collapse_mono(&interleaved, 2);
        let input = WavInput {
            sample_rate: 48_000,
            channels: 2,
            interleaved,
            mono,
            filename: "gap.wav".to_string(),
        };

        let artifacts = render(&input, 800, 900, dir.path()).unwrap();
        assert!(artifacts.clip.is_file());
        assert!(artifacts.plot.is_file());
        assert_eq!(artifacts.clip.file_name().unwrap(), "gap.wav_artifact.wav");
        assert_eq!(artifacts.plot.file_name().unwrap(), "gap.wav_artifact.png");
    }
}
