use super::loudness::{self, Loudness};
use crate::error::{DropscanError, Result};

pub const DEFAULT_WINDOW: usize = 256;
pub const DEFAULT_THRESHOLD: f64 = 10.0;

/// The reportable outcome of one scan.
///
/// When no window offended, the span defaults to the whole sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Analysis {
    pub contains_dropouts: bool,
    pub problem_start: usize,
    pub problem_end: usize,
}

/// One window whose level fell below the threshold, or had no level at all.
/// `end_offset` is the index one past the window's last sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offence {
    pub end_offset: usize,
    pub loudness: Loudness,
}

/// Per-window measurement handed to the scan observer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowMeasure {
    pub index: usize,
    pub end_offset: usize,
    pub loudness: Loudness,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub analysis: Analysis,
    pub offences: Vec<Offence>,
    /// Quietest and loudest defined window levels, for reporting.
    pub quietest: Option<f64>,
    pub loudest: Option<f64>,
    pub windows_scanned: usize,
}

/// Steps a fixed-size window across a sample sequence and flags windows
/// whose RMS level falls below the threshold.
#[derive(Debug, Clone, Copy)]
pub struct DropoutAnalyser {
    window: usize,
    threshold: f64,
}

impl DropoutAnalyser {
    pub fn new(window: usize, threshold: f64) -> Result<Self> {
        if window == 0 {
            return Err(DropscanError::InvalidWindow);
        }
        Ok(Self { window, threshold })
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn analyse(&self, samples: &[f64]) -> ScanOutcome {
        self.analyse_with(samples, |_| {})
    }

    /// Scan with a per-window observer (progress ticks, debug prints).
    ///
    /// Only full windows are measured; a short trailing remainder is left
    /// unscanned. The scan ends early at the first window containing a
    /// non-finite sample (filler past the end of real audio) and at the
    /// first window with undefined loudness. An undefined window mid-file
    /// is total signal loss, below any threshold, so it is recorded as an
    /// offence before the scan stops there.
    pub fn analyse_with(
        &self,
        samples: &[f64],
        mut observe: impl FnMut(&WindowMeasure),
    ) -> ScanOutcome {
        let mut offences: Vec<Offence> = Vec::new();
        let mut quietest: Option<f64> = None;
        let mut loudest: Option<f64> = None;
        let mut windows_scanned = 0;

        let mut offset = 0;
        let mut index = 0;
        while offset + self.window <= samples.len() {
            let chunk = &samples[offset..offset + self.window];
            offset += self.window;

            if !chunk.iter().all(|s| s.is_finite()) {
                break;
            }

            let loudness = loudness::estimate(chunk);
            observe(&WindowMeasure {
                index,
                end_offset: offset,
                loudness,
            });
            windows_scanned += 1;
            index += 1;

            match loudness {
                Loudness::Db(db) => {
                    quietest = Some(quietest.map_or(db, |q: f64| q.min(db)));
                    loudest = Some(loudest.map_or(db, |l: f64| l.max(db)));
                    if db < self.threshold {
                        offences.push(Offence {
                            end_offset: offset,
                            loudness,
                        });
                    }
                }
                Loudness::Undefined => {
                    offences.push(Offence {
                        end_offset: offset,
                        loudness,
                    });
                    break;
                }
            }
        }

        // Offences arrive in scan order, so the span is just first..last.
        let analysis = match (offences.first(), offences.last()) {
            (Some(first), Some(last)) => Analysis {
                contains_dropouts: true,
                problem_start: first.end_offset,
                problem_end: last.end_offset,
            },
            _ => Analysis {
                contains_dropouts: false,
                problem_start: 0,
                problem_end: samples.len(),
            },
        };

        ScanOutcome {
            analysis,
            offences,
            quietest,
            loudest,
            windows_scanned,
        }
    }
}
