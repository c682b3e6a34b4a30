use std::fmt;

/// Loudness of one analysis window, in dBFS.
///
/// `Undefined` marks a window whose level has no logarithm: an empty window,
/// or one with zero energy. It is a classification state, not an error.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Loudness {
    Db(f64),
    Undefined,
}

impl Loudness {
    pub fn db(self) -> Option<f64> {
        match self {
            Loudness::Db(v) => Some(v),
            Loudness::Undefined => None,
        }
    }

    pub fn is_undefined(self) -> bool {
        matches!(self, Loudness::Undefined)
    }
}

impl fmt::Display for Loudness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Loudness::Db(v) => write!(f, "{v:.1} dBFS"),
            Loudness::Undefined => write!(f, "undefined"),
        }
    }
}

/// Windowed RMS level in dBFS, rounded to one decimal place.
///
/// The rounded value is also what the analyser thresholds against, so a
/// printed level always matches the decision made on it.
pub fn estimate(window: &[f64]) -> Loudness {
    if window.is_empty() {
        return Loudness::Undefined;
    }

    let mean_square = window.iter().map(|s| s * s).sum::<f64>() / window.len() as f64;
    let rms = mean_square.sqrt();
    if rms == 0.0 {
        return Loudness::Undefined;
    }

    Loudness::Db(round_db(20.0 * rms.log10()))
}

fn round_db(db: f64) -> f64 {
    (db * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn constant_amplitude_is_plain_dbfs() {
        // RMS of a constant signal is its amplitude.
        for amp in [0.5_f64, 1.0, 2.0, 3000.0] {
            let window = vec![amp; 64];
            let expected = (20.0 * amp.log10() * 10.0).round() / 10.0;
            match estimate(&window) {
                Loudness::Db(db) => assert_abs_diff_eq!(db, expected),
                Loudness::Undefined => panic!("loudness of {amp} was undefined"),
            }
        }
    }

    #[test]
    fn result_is_rounded_to_one_decimal() {
        // RMS of [3, 4] is sqrt(12.5), which is 10.9691... dBFS.
        assert_eq!(estimate(&[3.0, 4.0]), Loudness::Db(11.0));
    }

    #[test]
    fn sign_does_not_matter() {
        assert_eq!(estimate(&[-2.0, 2.0, -2.0, 2.0]), Loudness::Db(6.0));
    }

    #[test]
    fn zero_energy_window_is_undefined() {
        assert!(estimate(&[0.0; 256]).is_undefined());
    }

    #[test]
    fn empty_window_is_undefined() {
        assert!(estimate(&[]).is_undefined());
    }
}
