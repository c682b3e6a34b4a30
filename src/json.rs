use std::path::Path;

use serde::Serialize;
use serde_json::{Value, json, to_string_pretty};

use crate::analysers::dropout::{DropoutAnalyser, ScanOutcome};
use crate::error::Result;
use crate::output::sample_to_time;
use crate::wav::WavInput;

#[derive(Serialize)]
struct OffenceRecord {
    #[serde(rename = "endSample")]
    end_sample: usize,
    time: String,
    /// dBFS, or null for a zero-energy window.
    loudness: Option<f64>,
}

pub fn report(analyser: &DropoutAnalyser, outcome: &ScanOutcome, input: &WavInput) -> Value {
    let offences: Vec<OffenceRecord> = outcome
        .offences
        .iter()
        .map(|o| OffenceRecord {
            end_sample: o.end_offset,
            time: sample_to_time(o.end_offset, input.sample_rate),
            loudness: o.loudness.db(),
        })
        .collect();

    json!({
        "dropouts": {
            "containsDropouts": outcome.analysis.contains_dropouts,
            "problemStart": outcome.analysis.problem_start,
            "problemEnd": outcome.analysis.problem_end,
            "window": analyser.window(),
            "threshold": analyser.threshold(),
            "offences": offences,
            "quietest": outcome.quietest,
            "loudest": outcome.loudest,
        },
        "file": {
            "name": input.filename,
            "sampleRate": input.sample_rate,
            "channels": input.channels,
            "frames": input.n_frames(),
        },
    })
}

pub fn write(path: &Path, value: &Value) -> Result<()> {
    std::fs::write(path, to_string_pretty(value).unwrap())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> WavInput {
        WavInput {
            sample_rate: 48_000,
            channels: 2,
            interleaved: vec![0; 8],
            mono: vec![0.0; 4],
            filename: "clip.wav".to_string(),
        }
    }

    #[test]
    fn report_lists_offences_with_null_for_undefined_loudness() {
        let analyser = DropoutAnalyser::new(2, 10.0).unwrap();
        let outcome = analyser.analyse(&[0.0, 0.0, 0.0, 0.0]);
        let value = report(&analyser, &outcome, &input());

        let dropouts = &value["dropouts"];
        assert_eq!(dropouts["containsDropouts"], true);
        assert_eq!(dropouts["window"], 2);
        assert_eq!(dropouts["offences"][0]["endSample"], 2);
        assert!(dropouts["offences"][0]["loudness"].is_null());
        assert_eq!(value["file"]["name"], "clip.wav");
    }

    #[test]
    fn clean_scan_reports_full_span() {
        let analyser = DropoutAnalyser::new(2, 10.0).unwrap();
        let outcome = analyser.analyse(&[100.0, 100.0, 100.0, 100.0]);
        let value = report(&analyser, &outcome, &input());
        assert_eq!(value["dropouts"]["containsDropouts"], false);
        assert_eq!(value["dropouts"]["problemStart"], 0);
        assert_eq!(value["dropouts"]["problemEnd"], 4);
    }

    #[test]
    fn written_report_parses_back() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let analyser = DropoutAnalyser::new(2, 10.0).unwrap();
        let outcome = analyser.analyse(&[100.0, 100.0]);
        write(&path, &report(&analyser, &outcome, &input())).unwrap();

        let parsed: Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["dropouts"]["threshold"], 10.0);
    }
}
