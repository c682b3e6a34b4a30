mod analysers;
mod cli;
mod error;
mod fixtures;
mod json;
mod output;
mod render;
mod wav;

use std::process::ExitCode;

use clap::Parser;

use analysers::dropout::{DropoutAnalyser, ScanOutcome};
use cli::Cli;
use error::Result;
use output::{Output, fmt_sample, sample_to_time};
use wav::WavInput;

const ERR_CONTAINS_DROPOUTS: u8 = 0b0001;

fn scan(args: &Cli, analyser: &DropoutAnalyser, input: &WavInput) -> ScanOutcome {
    let num_windows = (input.mono.len() / analyser.window()) as u64;
    let digits = input.mono.len().to_string().len();
    let output = Output::new(args, num_windows);

    let outcome = analyser.analyse_with(&input.mono, |measure| {
        output.inc();
        if args.debug {
            println!(
                "[{}] DEBUG  : window {} @ {}: {}",
                fmt_sample(measure.end_offset, digits),
                measure.index,
                sample_to_time(measure.end_offset, input.sample_rate),
                measure.loudness
            );
        }
    });
    output.finish();
    outcome
}

fn run(args: &Cli) -> Result<u8> {
    let input_path = match &args.input {
        Some(path) => path.clone(),
        None => {
            let fixture = fixtures::pick(&args.fixtures, &mut rand::thread_rng());
            println!(
                "No input given, using the {} fixture: {}",
                if fixture.positive { "positive" } else { "negative" },
                fixture.path.display()
            );
            fixture.path
        }
    };

    let input = wav::read(&input_path)?;
    let analyser = DropoutAnalyser::new(args.window, args.threshold)?;

    println!("[+] file:        {}", input.filename);
    println!("[+] sample rate: {}", input.sample_rate);
    println!("[+] channels:    {}", input.channels);
    println!("[+] frames:      {}", input.n_frames());
    println!("[+] window:      {} samples", analyser.window());
    println!("[+] threshold:   {} dBFS", analyser.threshold());

    let outcome = scan(args, &analyser, &input);

    let digits = input.mono.len().to_string().len();
    for offence in &outcome.offences {
        println!(
            "[{}] DROPOUT: {} between samples {} -> {} @ {}",
            fmt_sample(offence.end_offset, digits),
            offence.loudness,
            offence.end_offset.saturating_sub(analyser.window()),
            offence.end_offset,
            sample_to_time(offence.end_offset, input.sample_rate)
        );
    }

    if let (Some(quietest), Some(loudest)) = (outcome.quietest, outcome.loudest) {
        println!("[+] loudness range: {quietest:.1} .. {loudest:.1} dBFS");
    }

    if let Some(path) = &args.json {
        json::write(path, &json::report(&analyser, &outcome, &input))?;
        println!("Wrote JSON report to {}", path.display());
    }

    if !outcome.analysis.contains_dropouts {
        println!("No dropouts were found in: {}", input.filename);
        return Ok(0);
    }

    println!(
        "The file contains dropouts between samples {} -> {}",
        outcome.analysis.problem_start, outcome.analysis.problem_end
    );

    if !args.no_render {
        let artifacts = render::render(
            &input,
            outcome.analysis.problem_start,
            outcome.analysis.problem_end,
            &args.out_dir,
        )?;
        println!("[+] wrote clip: {}", artifacts.clip.display());
        println!("[+] wrote plot: {}", artifacts.plot.display());
    }

    Ok(ERR_CONTAINS_DROPOUTS)
}

fn main() -> ExitCode {
    let args = Cli::parse();
    match run(&args) {
        Ok(code) => ExitCode::from(code),
        Err(err) => {
            println!("Error: {err}");
            ExitCode::from(2)
        }
    }
}
