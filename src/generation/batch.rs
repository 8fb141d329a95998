//! Batch generation over JSONL files.
//!
//! Flow:
//! Requests JSONL → ExamGenerator → one response per line → JSONL
//!
//! K_i: Output line N answers input request N. A request naming an unknown
//! module is answered with an error response instead of aborting the run.

use super::ExamGenerator;
use crate::catalog::ModuleCatalog;
use crate::models::{ExamgenError, GenerateRequest, GenerateResponse, Result};
use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Instant;
use tracing::{info, warn};

/// Counters for one batch run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Requests read from the input file
    pub total_requests: usize,

    /// Requests answered with an exam
    pub total_generated: usize,

    /// Requests answered with errors
    pub total_rejected: usize,

    /// Total runtime in seconds
    pub runtime_secs: f64,

    /// Share of requests that produced an exam (0.0 - 1.0)
    pub success_rate: f64,
}

impl BatchStats {
    /// Calculate derived stats.
    pub fn finalize(&mut self) {
        if self.total_requests > 0 {
            self.success_rate = self.total_generated as f64 / self.total_requests as f64;
        }
    }
}

/// Load generate requests from a JSONL file. Blank lines are skipped.
pub fn load_requests(path: &Path) -> Result<Vec<GenerateRequest>> {
    let file = File::open(path).map_err(|e| ExamgenError::io("opening requests file", e))?;
    let reader = BufReader::new(file);
    let mut requests = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| ExamgenError::io("reading requests file", e))?;
        if line.trim().is_empty() {
            continue;
        }
        let request: GenerateRequest = serde_json::from_str(&line)
            .map_err(|e| ExamgenError::ParseError(format!("Line {}: {}", line_num + 1, e)))?;
        requests.push(request);
    }

    info!(count = requests.len(), "Loaded requests");
    Ok(requests)
}

/// Runs many generate requests against one generator.
pub struct BatchRunner<'a, C: ModuleCatalog> {
    generator: &'a ExamGenerator<C>,
    show_progress: bool,
}

impl<'a, C: ModuleCatalog> BatchRunner<'a, C> {
    pub fn new(generator: &'a ExamGenerator<C>) -> Self {
        Self {
            generator,
            show_progress: true,
        }
    }

    /// Hide the progress bar (tests, piped output).
    pub fn quiet(mut self) -> Self {
        self.show_progress = false;
        self
    }

    /// Answer one request; client-side failures become error responses.
    pub fn answer(&self, request: GenerateRequest) -> Result<GenerateResponse> {
        match self.generator.generate(request) {
            Ok(response) => Ok(response),
            Err(e) if e.is_client_error() => Ok(GenerateResponse::Errors {
                errors: vec![e.to_string()],
            }),
            Err(e) => Err(e),
        }
    }

    /// Answer every request and write the responses as JSONL.
    pub fn run(&self, requests: Vec<GenerateRequest>, output_path: &Path) -> Result<BatchStats> {
        let start = Instant::now();
        let total = requests.len();

        info!(total_requests = total, "Starting batch generation");

        let pb = if self.show_progress {
            ProgressBar::new(total as u64)
        } else {
            ProgressBar::hidden()
        };
        let style = ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} ({percent}%) {msg}")
            .map_err(|e| ExamgenError::Internal(format!("Invalid progress template: {}", e)))?
            .progress_chars("##-");
        pb.set_style(style);

        let output_file =
            File::create(output_path).map_err(|e| ExamgenError::io("creating output file", e))?;
        let mut writer = BufWriter::new(output_file);

        let mut stats = BatchStats {
            total_requests: total,
            ..BatchStats::default()
        };

        for request in requests {
            let response = self.answer(request)?;
            if response.is_success() {
                stats.total_generated += 1;
            } else {
                stats.total_rejected += 1;
            }

            let json = serde_json::to_string(&response).map_err(|e| {
                ExamgenError::Internal(format!("Failed to serialize response: {}", e))
            })?;
            writeln!(writer, "{}", json).map_err(|e| ExamgenError::io("writing output", e))?;

            pb.inc(1);
            pb.set_message(format!(
                "generated: {}, rejected: {}",
                stats.total_generated, stats.total_rejected
            ));
        }

        writer
            .flush()
            .map_err(|e| ExamgenError::io("flushing output", e))?;
        pb.finish_with_message(format!(
            "Done! {} generated, {} rejected",
            stats.total_generated, stats.total_rejected
        ));

        stats.runtime_secs = start.elapsed().as_secs_f64();
        stats.finalize();

        if stats.total_rejected > 0 {
            warn!(count = stats.total_rejected, "Some requests were rejected");
        }
        info!(
            generated = stats.total_generated,
            rejected = stats.total_rejected,
            success_rate = format!("{:.1}%", stats.success_rate * 100.0),
            "Batch generation complete"
        );

        Ok(stats)
    }
}
