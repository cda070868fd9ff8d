//! Optional reporting of finished syntheses.
//!
//! Nothing is recorded unless the caller passes a sink.

use std::io::{self, Write};

use serde::{Deserialize, Serialize};

use crate::config::QualityTier;
use crate::mapper::RenderParameters;
use crate::profile::SeedSource;

/// Summary of one synthesis call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthesisReport {
    pub seed: f64,
    pub seed_source: SeedSource,
    pub size: u32,
    pub tier: QualityTier,
    pub parameters: RenderParameters,
    /// Names of the drawn layers, in order.
    pub layers: Vec<String>,
    /// BLAKE3 hash of the PNG, hex encoded.
    pub png_hash: String,
    pub png_len: usize,
}

/// Receives a report after every synthesis.
pub trait TelemetrySink {
    fn record(&mut self, report: &SynthesisReport) -> io::Result<()>;
}

/// Writes each report as one line of JSON.
#[derive(Debug)]
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> TelemetrySink for JsonLinesSink<W> {
    fn record(&mut self, report: &SynthesisReport) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, report)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()
    }
}

/// Keeps reports in memory.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub reports: Vec<SynthesisReport>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TelemetrySink for MemorySink {
    fn record(&mut self, report: &SynthesisReport) -> io::Result<()> {
        self.reports.push(report.clone());
        Ok(())
    }
}
