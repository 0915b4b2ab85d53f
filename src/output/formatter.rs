//! Output formatters for test results
//!
//! Provides the pass/fail table, JSON and one-line summary formats.

use std::io::IsTerminal;

use crate::models::{ResultsReport, TestCase, TestResult};

/// Output format options
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Json,
    Summary,
}

impl OutputFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "table" => Some(OutputFormat::Table),
            "json" | "json-pretty" => Some(OutputFormat::Json),
            "summary" => Some(OutputFormat::Summary),
            _ => None,
        }
    }
}

/// Result formatter
#[derive(Clone, Debug)]
pub struct ResultFormatter {
    format: OutputFormat,
    colorize: bool,
}

impl ResultFormatter {
    /// Colour is on only when stdout is a terminal
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            colorize: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_color(mut self, enabled: bool) -> Self {
        self.colorize = enabled;
        self
    }

    pub fn no_color(self) -> Self {
        self.with_color(false)
    }

    /// Format a single check outcome
    pub fn format_result(&self, case: TestCase, result: &TestResult) -> String {
        let status_str = match (self.colorize, result.success) {
            (true, true) => "\x1b[32m✅ PASS\x1b[0m",
            (true, false) => "\x1b[31m❌ FAIL\x1b[0m",
            (false, true) => "✅ PASS",
            (false, false) => "❌ FAIL",
        };

        format!("   {}: {}", case.name(), status_str)
    }

    /// Format the report for a whole run
    pub fn format_report(&self, report: &ResultsReport) -> String {
        match self.format {
            OutputFormat::Table => self.format_report_table(report),
            OutputFormat::Json => serde_json::to_string_pretty(report).unwrap_or_default(),
            OutputFormat::Summary => self.format_report_brief(report),
        }
    }

    fn format_report_table(&self, report: &ResultsReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(&"=".repeat(50));
        output.push_str("\n📋 Test Summary:\n");

        if report.tests.is_empty() {
            output.push_str("   (no checks run)\n");
        }
        for (case, result) in report.tests.iter() {
            output.push_str(&self.format_result(*case, result));
            output.push('\n');
        }

        output.push_str(&format!(
            "\n🎯 Overall: {}/{} tests passed",
            report.passed(),
            report.total()
        ));

        output
    }

    fn format_report_brief(&self, report: &ResultsReport) -> String {
        format!(
            "{}: {}/{} passed, {} failed ({:.1}%) at {}",
            report.base_url,
            report.passed(),
            report.total(),
            report.failed(),
            report.pass_rate(),
            report.timestamp
        )
    }
}
