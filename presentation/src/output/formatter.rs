//! Output formatter trait

use avalon_domain::{GameReport, OutputFormat};

/// Trait for formatting game reports
pub trait OutputFormatter {
    /// Every round, with roles revealed
    fn format(&self, report: &GameReport) -> String;

    /// Format as JSON
    fn format_json(&self, report: &GameReport) -> String;

    /// Result, score and assassination only
    fn format_summary(&self, report: &GameReport) -> String;

    fn render(&self, report: &GameReport, format: OutputFormat) -> String {
        match format {
            OutputFormat::Summary => self.format_summary(report),
            OutputFormat::Full => self.format(report),
            OutputFormat::Json => self.format_json(report),
        }
    }
}
