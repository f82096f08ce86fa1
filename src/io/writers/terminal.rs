use crate::core::Severity;
use crate::host::{AnalysisReport, ReportedFinding};
use crate::io::output::OutputWriter;
use colored::*;
use std::io::Write;

pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    fn write_finding(&mut self, reported: &ReportedFinding) -> anyhow::Result<()> {
        let finding = &reported.finding;
        let severity = match finding.severity {
            Severity::Error => "error".red().bold(),
            Severity::Info => "info".blue().bold(),
        };
        write!(
            self.writer,
            "{}:{}: {}[{}] {}",
            reported.path.display(),
            finding.span.start,
            severity,
            finding.rule.code(),
            finding.message
        )?;
        if let Some(subject) = &finding.subject {
            write!(self.writer, " ({})", subject.cyan())?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_summary(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        let errors = report.count(Severity::Error);
        let infos = report.count(Severity::Info);
        let status = if errors == 0 {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        writeln!(
            self.writer,
            "{} {} units in {} files: {} errors, {} info",
            status, report.units_analyzed, report.files_analyzed, errors, infos
        )?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_report(&mut self, report: &AnalysisReport) -> anyhow::Result<()> {
        for finding in &report.findings {
            self.write_finding(finding)?;
        }
        if !report.findings.is_empty() {
            writeln!(self.writer)?;
        }
        self.write_summary(report)
    }

    fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
