use crate::config::{self, CqsConfig};
use crate::host::{AnalysisDriver, AnalysisReport, CancellationToken, Snapshot};
use crate::io::{create_writer, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub snapshot: PathBuf,
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub jobs: Option<usize>,
}

/// Run the analysis and write the report. Returns whether any error-level
/// finding was reported.
pub fn handle_check(check: CheckConfig) -> Result<bool> {
    let config = resolve_config(&check)?;
    let snapshot = Snapshot::load(&check.snapshot)?;
    let report = analyze(&snapshot, &config, check.jobs)?;

    let destination: Box<dyn Write> = match &check.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    let mut writer = create_writer(check.format, destination);
    writer.write_report(&report).context("Writing report")?;
    writer.flush().context("Writing report")?;

    Ok(report.has_errors())
}

fn resolve_config(check: &CheckConfig) -> Result<CqsConfig> {
    match &check.config {
        Some(path) => Ok(config::load_config_file(path)?),
        None => Ok(config::load_config()),
    }
}

pub fn analyze(
    snapshot: &Snapshot,
    config: &CqsConfig,
    jobs: Option<usize>,
) -> Result<AnalysisReport> {
    let enabled: Vec<String> = config
        .rules
        .enabled_rules()
        .map(|r| r.to_string())
        .collect();
    debug!(rules = %enabled.join(","), "Enabled rules");
    let driver = AnalysisDriver::new(config);
    let cancel = CancellationToken::new();

    match jobs {
        Some(threads) => {
            debug!(threads, "Using dedicated thread pool");
            let pool = rayon::ThreadPoolBuilder::new()
                .num_threads(threads)
                .build()
                .context("Failed to build thread pool")?;
            Ok(pool.install(|| driver.run(snapshot, &cancel))?)
        }
        None => Ok(driver.run(snapshot, &cancel)?),
    }
}
