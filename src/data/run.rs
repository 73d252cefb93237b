use crate::core::{Objective, Rule};
use crate::data::deserialize;
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result};
use std::fs::File;
use std::io::BufReader;
use tracing::{debug, info};

/// Report of running a directory of samples.
#[derive(Debug, Deserialize, Serialize)]
pub struct Report {
    rule: String,
    objective: Objective,
    entries: Vec<ReportEntry>,
}

impl Report {
    /// Create a new report.
    const fn new(rule: String, objective: Objective) -> Self {
        let entries = Vec::new();
        Self {
            rule,
            objective,
            entries,
        }
    }

    /// Get the rule name.
    #[must_use]
    pub fn rule_name(&self) -> &str {
        &self.rule
    }

    /// Get the objective the entries are scored with.
    #[must_use]
    pub const fn objective(&self) -> Objective {
        self.objective
    }

    /// Get the entries.
    #[must_use]
    pub fn entries(&self) -> &[ReportEntry] {
        &self.entries
    }
}

impl Display for Report {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        writeln!(f, "Rule: {} ({})", self.rule, self.objective)?;
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        writeln!(f, "-------------------")
    }
}

/// Report of running a single sample.
#[non_exhaustive]
#[derive(Debug, Deserialize, Serialize)]
pub struct ReportEntry {
    pub name: String,
    pub jobs: usize,
    pub score: u64,
    pub time: f64,
}

impl Display for ReportEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        write!(
            f,
            "{} ({} jobs): {} in {:.6} sec",
            self.name, self.jobs, self.score, self.time
        )
    }
}

/// Expected values encoded in a sample filename.
#[derive(Clone, Debug, Eq, PartialEq)]
struct SampleName {
    name: String,
    jobs: usize,
    flow_time: u64,
    lateness: u64,
}

impl SampleName {
    const fn expected(&self, objective: Objective) -> u64 {
        match objective {
            Objective::FlowTime => self.flow_time,
            Objective::Lateness => self.lateness,
        }
    }
}

/// Run all samples in the `samples` directory.
/// Print the report to stdout.
///
/// # Arguments
/// - `valid` is true, check if the score is correct.
/// - `rule` is the rule to run.
///
/// # Errors
/// - If a file cannot be read.
/// - If no samples are found.
///
/// # Panics
/// - If the timeline is invalid.
/// - If the score is incorrect and `valid` is true.
pub fn samples(valid: bool, rule: &dyn Rule) -> anyhow::Result<()> {
    run("samples", valid, rule).and_then(|report| {
        if report.entries.is_empty() {
            Err(anyhow!("No samples found"))
        } else {
            println!("{report}");
            Ok(())
        }
    })
}

/// Run all samples in the `dir` directory.
/// Samples are named `{jobs}_{flow_time}_{lateness}_{index}.in`.
/// Rules that need due dates skip samples with undated jobs.
///
/// # Arguments
/// - `valid` is true, check if the score is correct.
/// - `rule` is the rule to run.
///
/// # Errors
/// - If a file cannot be read.
///
/// # Panics
/// - If the timeline is invalid.
/// - If the score is incorrect and `valid` is true.
pub fn run(dir: &str, valid: bool, rule: &dyn Rule) -> anyhow::Result<Report> {
    let objective = rule.objective();
    let mut report = Report::new(rule.name().into(), objective);
    info!(rule = rule.name(), dir, "running samples");

    let mut files = std::fs::read_dir(dir)?.collect::<std::io::Result<Vec<_>>>()?;
    files.sort_by_key(std::fs::DirEntry::file_name);

    for file in files {
        let sample = parse_filename(&file.file_name())?;
        let instance = deserialize(&mut BufReader::new(File::open(file.path())?))?;

        if rule.needs_due_dates() && !instance.has_due_dates() {
            debug!(sample = sample.name.as_str(), "skipping sample without due dates");
            continue;
        }

        let time = std::time::Instant::now();
        let timeline = rule.timeline(&instance);
        let score = objective.evaluate(&timeline);
        let time = time.elapsed().as_secs_f64();

        assert!(timeline.verify(), "Invalid timeline created");
        assert_eq!(timeline.len(), instance.jobs.len(), "Jobs were lost");

        if valid {
            assert_eq!(sample.jobs, instance.jobs.len(), "Invalid job count {}", sample.name);
            assert_eq!(score, sample.expected(objective), "Invalid score {}", sample.name);
        }

        debug!(sample = sample.name.as_str(), score, time, "sample finished");
        report.entries.push(ReportEntry {
            name: sample.name,
            jobs: instance.jobs.len(),
            score,
            time,
        });
    }

    Ok(report)
}

fn parse_filename(filename: &std::ffi::OsStr) -> anyhow::Result<SampleName> {
    static NAME_ERR: &str = "Cannot read filename";

    let name = filename.to_str().ok_or_else(|| anyhow!(NAME_ERR))?;
    let mut parts = name.split('.');
    let mut parts = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.split('_');
    let jobs = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let flow_time = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let lateness = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    let _: usize = parts.next().ok_or_else(|| anyhow!(NAME_ERR))?.parse()?;
    Ok(SampleName {
        name: name.into(),
        jobs,
        flow_time,
        lateness,
    })
}
