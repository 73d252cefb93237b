//! Text formats of the jobs and instances, and the bench runner.

mod run;

pub use run::*;

use crate::core::{Instance, Job, Timeline};
use std::io::{BufRead, Write};
use thiserror::Error;

/// Error raised when the jobs cannot be read from text.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ParseError {
    #[error("no jobs were given")]
    Empty,
    #[error("job {job}: `{token}` is not a valid duration")]
    Duration { job: usize, token: String },
    #[error("job {job}: `{token}` is not a valid due date")]
    DueDate { job: usize, token: String },
    #[error("job {job}: expected {expected}, found {found} values")]
    Arity {
        job: usize,
        expected: &'static str,
        found: usize,
    },
    #[error("the jobs are too long, their total flow time or lateness does not fit in 64 bits")]
    Overflow,
}

/// Output format of the results.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

fn parse_duration(job: usize, token: &str) -> Result<u64, ParseError> {
    let token = token.trim();
    token.parse().map_err(|_| ParseError::Duration {
        job,
        token: token.into(),
    })
}

fn parse_due_date(job: usize, token: &str) -> Result<i64, ParseError> {
    let token = token.trim();
    token.parse().map_err(|_| ParseError::DueDate {
        job,
        token: token.into(),
    })
}

fn parse_job(job: usize, line: &str, due_required: bool) -> Result<Job, ParseError> {
    let tokens: Vec<&str> = line.split(',').collect();
    match tokens.as_slice() {
        [duration] if !due_required => Ok(Job::new(parse_duration(job, duration)?)),
        [duration, due_date] => Ok(Job::with_due_date(
            parse_duration(job, duration)?,
            parse_due_date(job, due_date)?,
        )),
        _ => Err(ParseError::Arity {
            job,
            expected: if due_required {
                "`duration, due_date`"
            } else {
                "`duration` or `duration, due_date`"
            },
            found: tokens.len(),
        }),
    }
}

/// Rejects jobs whose objectives could overflow the timeline.
fn check_bound(instance: &Instance) -> Result<(), ParseError> {
    if instance.objective_bound().is_some() {
        Ok(())
    } else {
        Err(ParseError::Overflow)
    }
}

/// Lines holding a job: not blank and not a `#` comment.
fn job_lines(input: &str) -> impl Iterator<Item = &str> {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Parses comma separated durations, e.g. `5, 2, 8, 3, 6`.
///
/// # Errors
/// - If the input holds no durations.
/// - If a token is not a non-negative integer.
/// - If the total flow time could overflow.
pub fn parse_durations(input: &str) -> Result<Vec<u64>, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let durations = input
        .split(',')
        .enumerate()
        .map(|(i, token)| parse_duration(i + 1, token))
        .collect::<Result<Vec<_>, _>>()?;

    check_bound(&durations.iter().copied().collect())?;
    Ok(durations)
}

/// Parses one `duration, due_date` pair per line, e.g. `3, 10\n2, 5`.
/// Surrounding whitespace is trimmed, but every line in between must hold a job.
///
/// # Errors
/// - If the input holds no jobs.
/// - If a line does not have exactly two values.
/// - If a duration is not a non-negative integer or a due date is not an integer.
/// - If the total lateness could overflow.
pub fn parse_due_jobs(input: &str) -> Result<Vec<(u64, i64)>, ParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ParseError::Empty);
    }

    let jobs = input
        .lines()
        .enumerate()
        .map(|(i, line)| {
            parse_job(i + 1, line, true)
                .map(|job| (job.duration, job.due_date.unwrap_or_default()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    check_bound(&jobs.iter().copied().collect())?;
    Ok(jobs)
}

/// Parses an instance: one `duration` or `duration, due_date` job per line.
/// Blank lines and lines starting with `#` are skipped, so an instance may be empty.
///
/// # Errors
/// - If a line has more than two values.
/// - If a value is not a valid integer.
/// - If the objectives of the instance could overflow.
pub fn parse_instance(input: &str) -> Result<Instance, ParseError> {
    let instance = job_lines(input)
        .enumerate()
        .map(|(i, line)| parse_job(i + 1, line, false))
        .collect::<Result<Vec<_>, _>>()
        .map(Instance::new)?;

    check_bound(&instance)?;
    Ok(instance)
}

/// Reads an instance from the reader.
///
/// # Errors
/// - If the reader fails.
/// - If the text is not a valid instance.
pub fn deserialize(reader: &mut impl BufRead) -> anyhow::Result<Instance> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;
    Ok(parse_instance(&input)?)
}

/// Writes the instance in the text format read by [`deserialize`].
#[must_use]
pub fn to_string(instance: &Instance) -> String {
    let mut output = String::new();
    for job in &instance.jobs {
        output.push_str(&job.duration.to_string());
        if let Some(due_date) = job.due_date {
            output.push_str(&format!(", {due_date}"));
        }
        output.push('\n');
    }
    output
}

/// Writes one line per interval of the timeline, labeled by its position in the order.
///
/// # Errors
/// - If the writer fails.
pub fn render(timeline: &Timeline, writer: &mut impl Write) -> std::io::Result<()> {
    let width = timeline.makespan().to_string().len();
    for (i, interval) in timeline.intervals().iter().enumerate() {
        write!(
            writer,
            "T{:<4} {:>width$} -> {:>width$}  job {}",
            i + 1,
            interval.start,
            interval.finish(),
            interval.id + 1,
        )?;
        if let Some(due_date) = interval.job.due_date {
            write!(writer, "  due {due_date}  late {}", interval.lateness())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
