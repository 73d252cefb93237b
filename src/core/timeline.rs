use super::{Job, JobWithId};
use serde::{Deserialize, Serialize};

/// A job placed on the machine. The job runs from `start` for its whole duration.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Interval {
    /// Index of the job in the input.
    pub id: usize,
    pub start: u64,
    #[serde(flatten)]
    pub job: Job,
}

impl Interval {
    /// Creates a new interval.
    #[must_use]
    pub const fn new(id: usize, start: u64, job: Job) -> Self {
        Self { id, start, job }
    }

    /// Returns the processing time of the job.
    #[must_use]
    pub const fn duration(&self) -> u64 {
        self.job.duration
    }

    /// Returns the time at which the job completes, saturating at `u64::MAX`.
    #[must_use]
    pub const fn finish(&self) -> u64 {
        self.start.saturating_add(self.job.duration)
    }

    /// Returns the lateness of the job in this interval.
    #[must_use]
    pub fn lateness(&self) -> u64 {
        self.job.lateness(self.finish())
    }
}

impl From<Interval> for (u64, u64) {
    fn from(interval: Interval) -> Self {
        (interval.start, interval.duration())
    }
}

/// Intervals of a sequenced instance, kept in execution order.
#[derive(Clone, Debug, Default, Deserialize, Eq, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<Interval>,
}

impl Timeline {
    /// Builds the timeline of the given sequence.
    /// Jobs run back to back starting at time 0 in the order of the sequence.
    /// Times past `u64::MAX` saturate, see [`Instance::objective_bound`](super::Instance::objective_bound).
    #[must_use]
    pub fn build(sequence: &[JobWithId]) -> Self {
        let mut intervals = Vec::with_capacity(sequence.len());
        let mut current_time = 0;

        for &(id, job) in sequence {
            intervals.push(Interval::new(id, current_time, job));
            current_time = current_time.saturating_add(job.duration);
        }

        let timeline = Self { intervals };
        debug_assert!(timeline.verify(), "Timeline is invalid: {timeline:?}");
        timeline
    }

    /// Returns the intervals in execution order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        &self.intervals
    }

    /// Returns the number of scheduled jobs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Returns whether no job is scheduled.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Returns the finish time of the last job.
    #[must_use]
    pub fn makespan(&self) -> u64 {
        self.intervals.last().map_or(0, Interval::finish)
    }

    /// Checks that the first job starts at 0 and every job starts when the previous one finishes.
    #[must_use]
    pub fn verify(&self) -> bool {
        let mut expected = 0;
        for interval in &self.intervals {
            if interval.start != expected {
                return false;
            }
            expected = interval.finish();
        }
        true
    }
}

impl From<Timeline> for Vec<(u64, u64)> {
    fn from(timeline: Timeline) -> Self {
        timeline.intervals.into_iter().map(Into::into).collect()
    }
}
