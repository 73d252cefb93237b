use serde::{Deserialize, Serialize};

/// A job. Contains the processing time and, for lateness problems, the due date.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
pub struct Job {
    pub duration: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
}

impl Job {
    /// Creates a job without a due date.
    #[must_use]
    pub const fn new(duration: u64) -> Self {
        Self {
            duration,
            due_date: None,
        }
    }

    /// Creates a job that should be finished by `due_date`.
    #[must_use]
    pub const fn with_due_date(duration: u64, due_date: i64) -> Self {
        Self {
            duration,
            due_date: Some(due_date),
        }
    }

    /// Returns how late the job is when it finishes at `finish`.
    /// Finishing early is not rewarded and jobs without a due date are never late.
    #[must_use]
    pub fn lateness(&self, finish: u64) -> u64 {
        self.due_date.map_or(0, |due_date| {
            let late = i128::from(finish) - i128::from(due_date);
            u64::try_from(late.max(0)).unwrap_or(u64::MAX)
        })
    }
}

impl From<u64> for Job {
    fn from(duration: u64) -> Self {
        Self::new(duration)
    }
}

impl From<(u64, i64)> for Job {
    fn from((duration, due_date): (u64, i64)) -> Self {
        Self::with_due_date(duration, due_date)
    }
}

/// An instance of the single machine sequencing problem.
#[non_exhaustive]
#[derive(Clone, Debug, Default, Deserialize, Eq, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Instance {
    pub jobs: Vec<Job>,
}

impl Instance {
    /// Creates a new instance from the given jobs.
    #[must_use]
    pub const fn new(jobs: Vec<Job>) -> Self {
        Self { jobs }
    }

    /// Returns whether every job carries a due date.
    #[must_use]
    pub fn has_due_dates(&self) -> bool {
        self.jobs.iter().all(|job| job.due_date.is_some())
    }

    /// Returns a bound on the total flow time and the total lateness of any sequence
    /// of the jobs, or `None` when that bound does not fit in `u64`.
    /// Below the bound every finish time and objective is exact.
    #[must_use]
    pub fn objective_bound(&self) -> Option<u64> {
        let work = self.jobs.iter().try_fold(0_u64, |sum, job| sum.checked_add(job.duration))?;
        let earliest = self.jobs.iter().filter_map(|job| job.due_date).min();
        let overdue = earliest.map_or(0, |due_date| due_date.min(0).unsigned_abs());

        let per_job = u128::from(work) + u128::from(overdue);
        let bound = per_job.checked_mul(u128::from(crate::cast_u64(self.jobs.len())))?;
        u64::try_from(bound).ok()
    }
}

impl<T: Into<Job>> FromIterator<T> for Instance {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter.into_iter().map(Into::into).collect())
    }
}
