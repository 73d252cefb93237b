use super::{Interval, Timeline};
use serde::{Deserialize, Serialize};

/// Quantity a sequencing rule tries to minimize.
#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Serialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub enum Objective {
    /// Sum of the finish times of all jobs.
    FlowTime,
    /// Sum of `max(0, finish - due_date)` over all jobs.
    Lateness,
}

impl Objective {
    /// Evaluates the objective on the given timeline.
    #[must_use]
    pub fn evaluate(self, timeline: &Timeline) -> u64 {
        match self {
            Self::FlowTime => total_flow_time(timeline),
            Self::Lateness => total_lateness(timeline),
        }
    }
}

impl std::fmt::Display for Objective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::FlowTime => write!(f, "total flow time"),
            Self::Lateness => write!(f, "total lateness"),
        }
    }
}

/// Sum of the finish times of the timeline, saturating at `u64::MAX`.
#[must_use]
pub fn total_flow_time(timeline: &Timeline) -> u64 {
    let finishes = timeline.intervals().iter().map(Interval::finish);
    finishes.fold(0, u64::saturating_add)
}

/// Sum of the lateness of every job in the timeline, saturating at `u64::MAX`.
#[must_use]
pub fn total_lateness(timeline: &Timeline) -> u64 {
    let lateness = timeline.intervals().iter().map(Interval::lateness);
    lateness.fold(0, u64::saturating_add)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::Job;

    fn timeline(jobs: &[Job]) -> Timeline {
        Timeline::build(&crate::core::with_ids(jobs))
    }

    #[test]
    fn flow_time_sums_finish_times() {
        let timeline = timeline(&[Job::new(2), Job::new(3), Job::new(5)]);
        assert_eq!(total_flow_time(&timeline), 2 + 5 + 10);
        assert_eq!(Objective::FlowTime.evaluate(&timeline), 17);
    }

    #[test]
    fn lateness_ignores_early_jobs() {
        let timeline = timeline(&[Job::with_due_date(4, 1), Job::with_due_date(1, 100)]);
        assert_eq!(total_lateness(&timeline), 3);
        assert_eq!(Objective::Lateness.evaluate(&timeline), 3);
    }

    #[test]
    fn totals_saturate() {
        let long = timeline(&[Job::new(u64::MAX / 2 + 1), Job::new(u64::MAX)]);
        assert_eq!(total_flow_time(&long), u64::MAX);

        let late = timeline(&[
            Job::with_due_date(u64::MAX / 2, i64::MIN),
            Job::with_due_date(1, i64::MIN),
        ]);
        assert_eq!(total_lateness(&late), u64::MAX);
    }

    #[test]
    fn empty_timeline_scores_zero() {
        let timeline = Timeline::default();
        assert_eq!(Objective::FlowTime.evaluate(&timeline), 0);
        assert_eq!(Objective::Lateness.evaluate(&timeline), 0);
    }
}
