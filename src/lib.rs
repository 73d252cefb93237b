#![deny(clippy::all, clippy::cargo, clippy::expect_used, clippy::unwrap_used)]
#![deny(clippy::pedantic, clippy::nursery, unsafe_code)]
#![warn(clippy::unimplemented, clippy::redundant_type_annotations)]

use anyhow::Result;
use serde::Serialize;
use std::io::{BufRead, Write};

pub mod algo;
pub mod core;
pub mod data;

use crate::core::{
    total_flow_time, total_lateness, Instance, Interval, Objective, Rule, Timeline,
};
use crate::data::Format;

/// Result of sequencing jobs with the Shortest Processing Time rule.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FlowTime {
    /// Sum of the finish times of all jobs.
    pub total: u64,
    /// Intervals of the jobs in SPT order.
    pub timeline: Timeline,
}

impl FlowTime {
    /// Returns the intervals in execution order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        self.timeline.intervals()
    }
}

/// Result of sequencing jobs with the Earliest Due Date rule.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Lateness {
    /// The `(duration, due_date)` pairs in execution order.
    pub order: Vec<(u64, i64)>,
    /// Sum of `max(0, finish - due_date)` over all jobs.
    pub total: u64,
    /// Intervals of the jobs in EDD order.
    pub timeline: Timeline,
}

impl Lateness {
    /// Returns the intervals in execution order.
    #[must_use]
    pub fn intervals(&self) -> &[Interval] {
        self.timeline.intervals()
    }
}

/// Result of running any rule on an instance.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Outcome {
    /// Name of the rule that sequenced the jobs.
    pub rule: String,
    /// Objective the rule minimizes.
    pub objective: Objective,
    /// Value of the objective on the timeline.
    pub score: u64,
    /// Intervals of the jobs in the order chosen by the rule.
    pub timeline: Timeline,
}

/// Orders the jobs by non-decreasing duration and returns the total flow time.
/// Equal durations keep their input order.
/// Results are exact while [`Instance::objective_bound`] fits in `u64`, beyond it they saturate.
#[must_use]
pub fn compute_flowtime(durations: &[u64]) -> FlowTime {
    let instance: Instance = durations.iter().copied().collect();
    let timeline = Timeline::build(&algo::spt(&instance));
    let total = total_flow_time(&timeline);

    FlowTime { total, timeline }
}

/// Orders the `(duration, due_date)` jobs by non-decreasing due date and returns
/// the order together with the total lateness. Equal due dates keep their input order.
/// Results are exact while [`Instance::objective_bound`] fits in `u64`, beyond it they saturate.
#[must_use]
pub fn compute_lateness(jobs: &[(u64, i64)]) -> Lateness {
    let instance: Instance = jobs.iter().copied().collect();
    let sequence = algo::edd(&instance);
    let order = sequence.iter().map(|&(id, _)| jobs[id]).collect();
    let timeline = Timeline::build(&sequence);
    let total = total_lateness(&timeline);

    Lateness {
        order,
        total,
        timeline,
    }
}

/// Runs the given rule on the instance read from reader and writes the timeline
/// and the score to stdout.
///
/// # Errors
/// - If the instance could not be read from the reader.
/// - If the rule needs due dates and some job has none.
/// - If the result could not be written to stdout.
pub fn run_reader(rule: &dyn Rule, reader: &mut impl BufRead, format: Format) -> Result<()> {
    let instance = data::deserialize(reader)?;
    if rule.needs_due_dates() && !instance.has_due_dates() {
        anyhow::bail!("{} needs a due date for every job", rule.name());
    }

    let timeline = rule.timeline(&instance);
    let objective = rule.objective();
    let outcome = Outcome {
        rule: rule.name().into(),
        objective,
        score: objective.evaluate(&timeline),
        timeline,
    };

    let mut stdout = std::io::stdout().lock();
    match format {
        Format::Text => {
            data::render(&outcome.timeline, &mut stdout)?;
            writeln!(stdout, "{} ({}): {}", outcome.rule, objective, outcome.score)?;
        }
        Format::Json => writeln!(stdout, "{}", serde_json::to_string(&outcome)?)?,
    }

    Ok(())
}

#[cfg(not(target_pointer_width = "64"))]
compile_error!("Must be 64-bit system!");

/// Casts the given value to `u64`.
/// It should never fail on 64-bit systems.
///
/// # Panics
/// - If the value cannot be cast to `u64`.
#[must_use]
pub fn cast_u64(value: usize) -> u64 {
    u64::try_from(value).unwrap_or_else(|_| unreachable!("Must be 64-bit system!"))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::core::with_ids;
    use rand::prelude::*;

    fn spans(intervals: &[Interval]) -> Vec<(u64, u64)> {
        intervals.iter().map(|&interval| interval.into()).collect()
    }

    fn finishes(intervals: &[Interval]) -> Vec<u64> {
        intervals.iter().map(Interval::finish).collect()
    }

    #[test]
    fn flowtime_example() {
        let result = compute_flowtime(&[5, 2, 8, 3, 6]);
        let order: Vec<_> = result.intervals().iter().map(Interval::duration).collect();

        assert_eq!(order, vec![2, 3, 5, 6, 8]);
        assert_eq!(finishes(result.intervals()), vec![2, 5, 10, 16, 24]);
        assert_eq!(spans(result.intervals())[2], (5, 5));
        assert_eq!(result.total, 57);
    }

    #[test]
    fn lateness_example() {
        let result = compute_lateness(&[(3, 10), (2, 5), (1, 8), (4, 12)]);

        assert_eq!(result.order, vec![(2, 5), (1, 8), (3, 10), (4, 12)]);
        assert_eq!(finishes(result.intervals()), vec![2, 3, 6, 10]);
        assert_eq!(spans(result.intervals()), vec![(0, 2), (2, 1), (3, 3), (6, 4)]);
        assert_eq!(result.total, 0);
    }

    #[test]
    fn lateness_counts_only_late_jobs() {
        let result = compute_lateness(&[(4, 3), (2, 10), (5, 6)]);

        assert_eq!(result.order, vec![(4, 3), (5, 6), (2, 10)]);
        assert_eq!(finishes(result.intervals()), vec![4, 9, 11]);
        assert_eq!(result.total, 1 + 3 + 1);
    }

    #[test]
    fn empty_input() {
        let flow = compute_flowtime(&[]);
        assert_eq!(flow.total, 0);
        assert!(flow.intervals().is_empty());

        let late = compute_lateness(&[]);
        assert_eq!(late.total, 0);
        assert!(late.order.is_empty());
        assert!(late.intervals().is_empty());
    }

    #[test]
    fn zero_durations_are_allowed() {
        let result = compute_flowtime(&[0, 3, 0]);
        assert_eq!(spans(result.intervals()), vec![(0, 0), (0, 0), (0, 3)]);
        assert_eq!(result.total, 3);
    }

    #[test]
    fn flowtime_near_the_limit_is_exact() {
        let result = compute_flowtime(&[u64::MAX / 2 - 1, 1]);
        assert_eq!(finishes(result.intervals()), vec![1, u64::MAX / 2]);
        assert_eq!(result.total, u64::MAX / 2 + 1);
        assert!(result.timeline.verify());

        let result = compute_flowtime(&[u64::MAX]);
        assert_eq!(result.total, u64::MAX);
    }

    #[test]
    fn flowtime_beyond_the_limit_saturates() {
        let result = compute_flowtime(&[100_000_000_000_000_000; 200]);
        assert_eq!(result.total, u64::MAX);
        assert_eq!(result.intervals().len(), 200);

        let result = compute_flowtime(&[u64::MAX, 1]);
        assert_eq!(spans(result.intervals()), vec![(0, 1), (1, u64::MAX)]);
        assert_eq!(finishes(result.intervals()), vec![1, u64::MAX]);
        assert_eq!(result.total, u64::MAX);

        assert!(data::parse_durations("18446744073709551615, 1").is_err());
    }

    #[test]
    fn lateness_with_extreme_due_dates() {
        let result = compute_lateness(&[(2, i64::MAX), (1, i64::MIN)]);

        assert_eq!(result.order, vec![(1, i64::MIN), (2, i64::MAX)]);
        assert_eq!(finishes(result.intervals()), vec![1, 3]);
        assert_eq!(result.total, i64::MIN.unsigned_abs() + 1);

        let result = compute_lateness(&[(u64::MAX, i64::MIN), (1, i64::MIN)]);
        assert_eq!(result.total, u64::MAX);

        let result = compute_lateness(&[(u64::MAX / 2, i64::MAX), (1, i64::MAX)]);
        assert_eq!(finishes(result.intervals()), vec![u64::MAX / 2, u64::MAX / 2 + 1]);
        assert_eq!(result.total, 1);
    }

    #[test]
    fn results_serialize_to_json() -> anyhow::Result<()> {
        let json = serde_json::to_value(compute_lateness(&[(2, 1)]))?;
        assert_eq!(json["total"], 1);
        assert_eq!(json["order"][0][1], 1);
        assert_eq!(json["timeline"][0]["start"], 0);
        assert_eq!(json["timeline"][0]["duration"], 2);
        Ok(())
    }

    #[test]
    fn large_values_below_the_bound_are_exact() {
        let mut rng = StdRng::seed_from_u64(2024);

        for _ in 0..200 {
            let len: u64 = rng.gen_range(1..20);
            let limit = u64::MAX / (4 * len * len);
            let jobs: Vec<(u64, i64)> = (0..len)
                .map(|_| (rng.gen_range(0..=limit), rng.gen_range(-1_i64 << 40..=i64::MAX)))
                .collect();
            let instance: Instance = jobs.iter().copied().collect();
            assert!(instance.objective_bound().is_some());

            let durations: Vec<u64> = jobs.iter().map(|&(duration, _)| duration).collect();
            let flow = compute_flowtime(&durations);
            let late = compute_lateness(&jobs);
            assert!(flow.timeline.verify());
            assert!(late.timeline.verify());

            let finishes = flow.intervals().iter().map(|i| u128::from(i.finish()));
            assert_eq!(u128::from(flow.total), finishes.sum::<u128>());

            let lateness = late.intervals().iter().zip(&late.order).map(|(i, &(_, due))| {
                (i128::from(i.finish()) - i128::from(due)).max(0).unsigned_abs()
            });
            assert_eq!(u128::from(late.total), lateness.sum::<u128>());
        }
    }

    #[test]
    fn flowtime_properties() {
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..200 {
            let len = rng.gen_range(1..40);
            let durations: Vec<u64> = (0..len).map(|_| rng.gen_range(0..20)).collect();
            let result = compute_flowtime(&durations);
            let intervals = result.intervals();

            assert_eq!(intervals.len(), durations.len());
            assert!(result.timeline.verify());

            for pair in intervals.windows(2) {
                assert!(pair[0].duration() <= pair[1].duration());
                if pair[0].duration() == pair[1].duration() {
                    assert!(pair[0].id < pair[1].id);
                }
            }

            let total: u64 = durations.iter().sum();
            let scheduled: u64 = intervals.iter().map(Interval::duration).sum();
            assert_eq!(scheduled, total);
            assert_eq!(intervals.last().map(Interval::finish), Some(total));
            assert_eq!(result.total, finishes(intervals).iter().sum::<u64>());

            assert_eq!(compute_flowtime(&durations), result);
        }
    }

    #[test]
    fn flowtime_is_minimal_among_permutations() {
        let durations = [4, 1, 3, 1, 7];
        let best = compute_flowtime(&durations).total;
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..100 {
            let mut shuffled = durations;
            shuffled.shuffle(&mut rng);
            let instance: Instance = shuffled.iter().copied().collect();
            let timeline = Timeline::build(&with_ids(&instance.jobs));
            assert!(best <= total_flow_time(&timeline));
        }
    }

    #[test]
    fn lateness_properties() {
        let mut rng = StdRng::seed_from_u64(1337);

        for _ in 0..200 {
            let len = rng.gen_range(1..30);
            let jobs: Vec<(u64, i64)> = (0..len)
                .map(|_| (rng.gen_range(0..15), rng.gen_range(-10..120)))
                .collect();
            let result = compute_lateness(&jobs);
            let intervals = result.intervals();

            assert!(result.timeline.verify());
            assert_eq!(result.order.len(), jobs.len());

            for pair in result.order.windows(2) {
                assert!(pair[0].1 <= pair[1].1);
            }
            for pair in intervals.windows(2) {
                if pair[0].job.due_date == pair[1].job.due_date {
                    assert!(pair[0].id < pair[1].id);
                }
            }

            let on_time = result
                .order
                .iter()
                .zip(intervals)
                .all(|(&(_, due_date), interval)| {
                    i128::from(interval.finish()) <= i128::from(due_date)
                });
            assert_eq!(result.total == 0, on_time);

            assert_eq!(compute_lateness(&jobs), result);
        }
    }
}
