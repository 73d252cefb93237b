use crate::core::{due_date_comparator, with_ids, Instance, JobWithId, Objective, Rule};

/// Earliest Due Date sequencing.
/// Orders jobs by non-decreasing due date, equal due dates keep their input order
/// and jobs without a due date go last.
///
/// It minimizes the maximum lateness on a single machine. For the total lateness
/// it is only a heuristic.
#[must_use]
pub fn edd(instance: &Instance) -> Vec<JobWithId> {
    let mut jobs = with_ids(&instance.jobs);
    jobs.sort_by(due_date_comparator);
    jobs
}

/// Earliest Due Date rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct Edd;

impl Rule for Edd {
    fn sequence(&self, instance: &Instance) -> Vec<JobWithId> {
        edd(instance)
    }

    fn objective(&self) -> Objective {
        Objective::Lateness
    }

    fn needs_due_dates(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "EDD"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::RULES)]
static INSTANCE: fn() -> Box<dyn Rule> = || Box::new(Edd);
