use crate::core::{duration_comparator, with_ids, Instance, JobWithId, Objective, Rule};

/// Shortest Processing Time sequencing.
/// Orders jobs by non-decreasing duration, equal durations keep their input order.
/// It minimizes the total flow time on a single machine.
#[must_use]
pub fn spt(instance: &Instance) -> Vec<JobWithId> {
    let mut jobs = with_ids(&instance.jobs);
    jobs.sort_by(duration_comparator);
    jobs
}

/// Shortest Processing Time rule.
#[derive(Clone, Copy, Debug, Default)]
pub struct Spt;

impl Rule for Spt {
    fn sequence(&self, instance: &Instance) -> Vec<JobWithId> {
        spt(instance)
    }

    fn objective(&self) -> Objective {
        Objective::FlowTime
    }

    fn name(&self) -> &'static str {
        "SPT"
    }
}

#[allow(unsafe_code)]
#[linkme::distributed_slice(super::RULES)]
static INSTANCE: fn() -> Box<dyn Rule> = || Box::new(Spt);
