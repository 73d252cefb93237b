mod objective;
mod problem;
mod timeline;
mod util;

pub use objective::*;
pub use problem::*;
pub use timeline::*;
pub use util::*;

/// Orders the jobs of an instance for a single machine.
pub trait Rule {
    /// Returns the jobs of the instance in the order they should be processed.
    /// Every job appears exactly once together with its input index.
    fn sequence(&self, instance: &Instance) -> Vec<JobWithId>;

    /// Returns the objective the rule is meant to minimize.
    fn objective(&self) -> Objective;

    /// Returns whether the rule needs due dates to be meaningful.
    fn needs_due_dates(&self) -> bool {
        false
    }

    /// Returns the name of the rule.
    fn name(&self) -> &'static str;

    /// Sequences the instance and builds its timeline.
    #[must_use]
    fn timeline(&self, instance: &Instance) -> Timeline {
        Timeline::build(&self.sequence(instance))
    }
}
