use super::Job;
use std::cmp::Ordering;

/// Job with its position in the input.
pub type JobWithId = (usize, Job);

/// Pairs every job of the slice with its input index.
#[must_use]
pub fn with_ids(jobs: &[Job]) -> Vec<JobWithId> {
    jobs.iter().copied().enumerate().collect()
}

/// Compares two jobs by their processing time.
#[must_use]
pub fn duration_comparator(first: &JobWithId, second: &JobWithId) -> Ordering {
    first.1.duration.cmp(&second.1.duration)
}

/// Compares two jobs by their due date. Jobs without a due date come last.
#[must_use]
pub fn due_date_comparator(first: &JobWithId, second: &JobWithId) -> Ordering {
    match (first.1.due_date, second.1.due_date) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn undated_jobs_compare_greater() {
        let dated = (0, Job::with_due_date(1, i64::MAX));
        let undated = (1, Job::new(1));
        assert_eq!(due_date_comparator(&dated, &undated), Ordering::Less);
        assert_eq!(due_date_comparator(&undated, &dated), Ordering::Greater);
        assert_eq!(due_date_comparator(&undated, &undated), Ordering::Equal);
    }

    #[test]
    fn ids_follow_input_order() {
        let jobs = [Job::new(4), Job::new(1)];
        assert_eq!(with_ids(&jobs), vec![(0, Job::new(4)), (1, Job::new(1))]);
    }
}
