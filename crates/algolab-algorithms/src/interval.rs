//! Greedy interval scheduling on one machine.

use crate::error::{AlgorithmError, Result};

/// A job occupying the half-open time range `[start, finish)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Job {
    pub start: i32,
    pub finish: i32,
}

impl Job {
    pub fn new(start: i32, finish: i32) -> Self {
        Self { start, finish }
    }
}

/// Pair up start and finish times into jobs.
pub fn jobs_from_endpoints(left: &[i32], right: &[i32]) -> Result<Vec<Job>> {
    if left.len() != right.len() {
        return Err(AlgorithmError::EndpointCountMismatch {
            left: left.len(),
            right: right.len(),
        });
    }

    left.iter()
        .zip(right)
        .enumerate()
        .map(|(index, (&start, &finish))| {
            if finish < start {
                Err(AlgorithmError::ReversedInterval {
                    index,
                    start,
                    finish,
                })
            } else {
                Ok(Job::new(start, finish))
            }
        })
        .collect()
}

/// Maximum number of pairwise compatible jobs.
///
/// Takes jobs in order of finish time, keeping each one that starts no
/// earlier than the previously kept job finished. Time starts at 0, so jobs
/// starting before 0 are never kept.
pub fn find_max_schedule(jobs: &[Job]) -> i32 {
    let mut sorted = jobs.to_vec();
    sorted.sort_by_key(|job| job.finish);

    let mut count = 0;
    let mut previous_finish = 0;
    for job in sorted {
        if job.start >= previous_finish {
            count += 1;
            previous_finish = job.finish;
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_textbook_example() {
        let jobs = jobs_from_endpoints(&[1, 3, 0, 5, 3, 5, 6, 8], &[2, 4, 6, 7, 9, 10, 11, 12])
            .unwrap();
        assert_eq!(find_max_schedule(&jobs), 4);
    }

    #[test]
    fn test_touching_jobs_are_compatible() {
        let jobs = [Job::new(0, 2), Job::new(2, 4), Job::new(4, 6)];
        assert_eq!(find_max_schedule(&jobs), 3);
    }

    #[test]
    fn test_empty_and_negative_start() {
        assert_eq!(find_max_schedule(&[]), 0);
        assert_eq!(find_max_schedule(&[Job::new(-3, -1)]), 0);
    }

    #[test]
    fn test_endpoint_validation() {
        assert_eq!(
            jobs_from_endpoints(&[1, 2], &[3]),
            Err(AlgorithmError::EndpointCountMismatch { left: 2, right: 1 })
        );
        assert_eq!(
            jobs_from_endpoints(&[1, 5], &[3, 4]),
            Err(AlgorithmError::ReversedInterval {
                index: 1,
                start: 5,
                finish: 4
            })
        );
    }
}
