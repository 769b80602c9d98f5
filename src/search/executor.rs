//! Execution strategies for search jobs
//!
//! A search is a set of independent jobs `0..jobs`. The executor decides how
//! they are scheduled; results must not depend on the choice.

use rayon::prelude::*;

/// Runs a batch of independent jobs
pub trait Executor: Sync {
    /// Call `job(i)` once for every `i` in `0..jobs`
    fn run<F>(&self, jobs: usize, job: F)
    where
        F: Fn(usize) + Sync + Send;

    fn name(&self) -> &'static str;
}

/// Jobs spread over the rayon thread pool
#[derive(Debug, Clone, Copy, Default)]
pub struct Parallel;

impl Executor for Parallel {
    fn run<F>(&self, jobs: usize, job: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        (0..jobs).into_par_iter().for_each(job);
    }

    fn name(&self) -> &'static str {
        "parallel"
    }
}

/// Jobs run in index order on the calling thread
#[derive(Debug, Clone, Copy, Default)]
pub struct Sequential;

impl Executor for Sequential {
    fn run<F>(&self, jobs: usize, job: F)
    where
        F: Fn(usize) + Sync + Send,
    {
        (0..jobs).for_each(job);
    }

    fn name(&self) -> &'static str {
        "sequential"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn sum_with(executor: &impl Executor, jobs: usize) -> usize {
        let total = AtomicUsize::new(0);
        executor.run(jobs, |i| {
            total.fetch_add(i, Ordering::Relaxed);
        });
        total.into_inner()
    }

    #[test]
    fn every_job_runs_once() {
        assert_eq!(sum_with(&Parallel, 100), 4950);
        assert_eq!(sum_with(&Sequential, 100), 4950);
        assert_eq!(sum_with(&Parallel, 0), 0);
    }

    #[test]
    fn sequential_runs_in_order() {
        let seen = Mutex::new(Vec::new());
        Sequential.run(5, |i| seen.lock().unwrap().push(i));
        assert_eq!(seen.into_inner().unwrap(), vec![0, 1, 2, 3, 4]);
    }
}
