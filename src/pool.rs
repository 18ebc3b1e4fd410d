//! Fixed-size worker pools for data-parallel volume processing.

use crate::error::{Result, VolumeError};
use log::error;
use rayon::prelude::*;
use rayon::ThreadPoolBuilder;

/// Run `count` independent tasks and collect their results in task order.
///
/// With `threads <= 1` the tasks run sequentially on the calling thread.
/// Otherwise a dedicated pool of exactly `threads` workers is created and
/// the call blocks until every task has completed. Since results are
/// gathered by task index, the output does not depend on scheduling.
pub(crate) fn run_tasks<T, F>(threads: usize, count: usize, task: F) -> Result<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    if threads <= 1 {
        return Ok((0..count).map(task).collect());
    }

    let pool = ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| {
            error!("failed to execute in concurrent mode: {}", e);
            VolumeError::ThreadPool(e.to_string())
        })?;
    Ok(pool.install(|| (0..count).into_par_iter().map(task).collect()))
}

#[cfg(test)]
mod tests {
    use super::run_tasks;

    #[test]
    fn results_are_in_task_order() {
        let seq = run_tasks(1, 100, |i| i * i).unwrap();
        let par = run_tasks(4, 100, |i| i * i).unwrap();
        assert_eq!(seq, par);
        assert_eq!(par[7], 49);
    }
}
