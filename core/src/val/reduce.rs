use crate::error::Result;

use super::Number;

/// Chunks below this size are summed on the calling thread.
const MIN_CHUNK: usize = 64;

/// Left fold with `add`; the empty sum is exact `0`.
pub fn sum(values: &[Number]) -> Result<Number> {
    values.iter().try_fold(Number::from(0), |acc, v| acc.add(v))
}

/// Left fold with `multiply`; the empty product is exact `1`.
pub fn product(values: &[Number]) -> Result<Number> {
    values.iter().try_fold(Number::from(1), |acc, v| acc.multiply(v))
}

/// Sums chunks on scoped worker threads, then sums the partial results.
pub fn par_sum(values: &[Number]) -> Result<Number> {
    let workers = std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1);
    let chunk = values.len().div_ceil(workers).max(MIN_CHUNK);
    if values.len() <= chunk {
        return sum(values);
    }
    let partials = crossbeam::thread::scope(|scope| {
        let handles: Vec<_> = values.chunks(chunk).map(|part| scope.spawn(move |_| sum(part))).collect();
        handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_else(|payload| std::panic::resume_unwind(payload)))
            .collect::<Result<Vec<_>>>()
    })
    .unwrap_or_else(|payload| std::panic::resume_unwind(payload))?;
    sum(&partials)
}
