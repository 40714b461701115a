use futures::future::join_all;
use std::{future::Future, time::Duration};

#[derive(Debug)]
pub struct BatchOutcome<T> {
    /// One result per input item, in input order
    pub results: Vec<T>,
    pub batches: usize,
    pub pauses: usize,
}

/// Runs `f` over `items` in fixed-size groups. Each group runs concurrently and
/// must finish before the next starts; `pause` is slept between groups, never
/// after the last one. A `batch_size` of zero is treated as one.
pub async fn process_in_batches<I, T, F, Fut>(
    items: &[I],
    batch_size: usize,
    pause: Duration,
    mut f: F,
) -> BatchOutcome<T>
where
    I: Clone,
    F: FnMut(I) -> Fut,
    Fut: Future<Output = T>,
{
    let batch_size = batch_size.max(1);
    let total = items.len();
    let mut outcome = BatchOutcome { results: Vec::with_capacity(total), batches: 0, pauses: 0 };

    for (index, batch) in items.chunks(batch_size).enumerate() {
        if index > 0 && !pause.is_zero() {
            tokio::time::sleep(pause).await;
            outcome.pauses += 1;
        }

        let batch_results = join_all(batch.iter().cloned().map(&mut f)).await;
        outcome.results.extend(batch_results);
        outcome.batches += 1;

        log::info!("Progress: {}/{} addresses processed", outcome.results.len(), total);
    }

    outcome
}
