use std::panic::{catch_unwind, AssertUnwindSafe};
use std::time::Instant;
use crossbeam_channel::{bounded, unbounded};
use crate::common::{BatchInput, BatchRecord};
use crate::detection_runners::SealDetector;
use crate::error::SealError;
use crate::Result;

/// Fixed-size worker pool applying the single-image pipeline to a list of inputs.
///
/// Jobs are pulled from a shared queue; each result is written to the slot of its input index,
/// so output order always equals input order. One image failing never stops the others.
#[derive(Debug)]
pub struct BatchRunner<'a> {
    detector: &'a SealDetector,
    workers: usize,
}

impl<'a> BatchRunner<'a> {
    /// Uses the detector's configured `worker_count`.
    pub fn new(detector: &'a SealDetector) -> Self {
        Self::with_workers(detector, detector.config().worker_count)
    }

    pub fn with_workers(detector: &'a SealDetector, workers: usize) -> Self {
        Self { detector, workers: workers.max(1) }
    }

    /// Builds a runner, rejecting a pool size of zero.
    pub fn try_with_workers(detector: &'a SealDetector, workers: usize) -> Result<Self> {
        if workers == 0 {
            return Err(SealError::validation("worker_count must be at least 1"));
        }
        Ok(Self { detector, workers })
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn run(&self, inputs: &[BatchInput]) -> Vec<BatchRecord> {
        let n = inputs.len();
        if n == 0 {
            return Vec::new();
        }
        let pool_size = self.workers.min(n);
        let batch_time = Instant::now();

        let (job_tx, job_rx) = bounded::<(usize, &BatchInput)>(n);
        let (res_tx, res_rx) = unbounded::<(usize, BatchRecord)>();
        for job in inputs.iter().enumerate() {
            // capacity is n, this never blocks
            if job_tx.send(job).is_err() {
                break;
            }
        }
        drop(job_tx);

        std::thread::scope(|scope| {
            for worker_id in 0..pool_size {
                let job_rx = job_rx.clone();
                let res_tx = res_tx.clone();
                scope.spawn(move || {
                    for (index, input) in job_rx.iter() {
                        let record = self.process_one(worker_id, input);
                        if res_tx.send((index, record)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(res_tx);

        let mut slots: Vec<Option<BatchRecord>> = (0..n).map(|_| None).collect();
        for (index, record) in res_rx.iter() {
            slots[index] = Some(record);
        }

        let records: Vec<BatchRecord> = slots
            .into_iter()
            .zip(inputs)
            .map(|(slot, input)| {
                slot.unwrap_or_else(|| {
                    BatchRecord::from_outcome(input.source(), Err(SealError::inference("no result produced for this input")))
                })
            })
            .collect();

        let failed = records.iter().filter(|r| !r.is_ok()).count();
        log::info!(
            "Batch of {} images done in {:.2?} on {} workers ({} failed)",
            n,
            batch_time.elapsed(),
            pool_size,
            failed
        );

        records
    }

    fn process_one(&self, worker_id: usize, input: &BatchInput) -> BatchRecord {
        let source = input.source();
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            input.load().and_then(|image| self.detector.detect(&image))
        }))
        .unwrap_or_else(|_| Err(SealError::inference("pipeline panicked")));

        match &outcome {
            Ok(set) => log::debug!("[worker {}] {}: {} seal(s)", worker_id, source, set.count()),
            Err(err) => log::warn!("[worker {}] {}: {}", worker_id, source, err),
        }

        BatchRecord::from_outcome(source, outcome)
    }
}
