use rustc_hash::FxHashSet;

use super::state::SchedState;

/// Structural validation run after every tick. All checks are
/// `debug_assert!`s; release builds skip them entirely.
#[derive(Debug, Default)]
pub struct Observer {
    step: u64,
}

impl Observer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn observe(&mut self, state: &SchedState) {
        self.step += 1;

        let mut seen = FxHashSet::default();
        let mut population = 0usize;
        let everywhere = state
            .job_pool
            .iter()
            .chain(state.ready_queue.iter())
            .chain(state.cpu.iter())
            .chain(state.finished.iter());

        for process in everywhere {
            population += 1;
            debug_assert!(
                seen.insert(process.id),
                "process {} present in more than one collection",
                process.id
            );
        }

        debug_assert_eq!(
            population,
            state.submitted(),
            "collections must account for every submitted process"
        );

        for process in &state.job_pool {
            debug_assert!(
                process.arrival_time > state.now,
                "process {} already arrived but still pooled",
                process.id
            );
        }

        if let Some(running) = &state.cpu {
            debug_assert!(
                running.remaining_time > 0,
                "completed process {} still occupies the CPU",
                running.id
            );
        } else {
            debug_assert_eq!(
                state.quantum_used, 0,
                "quantum counter must reset when the CPU goes idle"
            );
        }

        for process in &state.finished {
            let completion = process.completion_time;
            debug_assert!(
                completion.is_some(),
                "finished process {} has no completion time",
                process.id
            );
            debug_assert_eq!(
                process.remaining_time, 0,
                "finished process {} has work left",
                process.id
            );
            if let Some(completion) = completion {
                debug_assert_eq!(
                    process.turnaround_time,
                    completion - process.arrival_time,
                    "turnaround mismatch for process {}",
                    process.id
                );
            }
        }
    }
}
