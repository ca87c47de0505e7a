use super::{
    event::{TickEvent, TickTrace},
    observer::Observer,
    snapshot::Snapshot,
    state::{Executed, Process, ProcessId, SchedState, Ticks},
};
use crate::policy::{
    ordering::{priority_challenger, sort_for_dispatch, srtf_challenger},
    Algorithm, SchedConfig,
};

/// The scheduling engine: configuration surface plus the tick procedure.
///
/// Single-threaded and synchronous; callers drive the simulation by calling
/// [`tick`](SchedCore::tick) repeatedly until [`is_finished`](SchedCore::is_finished).
pub struct SchedCore {
    pub state: SchedState,
    pub config: SchedConfig,
    observer: Observer,
}

impl SchedCore {
    pub fn new(config: SchedConfig) -> Self {
        Self {
            state: SchedState::new(),
            config,
            observer: Observer::new(),
        }
    }

    /// Submits a process to the job pool.
    ///
    /// Id uniqueness is a caller contract: duplicates are not rejected here,
    /// and a simulation fed duplicate ids has unspecified queue order. Debug
    /// builds flag the violation after the next tick.
    pub fn add_process(
        &mut self,
        id: ProcessId,
        name: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: u32,
    ) {
        self.state
            .submit(Process::new(id, name, arrival_time, burst_time, priority));
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.config.set_algorithm(algorithm);
    }

    pub fn set_time_quantum(&mut self, quantum: Ticks) {
        self.config.set_time_quantum(quantum);
    }

    pub fn set_aging(&mut self, enabled: bool) {
        self.config.set_aging(enabled);
    }

    pub fn set_aging_threshold(&mut self, threshold: Ticks) {
        self.config.set_aging_threshold(threshold);
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_drained()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state, self.config.algorithm)
    }

    /// Advances the simulation by exactly one time unit.
    ///
    /// Phase order is a contract, not an implementation detail: it fixes the
    /// queue order and preemption outcome for simultaneous events. Arrivals
    /// are drained first but appended only after the quantum-expiry check,
    /// so an expired process always requeues ahead of same-tick arrivals and
    /// is re-selected before them.
    pub fn tick(&mut self) -> TickTrace {
        let mut trace = TickTrace::new(self.state.now);

        let arrivals = self.state.take_arrivals();
        self.expire_quantum(&mut trace);
        for process in arrivals {
            trace.push(TickEvent::Arrived { id: process.id });
            self.state.ready_queue.push(process);
        }

        self.reevaluate_preemption(&mut trace);
        self.dispatch();
        self.execute(&mut trace);
        self.apply_aging(&mut trace);

        self.state.now += 1;
        self.observer.observe(&self.state);
        trace
    }

    /// Round Robin quantum expiry, judged against the start-of-tick occupant.
    fn expire_quantum(&mut self, trace: &mut TickTrace) {
        if self.config.algorithm != Algorithm::RoundRobin {
            return;
        }
        if let Some(running) = &self.state.cpu {
            if running.remaining_time > 0 && self.state.quantum_used >= self.config.time_quantum {
                trace.push(TickEvent::QuantumExpired { id: running.id });
                self.state.preempt_running();
            }
        }
    }

    /// SRTF / preemptive Priority: compare the occupant against the best
    /// queue candidate; on a strict win the occupant requeues at the back.
    fn reevaluate_preemption(&mut self, trace: &mut TickTrace) {
        let Some(running) = &self.state.cpu else {
            return;
        };

        let challenger = match self.config.algorithm {
            Algorithm::Srtf => srtf_challenger(&self.state.ready_queue, running),
            Algorithm::Priority => priority_challenger(&self.state.ready_queue, running),
            _ => None,
        };

        if let Some(challenger) = challenger {
            trace.push(TickEvent::Preempted {
                id: running.id,
                by: challenger.id,
            });
            self.state.preempt_running();
        }
    }

    fn dispatch(&mut self) {
        if self.state.cpu.is_some() || self.state.ready_queue.is_empty() {
            return;
        }
        sort_for_dispatch(self.config.algorithm, &mut self.state.ready_queue);
        self.state.dispatch_front();
    }

    /// Runs the occupant for one unit, accrues waiting time for everything
    /// still queued, and retires the occupant if it just finished.
    fn execute(&mut self, trace: &mut TickTrace) {
        if let Some(running) = self.state.cpu.as_mut() {
            self.state.last_executed = Some(Executed {
                id: running.id,
                name: running.name.clone(),
            });
            trace.push(TickEvent::Running {
                id: running.id,
                remaining: running.remaining_time,
            });

            running.remaining_time = running.remaining_time.saturating_sub(1);
            self.state.quantum_used += 1;

            if running.remaining_time == 0 {
                trace.push(TickEvent::Finished { id: running.id });
                self.state.complete_running();
            }
        } else {
            self.state.last_executed = None;
            trace.push(TickEvent::Idle);
        }

        for waiting in &mut self.state.ready_queue {
            waiting.waiting_time += 1;
        }
    }

    /// Ages everything left in the queue; a process reaching the threshold
    /// gets a one-step priority boost (saturating at 0) and its age reset.
    fn apply_aging(&mut self, trace: &mut TickTrace) {
        if !self.config.aging_enabled {
            return;
        }
        for process in &mut self.state.ready_queue {
            process.age += 1;
            if process.age >= self.config.aging_threshold {
                process.priority = process.priority.saturating_sub(1);
                process.age = 0;
                if process.priority < process.original_priority {
                    trace.push(TickEvent::Aged {
                        id: process.id,
                        priority: process.priority,
                    });
                }
            }
        }
    }
}

impl Default for SchedCore {
    fn default() -> Self {
        Self::new(SchedConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core(algorithm: Algorithm) -> SchedCore {
        SchedCore::new(SchedConfig::new(algorithm))
    }

    fn run_to_completion(core: &mut SchedCore) -> Vec<TickTrace> {
        let mut traces = Vec::new();
        while !core.is_finished() {
            traces.push(core.tick());
            assert!(traces.len() < 10_000, "simulation failed to converge");
        }
        traces
    }

    fn completion(core: &SchedCore, id: ProcessId) -> Ticks {
        core.state
            .finished
            .iter()
            .find(|p| p.id == id)
            .and_then(|p| p.completion_time)
            .unwrap()
    }

    #[test]
    fn fcfs_runs_in_arrival_order() {
        let mut core = core(Algorithm::Fcfs);
        core.add_process(1, "P1", 0, 5, 0);
        core.add_process(2, "P2", 1, 3, 0);
        core.add_process(3, "P3", 2, 1, 0);
        run_to_completion(&mut core);

        let order: Vec<_> = core.state.finished.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 2, 3]);
        assert_eq!(completion(&core, 1), 5);
        assert_eq!(completion(&core, 2), 8);
        assert_eq!(completion(&core, 3), 9);
    }

    #[test]
    fn metrics_are_consistent_for_every_finished_process() {
        for algorithm in [
            Algorithm::Fcfs,
            Algorithm::Sjf,
            Algorithm::Srtf,
            Algorithm::RoundRobin,
            Algorithm::Priority,
            Algorithm::PriorityNp,
        ] {
            let mut core = core(algorithm);
            core.add_process(1, "P1", 0, 5, 2);
            core.add_process(2, "P2", 1, 3, 1);
            core.add_process(3, "P3", 2, 1, 3);
            core.add_process(4, "P4", 4, 2, 4);
            run_to_completion(&mut core);

            assert_eq!(core.state.finished.len(), 4, "{algorithm}");
            for p in &core.state.finished {
                let completion = p.completion_time.unwrap();
                assert_eq!(p.turnaround_time, completion - p.arrival_time);
                assert!(p.turnaround_time >= p.burst_time);
                assert_eq!(p.response_time, Some(p.start_time.unwrap() - p.arrival_time));
                assert_eq!(p.waiting_time, p.turnaround_time - p.burst_time);
            }
        }
    }

    #[test]
    fn rr_preempted_process_requeues_ahead_of_same_tick_arrival() {
        let mut core = core(Algorithm::RoundRobin);
        core.set_time_quantum(2);
        core.add_process(1, "P1", 0, 5, 0);
        core.add_process(2, "P2", 1, 3, 0);
        core.add_process(3, "P3", 2, 1, 0);
        core.add_process(4, "P4", 4, 2, 0);

        // t=0..3: P1 runs two ticks and is preempted at t=2; P2 runs t=2,3.
        for _ in 0..4 {
            core.tick();
        }

        // t=4: P2's quantum expires in the same tick P4 arrives. The
        // preempted process must land ahead of the arrival.
        let trace = core.tick();
        assert!(trace
            .events
            .contains(&TickEvent::QuantumExpired { id: 2 }));
        let queue: Vec<_> = core.state.ready_queue.iter().map(|p| p.id).collect();
        let pos_preempted = queue.iter().position(|&id| id == 2).unwrap();
        let pos_arrival = queue.iter().position(|&id| id == 4).unwrap();
        assert!(pos_preempted < pos_arrival, "queue order was {queue:?}");
    }

    #[test]
    fn rr_short_burst_finishes_within_its_quantum() {
        let mut core = core(Algorithm::RoundRobin);
        core.set_time_quantum(2);
        core.add_process(1, "P1", 0, 5, 0);
        core.add_process(2, "P2", 1, 3, 0);
        core.add_process(3, "P3", 2, 1, 0);
        core.add_process(4, "P4", 4, 2, 0);
        let traces = run_to_completion(&mut core);

        // P3 runs exactly once and finishes on that tick.
        let p3_runs = traces
            .iter()
            .flat_map(|t| &t.events)
            .filter(|e| matches!(e, TickEvent::Running { id: 3, .. }))
            .count();
        assert_eq!(p3_runs, 1);
        assert!(!traces
            .iter()
            .flat_map(|t| &t.events)
            .any(|e| matches!(e, TickEvent::QuantumExpired { id: 3 })));
    }

    #[test]
    fn srtf_preempts_long_process_for_later_short_arrival() {
        let mut core = core(Algorithm::Srtf);
        core.add_process(1, "P1", 0, 20, 0);
        core.add_process(2, "P2", 2, 5, 0);

        core.tick();
        core.tick();
        // t=2: P2 arrives with remaining 5 against P1's 18.
        let trace = core.tick();
        assert!(trace.events.contains(&TickEvent::Preempted { id: 1, by: 2 }));

        run_to_completion(&mut core);
        assert_eq!(completion(&core, 2), 7);
        let p1 = core.state.finished.iter().find(|p| p.id == 1).unwrap();
        // P1 resumes with its decremented remaining time intact.
        assert_eq!(p1.completion_time, Some(25));
        assert_eq!(p1.burst_time, 20);
    }

    #[test]
    fn srtf_does_not_preempt_on_equal_remaining() {
        let mut core = core(Algorithm::Srtf);
        core.add_process(1, "P1", 0, 4, 0);
        core.add_process(2, "P2", 1, 3, 0);

        // t=1: P2 arrives with remaining 3, equal to P1's. No preemption.
        core.tick();
        let trace = core.tick();
        assert!(!trace
            .events
            .iter()
            .any(|e| matches!(e, TickEvent::Preempted { .. })));
        assert_eq!(core.state.cpu.as_ref().unwrap().id, 1);
    }

    #[test]
    fn preemptive_priority_switches_to_higher_priority_arrival() {
        let mut core = core(Algorithm::Priority);
        core.add_process(1, "P1", 0, 6, 3);
        core.add_process(2, "P2", 2, 2, 1);

        core.tick();
        core.tick();
        let trace = core.tick();
        assert!(trace.events.contains(&TickEvent::Preempted { id: 1, by: 2 }));
        assert_eq!(core.state.cpu.as_ref().unwrap().id, 2);
    }

    #[test]
    fn non_preemptive_priority_lets_the_occupant_finish() {
        let mut core = core(Algorithm::PriorityNp);
        core.add_process(1, "P1", 0, 6, 3);
        core.add_process(2, "P2", 2, 2, 1);
        run_to_completion(&mut core);

        let order: Vec<_> = core.state.finished.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 2]);
    }

    #[test]
    fn priority_np_picks_highest_priority_on_dispatch() {
        let mut core = core(Algorithm::PriorityNp);
        core.add_process(1, "P1", 0, 2, 5);
        core.add_process(2, "P2", 0, 2, 3);
        core.add_process(3, "P3", 0, 2, 4);
        run_to_completion(&mut core);

        let order: Vec<_> = core.state.finished.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn sjf_orders_by_burst_once_cpu_frees() {
        let mut core = core(Algorithm::Sjf);
        core.add_process(1, "P1", 0, 6, 0);
        core.add_process(2, "P2", 1, 4, 0);
        core.add_process(3, "P3", 2, 1, 0);
        run_to_completion(&mut core);

        // SJF is non-preemptive: P1 holds the CPU, then shortest-first.
        let order: Vec<_> = core.state.finished.iter().map(|p| p.id).collect();
        assert_eq!(order, vec![1, 3, 2]);
    }

    #[test]
    fn aging_boosts_after_threshold_and_resets_counter() {
        let mut core = core(Algorithm::Priority);
        core.set_aging(true);
        core.set_aging_threshold(5);
        core.add_process(1, "P1", 0, 12, 0);
        core.add_process(2, "P2", 0, 3, 8);

        // P2 waits ticks 0..4; the fifth wait triggers the boost.
        for _ in 0..4 {
            core.tick();
        }
        let queued = &core.state.ready_queue[0];
        assert_eq!(queued.priority, 8);
        assert_eq!(queued.age, 4);

        let trace = core.tick();
        let queued = &core.state.ready_queue[0];
        assert_eq!(queued.priority, 7);
        assert_eq!(queued.age, 0);
        assert!(trace.events.contains(&TickEvent::Aged { id: 2, priority: 7 }));
    }

    #[test]
    fn partial_age_survives_a_dispatch() {
        let mut core = core(Algorithm::RoundRobin);
        core.set_time_quantum(2);
        core.set_aging(true);
        core.set_aging_threshold(5);
        core.add_process(1, "P1", 0, 4, 2);
        core.add_process(2, "P2", 0, 6, 2);

        // P2 waits two ticks, runs two, and requeues with its age intact.
        core.tick();
        core.tick();
        assert_eq!(core.state.ready_queue[0].age, 2);
        core.tick();
        core.tick();
        let p2 = core
            .state
            .ready_queue
            .iter()
            .chain(core.state.cpu.iter())
            .find(|p| p.id == 2)
            .unwrap();
        assert_eq!(p2.age, 2);
    }

    #[test]
    fn aging_priority_saturates_at_zero() {
        let mut core = core(Algorithm::Priority);
        core.set_aging(true);
        core.set_aging_threshold(1);
        core.add_process(1, "P1", 0, 6, 0);
        core.add_process(2, "P2", 0, 2, 1);

        for _ in 0..4 {
            core.tick();
        }
        let p2 = core
            .state
            .ready_queue
            .iter()
            .chain(core.state.cpu.iter())
            .chain(core.state.finished.iter())
            .find(|p| p.id == 2)
            .unwrap();
        assert_eq!(p2.priority, 0);
    }

    #[test]
    fn snapshot_is_idempotent_between_ticks() {
        let mut core = core(Algorithm::RoundRobin);
        core.add_process(1, "P1", 0, 3, 0);
        core.add_process(2, "P2", 1, 2, 0);
        core.tick();
        core.tick();

        assert_eq!(core.snapshot(), core.snapshot());
    }

    #[test]
    fn last_executed_survives_completion_of_the_occupant() {
        let mut core = core(Algorithm::Fcfs);
        core.add_process(1, "P1", 0, 1, 0);
        core.tick();

        // The CPU slot is already empty, but the snapshot still reports what
        // ran during the preceding tick.
        let snapshot = core.snapshot();
        assert!(snapshot.cpu_process.is_none());
        assert_eq!(snapshot.last_executed.unwrap().id, 1);

        // An idle tick clears the memo.
        core.state.submit(Process::new(2, "P2", 99, 1, 0));
        core.tick();
        assert!(core.snapshot().last_executed.is_none());
    }

    #[test]
    fn idle_gap_between_arrivals_is_traced() {
        let mut core = core(Algorithm::Fcfs);
        core.add_process(1, "P1", 0, 1, 0);
        core.add_process(2, "P2", 3, 1, 0);

        core.tick();
        let trace = core.tick();
        assert!(trace.was_idle());
        assert!(!core.is_finished());

        while !core.is_finished() {
            core.tick();
        }
        assert_eq!(completion(&core, 2), 4);
    }

    #[test]
    fn waiting_time_accrues_only_while_queued() {
        let mut core = core(Algorithm::Fcfs);
        core.add_process(1, "P1", 0, 5, 0);
        core.add_process(2, "P2", 1, 3, 0);
        run_to_completion(&mut core);

        let p2 = core.state.finished.iter().find(|p| p.id == 2).unwrap();
        // Queued from t=1 until its dispatch at t=5.
        assert_eq!(p2.waiting_time, 4);
    }
}
