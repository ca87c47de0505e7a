//! Read-only state export.
//!
//! The snapshot is the entire observable surface for external callers: host
//! bindings serialize it as-is (field names form the wire schema), and
//! presentation layers treat one snapshot as immutable per call.

use serde::{Deserialize, Serialize};

use super::state::{ProcessId, SchedState, Ticks};
use crate::policy::Algorithm;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time: Ticks,
    pub algorithm: Algorithm,
    pub cpu_process: Option<CpuSnapshot>,
    pub last_executed: Option<ExecutedSnapshot>,
    pub ready_queue: Vec<ReadySnapshot>,
    pub job_pool: Vec<PoolSnapshot>,
    pub finished: Vec<FinishedSnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CpuSnapshot {
    pub id: ProcessId,
    pub name: String,
    pub remaining: Ticks,
    pub quantum_used: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutedSnapshot {
    pub id: ProcessId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadySnapshot {
    pub id: ProcessId,
    pub name: String,
    pub remaining: Ticks,
    pub priority: u32,
    pub age_counter: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolSnapshot {
    pub id: ProcessId,
    pub arrival: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinishedSnapshot {
    pub id: ProcessId,
    pub name: String,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub response_time: Option<Ticks>,
}

impl Snapshot {
    pub fn capture(state: &SchedState, algorithm: Algorithm) -> Self {
        Self {
            time: state.now,
            algorithm,
            cpu_process: state.cpu.as_ref().map(|p| CpuSnapshot {
                id: p.id,
                name: p.name.clone(),
                remaining: p.remaining_time,
                quantum_used: state.quantum_used,
            }),
            last_executed: state.last_executed.as_ref().map(|e| ExecutedSnapshot {
                id: e.id,
                name: e.name.clone(),
            }),
            ready_queue: state
                .ready_queue
                .iter()
                .map(|p| ReadySnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    remaining: p.remaining_time,
                    priority: p.priority,
                    age_counter: p.age,
                })
                .collect(),
            job_pool: state
                .job_pool
                .iter()
                .map(|p| PoolSnapshot {
                    id: p.id,
                    arrival: p.arrival_time,
                })
                .collect(),
            finished: state
                .finished
                .iter()
                .map(|p| FinishedSnapshot {
                    id: p.id,
                    name: p.name.clone(),
                    waiting_time: p.waiting_time,
                    turnaround_time: p.turnaround_time,
                    response_time: p.response_time,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::state::Process;

    #[test]
    fn empty_state_serializes_with_null_cpu_and_last_executed() {
        let state = SchedState::new();
        let snapshot = Snapshot::capture(&state, Algorithm::Fcfs);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["time"], 0);
        assert_eq!(json["algorithm"], "FCFS");
        assert!(json["cpu_process"].is_null());
        assert!(json["last_executed"].is_null());
        assert_eq!(json["ready_queue"].as_array().unwrap().len(), 0);
        assert_eq!(json["job_pool"].as_array().unwrap().len(), 0);
        assert_eq!(json["finished"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn entries_expose_the_wire_field_names() {
        let mut state = SchedState::new();
        state.submit(Process::new(4, "P4", 9, 2, 1));
        state.ready_queue.push(Process::new(2, "P2", 0, 3, 7));
        state.cpu = Some(Process::new(1, "P1", 0, 5, 0));
        state.quantum_used = 1;

        let snapshot = Snapshot::capture(&state, Algorithm::RoundRobin);
        let json = serde_json::to_value(&snapshot).unwrap();

        assert_eq!(json["algorithm"], "RR");
        assert_eq!(json["cpu_process"]["quantum_used"], 1);
        assert_eq!(json["ready_queue"][0]["age_counter"], 0);
        assert_eq!(json["ready_queue"][0]["priority"], 7);
        assert_eq!(json["job_pool"][0]["arrival"], 9);
    }
}
