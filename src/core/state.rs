use std::mem;

pub type ProcessId = u32;
pub type Ticks = u64;

/// Process control block: static inputs plus the timing metrics the
/// simulation accumulates for it.
#[derive(Debug, Clone)]
pub struct Process {
    pub id: ProcessId,
    pub name: String,
    pub arrival_time: Ticks,
    pub burst_time: Ticks,
    // Lower value = higher priority
    pub priority: u32,
    pub original_priority: u32,

    pub remaining_time: Ticks,
    pub start_time: Option<Ticks>,
    pub completion_time: Option<Ticks>,
    pub waiting_time: Ticks,
    pub turnaround_time: Ticks,
    pub response_time: Option<Ticks>,
    // Ticks waited since the last priority boost; reset only by a boost
    pub age: Ticks,
}

impl Process {
    pub fn new(
        id: ProcessId,
        name: impl Into<String>,
        arrival_time: Ticks,
        burst_time: Ticks,
        priority: u32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            arrival_time,
            burst_time,
            priority,
            original_priority: priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
            waiting_time: 0,
            turnaround_time: 0,
            response_time: None,
            age: 0,
        }
    }
}

/// Record of the process that ran during the preceding tick. Kept separately
/// from the CPU slot: by the time a caller inspects state, the slot may
/// already be empty or hold a different process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Executed {
    pub id: ProcessId,
    pub name: String,
}

/// The engine's owned state: four mutually exclusive collections plus clock
/// and quantum accounting. Every submitted process lives in exactly one of
/// `job_pool`, `ready_queue`, `cpu`, or `finished` at any instant.
#[derive(Debug, Default)]
pub struct SchedState {
    pub now: Ticks,
    pub job_pool: Vec<Process>,
    pub ready_queue: Vec<Process>,
    pub cpu: Option<Process>,
    pub finished: Vec<Process>,
    pub quantum_used: Ticks,
    pub last_executed: Option<Executed>,

    // Incremented upon process submission
    submitted: usize,
}

impl SchedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn submit(&mut self, process: Process) {
        self.job_pool.push(process);
        self.submitted += 1;
    }

    pub fn submitted(&self) -> usize {
        self.submitted
    }

    /// Drains every pool entry with `arrival_time <= now`, preserving
    /// relative input order among equal arrival times.
    pub fn take_arrivals(&mut self) -> Vec<Process> {
        let now = self.now;
        let pool = mem::take(&mut self.job_pool);
        let mut arrived = Vec::new();
        for process in pool {
            if process.arrival_time <= now {
                arrived.push(process);
            } else {
                self.job_pool.push(process);
            }
        }
        arrived
    }

    /// Moves the running process (if any) to the back of the ready queue
    /// and resets the quantum counter.
    pub fn preempt_running(&mut self) {
        if let Some(process) = self.cpu.take() {
            self.ready_queue.push(process);
            self.quantum_used = 0;
        }
    }

    /// Moves the front of the ready queue onto the CPU. On a process's
    /// first dispatch, records its start and response times.
    pub fn dispatch_front(&mut self) {
        debug_assert!(self.cpu.is_none(), "dispatch with an occupied CPU");

        let mut process = self.ready_queue.remove(0);
        self.quantum_used = 0;

        if process.start_time.is_none() {
            process.start_time = Some(self.now);
            process.response_time = Some(self.now - process.arrival_time);
        }

        self.cpu = Some(process);
    }

    /// Retires the running process: stamps completion and turnaround, moves
    /// it to the finished list, and leaves the CPU idle.
    pub fn complete_running(&mut self) {
        if let Some(mut process) = self.cpu.take() {
            let completion = self.now + 1;
            process.completion_time = Some(completion);
            process.turnaround_time = completion - process.arrival_time;
            self.finished.push(process);
            self.quantum_used = 0;
        }
    }

    pub fn is_drained(&self) -> bool {
        self.job_pool.is_empty() && self.ready_queue.is_empty() && self.cpu.is_none()
    }
}
