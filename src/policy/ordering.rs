//! Dispatch orderings and preemption rules.
//!
//! Each policy that orders the ready queue does so with a full key chain so
//! that simultaneous events resolve deterministically: the primary key, then
//! arrival time, then process id. Preemption candidates break ties on id
//! alone, matching the dispatch winner for equal keys.

use std::cmp::Ordering;

use super::Algorithm;
use crate::core::Process;

fn sjf_order(a: &Process, b: &Process) -> Ordering {
    a.burst_time
        .cmp(&b.burst_time)
        .then(a.arrival_time.cmp(&b.arrival_time))
        .then(a.id.cmp(&b.id))
}

fn srtf_order(a: &Process, b: &Process) -> Ordering {
    a.remaining_time
        .cmp(&b.remaining_time)
        .then(a.arrival_time.cmp(&b.arrival_time))
        .then(a.id.cmp(&b.id))
}

fn priority_order(a: &Process, b: &Process) -> Ordering {
    a.priority
        .cmp(&b.priority)
        .then(a.arrival_time.cmp(&b.arrival_time))
        .then(a.id.cmp(&b.id))
}

/// Reorders the ready queue for the next dispatch decision. FCFS and RR
/// keep arrival/requeue order untouched.
pub fn sort_for_dispatch(algorithm: Algorithm, ready_queue: &mut [Process]) {
    match algorithm {
        Algorithm::Fcfs | Algorithm::RoundRobin => {}
        Algorithm::Sjf => ready_queue.sort_by(sjf_order),
        Algorithm::Srtf => ready_queue.sort_by(srtf_order),
        Algorithm::Priority | Algorithm::PriorityNp => ready_queue.sort_by(priority_order),
    }
}

/// The queued process that would preempt the running one under SRTF:
/// minimal (remaining, id), and only if strictly shorter than the occupant.
pub fn srtf_challenger<'q>(ready_queue: &'q [Process], running: &Process) -> Option<&'q Process> {
    ready_queue
        .iter()
        .min_by(|a, b| {
            a.remaining_time
                .cmp(&b.remaining_time)
                .then(a.id.cmp(&b.id))
        })
        .filter(|candidate| candidate.remaining_time < running.remaining_time)
}

/// The queued process that would preempt the running one under preemptive
/// Priority: minimal (priority, id), and only on a strictly lower value.
pub fn priority_challenger<'q>(
    ready_queue: &'q [Process],
    running: &Process,
) -> Option<&'q Process> {
    ready_queue
        .iter()
        .min_by(|a, b| a.priority.cmp(&b.priority).then(a.id.cmp(&b.id)))
        .filter(|candidate| candidate.priority < running.priority)
}
