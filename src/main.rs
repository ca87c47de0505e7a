use average::Estimate;
use rand::prelude::*;
use sched_sim::{sim::workload::reference_workload, Algorithm, ProcessSpec, SchedConfig, Sim};

const TICK_CAP: u64 = 10_000;

const ALGORITHMS: [Algorithm; 6] = [
    Algorithm::Fcfs,
    Algorithm::Sjf,
    Algorithm::Srtf,
    Algorithm::RoundRobin,
    Algorithm::Priority,
    Algorithm::PriorityNp,
];

fn main() {
    trace_reference_run();

    let specs = bernoulli_workload(200, 0.3, 0.3, 2, 6, 0);
    println!("Random workload: {} processes\n", specs.len());
    println!(
        "{:<12} {:>10} {:>12} {:>10}",
        "Algorithm", "Avg Wait", "Avg Turnrnd", "Avg Resp"
    );

    for algorithm in ALGORITHMS {
        let mut config = SchedConfig::new(algorithm);
        config.set_time_quantum(2);
        let mut sim = Sim::new(config, specs.clone());

        match sim.run_to_completion(TICK_CAP) {
            Ok(_) => {}
            Err(err) => {
                eprintln!("warning: {algorithm}: {err:?}; statistics cover finished processes only");
            }
        }

        let wait = avg(sim.finished_metric(|p| p.waiting_time));
        let turnaround = avg(sim.finished_metric(|p| p.turnaround_time));
        let response = avg(sim.finished_metric(|p| p.response_time.unwrap_or(0)));

        println!("{algorithm:<12} {wait:>10.2} {turnaround:>12.2} {response:>10.2}");
    }
}

/// Tick-by-tick trace of the reference workload under RR, followed by the
/// finished-process statistics table.
fn trace_reference_run() {
    let mut config = SchedConfig::new(Algorithm::RoundRobin);
    config.set_time_quantum(2);
    let mut sim = Sim::new(config, reference_workload());

    println!("Algorithm: RR (Q=2)");
    while !sim.is_complete() {
        println!("{}", sim.step());
    }

    println!("\n{:<6} {:>12} {:>12} {:>10}", "ID", "Waiting", "Turnaround", "Response");
    for p in &sim.core.state.finished {
        println!(
            "{:<6} {:>12} {:>12} {:>10}",
            p.id,
            p.waiting_time,
            p.turnaround_time,
            p.response_time.unwrap_or(0)
        );
    }
    println!(
        "\nAverage Waiting Time: {:.2}",
        avg(sim.finished_metric(|p| p.waiting_time))
    );
    println!(
        "Average Turnaround Time: {:.2}\n",
        avg(sim.finished_metric(|p| p.turnaround_time))
    );
}

fn bernoulli_workload(
    ticks: u64,
    p_arrival: f64,
    p_short: f64,
    short_ticks: u64,
    long_ticks: u64,
    seed: u64,
) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut specs = Vec::new();

    for t in 0..ticks {
        if rng.random::<f64>() < p_arrival {
            let burst = if rng.random::<f64>() < p_short {
                short_ticks
            } else {
                long_ticks
            };
            let id = specs.len() as u32 + 1;
            let priority = rng.random_range(0..8);

            specs.push(ProcessSpec::new(id, format!("P{id}"), t, burst, priority));
        }
    }

    specs
}

fn avg(iter: impl Iterator<Item = f64>) -> f64 {
    iter.collect::<average::Mean>().estimate()
}
