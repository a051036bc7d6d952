use anyhow::Result;
use grover_qsim::{grover, histogram, sampler, QState};

const NUM_OF_QBITS: usize = 4;
const MARKED_STATES: [&str; 2] = ["1110", "1101"];
const SHOTS: u32 = 1024;
const HISTOGRAM_FILE: &str = "grover_histogram.png";

fn main() -> Result<()> {
    let iterations = grover::optimal_iterations(NUM_OF_QBITS);
    println!(
        "Searching for {:?} with {} amplification rounds",
        MARKED_STATES, iterations
    );

    let circuit = grover::build_search_circuit(NUM_OF_QBITS, &MARKED_STATES)?;
    let state = circuit.apply(&QState::zero_state(NUM_OF_QBITS))?;

    let mut rng = rand::rng();
    let counts = sampler::sample_counts(&state, SHOTS, &mut rng)?;

    let mut sorted: Vec<_> = counts.iter().collect();
    sorted.sort();
    for (outcome, count) in sorted {
        println!("|{}>: {}", outcome, count);
    }

    histogram::plot_histogram(&counts, NUM_OF_QBITS, HISTOGRAM_FILE)?;
    println!("Histogram saved to '{}'", HISTOGRAM_FILE);

    Ok(())
}
