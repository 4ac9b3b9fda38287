//! Basis selection and sifting on a short transcript.

use bb84_qkd_sim::prelude::*;

fn main() -> Result<(), ValidationError> {
    println!("BB84 Basis Selection Demonstration");

    let result = run_simulation(&SimulationParameters::default().with_n_bits(10).with_seed(3))?;

    let bases = |v: &[Basis]| v.iter().map(|b| b.symbol()).collect::<String>();
    println!("Alice's bases: {}", bases(result.alice_bases()));
    println!("Bob's bases:   {}", bases(result.bob_bases()));
    println!("Matching positions: {:?}", result.sift_idx());
    println!("Sifted key:         {:?}", result.sifted_key());
    println!("Revealed sample:    {:?}", result.sample_positions());
    println!("Match rate: {:.0}%", result.match_rate() * 100.0);
    Ok(())
}
