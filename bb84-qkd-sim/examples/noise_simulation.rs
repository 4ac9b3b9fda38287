//! Channel noise alone: where does an honest channel start failing the threshold?

use bb84_qkd_sim::prelude::*;

fn main() -> Result<(), ValidationError> {
    println!("BB84 Protocol with Noise Simulation");
    println!();

    let base = SimulationParameters::default()
        .with_n_bits(4000)
        .without_eve()
        .with_qber_threshold(0.11);

    println!("  {:>6}  {:>10}  {:>14}", "Noise", "QBER", "Decision");
    for step in 0..=8 {
        let noise = step as f64 * 0.025;
        let result = run_simulation(&base.clone().with_channel_noise(noise))?;
        let q = result.qber().map(|q| format!("{:.4}", q)).unwrap_or_else(|| "n/a".into());
        println!("  {:>6.3}  {:>10}  {:>14}", noise, q, result.decision());
    }
    Ok(())
}
