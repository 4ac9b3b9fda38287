//! BB84 simulator front end: single runs, eavesdropping sweeps, or both.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use bb84_qkd_sim::config::AppConfig;
use bb84_qkd_sim::params::SimulationParameters;
use bb84_qkd_sim::simulation::{execute, Commands, RunResult, Session};
use bb84_qkd_sim::sweep::{theoretical_qber, SweepConfig, SweepCurve};

/// Number of leading qubits shown in the transcript preview.
const PREVIEW_LEN: usize = 32;

#[derive(Debug, Parser)]
#[command(
    name = "bb84-sim",
    about = "BB84 QKD simulator: intercept-resend eavesdropping, sifting and QBER",
    version
)]
struct Cli {
    /// Path to a TOML config with [simulation] and [sweep] tables
    #[arg(long = "config", value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Print the result as JSON instead of tables
    #[arg(long, global = true)]
    json: bool,

    #[command(flatten)]
    sim: SimArgs,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the protocol once
    Run,
    /// Trace QBER against eavesdropping strength
    Sweep(SweepArgs),
    /// Run once and sweep, like the dashboard view
    Dashboard(SweepArgs),
}

#[derive(Debug, Args)]
struct SimArgs {
    /// Number of qubits Alice sends
    #[arg(long, global = true)]
    n_bits: Option<usize>,
    /// Put Eve on the channel with this interception probability
    #[arg(long, value_name = "STRENGTH", global = true)]
    eve: Option<f64>,
    /// Remove Eve even if the config enables her
    #[arg(long, conflicts_with = "eve", global = true)]
    no_eve: bool,
    /// Independent bit-flip probability
    #[arg(long, global = true)]
    noise: Option<f64>,
    /// Fraction of sifted bits revealed for the estimate
    #[arg(long, global = true)]
    sample_fraction: Option<f64>,
    /// Abort threshold on the QBER
    #[arg(long, global = true)]
    threshold: Option<f64>,
    #[arg(long, global = true)]
    seed: Option<u64>,
}

#[derive(Debug, Args)]
struct SweepArgs {
    #[arg(long)]
    min: Option<f64>,
    #[arg(long)]
    max: Option<f64>,
    /// Number of strengths, endpoints included
    #[arg(long)]
    steps: Option<usize>,
    /// Runs averaged per strength
    #[arg(long)]
    trials: Option<usize>,
}

impl SimArgs {
    fn apply(&self, mut params: SimulationParameters) -> SimulationParameters {
        if let Some(n) = self.n_bits {
            params.n_bits = n;
        }
        if let Some(s) = self.eve {
            params = params.with_eve(s);
        }
        if self.no_eve {
            params = params.without_eve();
        }
        if let Some(p) = self.noise {
            params.channel_noise = p;
        }
        if let Some(f) = self.sample_fraction {
            params.sample_fraction = f;
        }
        if let Some(t) = self.threshold {
            params.qber_threshold = t;
        }
        if let Some(seed) = self.seed {
            params.seed = seed;
        }
        params
    }
}

impl SweepArgs {
    fn apply(&self, mut cfg: SweepConfig) -> SweepConfig {
        if let Some(min) = self.min {
            cfg.min_strength = min;
        }
        if let Some(max) = self.max {
            cfg.max_strength = max;
        }
        if let Some(steps) = self.steps {
            cfg.steps = steps;
        }
        if let Some(trials) = self.trials {
            cfg.trials = trials;
        }
        cfg
    }
}

fn format_qber(qber: Option<f64>) -> String {
    match qber {
        Some(q) => format!("{:.2}%", q * 100.0),
        None => "n/a".to_string(),
    }
}

fn print_run(res: &RunResult) {
    let p = res.params();
    println!("━━━ BB84 run ━━━");
    println!();
    println!(
        "  n_bits={}  eve={}  noise={}  sample_fraction={}  threshold={}  seed={}",
        p.n_bits,
        if p.eve_present {
            format!("{:.2}", p.eve_strength)
        } else {
            "off".to_string()
        },
        p.channel_noise,
        p.sample_fraction,
        p.qber_threshold,
        p.seed
    );
    println!();
    println!("  {:>10}  {:>10}  {:>10}  {:>14}", "Sifted", "Sampled", "QBER", "Decision");
    println!("  {:─>10}  {:─>10}  {:─>10}  {:─>14}", "", "", "", "");
    println!(
        "  {:>10}  {:>10}  {:>10}  {:>14}",
        res.sifted_len(),
        res.sample_len(),
        format_qber(res.qber()),
        res.decision()
    );
    println!();
    println!(
        "  Basis match rate: {:.2}%   Intercepted: {}   Key bits left: {}",
        res.match_rate() * 100.0,
        res.intercepted(),
        res.remaining_key().len()
    );
    println!();

    let shown = res.n_bits().min(PREVIEW_LEN);
    let bits = |v: &[bool]| -> String { v[..shown].iter().map(|&b| if b { '1' } else { '0' }).collect() };
    let matches = res.basis_matches();
    println!("  Alice bits   {}", bits(res.alice_bits()));
    println!(
        "  Alice bases  {}",
        res.alice_bases()[..shown].iter().map(|b| b.symbol()).collect::<String>()
    );
    println!(
        "  Bob bases    {}",
        res.bob_bases()[..shown].iter().map(|b| b.symbol()).collect::<String>()
    );
    println!("  Bob bits     {}", bits(res.bob_bits()));
    println!(
        "  Sifted       {}",
        matches[..shown].iter().map(|&m| if m { '^' } else { ' ' }).collect::<String>()
    );
    println!();
}

fn print_curve(curve: &SweepCurve, noise: f64) {
    println!("━━━ QBER vs eavesdropping strength ━━━");
    println!();
    println!(
        "  {:>8}  {:>10}  {:>10}  {:>12}  {:>8}",
        "Strength", "QBER", "Std dev", "Theoretical", "Trials"
    );
    println!("  {:─>8}  {:─>10}  {:─>10}  {:─>12}  {:─>8}", "", "", "", "", "");
    for p in curve.points() {
        println!(
            "  {:>8.3}  {:>10}  {:>10.4}  {:>11.2}%  {:>4}/{:<3}",
            p.eve_strength,
            format_qber(p.qber),
            p.std_dev,
            theoretical_qber(p.eve_strength, noise) * 100.0,
            p.defined_trials,
            p.trials
        );
    }
    println!();
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let file_config = match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AppConfig::default(),
    };

    let params = cli.sim.apply(file_config.simulation);
    let (cmds, sweep_cfg) = match &cli.cmd {
        Command::Run => (Commands { run: true, sweep: false }, file_config.sweep),
        Command::Sweep(args) => (Commands { run: false, sweep: true }, args.apply(file_config.sweep)),
        Command::Dashboard(args) => (Commands { run: true, sweep: true }, args.apply(file_config.sweep)),
    };

    let session: Session = execute(&params, &cmds, &sweep_cfg).context("invalid parameters")?;

    if cli.json {
        let text = serde_json::to_string_pretty(&session).context("serializing result")?;
        println!("{}", text);
        return Ok(());
    }

    if let Some(res) = &session.run {
        print_run(res);
    }
    if let Some(curve) = &session.curve {
        print_curve(curve, params.channel_noise);
    }
    Ok(())
}
