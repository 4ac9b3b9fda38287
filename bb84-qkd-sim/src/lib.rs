//! # bb84-qkd-sim
//!
//! Classical-outcome simulation of the BB84 quantum key distribution
//! protocol: random preparation, an optional intercept-resend eavesdropper,
//! channel noise, basis sifting, public-sample QBER estimation and an
//! accept/reject decision, plus a sweep tracing QBER against eavesdropping
//! intensity.
//!
//! ## Model
//!
//! Qubits are tracked as (bit, basis) pairs with the BB84 measurement rule:
//! a matching basis reads the bit, a conjugate basis yields a fair coin. This
//! reproduces the protocol's observable statistics without state vectors.
//! Full interception pushes the sifted QBER to 25%.
//!
//! ## Usage
//!
//! ```no_run
//! use bb84_qkd_sim::prelude::*;
//!
//! let params = SimulationParameters::default()
//!     .with_n_bits(2000)
//!     .with_eve(1.0);
//! let result = run_simulation(&params).unwrap();
//! match result.qber() {
//!     Some(q) => println!("QBER {:.2}% -> {}", q * 100.0, result.decision()),
//!     None => println!("no sample -> {}", result.decision()),
//! }
//!
//! let curve = sweep_eve_with(&params, &SweepConfig::default().with_trials(5)).unwrap();
//! for p in curve.points() {
//!     println!("{:.2} {:?}", p.eve_strength, p.qber);
//! }
//! ```

pub mod bb84_states;
pub mod channel;
pub mod config;
pub mod decision;
pub mod errors;
pub mod params;
pub mod qber;
pub mod random_source;
pub mod sifting;
pub mod simulation;
pub mod sweep;


pub mod prelude {
    pub use crate::bb84_states::*;
    pub use crate::channel::*;
    pub use crate::config::*;
    pub use crate::decision::*;
    pub use crate::errors::*;
    pub use crate::params::*;
    pub use crate::qber::*;
    pub use crate::random_source::*;
    pub use crate::sifting::*;
    pub use crate::simulation::*;
    pub use crate::sweep::*;
}
