//! Edgewalk core library.
//!
//! Samples connected, Euclidean-weighted graphs on a fixed planar vertex set
//! with a Metropolis-Hastings walk whose moves toggle single edges. Removing
//! a bridge is never proposed, so every visited graph stays connected.
//!
//! # Examples
//! ```
//! use edgewalk_core::{Point, SamplerBuilder};
//!
//! let vertices = [
//!     Point::new(0.0, 0.0),
//!     Point::new(2.0, 0.0),
//!     Point::new(1.0, 1.5),
//!     Point::new(0.5, 3.0),
//! ];
//! let sampler = SamplerBuilder::new().with_iterations(500).with_seed(3).build()?;
//! let report = sampler.run(&vertices)?;
//! let expectations = report.expectations().expect("budget is non-zero");
//! assert!(expectations.edge_count >= 3.0);
//! for topology in report.top_fraction() {
//!     println!("{}", topology.display(&vertices));
//! }
//! # Ok::<(), edgewalk_core::SamplerError>(())
//! ```
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod chain;
mod energy;
mod error;
mod graph;
mod point;
mod proposal;
mod report;
mod sampler;
mod topology;

#[cfg(test)]
mod test_utils;

pub use crate::{
    builder::{
        CandidateStrategy, DEFAULT_ITERATIONS, DEFAULT_SEED, DELTA_VERTEX_THRESHOLD,
        ExecutionStrategy, SamplerBuilder,
    },
    chain::{Chain, ChainStatistics, StepOutcome},
    energy::{EnergyModel, accepts, legal_move_count, proposal_probability},
    error::{ErrorClass, Result, SamplerError, SamplerErrorCode},
    graph::{Graph, PathSummary, pair_count},
    point::Point,
    proposal::{EdgeMove, Proposal, plan_move, propose},
    report::{Expectations, SamplingReport},
    sampler::{Sampler, mix_worker_seed, split_budget},
    topology::{FrequencyTable, TOP_FRACTION, TopologyDisplay, TopologyKey, top_fraction_len},
};
