//! Sequence-aware inference over the squid-hunt board table.
//!
//! The game draws each round's layout from one long pseudo-random stream.
//! A precomputed **board table** records that stream as catalog indices,
//! one per step. Knowing which layouts earlier rounds realized, plus a
//! Gaussian belief over how many steps separate rounds, pins down *where in
//! the table* the current round is likely to be, and therefore which
//! layouts it can be.
//!
//! - [`table`]: validated board table ingestion
//! - [`chain`]: round history and the windowed chain scan producing
//!   per-layout weights
//! - [`matcher`]: lazy search for an observed index sequence in the table
//! - [`disambiguate`]: resolving which layout a completed round was
//! - [`solver`]: the flat-buffer facade tying catalog, table, and cache
//!   together

pub use self::{chain::*, disambiguate::*, matcher::*, solver::*, table::*};

pub mod chain;
pub mod disambiguate;
pub mod matcher;
pub mod solver;
pub mod table;
