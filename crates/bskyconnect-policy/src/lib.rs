//! Follow/unfollow policy for a Bluesky account.
//!
//! Listings are pulled eagerly by [`source`], each profile is classified by
//! [`classify`], a single action is chosen by [`decision`], and
//! [`executor`] carries it out against the service. [`engine`] sequences
//! those steps for the followers and follows programs.

pub mod classify;
pub mod decision;
pub mod engine;
pub mod executor;
pub mod source;

pub use classify::{Activity, Influence, InfluenceThresholds};
pub use decision::{Action, Decision, Reason};
pub use engine::{PolicyEngine, RunOutcome, RunReport};
pub use executor::{ActionExecutor, ActionOutcome, Tally};
pub use source::{list_followers, list_follows};
