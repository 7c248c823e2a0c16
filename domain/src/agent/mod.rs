//! Agent subdomain: who participates in a council run and what they produce.
//!
//! - [`spec::AgentSpec`] - one configured specialist (immutable once loaded)
//! - [`roster::Roster`] - the ordered list of agents for a run
//! - [`fragment::Fragment`] - a unit of generated text, possibly degraded
//! - [`result::AgentResult`] / [`result::RunResults`] - per-agent and per-run output

pub mod fragment;
pub mod result;
pub mod roster;
pub mod spec;
