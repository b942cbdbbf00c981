//! Scheduler systems.
//!
//! Submodules overview
//! - [`actions`] – advance the non-send [`crate::actions::Registry`] once per frame
//! - [`time`] – update simulation time and delta

pub mod actions;
pub mod time;
