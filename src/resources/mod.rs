//! ECS resources.
//!
//! - [`actionsconfig`] – INI-backed scheduler configuration
//! - [`framestore`] – named frame clips loaded from JSON
//! - [`worldtime`] – simulation clock

pub mod actionsconfig;
pub mod framestore;
pub mod worldtime;
