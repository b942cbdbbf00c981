//! Ready-made action targets.
//!
//! - [`sprite`] – transform, alpha and texture key of a drawable
//! - [`attributes`] – string-keyed scalars for ad-hoc targets

pub mod attributes;
pub mod sprite;
