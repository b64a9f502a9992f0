//! Request parameters, metric rows, and the response envelope.

pub mod metrics;
pub mod params;
