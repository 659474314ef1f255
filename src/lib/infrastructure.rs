//! Infrastructure adapters

pub mod google;
pub mod http;
