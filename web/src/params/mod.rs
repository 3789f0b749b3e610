//! This module holds typed parameters for various endpoint inputs.
//!
//! Each parameter type is a struct deserialized from a request's query string or
//! JSON body, so inputs are validated by type before they reach the domain layer.

pub(crate) mod attendance;
pub(crate) mod audit_log;
pub(crate) mod enrollment;
pub(crate) mod transfer;
