//! HTTP helpers for JSON endpoints.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` holds the request/response contract (header merge, JSON decoding,
//! error normalisation); `transport` holds the concrete HTTP clients it can
//! run over: `gloo-net` in the browser, `reqwest` natively.

pub mod api;
pub mod transport;
