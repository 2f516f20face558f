//! Review findings and model response decoding.
//!
//! - [`issue::Issue`] / [`issue::Severity`]: a finding for one clause
//! - [`decoding::decode_issues`]: strict decoding of the model's JSON answer

pub mod decoding;
pub mod issue;
