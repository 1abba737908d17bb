//!
//! Shared utilities for the renewer workspace. Currently this is the
//! logging bootstrap ([`log::init_logger`]) and the log macros re-exported
//! at the crate root.
//!

extern crate self as hns_core;

pub mod log;
