//! # powerbind-domain
//!
//! Pure domain model for binding UPS front-panel controls to serial commands.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, timestamps
//! - Define **control kinds** (beeper, battery tests, shutdown, cancel, …)
//! - Hold the **command catalog**: default activate/deactivate strings per kind
//! - Enforce the **command grammar** on user overrides before anything is bound
//! - Define **declarations** (what the user asked for) and **state changes**
//! - Classify raw device replies into ACK / NAK / silence
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app` or external IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod control;
pub mod reply;
