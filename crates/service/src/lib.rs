//! Contracts for the remote services the client talks to.
//!
//! The client depends on two independent collaborators: an assistant that
//! answers chat messages, and a diagnosis service that analyzes an uploaded
//! report and renders a downloadable document. This crate only describes
//! their request/response shapes and the errors they may produce, so the
//! state machines in `prayaas-core` can be driven by the real HTTP backends
//! or by the scripted fakes used in tests alike.
//!
//! Types in this crate don't define any behavior beyond validation of the
//! values they carry.

#![deny(missing_docs)]

mod artifact;
mod chat;
mod diagnosis;
mod error;
mod service;

pub use artifact::*;
pub use chat::*;
pub use diagnosis::*;
pub use error::*;
pub use service::*;
