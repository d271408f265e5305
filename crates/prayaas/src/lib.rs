//! An interactive client for the Prayaas health assistant.
//!
//! The crate includes a CLI tool for using in the terminal. And you can also
//! use it as a library to put the conversation session and the diagnosis
//! workflow side by side in your own host apps.

#![deny(missing_docs)]

#[allow(unused_imports)]
#[macro_use]
extern crate tracing;

mod desk;

pub use desk::{Desk, DeskBuilder};

/// Re-exports of [`prayaas_core`] crate.
pub mod core {
    pub use prayaas_core::*;
}

/// Re-exports of [`prayaas_service`] crate.
pub mod service {
    pub use prayaas_service::*;
}

/// Re-exports of [`prayaas_http_service`] crate.
pub mod http {
    pub use prayaas_http_service::*;
}
