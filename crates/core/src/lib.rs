//! Client-side state machines: the conversation session and the
//! upload/diagnosis workflow.
//!
//! Both subsystems own their state explicitly and share nothing, so a host
//! can drive them side by side from one event loop. Every network-backed
//! operation is split into a synchronous dispatch, which applies the
//! optimistic state changes and hands back a pending future, and a settle
//! step that applies the outcome once the future resolves.

#![deny(missing_docs)]

#[macro_use]
extern crate tracing;

mod client;
pub mod conversation;
mod report_store;
pub mod sentinel;
mod session;
mod workflow;

pub use report_store::{DirectoryReportStore, ReportStore};
pub use session::{
    ConversationSession, ConversationSessionBuilder, PendingReply,
    ReplyOutcome,
};
pub use workflow::{
    DiagnosisOutcome, DiagnosisResult, DiagnosisWorkflow,
    DiagnosisWorkflowBuilder, PendingDiagnosis, PendingDownload,
};
