//! crdform Kube - Cluster side of the crdform provider
//!
//! This crate provides:
//! - **ApplyClient**: Server-side apply, get and delete for one object, backed by kube-rs
//! - **ConditionPoller**: Waits for a path to reach a value, or for an object to disappear
//! - **ResourceLifecycle**: Create/Read/Update/Delete/Import turning errors into diagnostics
//! - **DataSource**: Read-only lookup of a live object
//! - **MockApplyClient**: In-memory cluster with scripted responses for testing

pub mod client;
pub mod data_source;
pub mod error;
pub mod lifecycle;
pub mod mock;
pub mod poller;

pub use client::{ApplyClient, KubeApplyClient, ObjectSnapshot, apply_params};
pub use data_source::DataSource;
pub use error::{KubeError, Result};
pub use lifecycle::{Operation, OperationResult, ResourceLifecycle};
pub use mock::{ApplyRequest, MockApplyClient, MockResponse, OperationCounts};
pub use poller::{ConditionPoller, PollOutcome};
