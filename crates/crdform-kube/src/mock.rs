//! Mock cluster for testing
//!
//! Holds objects in memory and lets tests script the sequence of GET
//! responses for a coordinate, which is how poller behavior is exercised
//! without a Kubernetes cluster.

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, RwLock};

use crdform_core::{FieldManagerConfig, ResourceCoordinate};

use crate::client::{ApplyClient, ObjectSnapshot};
use crate::error::{KubeError, Result};

/// A scripted GET response
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return this object
    Object(JsonValue),
    /// Report the object as absent
    NotFound,
    /// Fail with an API error
    Error { status: u16, message: String },
}

/// Counts of operations performed for testing assertions
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct OperationCounts {
    pub applies: usize,
    pub gets: usize,
    pub deletes: usize,
}

/// A recorded apply request
#[derive(Debug, Clone)]
pub struct ApplyRequest {
    pub coordinate: ResourceCoordinate,
    pub body: JsonValue,
    pub field_manager: FieldManagerConfig,
}

#[derive(Default)]
struct MockState {
    objects: HashMap<ResourceCoordinate, JsonValue>,
    scripted_gets: HashMap<ResourceCoordinate, VecDeque<MockResponse>>,
    conflicts: HashMap<ResourceCoordinate, String>,
    apply_errors: HashMap<ResourceCoordinate, (u16, String)>,
    applied: Vec<ApplyRequest>,
    counts: OperationCounts,
}

/// In-memory [`ApplyClient`] for testing
#[derive(Clone, Default)]
pub struct MockApplyClient {
    state: Arc<RwLock<MockState>>,
}

impl MockApplyClient {
    /// Create an empty mock cluster
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object
    pub fn insert_object(&self, coordinate: &ResourceCoordinate, object: JsonValue) {
        let mut state = self.state.write().unwrap();
        state.objects.insert(coordinate.clone(), object);
    }

    /// Current stored object, if any
    pub fn object(&self, coordinate: &ResourceCoordinate) -> Option<JsonValue> {
        self.state.read().unwrap().objects.get(coordinate).cloned()
    }

    /// Script GET responses for a coordinate
    ///
    /// Responses are consumed in order; the last one repeats forever.
    pub fn script_gets(&self, coordinate: &ResourceCoordinate, responses: Vec<MockResponse>) {
        let mut state = self.state.write().unwrap();
        state
            .scripted_gets
            .insert(coordinate.clone(), responses.into_iter().collect());
    }

    /// Make applies without force fail with a field conflict
    pub fn set_conflict(&self, coordinate: &ResourceCoordinate, message: impl Into<String>) {
        let mut state = self.state.write().unwrap();
        state.conflicts.insert(coordinate.clone(), message.into());
    }

    /// Make every apply to a coordinate fail with an API error
    pub fn fail_apply(&self, coordinate: &ResourceCoordinate, status: u16, message: impl Into<String>) {
        let mut state = self.state.write().unwrap();
        state
            .apply_errors
            .insert(coordinate.clone(), (status, message.into()));
    }

    /// Get operation counts for assertions
    pub fn operation_counts(&self) -> OperationCounts {
        self.state.read().unwrap().counts.clone()
    }

    /// Reset operation counts
    pub fn reset_counts(&self) {
        self.state.write().unwrap().counts = OperationCounts::default();
    }

    /// Apply requests received so far
    pub fn applied(&self) -> Vec<ApplyRequest> {
        self.state.read().unwrap().applied.clone()
    }
}

#[async_trait]
impl ApplyClient for MockApplyClient {
    async fn apply(
        &self,
        coordinate: &ResourceCoordinate,
        body: &JsonValue,
        field_manager: &FieldManagerConfig,
    ) -> Result<ObjectSnapshot> {
        let mut state = self.state.write().unwrap();
        state.counts.applies += 1;
        state.applied.push(ApplyRequest {
            coordinate: coordinate.clone(),
            body: body.clone(),
            field_manager: field_manager.clone(),
        });

        if let Some((status, message)) = state.apply_errors.get(coordinate) {
            return Err(KubeError::Api {
                status: *status,
                message: message.clone(),
            });
        }
        if !field_manager.force_conflicts {
            if let Some(message) = state.conflicts.get(coordinate) {
                return Err(KubeError::Conflict {
                    coordinate: coordinate.clone(),
                    message: message.clone(),
                });
            }
        }

        // Status is owned by the cluster and survives applies.
        let mut stored = body.clone();
        let previous_status = state
            .objects
            .get(coordinate)
            .and_then(|obj| obj.get("status"))
            .cloned();
        if let (Some(status), Some(obj)) = (previous_status, stored.as_object_mut()) {
            obj.insert("status".to_string(), status);
        }
        state.objects.insert(coordinate.clone(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, coordinate: &ResourceCoordinate) -> Result<ObjectSnapshot> {
        let mut state = self.state.write().unwrap();
        state.counts.gets += 1;

        let scripted = state.scripted_gets.get_mut(coordinate).and_then(|queue| {
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        });

        match scripted {
            Some(MockResponse::Object(obj)) => Ok(obj),
            Some(MockResponse::NotFound) => Err(KubeError::NotFound {
                coordinate: coordinate.clone(),
            }),
            Some(MockResponse::Error { status, message }) => Err(KubeError::Api { status, message }),
            None => state
                .objects
                .get(coordinate)
                .cloned()
                .ok_or_else(|| KubeError::NotFound {
                    coordinate: coordinate.clone(),
                }),
        }
    }

    async fn delete(&self, coordinate: &ResourceCoordinate) -> Result<()> {
        let mut state = self.state.write().unwrap();
        state.counts.deletes += 1;
        state.objects.remove(coordinate);
        Ok(())
    }
}
