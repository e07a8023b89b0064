//! Diff two model sets into a bulk transaction.
//!
//! Models are matched by `id`. Structurally equal models produce nothing; the desired side
//! is taken as-is, without deduplication.

use std::collections::{HashMap, HashSet};

use serde::Serialize;
use serde_json::{json, Value};

use crate::contract::{CustomType, ModelSet, SharedSlice};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ModelKind {
    CustomType,
    Slice,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Insert,
    Update,
    Delete,
}

/// One change in a bulk transaction.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BulkOperation {
    #[serde(rename = "type")]
    pub kind: ModelKind,
    pub id: String,
    pub operation: ChangeKind,
    pub payload: Value,
}

/// Ordered changes turning the existing set into the desired set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BulkTransaction {
    pub changes: Vec<BulkOperation>,
}

impl BulkTransaction {
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn count(&self, kind: ModelKind, operation: ChangeKind) -> usize {
        self.changes
            .iter()
            .filter(|c| c.kind == kind && c.operation == operation)
            .count()
    }
}

/// Anything with an identity that can be sent as a payload.
trait Model: Serialize + PartialEq {
    const KIND: ModelKind;
    fn id(&self) -> &str;
}

impl Model for CustomType {
    const KIND: ModelKind = ModelKind::CustomType;
    fn id(&self) -> &str {
        &self.id
    }
}

impl Model for SharedSlice {
    const KIND: ModelKind = ModelKind::Slice;
    fn id(&self) -> &str {
        &self.id
    }
}

fn payload<M: Model>(model: &M) -> Value {
    // Both model types are a string id plus a JSON map, which always serializes.
    serde_json::to_value(model).unwrap_or_else(|_| json!({ "id": model.id() }))
}

/// Inserts and updates, in desired order.
fn upserts<M: Model>(existing: &[M], desired: &[M]) -> Vec<BulkOperation> {
    let by_id: HashMap<&str, &M> = existing.iter().map(|m| (m.id(), m)).collect();
    desired
        .iter()
        .filter_map(|model| {
            let operation = match by_id.get(model.id()) {
                None => ChangeKind::Insert,
                Some(current) if *current != model => ChangeKind::Update,
                Some(_) => return None,
            };
            Some(BulkOperation {
                kind: M::KIND,
                id: model.id().to_string(),
                operation,
                payload: payload(model),
            })
        })
        .collect()
}

/// Deletes, in existing order.
fn deletes<M: Model>(existing: &[M], desired: &[M]) -> Vec<BulkOperation> {
    let wanted: HashSet<&str> = desired.iter().map(|m| m.id()).collect();
    existing
        .iter()
        .filter(|m| !wanted.contains(m.id()))
        .map(|m| BulkOperation {
            kind: M::KIND,
            id: m.id().to_string(),
            operation: ChangeKind::Delete,
            payload: json!({ "id": m.id() }),
        })
        .collect()
}

/// Compare `existing` (remote) with `desired` (local).
///
/// Order: slice upserts, custom type upserts, custom type deletes, slice deletes. Custom
/// types may reference slices, so slices exist before and outlive the types using them.
pub fn build_transaction(existing: &ModelSet, desired: &ModelSet) -> BulkTransaction {
    let mut changes = upserts(&existing.slices, &desired.slices);
    changes.extend(upserts(&existing.custom_types, &desired.custom_types));
    changes.extend(deletes(&existing.custom_types, &desired.custom_types));
    changes.extend(deletes(&existing.slices, &desired.slices));
    BulkTransaction { changes }
}
