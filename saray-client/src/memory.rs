//! In-memory resource client
//!
//! Keeps rows per kind, applies the same ordering as the hosted API and
//! records every call so callers can assert on remote traffic.

use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::Value;
use shared::models::{Chef, DiningTable, MenuItem, Reservation};
use shared::{Record, RecordInput, ResourceKind};
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::client::{ResourceClient, ensure_kind};
use crate::{ClientError, ClientResult};

/// Remote operation name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Select,
    Insert,
    Update,
    Delete,
}

/// One recorded call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCall {
    pub op: Operation,
    pub kind: ResourceKind,
    pub id: Option<String>,
}

impl RemoteCall {
    pub fn select(kind: ResourceKind) -> Self {
        Self {
            op: Operation::Select,
            kind,
            id: None,
        }
    }

    pub fn insert(kind: ResourceKind) -> Self {
        Self {
            op: Operation::Insert,
            kind,
            id: None,
        }
    }

    pub fn update(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            op: Operation::Update,
            kind,
            id: Some(id.into()),
        }
    }

    pub fn delete(kind: ResourceKind, id: impl Into<String>) -> Self {
        Self {
            op: Operation::Delete,
            kind,
            id: Some(id.into()),
        }
    }
}

#[derive(Default)]
struct MemoryState {
    rows: HashMap<ResourceKind, Vec<Record>>,
    calls: Vec<RemoteCall>,
    failing: HashSet<Operation>,
}

/// Resource client backed by process memory
#[derive(Default)]
pub struct MemoryClient {
    state: Mutex<MemoryState>,
}

impl MemoryClient {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed rows without recording a call
    pub fn with_records(records: impl IntoIterator<Item = Record>) -> Self {
        let client = Self::new();
        {
            let mut state = client.state.lock();
            for record in records {
                state.rows.entry(record.kind()).or_default().push(record);
            }
        }
        client
    }

    /// Calls issued so far, oldest first
    pub fn calls(&self) -> Vec<RemoteCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    /// Make the next call of `op` fail (the call is still recorded)
    pub fn fail_next(&self, op: Operation) {
        self.state.lock().failing.insert(op);
    }

    /// Stored rows of a kind, in insertion order
    pub fn stored(&self, kind: ResourceKind) -> Vec<Record> {
        self.state
            .lock()
            .rows
            .get(&kind)
            .cloned()
            .unwrap_or_default()
    }

    fn record_call(&self, call: RemoteCall) -> ClientResult<parking_lot::MutexGuard<'_, MemoryState>> {
        let mut state = self.state.lock();
        let op = call.op;
        state.calls.push(call);
        if state.failing.remove(&op) {
            return Err(ClientError::Unavailable(format!(
                "simulated {:?} failure",
                op
            )));
        }
        Ok(state)
    }
}

/// Build a stored record from a payload
fn materialize(id: String, fields: &RecordInput) -> Record {
    match fields.clone() {
        RecordInput::Table(t) => Record::Table(DiningTable {
            id,
            table_number: t.table_number,
            capacity: t.capacity,
            location: t.location,
            status: t.status,
        }),
        RecordInput::Chef(c) => Record::Chef(Chef {
            id,
            name: c.name,
            biography: c.biography,
            signature_dish: c.signature_dish,
            image_url: c.image_url,
        }),
        RecordInput::MenuItem(m) => Record::MenuItem(MenuItem {
            id,
            name: m.name,
            description: m.description,
            price: m.price,
            category: m.category,
            image_url: m.image_url,
        }),
        RecordInput::Reservation(r) => Record::Reservation(Reservation {
            id,
            customer_name: r.customer_name,
            customer_email: r.customer_email,
            customer_phone: r.customer_phone,
            reservation_date: r.reservation_date,
            reservation_time: r.reservation_time,
            guest_count: r.guest_count,
            status: r.status,
            created_at: Some(shared::chrono::Utc::now()),
        }),
    }
}

/// Compare two rows on a column the way the database would
fn compare_column(a: &Record, b: &Record, column: &str) -> Ordering {
    let a = serde_json::to_value(a).unwrap_or(Value::Null);
    let b = serde_json::to_value(b).unwrap_or(Value::Null);
    match (&a[column], &b[column]) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[async_trait]
impl ResourceClient for MemoryClient {
    async fn select(&self, kind: ResourceKind) -> ClientResult<Vec<Record>> {
        let state = self.record_call(RemoteCall::select(kind))?;
        let mut rows = state.rows.get(&kind).cloned().unwrap_or_default();
        let order = kind.sort_order();
        rows.sort_by(|a, b| {
            let ordering = compare_column(a, b, order.column);
            if order.descending {
                ordering.reverse()
            } else {
                ordering
            }
        });
        Ok(rows)
    }

    async fn insert(&self, kind: ResourceKind, fields: &RecordInput) -> ClientResult<Record> {
        let mut state = self.record_call(RemoteCall::insert(kind))?;
        ensure_kind(kind, fields)?;
        let record = materialize(uuid::Uuid::new_v4().to_string(), fields);
        state.rows.entry(kind).or_default().push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        fields: &RecordInput,
    ) -> ClientResult<Record> {
        let mut state = self.record_call(RemoteCall::update(kind, id))?;
        ensure_kind(kind, fields)?;
        let slot = state
            .rows
            .get_mut(&kind)
            .and_then(|rows| rows.iter_mut().find(|r| r.id() == id))
            .ok_or_else(|| ClientError::NotFound(format!("{} {}", kind, id)))?;
        *slot = materialize(id.to_string(), fields);
        Ok(slot.clone())
    }

    async fn delete(&self, kind: ResourceKind, id: &str) -> ClientResult<()> {
        let mut state = self.record_call(RemoteCall::delete(kind, id))?;
        // Deleting a missing row is not an error, matching the hosted API
        if let Some(rows) = state.rows.get_mut(&kind) {
            rows.retain(|r| r.id() != id);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{ChefInput, TableStatus};

    fn table(id: &str, number: i32) -> Record {
        Record::Table(DiningTable {
            id: id.into(),
            table_number: number,
            capacity: 4,
            location: "Salon".into(),
            status: TableStatus::Available,
        })
    }

    #[tokio::test]
    async fn test_select_orders_by_kind_column() {
        let client = MemoryClient::with_records([table("t3", 3), table("t1", 1), table("t2", 2)]);
        let rows = client.select(ResourceKind::Tables).await.unwrap();
        let ids: Vec<&str> = rows.iter().map(|r| r.id()).collect();
        assert_eq!(ids, ["t1", "t2", "t3"]);
        assert_eq!(client.calls(), vec![RemoteCall::select(ResourceKind::Tables)]);
    }

    #[tokio::test]
    async fn test_fail_next_fails_once_and_records() {
        let client = MemoryClient::new();
        client.fail_next(Operation::Select);
        assert!(client.select(ResourceKind::Chefs).await.is_err());
        assert!(client.select(ResourceKind::Chefs).await.is_ok());
        assert_eq!(client.calls().len(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_other_kind() {
        let client = MemoryClient::new();
        let fields = RecordInput::Chef(ChefInput {
            name: "Ayşe Hanım".into(),
            biography: "Saray mutfağı".into(),
            signature_dish: "Saray Baklavası".into(),
            image_url: "https://x/a.jpg".into(),
        });
        let err = client.insert(ResourceKind::Tables, &fields).await.unwrap_err();
        assert!(matches!(err, ClientError::KindMismatch { .. }));
        assert!(client.stored(ResourceKind::Tables).is_empty());
    }

    #[tokio::test]
    async fn test_update_missing_row_is_not_found() {
        let client = MemoryClient::with_records([table("t1", 1)]);
        let fields = RecordInput::Table(shared::models::DiningTableInput {
            table_number: 9,
            capacity: 2,
            location: "Bahçe".into(),
            status: TableStatus::Reserved,
        });
        let err = client
            .update(ResourceKind::Tables, "nope", &fields)
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::NotFound(_)));
    }
}
