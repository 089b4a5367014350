use std::collections::HashMap;

use chrono::Utc;
use uuid::Uuid;

use super::{TrackerEvent, TrackerEventKind};

/// Almacenamiento de eventos append-only.
pub trait EventStore {
    /// Agrega un evento a partir de su kind y devuelve el evento completo
    /// (con seq y ts asignados).
    fn append_kind(&mut self, flow_id: Uuid, kind: TrackerEventKind) -> TrackerEvent;
    /// Lista eventos de un flujo (orden ascendente por seq).
    fn list(&self, flow_id: Uuid) -> Vec<TrackerEvent>;
}

#[derive(Default)]
pub struct InMemoryEventStore {
    inner: HashMap<Uuid, Vec<TrackerEvent>>,
}

impl EventStore for InMemoryEventStore {
    fn append_kind(&mut self, flow_id: Uuid, kind: TrackerEventKind) -> TrackerEvent {
        let vec = self.inner.entry(flow_id).or_default();
        let ev = TrackerEvent { seq: vec.len() as u64,
                                flow_id,
                                kind,
                                ts: Utc::now() };
        vec.push(ev.clone());
        ev
    }

    fn list(&self, flow_id: Uuid) -> Vec<TrackerEvent> {
        self.inner.get(&flow_id).cloned().unwrap_or_default()
    }
}
