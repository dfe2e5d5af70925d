//! Topology service seam and an in-process implementation

use async_trait::async_trait;
use rsm_api::topo::{Event, EventType, Filters, Id, Object, ObjectKind, RelationFilter};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::{broadcast, mpsc, RwLock};
use tracing::{debug, warn};

use crate::TopologyError;

const EVENT_BUFFER: usize = 256;
const WATCH_BUFFER: usize = 64;

/// Filtered access to topology objects
#[async_trait]
pub trait TopoService: Send + Sync {
    /// List objects matching the filters.
    ///
    /// A relation filter resolves to the target entities of the matching
    /// relations rather than the relations themselves.
    async fn list(&self, filters: &Filters) -> Result<Vec<Object>, TopologyError>;

    async fn get(&self, id: &str) -> Result<Object, TopologyError>;

    /// Replay the matching objects as `EventType::None`, then stream changes.
    ///
    /// A watcher that falls behind is brought back in step with the current
    /// state: it receives `Removed`, `None` or `Updated` for whatever changed
    /// while it lagged.
    async fn watch(&self, filters: Filters) -> Result<mpsc::Receiver<Event>, TopologyError>;
}

/// Topology store kept in memory.
///
/// Every mutation is published while the write lock is held, so a watcher
/// that snapshots under the read lock sees each change exactly once.
#[derive(Clone)]
pub struct InMemoryTopo {
    objects: Arc<RwLock<BTreeMap<Id, Object>>>,
    events: broadcast::Sender<Event>,
}

impl Default for InMemoryTopo {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryTopo {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_BUFFER);
        Self {
            objects: Arc::new(RwLock::new(BTreeMap::new())),
            events,
        }
    }

    pub async fn create(&self, object: Object) -> Result<(), TopologyError> {
        let mut objects = self.objects.write().await;
        if objects.contains_key(&object.id) {
            return Err(TopologyError::AlreadyExists(object.id));
        }
        debug!(id = %object.id, kind = %object.kind_id(), "Created topology object");
        objects.insert(object.id.clone(), object.clone());
        self.publish(EventType::Added, object);
        Ok(())
    }

    pub async fn update(&self, object: Object) -> Result<(), TopologyError> {
        let mut objects = self.objects.write().await;
        match objects.get_mut(&object.id) {
            Some(existing) => {
                *existing = object.clone();
                self.publish(EventType::Updated, object);
                Ok(())
            }
            None => Err(not_found(&object.id)),
        }
    }

    pub async fn delete(&self, id: &str) -> Result<Object, TopologyError> {
        let mut objects = self.objects.write().await;
        let object = objects.remove(id).ok_or_else(|| not_found(id))?;
        debug!(id = %id, "Removed topology object");
        self.publish(EventType::Removed, object.clone());
        Ok(object)
    }

    fn publish(&self, event_type: EventType, object: Object) {
        // No receivers is fine: nobody is watching yet
        let _ = self.events.send(Event { event_type, object });
    }
}

fn not_found(id: &str) -> TopologyError {
    TopologyError::NotFound(format!("object {} not found", id))
}

fn relation_matches(filter: &RelationFilter, object: &Object) -> bool {
    object.as_relation().map_or(false, |relation| {
        relation.kind_id == filter.relation_kind && relation.src_entity_id == filter.src_id
    })
}

/// Matching used for watches: relation filters select the relations themselves
fn matches(filters: &Filters, object: &Object) -> bool {
    if let Some(kind) = &filters.kind_filter {
        if object.kind_id() != kind {
            return false;
        }
    }
    match &filters.relation_filter {
        Some(filter) => relation_matches(filter, object),
        None => true,
    }
}

#[async_trait]
impl TopoService for InMemoryTopo {
    async fn list(&self, filters: &Filters) -> Result<Vec<Object>, TopologyError> {
        let objects = self.objects.read().await;

        let Some(filter) = &filters.relation_filter else {
            return Ok(objects
                .values()
                .filter(|object| matches(filters, object))
                .cloned()
                .collect());
        };

        let targets = objects
            .values()
            .filter(|object| relation_matches(filter, object))
            .filter_map(|object| object.as_relation())
            .filter_map(|relation| objects.get(&relation.tgt_entity_id))
            .filter(|target| match &target.obj {
                ObjectKind::Entity(entity) => {
                    filter.target_kind.is_empty() || entity.kind_id == filter.target_kind
                }
                ObjectKind::Relation(_) => false,
            })
            .cloned()
            .collect();
        Ok(targets)
    }

    async fn get(&self, id: &str) -> Result<Object, TopologyError> {
        self.objects
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| not_found(id))
    }

    async fn watch(&self, filters: Filters) -> Result<mpsc::Receiver<Event>, TopologyError> {
        let (tx, rx) = mpsc::channel(WATCH_BUFFER);
        let (snapshot, changes) = self.snapshot(&filters).await;
        tokio::spawn(self.clone().forward(filters, snapshot, changes, tx));
        Ok(rx)
    }
}

impl InMemoryTopo {
    /// Matching objects plus a change subscription taken under the same read lock
    async fn snapshot(&self, filters: &Filters) -> (Vec<Object>, broadcast::Receiver<Event>) {
        let objects = self.objects.read().await;
        let changes = self.events.subscribe();
        let matching = objects
            .values()
            .filter(|object| matches(filters, object))
            .cloned()
            .collect();
        (matching, changes)
    }

    /// Feed one watcher until it hangs up.
    ///
    /// `live` is what the watcher has been told exists. When the subscription
    /// lags, the skipped events are replaced by a fresh snapshot and only the
    /// difference against `live` is sent.
    async fn forward(
        self,
        filters: Filters,
        snapshot: Vec<Object>,
        mut changes: broadcast::Receiver<Event>,
        tx: mpsc::Sender<Event>,
    ) {
        let mut live = BTreeMap::new();
        if !resync(&tx, &mut live, snapshot).await {
            return;
        }

        loop {
            let received = tokio::select! {
                received = changes.recv() => received,
                _ = tx.closed() => return,
            };

            let event = match received {
                Ok(event) => event,
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!("Topology watch lagged by {} events, resyncing", skipped);
                    let (snapshot, fresh) = self.snapshot(&filters).await;
                    changes = fresh;
                    if !resync(&tx, &mut live, snapshot).await {
                        return;
                    }
                    continue;
                }
                Err(broadcast::error::RecvError::Closed) => return,
            };

            if !matches(&filters, &event.object) {
                continue;
            }
            match event.event_type {
                EventType::Removed => {
                    live.remove(&event.object.id);
                }
                _ => {
                    live.insert(event.object.id.clone(), event.object.clone());
                }
            }
            if tx.send(event).await.is_err() {
                return;
            }
        }
    }
}

/// Send the events that turn `live` into `snapshot`; false once the watcher is gone
async fn resync(
    tx: &mpsc::Sender<Event>,
    live: &mut BTreeMap<Id, Object>,
    snapshot: Vec<Object>,
) -> bool {
    let current: BTreeMap<Id, Object> = snapshot
        .into_iter()
        .map(|object| (object.id.clone(), object))
        .collect();

    let mut events = Vec::new();
    for (id, object) in live.iter() {
        if !current.contains_key(id) {
            events.push(Event {
                event_type: EventType::Removed,
                object: object.clone(),
            });
        }
    }
    for (id, object) in &current {
        let event_type = match live.get(id) {
            None => EventType::None,
            Some(previous) if previous != object => EventType::Updated,
            Some(_) => continue,
        };
        events.push(Event {
            event_type,
            object: object.clone(),
        });
    }
    *live = current;

    for event in events {
        if tx.send(event).await.is_err() {
            return false;
        }
    }
    true
}
