use serde::{Deserialize, Serialize};

use super::{E2Cell, E2Node, Id};

/// A topology object: either an entity or a relation between two entities
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Object {
    pub id: Id,
    pub obj: ObjectKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Entity(Entity),
    Relation(Relation),
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entity {
    pub kind_id: String,
    #[serde(default)]
    pub aspects: Aspects,
}

/// Typed aspects an entity may carry
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aspects {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e2_node: Option<E2Node>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub e2_cell: Option<E2Cell>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Relation {
    pub kind_id: String,
    pub src_entity_id: Id,
    pub tgt_entity_id: Id,
}

impl Object {
    pub fn entity(id: impl Into<Id>, kind_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            obj: ObjectKind::Entity(Entity {
                kind_id: kind_id.into(),
                aspects: Aspects::default(),
            }),
        }
    }

    /// Relation objects are identified by `<src>-<kind>-<tgt>`
    pub fn relation(kind_id: &str, src: &str, tgt: &str) -> Self {
        Self {
            id: format!("{}-{}-{}", src, kind_id, tgt),
            obj: ObjectKind::Relation(Relation {
                kind_id: kind_id.to_string(),
                src_entity_id: src.to_string(),
                tgt_entity_id: tgt.to_string(),
            }),
        }
    }

    pub fn with_e2_node(mut self, node: E2Node) -> Self {
        if let ObjectKind::Entity(entity) = &mut self.obj {
            entity.aspects.e2_node = Some(node);
        }
        self
    }

    pub fn with_e2_cell(mut self, cell: E2Cell) -> Self {
        if let ObjectKind::Entity(entity) = &mut self.obj {
            entity.aspects.e2_cell = Some(cell);
        }
        self
    }

    pub fn kind_id(&self) -> &str {
        match &self.obj {
            ObjectKind::Entity(entity) => &entity.kind_id,
            ObjectKind::Relation(relation) => &relation.kind_id,
        }
    }

    pub fn as_entity(&self) -> Option<&Entity> {
        match &self.obj {
            ObjectKind::Entity(entity) => Some(entity),
            ObjectKind::Relation(_) => None,
        }
    }

    pub fn as_relation(&self) -> Option<&Relation> {
        match &self.obj {
            ObjectKind::Relation(relation) => Some(relation),
            ObjectKind::Entity(_) => None,
        }
    }

    pub fn e2_node_aspect(&self) -> Option<&E2Node> {
        self.as_entity().and_then(|e| e.aspects.e2_node.as_ref())
    }

    pub fn e2_cell_aspect(&self) -> Option<&E2Cell> {
        self.as_entity().and_then(|e| e.aspects.e2_cell.as_ref())
    }
}

/// Query filters understood by the topology service
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filters {
    /// Only objects whose kind equals this value
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind_filter: Option<String>,

    /// Only target entities of matching relations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relation_filter: Option<RelationFilter>,
}

impl Filters {
    pub fn kind(kind_id: &str) -> Self {
        Self {
            kind_filter: Some(kind_id.to_string()),
            relation_filter: None,
        }
    }

    pub fn relation(src_id: &str, relation_kind: &str, target_kind: &str) -> Self {
        Self {
            kind_filter: None,
            relation_filter: Some(RelationFilter {
                src_id: src_id.to_string(),
                relation_kind: relation_kind.to_string(),
                target_kind: target_kind.to_string(),
            }),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationFilter {
    pub src_id: Id,
    pub relation_kind: String,
    /// Empty matches any target kind
    #[serde(default)]
    pub target_kind: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    /// Replay of an object that existed when the watch started
    #[default]
    None,
    Added,
    Updated,
    Removed,
}

/// Change notification delivered by a topology watch
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub event_type: EventType,
    pub object: Object,
}
