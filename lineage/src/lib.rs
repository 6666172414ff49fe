pub mod ident;
pub mod model;
pub mod algorithms {
    pub mod align;
    pub mod fork;
    pub mod generations;
}
mod json;

use std::collections::HashMap;

use ident::IdAllocator;
use model::{
    normalize_label, Member, NodeKind, Point, RelationEdge, Settings, Viewport, NEW_MEMBER_LABEL,
};

pub use algorithms::fork::{EdgeKind, EdgeView};

/// One editing session over a family graph: members, parent edges, viewport
/// and display settings, plus the id allocator that keeps fresh ids from
/// colliding with persisted ones.
///
/// All operations are synchronous over the owned state; derived data
/// (generations, aligned positions, fork annotations) is recomputed on
/// demand and never stored.
pub struct Tree {
    pub(crate) members: Vec<Member>,
    pub(crate) edges: Vec<RelationEdge>,
    pub(crate) viewport: Viewport,
    pub(crate) settings: Settings,
    pub(crate) ids: IdAllocator,
}

impl Tree {
    pub fn new() -> Self {
        Tree {
            members: Vec::new(),
            edges: Vec::new(),
            viewport: Viewport::default(),
            settings: Settings::default(),
            ids: IdAllocator::new(),
        }
    }

    // Members
    pub fn add_member(&mut self, x: f32, y: f32) -> String {
        let id = self.ids.next_id();
        self.members.push(Member {
            id: id.clone(),
            kind: NodeKind::Member,
            position: Point { x, y },
            label: NEW_MEMBER_LABEL.to_string(),
        });
        id
    }

    pub fn move_member(&mut self, id: &str, x: f32, y: f32) -> bool {
        if !x.is_finite() || !y.is_finite() {
            return false;
        }
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.position = Point { x, y };
                true
            }
            None => false,
        }
    }

    pub fn rename_member(&mut self, id: &str, label: &str) -> bool {
        match self.members.iter_mut().find(|m| m.id == id) {
            Some(m) => {
                m.label = normalize_label(label);
                true
            }
            None => false,
        }
    }

    pub fn remove_member(&mut self, id: &str) -> bool {
        let before = self.members.len();
        self.members.retain(|m| m.id != id);
        if self.members.len() == before {
            return false;
        }
        // Cascade: every edge touching the member goes with it.
        self.edges.retain(|e| e.source != id && e.target != id);
        true
    }

    pub fn member(&self, id: &str) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member_count(&self) -> usize {
        self.members.len()
    }

    // Edges
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        if source == target {
            return false;
        }
        if self.member(source).is_none() || self.member(target).is_none() {
            return false;
        }
        if self
            .edges
            .iter()
            .any(|e| e.source == source && e.target == target)
        {
            return false;
        }
        self.edges.push(RelationEdge {
            source: source.to_string(),
            target: target.to_string(),
        });
        true
    }

    pub fn disconnect(&mut self, source: &str, target: &str) -> bool {
        let before = self.edges.len();
        self.edges
            .retain(|e| !(e.source == source && e.target == target));
        self.edges.len() != before
    }

    pub fn edges(&self) -> &[RelationEdge] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // Viewport + settings
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn set_viewport(&mut self, x: f32, y: f32, zoom: f32) -> bool {
        if !x.is_finite() || !y.is_finite() || !zoom.is_finite() || zoom <= 0.0 {
            return false;
        }
        self.viewport = Viewport { x, y, zoom };
        true
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Per-field validated settings update: each recognized field must carry
    /// the expected primitive type, anything else falls back to its default.
    pub fn set_settings_value(&mut self, v: &serde_json::Value) {
        self.settings = json::parse_settings(Some(v));
    }

    // Derived state
    pub fn generations(&self) -> HashMap<String, u32> {
        algorithms::generations::resolve(&self.members, &self.edges)
    }

    /// Deepest generation in use; sizes the generation-lines backdrop.
    pub fn max_generation(&self) -> u32 {
        self.generations().values().copied().max().unwrap_or(0)
    }

    /// The user-invocable align action: snap every family member onto the
    /// generation grid. Decorative nodes keep their positions. Repeatable
    /// without drift.
    pub fn align(&mut self) {
        let generations = self.generations();
        let positions =
            algorithms::align::aligned_positions(&self.members, &self.edges, &generations);
        for m in &mut self.members {
            if let Some(p) = positions.get(m.id.as_str()) {
                m.position = *p;
            }
        }
    }

    pub fn annotated_edges(&self) -> Vec<EdgeView> {
        algorithms::fork::annotate(&self.members, &self.edges)
    }

    // Payload codec
    pub fn to_payload(&self) -> serde_json::Value {
        json::to_payload_impl(self)
    }

    pub fn from_payload(&mut self, v: serde_json::Value) -> bool {
        json::from_payload_impl(self, v)
    }

    pub fn from_payload_strict(
        &mut self,
        v: serde_json::Value,
    ) -> Result<bool, (&'static str, String)> {
        json::from_payload_impl_strict(self, v)
    }

    /// Total load: malformed text or a non-object document yields an empty
    /// tree with default viewport and settings instead of an error.
    pub fn from_json_str(raw: &str) -> Tree {
        let mut t = Tree::new();
        if let Ok(v) = serde_json::from_str::<serde_json::Value>(raw) {
            if !t.from_payload(v) {
                t = Tree::new();
            }
        }
        t
    }

    pub fn clear(&mut self) {
        self.members.clear();
        self.edges.clear();
        self.viewport = Viewport::default();
        self.settings = Settings::default();
        self.ids.reset(0);
    }

    /// Allocator access for hosts that manage ids across imports.
    pub fn id_allocator(&mut self) -> &mut IdAllocator {
        &mut self.ids
    }
}

impl Default for Tree {
    fn default() -> Self {
        Tree::new()
    }
}
