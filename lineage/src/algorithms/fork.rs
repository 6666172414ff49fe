use std::collections::HashMap;

use crate::model::{Member, NodeKind, Point, RelationEdge};

// Horizontal offset from a member's position to its connector column.
const NODE_CENTER_X: f32 = 60.0;
// How far above the topmost child the shared junction sits.
const JUNCTION_OFFSET_Y: f32 = 40.0;

/// How the renderer should draw an edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EdgeKind {
    /// Straight parent→child path.
    Direct,
    /// Two segments, parent→junction and junction→child, so a couple's edges
    /// merge into one line before dropping to each child.
    Fork,
}

/// Render-time view of an edge. Never persisted; rebuilt on every render.
#[derive(Clone, Debug, PartialEq)]
pub struct EdgeView {
    pub source: String,
    pub target: String,
    pub kind: EdgeKind,
    pub junction: Option<Point>,
}

/// Annotate edges for rendering: every child with exactly two parents shares
/// one junction per sibling group (same sorted parent pair), placed above the
/// topmost child at the parents' horizontal midpoint. All other edges pass
/// through unchanged as direct paths.
pub fn annotate(members: &[Member], edges: &[RelationEdge]) -> Vec<EdgeView> {
    let family: Vec<&Member> = members
        .iter()
        .filter(|m| m.kind == NodeKind::Member)
        .collect();

    let sorted_parents = |target: &str| -> Vec<&str> {
        let mut ps: Vec<&str> = edges
            .iter()
            .filter(|e| e.target == target)
            .map(|e| e.source.as_str())
            .collect();
        ps.sort_unstable();
        ps
    };

    // Full siblings: children sharing the same two-parent pair.
    let mut pair_children: HashMap<(String, String), Vec<&Member>> = HashMap::new();
    for &m in &family {
        let ps = sorted_parents(&m.id);
        if ps.len() != 2 {
            continue;
        }
        pair_children
            .entry((ps[0].to_string(), ps[1].to_string()))
            .or_default()
            .push(m);
    }

    let find = |id: &str| family.iter().find(|m| m.id == id).copied();

    let mut junctions: HashMap<(String, String), Point> = HashMap::new();
    for (pair, children) in &pair_children {
        let (p1, p2) = match (find(&pair.0), find(&pair.1)) {
            (Some(p1), Some(p2)) => (p1, p2),
            // A parent missing from the canvas leaves the group unforked.
            _ => continue,
        };
        let top = match children.iter().map(|c| c.position.y).reduce(f32::min) {
            Some(top) => top,
            None => continue,
        };
        junctions.insert(
            pair.clone(),
            Point {
                x: (p1.position.x + p2.position.x) / 2.0 + NODE_CENTER_X,
                y: top - JUNCTION_OFFSET_Y,
            },
        );
    }

    edges
        .iter()
        .map(|e| {
            let ps = sorted_parents(&e.target);
            let junction = if ps.len() == 2 {
                junctions
                    .get(&(ps[0].to_string(), ps[1].to_string()))
                    .copied()
            } else {
                None
            };
            EdgeView {
                source: e.source.clone(),
                target: e.target.clone(),
                kind: if junction.is_some() {
                    EdgeKind::Fork
                } else {
                    EdgeKind::Direct
                },
                junction,
            }
        })
        .collect()
}
