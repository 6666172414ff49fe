use std::collections::{BTreeMap, HashMap};

use crate::model::{Member, NodeKind, Point, RelationEdge};

const MIN_H_GAP: f32 = 40.0;
const MIN_V_GAP: f32 = 80.0;
// Footprint assumed for spacing; wider than the base card so long names and
// node scaling do not overlap.
const NODE_WIDTH: f32 = 180.0;
const NODE_HEIGHT: f32 = 70.0;
const COL_GAP: f32 = NODE_WIDTH + MIN_H_GAP;
const ROW_GAP: f32 = NODE_HEIGHT + MIN_V_GAP;

/// Compute aligned positions: one row per generation, evenly spaced columns
/// centered per row, and the whole layout translated so its bounding-box
/// center sits on the origin.
///
/// Within a row, members order by the sorted comma-joined id list of their
/// parents (full siblings and same-couple cousins cluster together), then by
/// member id. The ordering is a pure function of the input, so repeated
/// align actions do not drift.
pub fn aligned_positions(
    members: &[Member],
    edges: &[RelationEdge],
    generations: &HashMap<String, u32>,
) -> HashMap<String, Point> {
    let family: Vec<&Member> = members
        .iter()
        .filter(|m| m.kind == NodeKind::Member)
        .collect();
    if family.is_empty() {
        return HashMap::new();
    }

    let parent_key = |id: &str| -> String {
        let mut ps: Vec<&str> = edges
            .iter()
            .filter(|e| e.target == id)
            .map(|e| e.source.as_str())
            .collect();
        ps.sort_unstable();
        ps.join(",")
    };
    let keys: HashMap<&str, String> = family
        .iter()
        .map(|m| (m.id.as_str(), parent_key(&m.id)))
        .collect();

    let mut rows: BTreeMap<u32, Vec<&Member>> = BTreeMap::new();
    for &m in &family {
        let g = generations.get(m.id.as_str()).copied().unwrap_or(0);
        rows.entry(g).or_default().push(m);
    }

    let mut out: HashMap<String, Point> = HashMap::with_capacity(family.len());
    for (g, row) in rows.iter_mut() {
        row.sort_by(|a, b| {
            keys[a.id.as_str()]
                .cmp(&keys[b.id.as_str()])
                .then_with(|| a.id.cmp(&b.id))
        });
        let start_x = -((row.len() - 1) as f32 * COL_GAP) / 2.0;
        for (i, m) in row.iter().enumerate() {
            out.insert(
                m.id.clone(),
                Point {
                    x: start_x + i as f32 * COL_GAP,
                    y: *g as f32 * ROW_GAP,
                },
            );
        }
    }

    // Recenter the bounding box on the origin.
    let mut min_x = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_y = f32::NEG_INFINITY;
    for p in out.values() {
        min_x = min_x.min(p.x);
        max_x = max_x.max(p.x);
        min_y = min_y.min(p.y);
        max_y = max_y.max(p.y);
    }
    let cx = (min_x + max_x) / 2.0;
    let cy = (min_y + max_y) / 2.0;
    for p in out.values_mut() {
        p.x -= cx;
        p.y -= cy;
    }
    out
}
