use std::collections::HashSet;

use serde::Serialize;
use serde_json::Value;

use crate::model::{
    normalize_label, Member, NodeKind, Point, RelationEdge, Settings, Viewport, DEFAULT_LABEL,
};
use crate::Tree;

pub(crate) fn to_payload_impl(t: &Tree) -> Value {
    #[derive(Serialize)]
    struct DataSer<'a> {
        label: &'a str,
    }
    #[derive(Serialize)]
    struct NodeSer<'a> {
        id: &'a str,
        kind: &'a str,
        position: Point,
        data: DataSer<'a>,
    }
    #[derive(Serialize)]
    struct EdgeSer<'a> {
        source: &'a str,
        target: &'a str,
    }
    #[derive(Serialize)]
    struct PayloadSer<'a> {
        nodes: Vec<NodeSer<'a>>,
        edges: Vec<EdgeSer<'a>>,
        viewport: Viewport,
        settings: &'a Settings,
    }

    let nodes = t
        .members
        .iter()
        .map(|m| NodeSer {
            id: &m.id,
            kind: m.kind.as_str(),
            position: m.position,
            data: DataSer { label: &m.label },
        })
        .collect();
    let edges = t
        .edges
        .iter()
        .map(|e| EdgeSer {
            source: &e.source,
            target: &e.target,
        })
        .collect();
    serde_json::to_value(PayloadSer {
        nodes,
        edges,
        viewport: t.viewport,
        settings: &t.settings,
    })
    .unwrap()
}

/// Lenient payload parse. Bad entries are skipped and bad fields fall back to
/// their defaults individually; the whole document is rejected only when it
/// is not a JSON object (the tree is left untouched in that case). On success
/// the id allocator resyncs from the parsed ids.
pub(crate) fn from_payload_impl(t: &mut Tree, v: Value) -> bool {
    let doc = match v.as_object() {
        Some(doc) => doc,
        None => return false,
    };

    let mut members: Vec<Member> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    if let Some(nodes) = doc.get("nodes").and_then(Value::as_array) {
        for n in nodes {
            let id = match n.get("id").and_then(Value::as_str) {
                Some(id) => id,
                None => continue,
            };
            // First occurrence wins; duplicates would break id uniqueness.
            if !seen.insert(id.to_string()) {
                continue;
            }
            let kind = match n.get("kind").and_then(Value::as_str) {
                Some("generationLines") => NodeKind::GenerationLines,
                _ => NodeKind::Member,
            };
            let position = n.get("position").map(parse_point).unwrap_or(Point {
                x: 0.0,
                y: 0.0,
            });
            let label = n
                .get("data")
                .and_then(|d| d.get("label"))
                .and_then(Value::as_str)
                .map(normalize_label)
                .unwrap_or_else(|| DEFAULT_LABEL.to_string());
            members.push(Member {
                id: id.to_string(),
                kind,
                position,
                label,
            });
        }
    }

    let mut edges: Vec<RelationEdge> = Vec::new();
    if let Some(raw) = doc.get("edges").and_then(Value::as_array) {
        for e in raw {
            let source = e.get("source").and_then(Value::as_str);
            let target = e.get("target").and_then(Value::as_str);
            if let (Some(source), Some(target)) = (source, target) {
                edges.push(RelationEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                });
            }
        }
    }

    let viewport = parse_viewport(doc.get("viewport"));
    let settings = parse_settings(doc.get("settings"));

    t.ids.resync(members.iter().map(|m| m.id.as_str()));
    t.members = members;
    t.edges = edges;
    t.viewport = viewport;
    t.settings = settings;
    true
}

pub(crate) fn from_payload_impl_strict(
    t: &mut Tree,
    v: Value,
) -> Result<bool, (&'static str, String)> {
    if !v.is_object() {
        return Err(("bad_payload", "payload must be a JSON object".to_string()));
    }
    if let Some(nodes) = v.get("nodes") {
        let nodes = nodes
            .as_array()
            .ok_or(("bad_nodes", "nodes must be an array".to_string()))?;
        for (i, n) in nodes.iter().enumerate() {
            if n.get("id").and_then(Value::as_str).is_none() {
                return Err(("bad_node", format!("node {} is missing a string id", i)));
            }
        }
    }
    if let Some(edges) = v.get("edges") {
        let edges = edges
            .as_array()
            .ok_or(("bad_edges", "edges must be an array".to_string()))?;
        for (i, e) in edges.iter().enumerate() {
            if e.get("source").and_then(Value::as_str).is_none()
                || e.get("target").and_then(Value::as_str).is_none()
            {
                return Err((
                    "bad_edge",
                    format!("edge {} needs string source and target", i),
                ));
            }
        }
    }
    Ok(from_payload_impl(t, v))
}

fn num(v: Option<&Value>) -> f32 {
    v.and_then(Value::as_f64).map(|x| x as f32).unwrap_or(0.0)
}

fn parse_point(v: &Value) -> Point {
    Point {
        x: num(v.get("x")),
        y: num(v.get("y")),
    }
}

// A viewport only counts when its zoom is numeric; x/y coerce individually.
fn parse_viewport(v: Option<&Value>) -> Viewport {
    let v = match v {
        Some(v) => v,
        None => return Viewport::default(),
    };
    match v.get("zoom").and_then(Value::as_f64) {
        Some(zoom) => Viewport {
            x: num(v.get("x")),
            y: num(v.get("y")),
            zoom: zoom as f32,
        },
        None => Viewport::default(),
    }
}

/// Each settings field validates by type on its own; one bad field never
/// rejects the rest.
pub(crate) fn parse_settings(v: Option<&Value>) -> Settings {
    let d = Settings::default();
    let v = match v {
        Some(v) => v,
        None => return d,
    };
    Settings {
        node_size: v
            .get("nodeSize")
            .and_then(Value::as_f64)
            .map(|x| x as f32)
            .unwrap_or(d.node_size),
        node_color: v
            .get("nodeColor")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(d.node_color),
        edge_stroke_width: v
            .get("edgeStrokeWidth")
            .and_then(Value::as_u64)
            .map(|x| x as u32)
            .unwrap_or(d.edge_stroke_width),
        edge_stroke_color: v
            .get("edgeStrokeColor")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or(d.edge_stroke_color),
    }
}
