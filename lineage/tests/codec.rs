use lineage::model::{NodeKind, Point, Settings, Viewport, DEFAULT_LABEL};
use lineage::Tree;
use serde_json::json;

fn sample_tree() -> Tree {
    let mut t = Tree::new();
    let p1 = t.add_member(10.0, 20.0);
    let p2 = t.add_member(130.0, 20.0);
    let c = t.add_member(60.0, 100.0);
    t.rename_member(&p1, "Maria");
    t.rename_member(&p2, "José");
    t.connect(&p1, &c);
    t.connect(&p2, &c);
    t.set_viewport(100.0, 50.0, 1.5);
    t.set_settings(Settings {
        node_size: 1.25,
        node_color: "#abcdef".to_string(),
        edge_stroke_width: 4,
        edge_stroke_color: "#112233".to_string(),
    });
    t
}

#[test]
fn payload_round_trips_exactly() {
    let t = sample_tree();
    let payload = t.to_payload();

    let mut loaded = Tree::new();
    assert!(loaded.from_payload(payload));

    assert_eq!(loaded.members(), t.members());
    assert_eq!(loaded.edges(), t.edges());
    assert_eq!(loaded.viewport(), t.viewport());
    assert_eq!(loaded.settings(), t.settings());
}

#[test]
fn payload_strips_members_to_the_minimal_record() {
    let t = sample_tree();
    let payload = t.to_payload();

    let node = &payload["nodes"][0];
    assert_eq!(node["id"], "member-0");
    assert_eq!(node["kind"], "member");
    assert_eq!(node["data"]["label"], "Maria");
    assert!(node.get("generation").is_none());
    assert!(node["data"].get("generation").is_none());

    let edge = &payload["edges"][0];
    assert_eq!(edge["source"], "member-0");
    assert_eq!(edge["target"], "member-2");
    assert!(edge.get("type").is_none());
}

#[test]
fn missing_settings_fall_back_to_defaults() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({ "nodes": [], "edges": [] })));
    assert_eq!(*t.settings(), Settings::default());
    assert_eq!(t.viewport(), Viewport::default());
}

#[test]
fn each_settings_field_falls_back_on_its_own() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({
        "settings": {
            "nodeSize": "big",
            "nodeColor": "#fff",
            "edgeStrokeWidth": 7,
            "edgeStrokeColor": 42
        }
    })));
    let s = t.settings();
    assert_eq!(s.node_size, Settings::default().node_size);
    assert_eq!(s.node_color, "#fff");
    assert_eq!(s.edge_stroke_width, 7);
    assert_eq!(s.edge_stroke_color, Settings::default().edge_stroke_color);
}

#[test]
fn viewport_needs_a_numeric_zoom() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({ "viewport": { "x": 9.0, "y": 9.0, "zoom": "wide" } })));
    assert_eq!(t.viewport(), Viewport::default());

    assert!(t.from_payload(json!({ "viewport": { "x": "oops", "y": 3.0, "zoom": 2.0 } })));
    let v = t.viewport();
    assert_eq!(v.x, 0.0);
    assert_eq!(v.y, 3.0);
    assert_eq!(v.zoom, 2.0);
}

#[test]
fn unparsable_text_degrades_to_an_empty_tree() {
    let t = Tree::from_json_str("invalid json{{{");
    assert_eq!(t.member_count(), 0);
    assert_eq!(t.edge_count(), 0);
    assert_eq!(t.viewport(), Viewport::default());
    assert_eq!(*t.settings(), Settings::default());
}

#[test]
fn non_object_documents_degrade_to_an_empty_tree() {
    let t = Tree::from_json_str("[1, 2, 3]");
    assert_eq!(t.member_count(), 0);

    let mut untouched = sample_tree();
    assert!(!untouched.from_payload(json!([1, 2, 3])));
    // A rejected document leaves the session as it was.
    assert_eq!(untouched.member_count(), 3);
}

#[test]
fn loading_resyncs_the_id_allocator() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({
        "nodes": [
            { "id": "member-7", "kind": "member",
              "position": { "x": 0.0, "y": 0.0 }, "data": { "label": "A" } },
            { "id": "imported", "kind": "member",
              "position": { "x": 1.0, "y": 1.0 }, "data": { "label": "B" } }
        ],
        "edges": []
    })));
    assert_eq!(t.add_member(0.0, 0.0), "member-8");
}

#[test]
fn bad_node_entries_are_skipped_and_fields_coerced() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({
        "nodes": [
            { "position": { "x": 0.0, "y": 0.0 } },
            { "id": "member-1", "position": { "x": "n/a", "y": 4.0 } },
            { "id": "member-1", "position": { "x": 9.0, "y": 9.0 } },
            { "id": "lines", "kind": "generationLines",
              "position": { "x": 0.0, "y": 0.0 }, "data": { "label": "" } }
        ],
        "edges": [
            { "source": "member-1" },
            { "source": "member-1", "target": "lines" }
        ]
    })));

    // The id-less entry is dropped and the duplicate keeps its first record.
    assert_eq!(t.member_count(), 2);
    let m = t.member("member-1").expect("member-1");
    assert_eq!(m.position, Point { x: 0.0, y: 4.0 });
    assert_eq!(m.label, DEFAULT_LABEL);
    assert_eq!(t.member("lines").expect("lines").kind, NodeKind::GenerationLines);
    // The target-less edge is dropped.
    assert_eq!(t.edge_count(), 1);
}

#[test]
fn whitespace_labels_collapse_to_the_sentinel() {
    let mut t = Tree::new();
    assert!(t.from_payload(json!({
        "nodes": [
            { "id": "member-1", "kind": "member",
              "position": { "x": 0.0, "y": 0.0 }, "data": { "label": "   " } }
        ]
    })));
    assert_eq!(t.member("member-1").expect("member").label, DEFAULT_LABEL);
}

#[test]
fn strict_parse_reports_typed_errors() {
    let mut t = Tree::new();

    let err = t.from_payload_strict(json!("nope")).unwrap_err();
    assert_eq!(err.0, "bad_payload");

    let err = t
        .from_payload_strict(json!({ "nodes": [ { "position": {} } ] }))
        .unwrap_err();
    assert_eq!(err.0, "bad_node");

    let err = t
        .from_payload_strict(json!({ "edges": [ { "source": "a" } ] }))
        .unwrap_err();
    assert_eq!(err.0, "bad_edge");

    assert!(t
        .from_payload_strict(json!({ "nodes": [], "edges": [] }))
        .unwrap());
}
