use lineage::algorithms::generations::resolve;
use lineage::model::{Member, NodeKind, Point, RelationEdge, DEFAULT_LABEL};

fn member(id: &str) -> Member {
    Member {
        id: id.to_string(),
        kind: NodeKind::Member,
        position: Point { x: 0.0, y: 0.0 },
        label: DEFAULT_LABEL.to_string(),
    }
}

fn edge(source: &str, target: &str) -> RelationEdge {
    RelationEdge {
        source: source.to_string(),
        target: target.to_string(),
    }
}

#[test]
fn members_without_parents_sit_on_row_zero() {
    let members = vec![member("member-1"), member("member-2")];
    let gen = resolve(&members, &[]);
    assert_eq!(gen["member-1"], 0);
    assert_eq!(gen["member-2"], 0);
}

#[test]
fn a_couples_child_sits_one_row_below() {
    let members = vec![member("member-1"), member("member-2"), member("member-3")];
    let edges = vec![
        edge("member-1", "member-3"),
        edge("member-2", "member-3"),
    ];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["member-1"], 0);
    assert_eq!(gen["member-2"], 0);
    assert_eq!(gen["member-3"], 1);
}

#[test]
fn child_generation_is_one_past_the_deepest_parent() {
    let members = vec![member("a"), member("b"), member("c"), member("d")];
    let edges = vec![edge("a", "c"), edge("b", "c"), edge("c", "d")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["a"], 0);
    assert_eq!(gen["b"], 0);
    assert_eq!(gen["c"], 1);
    assert_eq!(gen["d"], 2);
}

#[test]
fn uneven_parent_depths_take_the_max() {
    // grandparent -> parent -> child, and a root parent straight to child
    let members = vec![member("gp"), member("p"), member("root"), member("child")];
    let edges = vec![edge("gp", "p"), edge("p", "child"), edge("root", "child")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["gp"], 0);
    assert_eq!(gen["p"], 1);
    assert_eq!(gen["root"], 0);
    assert_eq!(gen["child"], 2);
}

#[test]
fn independent_branches_resolve_separately() {
    let members = vec![
        member("root1"),
        member("root2"),
        member("child1"),
        member("child2"),
    ];
    let edges = vec![edge("root1", "child1"), edge("root2", "child2")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["root1"], 0);
    assert_eq!(gen["root2"], 0);
    assert_eq!(gen["child1"], 1);
    assert_eq!(gen["child2"], 1);
}

#[test]
fn parent_cycle_collapses_to_row_zero() {
    let members = vec![member("a"), member("b")];
    let edges = vec![edge("a", "b"), edge("b", "a")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["a"], 0);
    assert_eq!(gen["b"], 0);
}

#[test]
fn self_loop_collapses_to_row_zero() {
    let members = vec![member("a")];
    let edges = vec![edge("a", "a")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["a"], 0);
}

#[test]
fn dangling_parent_behaves_as_absent() {
    let members = vec![member("a")];
    let edges = vec![edge("ghost", "a")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["a"], 0);
}

#[test]
fn dangling_parent_does_not_block_real_parents() {
    let members = vec![member("gp"), member("p"), member("c")];
    let edges = vec![edge("gp", "p"), edge("p", "c"), edge("ghost", "c")];
    let gen = resolve(&members, &edges);
    assert_eq!(gen["c"], 2);
}

#[test]
fn empty_graph_resolves_to_an_empty_map() {
    let gen = resolve(&[], &[]);
    assert!(gen.is_empty());
}
