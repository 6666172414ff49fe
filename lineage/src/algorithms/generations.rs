use std::collections::{HashMap, HashSet};

use crate::model::{Member, RelationEdge};

/// Resolve a generation number for every member by fixed-point propagation
/// from parents to children.
///
/// A member with no surviving parent edges resolves to 0; a member whose
/// parents are all resolved sits one row below its deepest parent. Edges
/// whose endpoints are missing from the member set behave as if absent.
/// Members a parent cycle keeps unresolved collapse to 0 instead of erroring,
/// so malformed graphs still render.
pub fn resolve(members: &[Member], edges: &[RelationEdge]) -> HashMap<String, u32> {
    let ids: HashSet<&str> = members.iter().map(|m| m.id.as_str()).collect();

    let mut parents: HashMap<&str, Vec<&str>> = HashMap::new();
    for e in edges {
        if ids.contains(e.source.as_str()) && ids.contains(e.target.as_str()) {
            parents
                .entry(e.target.as_str())
                .or_default()
                .push(e.source.as_str());
        }
    }

    let mut gen: HashMap<&str, u32> = HashMap::with_capacity(ids.len());
    // Every productive pass resolves at least one member, so member_count + 1
    // passes is a hard ceiling even on pathological input.
    for _ in 0..=members.len() {
        let mut changed = false;
        for &id in &ids {
            if gen.contains_key(id) {
                continue;
            }
            match parents.get(id) {
                None => {
                    gen.insert(id, 0);
                    changed = true;
                }
                Some(ps) => {
                    let mut deepest = 0u32;
                    let mut all_resolved = true;
                    for p in ps {
                        match gen.get(*p) {
                            Some(g) => deepest = deepest.max(*g),
                            None => {
                                all_resolved = false;
                                break;
                            }
                        }
                    }
                    if all_resolved {
                        gen.insert(id, 1 + deepest);
                        changed = true;
                    }
                }
            }
        }
        if !changed {
            break;
        }
    }

    members
        .iter()
        .map(|m| (m.id.clone(), gen.get(m.id.as_str()).copied().unwrap_or(0)))
        .collect()
}
