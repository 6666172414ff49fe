use serde::{Deserialize, Serialize};

// Keys shared with the hosting page (local storage + share link).
pub const STORAGE_KEY: &str = "family-tree-data";
pub const BG_STORAGE_KEY: &str = "family-tree-bg";
pub const URL_PARAM: &str = "tree";

/// Sentinel label for members whose name trims to empty.
pub const DEFAULT_LABEL: &str = "Sem nome";
/// Label given to a freshly placed member before the user renames it.
pub const NEW_MEMBER_LABEL: &str = "Novo membro";

// Half-size of a new member card, so the UI can center it on the click point.
pub const MEMBER_HALF_WIDTH: f32 = 60.0;
pub const MEMBER_HALF_HEIGHT: f32 = 22.0;

/// Row pitch of the decorative generation-lines backdrop.
pub const ROW_HEIGHT: f32 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

/// Family members carry the graph; generation-line backdrops are purely
/// decorative and excluded from every graph computation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum NodeKind {
    #[serde(rename = "member")]
    Member,
    #[serde(rename = "generationLines")]
    GenerationLines,
}

impl NodeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeKind::Member => "member",
            NodeKind::GenerationLines => "generationLines",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Member {
    pub id: String,
    pub kind: NodeKind,
    pub position: Point,
    pub label: String,
}

/// Directed parent relationship: `source` is a parent of `target`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEdge {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub zoom: f32,
}

impl Default for Viewport {
    fn default() -> Self {
        Viewport {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

/// Cosmetic display settings, orthogonal to the graph itself.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub node_size: f32,
    pub node_color: String,
    pub edge_stroke_width: u32,
    pub edge_stroke_color: String,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            node_size: 1.0,
            node_color: "rgba(255,255,255,0.92)".to_string(),
            edge_stroke_width: 2,
            edge_stroke_color: "#6b4c3b".to_string(),
        }
    }
}

/// Trimmed label, with empty collapsing to the sentinel.
pub fn normalize_label(label: &str) -> String {
    let trimmed = label.trim();
    if trimmed.is_empty() {
        DEFAULT_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}
