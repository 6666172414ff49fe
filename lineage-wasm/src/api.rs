use crate::error;
use crate::Tree;
use serde::Serialize;
use wasm_bindgen::prelude::*;
type JsValue = wasm_bindgen::JsValue;

use lineage::model::Point;
use lineage::EdgeKind;

#[wasm_bindgen]
pub fn set_panic_hook() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

#[wasm_bindgen(start)]
pub fn start() {
    let _ = console_log::init_with_level(log::Level::Info);
}

fn to_js<T: Serialize>(v: &T) -> JsValue {
    // Plain JS objects, not Maps, so the UI can destructure payloads.
    v.serialize(&serde_wasm_bindgen::Serializer::json_compatible())
        .unwrap()
}

#[wasm_bindgen]
impl Tree {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Tree {
        crate::Tree::rs_new()
    }

    // Members
    pub fn add_member(&mut self, x: f32, y: f32) -> String {
        self.inner.add_member(x, y)
    }
    pub fn add_member_res(&mut self, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        error::ok(JsValue::from_str(&self.inner.add_member(x, y)))
    }
    pub fn move_member(&mut self, id: &str, x: f32, y: f32) -> bool {
        self.inner.move_member(id, x, y)
    }
    pub fn move_member_res(&mut self, id: &str, x: f32, y: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if self.inner.member(id).is_none() {
            return error::invalid_id("member", id);
        }
        error::ok(JsValue::from_bool(self.inner.move_member(id, x, y)))
    }
    pub fn rename_member(&mut self, id: &str, label: &str) -> bool {
        self.inner.rename_member(id, label)
    }
    pub fn rename_member_res(&mut self, id: &str, label: &str) -> JsValue {
        if self.inner.member(id).is_none() {
            return error::invalid_id("member", id);
        }
        error::ok(JsValue::from_bool(self.inner.rename_member(id, label)))
    }
    pub fn remove_member(&mut self, id: &str) -> bool {
        self.inner.remove_member(id)
    }
    pub fn remove_member_res(&mut self, id: &str) -> JsValue {
        if self.inner.member(id).is_none() {
            return error::invalid_id("member", id);
        }
        error::ok(JsValue::from_bool(self.inner.remove_member(id)))
    }
    pub fn get_member(&self, id: &str) -> JsValue {
        #[derive(Serialize)]
        struct MemberSer<'a> {
            id: &'a str,
            kind: &'a str,
            position: Point,
            label: &'a str,
        }
        match self.inner.member(id) {
            Some(m) => to_js(&MemberSer {
                id: &m.id,
                kind: m.kind.as_str(),
                position: m.position,
                label: &m.label,
            }),
            None => JsValue::NULL,
        }
    }
    pub fn member_count(&self) -> u32 {
        self.inner.member_count() as u32
    }

    // Edges
    pub fn connect(&mut self, source: &str, target: &str) -> bool {
        self.inner.connect(source, target)
    }
    pub fn connect_res(&mut self, source: &str, target: &str) -> JsValue {
        if self.inner.member(source).is_none() {
            return error::invalid_id("member", source);
        }
        if self.inner.member(target).is_none() {
            return error::invalid_id("member", target);
        }
        if source == target {
            return error::err(
                "invalid_edge",
                "edge endpoints cannot be the same member",
                None,
            );
        }
        if !self.inner.connect(source, target) {
            return error::err("invalid_edge", "members are already connected", None);
        }
        error::ok(JsValue::TRUE)
    }
    pub fn disconnect(&mut self, source: &str, target: &str) -> bool {
        self.inner.disconnect(source, target)
    }
    pub fn edge_count(&self) -> u32 {
        self.inner.edge_count() as u32
    }

    // Render view-models: members joined with generations, edges annotated
    // with fork junctions. Rebuilt per call, never persisted.
    pub fn get_members(&self) -> JsValue {
        #[derive(Serialize)]
        struct MemberView<'a> {
            id: &'a str,
            kind: &'a str,
            position: Point,
            label: &'a str,
            generation: u32,
        }
        let generations = self.inner.generations();
        let views: Vec<MemberView> = self
            .inner
            .members()
            .iter()
            .map(|m| MemberView {
                id: &m.id,
                kind: m.kind.as_str(),
                position: m.position,
                label: &m.label,
                generation: generations.get(m.id.as_str()).copied().unwrap_or(0),
            })
            .collect();
        to_js(&views)
    }
    pub fn get_edges(&self) -> JsValue {
        #[derive(Serialize)]
        struct EdgeData {
            junction: Point,
        }
        #[derive(Serialize)]
        struct EdgeViewSer {
            source: String,
            target: String,
            #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
            kind: Option<&'static str>,
            #[serde(skip_serializing_if = "Option::is_none")]
            data: Option<EdgeData>,
        }
        let views: Vec<EdgeViewSer> = self
            .inner
            .annotated_edges()
            .into_iter()
            .map(|e| EdgeViewSer {
                source: e.source,
                target: e.target,
                kind: match e.kind {
                    EdgeKind::Fork => Some("fork"),
                    EdgeKind::Direct => None,
                },
                data: e.junction.map(|junction| EdgeData { junction }),
            })
            .collect();
        to_js(&views)
    }
    pub fn generations(&self) -> JsValue {
        to_js(&self.inner.generations())
    }
    pub fn max_generation(&self) -> u32 {
        self.inner.max_generation()
    }
    pub fn align(&mut self) {
        self.inner.align();
    }

    // Viewport + settings
    pub fn get_viewport(&self) -> JsValue {
        to_js(&self.inner.viewport())
    }
    pub fn set_viewport(&mut self, x: f32, y: f32, zoom: f32) -> bool {
        self.inner.set_viewport(x, y, zoom)
    }
    pub fn set_viewport_res(&mut self, x: f32, y: f32, zoom: f32) -> JsValue {
        if !x.is_finite() {
            return error::non_finite("x");
        }
        if !y.is_finite() {
            return error::non_finite("y");
        }
        if !zoom.is_finite() {
            return error::non_finite("zoom");
        }
        if zoom <= 0.0 {
            return error::out_of_range("zoom", f32::EPSILON, f32::INFINITY, zoom);
        }
        error::ok(JsValue::from_bool(self.inner.set_viewport(x, y, zoom)))
    }
    pub fn get_settings(&self) -> JsValue {
        to_js(self.inner.settings())
    }
    pub fn set_settings(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => {
                self.inner.set_settings_value(&val);
                true
            }
            Err(_) => false,
        }
    }

    // Payload codec
    pub fn to_json(&self) -> JsValue {
        to_js(&self.inner.to_payload())
    }
    pub fn from_json(&mut self, v: JsValue) -> bool {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => self.inner.from_payload(val),
            Err(_) => false,
        }
    }
    pub fn from_json_res(&mut self, v: JsValue) -> JsValue {
        match serde_wasm_bindgen::from_value::<serde_json::Value>(v) {
            Ok(val) => match self.inner.from_payload_strict(val) {
                Ok(ok) => error::ok(JsValue::from_bool(ok)),
                Err((code, msg)) => error::err(code, msg, None),
            },
            Err(e) => error::err("json_parse", format!("{}", e), None),
        }
    }

    pub fn clear(&mut self) {
        self.inner.clear();
    }
}
