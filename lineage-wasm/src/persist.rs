use wasm_bindgen::prelude::*;

use crate::interop;
use crate::Tree;
use lineage::model::{BG_STORAGE_KEY, STORAGE_KEY, URL_PARAM};

fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

fn url_param() -> Option<String> {
    let w = web_sys::window()?;
    let search = w.location().search().ok()?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(URL_PARAM)
}

/// Strip the share parameter from the URL so a shared link does not keep
/// re-applying itself on later navigation within the session.
#[wasm_bindgen]
pub fn clear_url_tree_param() {
    let w = match web_sys::window() {
        Some(w) => w,
        None => return,
    };
    let location = w.location();
    let search = match location.search() {
        Ok(s) => s,
        Err(_) => return,
    };
    let params = match web_sys::UrlSearchParams::new_with_str(&search) {
        Ok(p) => p,
        Err(_) => return,
    };
    if params.get(URL_PARAM).is_none() {
        return;
    }
    params.delete(URL_PARAM);
    let pathname = location.pathname().unwrap_or_default();
    let hash = location.hash().unwrap_or_default();
    let qs = String::from(params.to_string());
    let clean = if qs.is_empty() {
        format!("{}{}", pathname, hash)
    } else {
        format!("{}?{}{}", pathname, qs, hash)
    };
    if let Ok(history) = w.history() {
        let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(&clean));
    }
}

#[wasm_bindgen]
impl Tree {
    /// Persist the current payload under the tree's storage key. Callers
    /// invoke this after every committed mutation; last write wins.
    pub fn save(&self) -> bool {
        let storage = match local_storage() {
            Some(s) => s,
            None => return false,
        };
        let raw = self.inner.to_payload().to_string();
        match storage.set_item(STORAGE_KEY, &raw) {
            Ok(()) => true,
            Err(_) => {
                log::warn!("failed to persist tree payload");
                false
            }
        }
    }

    /// Startup load. A share-link payload in the URL wins over local storage;
    /// once consumed, the URL parameter is stripped. Malformed data from
    /// either source degrades to an empty tree. Returns `{fromSharedLink}`.
    pub fn load_initial(&mut self) -> JsValue {
        let mut from_shared_link = false;
        let raw = match url_param() {
            Some(encoded) => {
                from_shared_link = true;
                Some(encoded)
            }
            None => local_storage().and_then(|s| s.get_item(STORAGE_KEY).ok().flatten()),
        };
        if let Some(raw) = raw {
            self.inner = lineage::Tree::from_json_str(&raw);
            log::info!(
                "loaded tree: {} members, {} edges (shared link: {})",
                self.inner.member_count(),
                self.inner.edge_count(),
                from_shared_link
            );
        }
        if from_shared_link {
            clear_url_tree_param();
        }
        let o = interop::new_obj();
        interop::set_kv(
            &o,
            "fromSharedLink",
            &JsValue::from_bool(from_shared_link),
        );
        o.into()
    }

    pub fn clear_saved(&self) -> bool {
        match local_storage() {
            Some(s) => s.remove_item(STORAGE_KEY).is_ok(),
            None => false,
        }
    }

    /// Full URL carrying the URI-encoded payload in the share parameter.
    pub fn share_link(&self) -> Option<String> {
        let w = web_sys::window()?;
        let location = w.location();
        let origin = location.origin().ok()?;
        let pathname = location.pathname().ok()?;
        let payload = self.inner.to_payload().to_string();
        let encoded = String::from(js_sys::encode_uri_component(&payload));
        Some(format!("{}{}?{}={}", origin, pathname, URL_PARAM, encoded))
    }

    /// Pretty-printed payload for the downloadable JSON export. The shape is
    /// identical to storage and share-link payloads, so any of the three
    /// sources round-trips through `from_json`.
    pub fn export_json(&self) -> String {
        serde_json::to_string_pretty(&self.inner.to_payload())
            .unwrap_or_else(|_| "{}".to_string())
    }
}

// The background image rides in its own keyed record and is never part of
// share payloads.
#[wasm_bindgen]
pub fn save_background_image(data_url: Option<String>) -> bool {
    let storage = match local_storage() {
        Some(s) => s,
        None => return false,
    };
    let res = match data_url {
        Some(data_url) => storage.set_item(BG_STORAGE_KEY, &data_url),
        None => storage.remove_item(BG_STORAGE_KEY),
    };
    res.is_ok()
}

#[wasm_bindgen]
pub fn load_background_image() -> Option<String> {
    local_storage().and_then(|s| s.get_item(BG_STORAGE_KEY).ok().flatten())
}
