use wasm_bindgen::prelude::*;
mod api;
mod error;
mod interop;
mod persist;

pub use persist::{clear_url_tree_param, load_background_image, save_background_image};

#[wasm_bindgen]
pub struct Tree {
    pub(crate) inner: lineage::Tree,
}

impl Tree {
    pub fn rs_new() -> Tree {
        Tree {
            inner: lineage::Tree::new(),
        }
    }
}
