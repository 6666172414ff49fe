use js_sys::{Object, Reflect};
use wasm_bindgen::JsValue;

pub fn new_obj() -> Object {
    Object::new()
}
pub fn set_kv(obj: &Object, k: &str, v: &JsValue) {
    let _ = Reflect::set(obj, &JsValue::from_str(k), v);
}
