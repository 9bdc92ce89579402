use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wayin::BuildingsPayload;

thread_local! {
    static BUILDINGS: RefCell<Option<BuildingsPayload>> = const { RefCell::new(None) };
}

#[wasm_bindgen]
pub fn init_buildings(json: &str) -> Result<(), String> {
    let payload = BuildingsPayload::from_json(json).map_err(|e| format!("Invalid payload: {e}"))?;
    BUILDINGS.with(|cell| cell.replace(Some(payload)));
    Ok(())
}

#[wasm_bindgen]
pub fn extract_room(text: &str) -> JsValue {
    BUILDINGS.with(|cell| {
        match cell.borrow().as_ref() {
            Some(payload) => match wayin::extract_room_from_text(text, payload) {
                Some(matched) => serde_wasm_bindgen::to_value(&matched).unwrap_or(JsValue::NULL),
                None => JsValue::NULL,
            },
            None => JsValue::NULL,
        }
    })
}

#[wasm_bindgen]
pub fn search_room(building_key: &str, query: &str) -> JsValue {
    BUILDINGS.with(|cell| {
        let borrowed = cell.borrow();
        let Some(payload) = borrowed.as_ref() else {
            return JsValue::NULL;
        };
        let Some(building) = payload.get(building_key) else {
            return JsValue::NULL;
        };
        match wayin::search_room_in_building(building, query) {
            Some(result) => serde_wasm_bindgen::to_value(&result).unwrap_or(JsValue::NULL),
            None => JsValue::NULL,
        }
    })
}

#[wasm_bindgen]
pub fn room_ids(building_key: &str) -> JsValue {
    BUILDINGS.with(|cell| {
        let borrowed = cell.borrow();
        let Some(payload) = borrowed.as_ref() else {
            return JsValue::NULL;
        };
        let Some(building) = payload.get(building_key) else {
            return JsValue::NULL;
        };
        serde_wasm_bindgen::to_value(&wayin::list_room_ids(building)).unwrap_or(JsValue::NULL)
    })
}
