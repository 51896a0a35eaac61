use wasm_bindgen::JsValue;

/// Renders an ISO-8601 timestamp as the browser's locale date, matching what
/// `Date.toLocaleDateString()` produces.
pub fn locale_date(iso: &str) -> String {
    js_sys::Date::new(&JsValue::from_str(iso))
        .to_locale_date_string("default", &JsValue::UNDEFINED)
        .into()
}
