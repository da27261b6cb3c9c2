//! Calls into the page's global `Plotly` object.
//!
//! The figure is serialized with serde and parsed back with `JSON.parse`, so
//! Plotly receives plain JS objects.

use js_sys::{Function, JSON, Reflect};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlElement;

use super::figure::Figure;

fn plotly() -> Result<JsValue, JsValue> {
	let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
	let plotly = Reflect::get(&window, &JsValue::from_str("Plotly"))?;
	if plotly.is_undefined() {
		return Err(JsValue::from_str("Plotly is not loaded"));
	}
	Ok(plotly)
}

fn method(plotly: &JsValue, name: &str) -> Result<Function, JsValue> {
	Reflect::get(plotly, &JsValue::from_str(name))?.dyn_into::<Function>()
}

fn to_js<T: serde::Serialize>(value: &T) -> Result<JsValue, JsValue> {
	let text = serde_json::to_string(value).map_err(|e| JsValue::from_str(&e.to_string()))?;
	JSON::parse(&text)
}

/// Draws `figure` into `target`, replacing whatever was drawn before.
pub fn react(target: &HtmlElement, figure: &Figure) -> Result<(), JsValue> {
	let plotly = plotly()?;
	let react = method(&plotly, "react")?;
	let data = to_js(&figure.data)?;
	let layout = to_js(&figure.layout)?;
	react.call3(&plotly, target, &data, &layout)?;
	Ok(())
}

/// Removes any plot from `target`.
pub fn purge(target: &HtmlElement) -> Result<(), JsValue> {
	let plotly = plotly()?;
	method(&plotly, "purge")?.call1(&plotly, target)?;
	Ok(())
}
