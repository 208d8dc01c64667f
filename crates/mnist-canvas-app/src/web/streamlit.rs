//! Streamlit component protocol over `window.postMessage`.

use mnist_canvas_core::{Host, OutputValue};
use serde::Serialize;
use serde_json::{Value, json};
use wasm_bindgen::JsValue;
use web_sys::Window;

const API_VERSION: u32 = 1;

const COMPONENT_READY: &str = "streamlit:componentReady";
const SET_COMPONENT_VALUE: &str = "streamlit:setComponentValue";
const SET_FRAME_HEIGHT: &str = "streamlit:setFrameHeight";
const RENDER: &str = "streamlit:render";

/// Sends component messages to the parent page.
pub struct StreamlitHost {
    window: Window,
}

impl StreamlitHost {
    pub fn new(window: Window) -> Self {
        Self { window }
    }

    fn post(&self, message_type: &str, mut fields: Value) {
        if let Some(map) = fields.as_object_mut() {
            map.insert("isStreamlitMessage".into(), Value::Bool(true));
            map.insert("type".into(), Value::String(message_type.into()));
        }
        if let Err(e) = self.try_post(&fields) {
            log::error!("Failed to post {message_type}: {e:?}");
        }
    }

    fn try_post(&self, message: &Value) -> Result<(), JsValue> {
        let parent = self.window.parent()?.ok_or("No parent window")?;
        let js = message.serialize(&serde_wasm_bindgen::Serializer::json_compatible())?;
        parent.post_message(&js, "*")
    }
}

impl Host for StreamlitHost {
    fn set_component_ready(&mut self) {
        self.post(COMPONENT_READY, json!({ "apiVersion": API_VERSION }));
    }

    fn set_component_value(&mut self, value: &OutputValue) {
        self.post(
            SET_COMPONENT_VALUE,
            json!({ "value": value, "dataType": "json" }),
        );
    }

    fn set_frame_height(&mut self, height: u32) {
        self.post(SET_FRAME_HEIGHT, json!({ "height": height }));
    }
}

/// Extract the render arguments from an inbound message, if it is a render event.
pub fn render_args(data: JsValue) -> Option<Value> {
    let message: Value = match serde_wasm_bindgen::from_value(data) {
        Ok(message) => message,
        Err(e) => {
            log::debug!("Ignoring non-JSON message: {e}");
            return None;
        }
    };
    if message.get("type").and_then(Value::as_str) != Some(RENDER) {
        return None;
    }
    Some(message.get("args").cloned().unwrap_or(Value::Null))
}
