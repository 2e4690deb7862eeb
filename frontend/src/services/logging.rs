use gloo::net::http::Request;
use shared::LogEntry;
use wasm_bindgen_futures::spawn_local;

const LOG_ENDPOINT: &str = "http://localhost:3000/api/logs";

/// Writes to the browser console and forwards the line to the backend log
pub struct Logger;

impl Logger {
    pub fn info_with_component(component: &str, message: &str) {
        gloo::console::info!(format!("[{}] {}", component, message));
        Self::log("info", message, Some(component.to_string()));
    }

    pub fn warn_with_component(component: &str, message: &str) {
        gloo::console::warn!(format!("[{}] {}", component, message));
        Self::log("warn", message, Some(component.to_string()));
    }

    pub fn error_with_component(component: &str, message: &str) {
        gloo::console::error!(format!("[{}] {}", component, message));
        Self::log("error", message, Some(component.to_string()));
    }

    fn log(level: &str, message: &str, component: Option<String>) {
        let entry = LogEntry {
            level: level.to_string(),
            message: message.to_string(),
            component,
        };

        // Send log asynchronously without blocking
        spawn_local(async move {
            if let Ok(request) = Request::post(LOG_ENDPOINT).json(&entry) {
                let _ = request.send().await;
            }
        });
    }
}
