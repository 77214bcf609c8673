pub mod config;
pub mod duration;
pub mod graph;
pub mod layout;
pub mod status;

use wasm_bindgen::prelude::*;

use graph::Graph;
use layout::LayoutOptions;

pub use duration::format_offline_duration;
pub use layout::apply_layout;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

/// Format an offline duration given in minutes
#[wasm_bindgen(js_name = "formatOfflineDuration")]
pub fn format_offline_duration_js(minutes: Option<f64>) -> String {
    format_offline_duration(minutes)
}

/// Lay out a `{ nodes, edges }` JSON graph and return it with new positions
#[wasm_bindgen(js_name = "applyLayout")]
pub fn apply_layout_js(
    graph: &str,
    strategy: &str,
    options: Option<String>,
) -> Result<String, String> {
    let graph = Graph::from_json(graph).map_err(|e| e.to_string())?;
    let options = match options.as_deref() {
        Some(json) if !json.trim().is_empty() => {
            LayoutOptions::from_json(json).map_err(|e| e.to_string())?
        }
        _ => LayoutOptions::default(),
    };

    let Graph { nodes, edges } = graph;
    let nodes = apply_layout(nodes, &edges, strategy, options);

    Graph { nodes, edges }.to_json().map_err(|e| e.to_string())
}
