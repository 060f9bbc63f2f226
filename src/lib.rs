use wasm_bindgen::prelude::*;

use crate::domain::logging::LogComponent;
use crate::domain::market_data::PriceObservation;
use crate::presentation::PriceHistoryChart;

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install the browser logger, time provider and panic hook.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let console_logger = Box::new(infrastructure::ConsoleLogger::new_development());
    domain::logging::init_logger(console_logger);

    let browser_time_provider = Box::new(infrastructure::BrowserTimeProvider::new());
    domain::logging::init_time_provider(browser_time_provider);

    log_info!(LogComponent::Presentation("Initialize"), "🚀 Price history chart initialized");
}

/// Mount the Leptos chart into `<body>` with a fixed observation list.
#[wasm_bindgen(js_name = mountPriceHistoryChart)]
pub fn mount_price_history_chart(data: JsValue) -> Result<(), JsValue> {
    use gloo::utils::format::JsValueSerdeExt;
    use leptos::*;

    let observations: Vec<PriceObservation> = data
        .into_serde()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;

    mount_to_body(move || {
        let (observations, _) = create_signal(observations);
        view! { <PriceHistoryChart observations=observations /> }
    });
    Ok(())
}
