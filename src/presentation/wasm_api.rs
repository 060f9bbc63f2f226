use gloo::utils::format::JsValueSerdeExt;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::*;

use crate::application::PriceHistoryCoordinator;
use crate::domain::{
    config::ChartConfig,
    errors::ChartError,
    events::SelectionEvent,
    logging::LogComponent,
    market_data::PriceObservation,
};
use crate::infrastructure::GlooClearScheduler;
use crate::log_info;

impl From<ChartError> for JsValue {
    fn from(err: ChartError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

fn deserialize<T: for<'de> serde::Deserialize<'de>>(value: &JsValue) -> Result<T, ChartError> {
    value
        .into_serde()
        .map_err(|err| ChartError::Deserialize(err.to_string()))
}

/// WASM API for JavaScript hosts. Thin bridge to the application layer.
#[wasm_bindgen]
pub struct PriceHistoryChartApi {
    coordinator: PriceHistoryCoordinator,
}

#[wasm_bindgen]
impl PriceHistoryChartApi {
    /// `config` may be `undefined`, a partial `ChartConfig` object or its JSON text.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<PriceHistoryChartApi, JsValue> {
        let config = if config.is_undefined() || config.is_null() {
            ChartConfig::default()
        } else if let Some(json) = config.as_string() {
            ChartConfig::from_json(&json).map_err(ChartError::from)?
        } else {
            deserialize::<ChartConfig>(&config)?
        };
        log_info!(LogComponent::Presentation("WasmApi"), "Creating price history chart API");
        Ok(Self {
            coordinator: PriceHistoryCoordinator::new(config, Box::new(GlooClearScheduler::new())),
        })
    }

    /// Replace the input with an array of `{dateValue, priceValue}`.
    #[wasm_bindgen(js_name = setObservations)]
    pub fn set_observations(&mut self, data: JsValue) -> Result<(), JsValue> {
        let observations: Vec<PriceObservation> = deserialize(&data)?;
        self.coordinator.set_observations(observations);
        Ok(())
    }

    #[wasm_bindgen(js_name = selectYear)]
    pub fn select_year(&mut self, year: i32) -> Result<(), JsValue> {
        Ok(self.coordinator.select_year(year)?)
    }

    /// Returns the tooltip that is now showing.
    #[wasm_bindgen(js_name = selectPoint)]
    pub fn select_point(&mut self, index: i32) -> Result<JsValue, JsValue> {
        let tooltip = self.coordinator.select_point(i64::from(index))?;
        JsValue::from_serde(&tooltip).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Apply `{kind: "year-select", year}` or `{kind: "point-select", index}`.
    pub fn dispatch(&mut self, event: JsValue) -> Result<(), JsValue> {
        let event: SelectionEvent = deserialize(&event)?;
        Ok(self.coordinator.dispatch(event)?)
    }

    /// `{years, selectedYear, series, tooltip, axisTicks, emptyMessage}`
    pub fn view(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.coordinator.view()).map_err(|err| JsValue::from_str(&err.to_string()))
    }

    /// Invoke `callback` whenever the tooltip auto-clears.
    #[wasm_bindgen(js_name = onTooltipExpire)]
    pub fn on_tooltip_expire(&mut self, callback: js_sys::Function) {
        self.coordinator.on_tooltip_expire(move || {
            let _ = callback.call0(&JsValue::NULL);
        });
    }
}
