#![cfg(target_arch = "wasm32")]

use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use gloo_timers::future::sleep;
use price_history_wasm::domain::chart::ClearScheduler;
use price_history_wasm::infrastructure::GlooClearScheduler;
use price_history_wasm::presentation::PriceHistoryChartApi;
use wasm_bindgen::JsValue;
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
async fn gloo_scheduler_fires_after_delay() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = GlooClearScheduler::new();
    let counter = Rc::clone(&hits);
    scheduler.schedule(20, Box::new(move || counter.set(counter.get() + 1)));

    assert_eq!(hits.get(), 0);
    sleep(Duration::from_millis(60)).await;
    assert_eq!(hits.get(), 1);
}

#[wasm_bindgen_test]
async fn rescheduling_cancels_the_previous_timeout() {
    let hits = Rc::new(Cell::new(0));
    let mut scheduler = GlooClearScheduler::new();

    let first = Rc::clone(&hits);
    scheduler.schedule(20, Box::new(move || first.set(first.get() + 1)));
    let second = Rc::clone(&hits);
    scheduler.schedule(40, Box::new(move || second.set(second.get() + 10)));

    sleep(Duration::from_millis(100)).await;
    assert_eq!(hits.get(), 10);
}

#[wasm_bindgen_test]
fn api_accepts_config_as_json_text() {
    assert!(PriceHistoryChartApi::new(JsValue::from_str(r#"{"tooltipDelayMs": 500}"#)).is_ok());
    assert!(PriceHistoryChartApi::new(JsValue::from_str("{oops")).is_err());
}

#[wasm_bindgen_test]
fn api_rejects_malformed_input() {
    let mut api = PriceHistoryChartApi::new(JsValue::UNDEFINED).unwrap();
    assert!(api.set_observations(JsValue::from_str("not an array")).is_err());
    assert!(api.select_year(2024).is_err());
    assert!(api.view().is_ok());
}
