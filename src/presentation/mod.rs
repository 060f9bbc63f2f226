pub mod component;
pub mod wasm_api;

pub use component::*;
pub use wasm_api::*;
