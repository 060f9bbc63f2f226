//! Chart aggregate: year index, renderable series, formatting and tooltip.

pub mod entities;
pub mod services;
pub mod tooltip;
pub mod value_objects;

pub use entities::*;
pub use services::*;
pub use tooltip::*;
pub use value_objects::*;
