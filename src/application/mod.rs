pub mod coordinator;
pub mod view;

pub use coordinator::*;
pub use view::*;
