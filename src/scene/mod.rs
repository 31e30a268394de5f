mod history;
mod layer;
mod store;
mod types;

pub use history::*;
pub use layer::*;
pub use store::*;
pub use types::*;
