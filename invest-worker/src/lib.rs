pub mod loader;
pub use loader::{load_investments, read_investments};
pub mod report;
pub use report::*;
pub mod settings;
pub use settings::*;
