mod json;
pub use json::*;
mod money;
pub use money::*;
