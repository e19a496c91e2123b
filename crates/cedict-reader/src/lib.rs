pub mod handlers;
pub mod stream;

pub use handlers::{AppState, router};
pub use stream::{OutputFormat, run};
