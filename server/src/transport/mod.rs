mod ws_handler;

pub use ws_handler::{ws_handler, AppState};
