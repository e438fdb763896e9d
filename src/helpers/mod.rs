//! Helper functions for layouts and page rendering

mod html;
mod url;

pub use html::*;
pub use url::*;
