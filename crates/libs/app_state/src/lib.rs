#![allow(clippy::missing_errors_doc)]

mod load_settings;
mod settings;

pub use load_settings::*;
pub use settings::*;
