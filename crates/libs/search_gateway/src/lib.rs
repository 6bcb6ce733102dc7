#![deny(clippy::unwrap_used)]
#![allow(clippy::missing_errors_doc)]

mod serper;

pub use serper::*;
