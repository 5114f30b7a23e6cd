pub mod core;
pub mod services;
pub mod utils;

pub use crate::core::canon::*;
pub use crate::core::index::*;
pub use crate::core::random::*;
pub use crate::core::reference::*;

pub use crate::utils::error::*;
pub use crate::utils::logger::*;

pub use crate::services::display::*;
pub use crate::services::session::*;
