//! Host transport abstraction
//!
//! This module defines the trait a host controller driver implements so the
//! protocol layer can put commands on the bus.

mod traits;

pub use crate::cmd::BusMode;
pub use traits::SdioHost;
