//! Protocol implementations
//!
//! This module contains the SDIO I/O command sequences: card probe and
//! voltage negotiation, direct register access, and extended transfers.

mod sdio_ops;

pub use sdio_ops::*;
