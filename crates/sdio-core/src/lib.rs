//! sdio-core - SDIO command protocol core
//!
//! This crate brings an SDIO card out of reset and performs direct and
//! extended register/data transfers with it. It sits between a host
//! controller driver (anything implementing [`host::SdioHost`]) and the
//! function drivers that want to read registers or stream data. It is
//! designed to be `no_std` compatible for use in embedded environments.
//!
//! # Features
//!
//! - `std` - Implement `std::error::Error` for the error types
//!
//! # Example
//!
//! ```ignore
//! use sdio_core::cmd::FunctionNumber;
//! use sdio_core::host::SdioHost;
//! use sdio_core::protocol;
//!
//! fn dump_cccr<H: SdioHost>(host: &mut H) -> sdio_core::Result<()> {
//!     let ocr = protocol::io_init(host, 0x00FF_8000)?;
//!     println!("{} I/O function(s)", ocr.num_functions());
//!
//!     for reg in 0..0x10 {
//!         let value = protocol::io_read_byte(host, FunctionNumber::F0, reg)?;
//!         println!("CCCR[0x{:02X}] = 0x{:02X}", reg, value);
//!     }
//!     Ok(())
//! }
//! ```

#![no_std]
#![warn(missing_docs)]
#![warn(rust_2018_idioms)]

#[cfg(any(feature = "std", test))]
extern crate std;

pub mod cmd;
pub mod error;
pub mod host;
pub mod protocol;

pub use error::{Error, Result, TransportError};
