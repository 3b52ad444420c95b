//! SDIO command types
//!
//! This module provides the command descriptor, argument layouts, response
//! decoding and data-phase types for the three I/O commands.

pub mod arg;
mod command;
mod data;
mod function;
pub mod opcodes;
mod response;

pub use arg::BlockMode;
pub use command::{CommandClass, ResponseFlags, SdioCommand};
pub use data::{DataBuf, DataDirection, DataTransfer, RequestStatus};
pub use function::FunctionNumber;
pub use opcodes::*;
pub use response::{
    BusMode, IoState, Ocr, R5Flags, Response, R4_CARD_READY, R4_MEMORY_PRESENT,
    R4_NUM_FUNCTIONS_SHIFT, R4_OCR_MASK,
};
