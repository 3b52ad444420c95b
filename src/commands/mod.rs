//! CLI command implementations
//!
//! Every command takes an opened host, brings the card up with
//! IO_SEND_OP_COND and then issues its own I/O commands.
//!
//! ## Direct commands
//!
//! `read-byte`, `write-byte` and `reset` use one IO_RW_DIRECT each.
//!
//! ## Transfer commands
//!
//! `read` and `write` move whole register ranges with IO_RW_EXTENDED,
//! split into chunks so progress can be reported.

mod direct;
mod list;
mod probe;
mod transfer;

pub use direct::{run_read_byte, run_reset, run_write_byte};
pub use list::list_hosts;
pub use probe::{init_card, run_probe};
pub use transfer::{run_read, run_write};
