//! SDIO command opcodes and register constants
//!
//! Opcodes and bit positions as defined by the SD Physical Layer and SDIO
//! Simplified Specifications.

// ============================================================================
// I/O commands
// ============================================================================

/// IO_SEND_OP_COND - negotiate operating voltage, poll for card ready (R4)
pub const SD_IO_SEND_OP_COND: u8 = 5;
/// IO_RW_DIRECT - single byte register access (R5)
pub const SD_IO_RW_DIRECT: u8 = 52;
/// IO_RW_EXTENDED - multi-byte / block data transfer (R5)
pub const SD_IO_RW_EXTENDED: u8 = 53;

// ============================================================================
// Transport retry counts
// ============================================================================

/// Transport-level retries for commands that tolerate being resent
pub const MMC_CMD_RETRIES: u8 = 3;

// ============================================================================
// IO_SEND_OP_COND polling
// ============================================================================

/// Maximum number of IO_SEND_OP_COND polls before giving up
pub const OP_COND_MAX_POLLS: u32 = 100;
/// Delay between IO_SEND_OP_COND polls, in milliseconds
pub const OP_COND_POLL_DELAY_MS: u32 = 10;

// ============================================================================
// Extended transfer limits
// ============================================================================

/// Largest byte count a byte-mode IO_RW_EXTENDED can move (encoded as 0)
pub const MAX_BYTE_MODE_SIZE: u32 = 512;
/// Largest block count a block-mode IO_RW_EXTENDED can carry
pub const MAX_BLOCK_COUNT: u32 = 511;

// ============================================================================
// Card Common Control Registers (function 0)
// ============================================================================

/// CCCR/SDIO revision
pub const SDIO_CCCR_CCCR: u32 = 0x00;
/// SD specification revision
pub const SDIO_CCCR_SD: u32 = 0x01;
/// I/O function enable
pub const SDIO_CCCR_IOEX: u32 = 0x02;
/// I/O function ready
pub const SDIO_CCCR_IORX: u32 = 0x03;
/// Interrupt enable
pub const SDIO_CCCR_IENX: u32 = 0x04;
/// Interrupt pending
pub const SDIO_CCCR_INTX: u32 = 0x05;
/// I/O abort / reset
pub const SDIO_CCCR_ABORT: u32 = 0x06;
/// Bus interface control
pub const SDIO_CCCR_IF: u32 = 0x07;
/// Card capability
pub const SDIO_CCCR_CAPS: u32 = 0x08;

/// ABORT register: I/O card reset (write-only, self-clearing)
pub const SDIO_CCCR_ABORT_RES: u8 = 1 << 3;
