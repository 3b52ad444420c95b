//! Command argument layouts
//!
//! IO_RW_DIRECT (CMD52):
//!
//! ```text
//!  31  30..28  27   26  25........9   8   7......0
//! R/W  func   RAW   -   address      -   data
//! ```
//!
//! IO_RW_EXTENDED (CMD53):
//!
//! ```text
//!  31  30..28  27     26     25........9   8........0
//! R/W  func   block  incr   address       byte/block count
//! ```
//!
//! IO_SEND_OP_COND (CMD5) carries the OCR as its whole argument.

use super::FunctionNumber;
use super::opcodes::{MAX_BLOCK_COUNT, MAX_BYTE_MODE_SIZE};

/// A contiguous bit field inside a 32-bit command argument
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Field {
    /// Position of the least significant bit
    pub shift: u32,
    /// Width in bits
    pub width: u32,
}

impl Field {
    const fn new(shift: u32, width: u32) -> Self {
        Self { shift, width }
    }

    /// Mask of the field in argument position
    pub const fn mask(&self) -> u32 {
        ((((1u64 << self.width) - 1) as u32) << self.shift) as u32
    }

    /// Largest value the field can hold
    pub const fn max(&self) -> u32 {
        ((1u64 << self.width) - 1) as u32
    }

    /// Place `value` into the field, dropping any bits that do not fit
    pub const fn encode(&self, value: u32) -> u32 {
        (value << self.shift) & self.mask()
    }

    /// Extract the field from an argument
    pub const fn decode(&self, arg: u32) -> u32 {
        (arg & self.mask()) >> self.shift
    }

    /// Encode a single-bit flag
    pub const fn flag(&self, set: bool) -> u32 {
        if set {
            self.mask()
        } else {
            0
        }
    }
}

/// Read (0) / write (1)
pub const RW_FLAG: Field = Field::new(31, 1);
/// Function number
pub const FUNCTION: Field = Field::new(28, 3);
/// CMD52 read-after-write
pub const RAW_FLAG: Field = Field::new(27, 1);
/// CMD53 block mode
pub const BLOCK_MODE: Field = Field::new(27, 1);
/// CMD53 incrementing address
pub const INCR_ADDR: Field = Field::new(26, 1);
/// Register address
pub const ADDRESS: Field = Field::new(9, 17);
/// CMD52 write data
pub const DATA: Field = Field::new(0, 8);
/// CMD53 byte or block count
pub const COUNT: Field = Field::new(0, 9);

/// Highest register address an I/O command can reach
pub const ADDRESS_MAX: u32 = ADDRESS.max();

/// Fields making up a CMD52 argument
pub const CMD52_FIELDS: [Field; 5] = [RW_FLAG, FUNCTION, RAW_FLAG, ADDRESS, DATA];
/// Fields making up a CMD53 argument
pub const CMD53_FIELDS: [Field; 6] = [RW_FLAG, FUNCTION, BLOCK_MODE, INCR_ADDR, ADDRESS, COUNT];

/// True if no two fields share a bit and all fit in 32 bits
pub const fn fields_disjoint(fields: &[Field]) -> bool {
    let mut seen = 0u32;
    let mut i = 0;
    while i < fields.len() {
        if fields[i].shift + fields[i].width > 32 {
            return false;
        }
        let mask = fields[i].mask();
        if seen & mask != 0 {
            return false;
        }
        seen |= mask;
        i += 1;
    }
    true
}

const _: () = assert!(fields_disjoint(&CMD52_FIELDS));
const _: () = assert!(fields_disjoint(&CMD53_FIELDS));
const _: () = assert!(ADDRESS_MAX == 0x1FFFF);
const _: () = assert!(COUNT.max() == MAX_BLOCK_COUNT);

/// Returns true if `addr` fits the 17-bit register address field
pub const fn address_valid(addr: u32) -> bool {
    addr & !ADDRESS_MAX == 0
}

/// Length encoding of an IO_RW_EXTENDED transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BlockMode {
    /// Single transfer of up to 512 bytes
    Byte(u32),
    /// `count` blocks of the function's current block size
    Block(u32),
}

impl BlockMode {
    /// Choose byte or block mode for a transfer of `blocks` x `blksz`
    ///
    /// A single block of at most 512 bytes goes out in byte mode; anything
    /// else needs block mode.
    pub const fn select(blocks: u32, blksz: u32) -> Self {
        if blocks == 1 && blksz <= MAX_BYTE_MODE_SIZE {
            Self::Byte(blksz)
        } else {
            Self::Block(blocks)
        }
    }

    /// Value of the 9-bit count field. A 512-byte byte-mode transfer is
    /// encoded as 0.
    pub const fn count_field(&self) -> u32 {
        match *self {
            Self::Byte(MAX_BYTE_MODE_SIZE) => 0,
            Self::Byte(size) => size,
            Self::Block(count) => count,
        }
    }

    /// Returns true for block mode
    pub const fn is_block(&self) -> bool {
        matches!(self, Self::Block(_))
    }
}

/// Build an IO_RW_DIRECT argument
///
/// `raw` requests read-after-write and only takes effect on writes.
pub const fn io_rw_direct(
    write: bool,
    func: FunctionNumber,
    addr: u32,
    raw: bool,
    data: u8,
) -> u32 {
    RW_FLAG.flag(write)
        | FUNCTION.encode(func.get() as u32)
        | RAW_FLAG.flag(write && raw)
        | ADDRESS.encode(addr)
        | DATA.encode(data as u32)
}

/// Build an IO_RW_EXTENDED argument
pub const fn io_rw_extended(
    write: bool,
    func: FunctionNumber,
    addr: u32,
    incr_addr: bool,
    mode: BlockMode,
) -> u32 {
    RW_FLAG.flag(write)
        | FUNCTION.encode(func.get() as u32)
        | BLOCK_MODE.flag(mode.is_block())
        | INCR_ADDR.flag(incr_addr)
        | ADDRESS.encode(addr)
        | COUNT.encode(mode.count_field())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_disjoint() {
        assert!(fields_disjoint(&CMD52_FIELDS));
        assert!(fields_disjoint(&CMD53_FIELDS));
        // RAW and block mode share bit 27 but never appear in the same command
        assert!(!fields_disjoint(&[RAW_FLAG, BLOCK_MODE]));
        assert!(!fields_disjoint(&[Field::new(30, 3)]));
    }

    #[test]
    fn test_direct_layout() {
        // Write 0xA5 to F1 0x1234 with read-after-write
        let arg = io_rw_direct(true, FunctionNumber::F1, 0x1234, true, 0xA5);
        assert_eq!(arg, 0x8000_0000 | (1 << 28) | 0x0800_0000 | (0x1234 << 9) | 0xA5);

        // RAW is ignored on reads
        let arg = io_rw_direct(false, FunctionNumber::F7, 0x1FFFF, true, 0);
        assert_eq!(arg, (7 << 28) | (0x1FFFF << 9));
        assert_eq!(RAW_FLAG.decode(arg), 0);
    }

    #[test]
    fn test_extended_byte_mode() {
        let mode = BlockMode::select(1, 512);
        assert_eq!(mode, BlockMode::Byte(512));
        let arg = io_rw_extended(true, FunctionNumber::F3, 0x100, true, mode);
        assert_eq!(arg & 0x1FF, 0);
        assert_eq!(BLOCK_MODE.decode(arg), 0);
        assert_eq!(arg, 0x8000_0000 | (3 << 28) | 0x0400_0000 | (0x100 << 9));

        let arg = io_rw_extended(true, FunctionNumber::F3, 0x100, true, BlockMode::select(1, 10));
        assert_eq!(arg & 0x1FF, 10);
    }

    #[test]
    fn test_extended_block_mode() {
        let mode = BlockMode::select(4, 64);
        assert_eq!(mode, BlockMode::Block(4));
        let arg = io_rw_extended(false, FunctionNumber::F2, 0x8000, false, mode);
        assert_eq!(BLOCK_MODE.decode(arg), 1);
        assert_eq!(COUNT.decode(arg), 4);
        assert_eq!(INCR_ADDR.decode(arg), 0);
        assert_eq!(FUNCTION.decode(arg), 2);
        assert_eq!(ADDRESS.decode(arg), 0x8000);

        // One oversized block is still block mode
        assert_eq!(BlockMode::select(1, 1024), BlockMode::Block(1));
    }

    #[test]
    fn test_address_valid() {
        assert!(address_valid(0));
        assert!(address_valid(0x1FFFF));
        assert!(!address_valid(0x20000));
        assert!(!address_valid(u32::MAX));
    }
}
