//! SDIO command structure

use super::arg::{self, BlockMode};
use super::opcodes::{MMC_CMD_RETRIES, SD_IO_RW_DIRECT, SD_IO_RW_EXTENDED, SD_IO_SEND_OP_COND};
use super::FunctionNumber;
use bitflags::bitflags;

bitflags! {
    /// Expected response format
    ///
    /// The native-mode and SPI-mode formats are requested together; the host
    /// applies whichever matches the bus mode it is running in.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ResponseFlags: u32 {
        /// A response is expected
        const PRESENT   = 1 << 0;
        /// 136-bit response
        const LONG      = 1 << 1;
        /// Response carries a valid CRC
        const CRC       = 1 << 2;
        /// Card may signal busy after the response
        const BUSY      = 1 << 3;
        /// Response echoes the command index
        const OPCODE    = 1 << 4;

        /// SPI: one status byte
        const SPI_S1    = 1 << 7;
        /// SPI: second status byte
        const SPI_S2    = 1 << 8;
        /// SPI: four data bytes follow the status
        const SPI_B4    = 1 << 9;
        /// SPI: card may signal busy
        const SPI_BUSY  = 1 << 10;

        /// R4: IO_SEND_OP_COND response (OCR, no CRC)
        const R4 = Self::PRESENT.bits();
        /// R5: IO_RW_DIRECT / IO_RW_EXTENDED response
        const R5 = Self::PRESENT.bits() | Self::CRC.bits() | Self::OPCODE.bits();
        /// SPI-mode R4
        const SPI_R4 = Self::SPI_S1.bits() | Self::SPI_B4.bits();
        /// SPI-mode R5
        const SPI_R5 = Self::SPI_S1.bits() | Self::SPI_S2.bits();
    }
}

/// Command class, as seen on the bus
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CommandClass {
    /// Addressed command, no data
    #[default]
    Ac,
    /// Addressed command with data transfer
    Adtc,
    /// Broadcast command, no response
    Bc,
    /// Broadcast command with response
    Bcr,
}

/// A single SDIO command
///
/// Built immediately before it is handed to the host and discarded once the
/// response is decoded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SdioCommand {
    /// Command index
    pub opcode: u8,
    /// 32-bit command argument
    pub arg: u32,
    /// Expected response format (native and SPI)
    pub flags: ResponseFlags,
    /// Command class
    pub class: CommandClass,
    /// How many times the host may resend the command on a transport error
    pub retries: u8,
}

impl SdioCommand {
    /// IO_SEND_OP_COND with the given OCR (0 probes without negotiating)
    pub fn io_send_op_cond(ocr: u32) -> Self {
        Self {
            opcode: SD_IO_SEND_OP_COND,
            arg: ocr,
            flags: ResponseFlags::SPI_R4 | ResponseFlags::R4,
            class: CommandClass::Bcr,
            retries: MMC_CMD_RETRIES,
        }
    }

    /// IO_RW_DIRECT for one register byte
    ///
    /// `raw` requests read-after-write and is ignored for reads.
    pub fn io_rw_direct(write: bool, func: FunctionNumber, addr: u32, raw: bool, data: u8) -> Self {
        Self {
            opcode: SD_IO_RW_DIRECT,
            arg: arg::io_rw_direct(write, func, addr, raw, data),
            flags: ResponseFlags::SPI_R5 | ResponseFlags::R5,
            class: CommandClass::Ac,
            retries: 0,
        }
    }

    /// IO_RW_EXTENDED for a byte- or block-mode transfer
    pub fn io_rw_extended(
        write: bool,
        func: FunctionNumber,
        addr: u32,
        incr_addr: bool,
        mode: BlockMode,
    ) -> Self {
        Self {
            opcode: SD_IO_RW_EXTENDED,
            arg: arg::io_rw_extended(write, func, addr, incr_addr, mode),
            flags: ResponseFlags::SPI_R5 | ResponseFlags::R5,
            class: CommandClass::Adtc,
            retries: 0,
        }
    }

    /// Returns true if the command moves data
    pub fn has_data(&self) -> bool {
        self.class == CommandClass::Adtc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_op_cond_command() {
        let cmd = SdioCommand::io_send_op_cond(0x00FF_8000);
        assert_eq!(cmd.opcode, 5);
        assert_eq!(cmd.arg, 0x00FF_8000);
        assert!(cmd.flags.contains(ResponseFlags::R4 | ResponseFlags::SPI_R4));
        assert_eq!(cmd.class, CommandClass::Bcr);
        assert_eq!(cmd.retries, MMC_CMD_RETRIES);
    }

    #[test]
    fn test_io_commands() {
        let cmd = SdioCommand::io_rw_direct(false, FunctionNumber::F0, 0x06, false, 0);
        assert_eq!(cmd.opcode, 52);
        assert_eq!(cmd.retries, 0);
        assert!(!cmd.has_data());

        let cmd =
            SdioCommand::io_rw_extended(true, FunctionNumber::F1, 0, true, BlockMode::Block(2));
        assert_eq!(cmd.opcode, 53);
        assert!(cmd.has_data());
        assert!(cmd.flags.contains(ResponseFlags::R5 | ResponseFlags::SPI_R5));
    }
}
