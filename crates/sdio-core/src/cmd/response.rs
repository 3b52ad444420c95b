//! Response decoding
//!
//! Native and SPI mode carry the same logical R4/R5 content at different
//! word and bit offsets. Every decoder here takes the [`BusMode`] explicitly
//! so the whole table lives in one place.

use crate::error::{Error, Result};
use bitflags::bitflags;

/// Electrical/protocol mode the bus is running in
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum BusMode {
    /// SD native mode (1- or 4-bit)
    #[default]
    Native,
    /// SPI mode
    Spi,
}

impl BusMode {
    /// Returns true in SPI mode
    pub const fn is_spi(self) -> bool {
        matches!(self, Self::Spi)
    }

    /// Response word holding the R4 OCR
    const fn r4_word(self) -> usize {
        match self {
            Self::Native => 0,
            Self::Spi => 1,
        }
    }

    /// Bit offset of the data byte in R5 word 0
    const fn r5_data_shift(self) -> u32 {
        match self {
            Self::Native => 0,
            Self::Spi => 8,
        }
    }
}

/// R4 bit 31: card has finished initialization
pub const R4_CARD_READY: u32 = 1 << 31;
/// R4 bits 30..28: number of I/O functions
pub const R4_NUM_FUNCTIONS_SHIFT: u32 = 28;
/// R4 bit 27: memory present
pub const R4_MEMORY_PRESENT: u32 = 1 << 27;
/// R4 bits 23..0: I/O OCR voltage window
pub const R4_OCR_MASK: u32 = 0x00FF_FFFF;

bitflags! {
    /// Native-mode R5 response flags (bits 15..8 of word 0)
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct R5Flags: u32 {
        /// CRC of the previous command failed
        const COM_CRC_ERROR   = 1 << 15;
        /// Command not legal in the current state
        const ILLEGAL_COMMAND = 1 << 14;
        /// Generic error
        const ERROR           = 1 << 11;
        /// Invalid function number
        const FUNCTION_NUMBER = 1 << 9;
        /// Argument out of range
        const OUT_OF_RANGE    = 1 << 8;
    }
}

/// R5 bits 13..12: card I/O state
const R5_IO_STATE_SHIFT: u32 = 12;

/// Card I/O state reported in an R5 response
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoState {
    /// Disabled (not selected)
    Dis,
    /// Command state, DAT lines free
    Cmd,
    /// Transfer state, DAT lines busy
    Trn,
    /// Reserved
    Rfu,
}

/// Raw response words as returned by the host
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Response(pub [u32; 4]);

impl Response {
    /// Response with `word0` in the first slot and the rest zeroed
    pub const fn short(word0: u32) -> Self {
        Self([word0, 0, 0, 0])
    }

    /// OCR reported by an R4 response
    pub const fn r4_ocr(&self, mode: BusMode) -> u32 {
        self.0[mode.r4_word()]
    }

    /// Returns true if an R4 response has the card-ready bit set
    pub const fn card_ready(&self, mode: BusMode) -> bool {
        self.r4_ocr(mode) & R4_CARD_READY != 0
    }

    /// Native-mode R5 status flags
    pub const fn r5_flags(&self) -> R5Flags {
        R5Flags::from_bits_truncate(self.0[0])
    }

    /// Native-mode R5 I/O state
    pub const fn r5_io_state(&self) -> IoState {
        match (self.0[0] >> R5_IO_STATE_SHIFT) & 0x3 {
            0 => IoState::Dis,
            1 => IoState::Cmd,
            2 => IoState::Trn,
            _ => IoState::Rfu,
        }
    }

    /// Check the R5 error flags
    ///
    /// In SPI mode the host has already turned status bits into transport
    /// errors, so nothing is checked. In native mode the first flag set, in
    /// order ERROR, FUNCTION_NUMBER, OUT_OF_RANGE, decides the error.
    pub fn r5_check(&self, mode: BusMode) -> Result<()> {
        if mode.is_spi() {
            return Ok(());
        }

        let flags = self.r5_flags();
        if flags.contains(R5Flags::ERROR) {
            Err(Error::IoError)
        } else if flags.contains(R5Flags::FUNCTION_NUMBER) {
            Err(Error::InvalidArgument)
        } else if flags.contains(R5Flags::OUT_OF_RANGE) {
            Err(Error::OutOfRange)
        } else {
            Ok(())
        }
    }

    /// Data byte carried by an R5 response
    pub const fn r5_data(&self, mode: BusMode) -> u8 {
        (self.0[0] >> mode.r5_data_shift()) as u8
    }
}

/// Decoded view of an R4 OCR
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Ocr(pub u32);

impl Ocr {
    /// Card finished initialization
    pub const fn ready(&self) -> bool {
        self.0 & R4_CARD_READY != 0
    }

    /// Number of I/O functions (not counting function 0)
    pub const fn num_functions(&self) -> u8 {
        ((self.0 >> R4_NUM_FUNCTIONS_SHIFT) & 0x7) as u8
    }

    /// Combo card with SD memory
    pub const fn memory_present(&self) -> bool {
        self.0 & R4_MEMORY_PRESENT != 0
    }

    /// Supported voltage window
    pub const fn voltages(&self) -> u32 {
        self.0 & R4_OCR_MASK
    }

    /// Voltage window to request from a card given what the host supports
    ///
    /// Returns 0 when the windows do not overlap.
    pub const fn select_voltage(&self, host_ocr: u32) -> u32 {
        self.voltages() & host_ocr & R4_OCR_MASK
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_r4_word_by_mode() {
        let resp = Response([0x8000_0000 | 0x30_0000, 0x1000_FF00, 0, 0]);
        assert!(resp.card_ready(BusMode::Native));
        assert!(!resp.card_ready(BusMode::Spi));
        assert_eq!(resp.r4_ocr(BusMode::Native), 0x8030_0000);
        assert_eq!(resp.r4_ocr(BusMode::Spi), 0x1000_FF00);
    }

    #[test]
    fn test_r5_priority() {
        let both = Response::short((R5Flags::FUNCTION_NUMBER | R5Flags::OUT_OF_RANGE).bits());
        assert_eq!(both.r5_check(BusMode::Native), Err(Error::InvalidArgument));

        let all = Response::short(
            (R5Flags::ERROR | R5Flags::FUNCTION_NUMBER | R5Flags::OUT_OF_RANGE).bits(),
        );
        assert_eq!(all.r5_check(BusMode::Native), Err(Error::IoError));

        let range = Response::short(R5Flags::OUT_OF_RANGE.bits());
        assert_eq!(range.r5_check(BusMode::Native), Err(Error::OutOfRange));

        // Not one of the three checked flags
        let crc = Response::short(R5Flags::COM_CRC_ERROR.bits());
        assert_eq!(crc.r5_check(BusMode::Native), Ok(()));
    }

    #[test]
    fn test_r5_spi_trusts_host() {
        let all = Response::short(0xFFFF_FFFF);
        assert_eq!(all.r5_check(BusMode::Spi), Ok(()));
    }

    #[test]
    fn test_r5_data_offset() {
        let resp = Response::short(0x0000_12AB | (1 << 12));
        assert_eq!(resp.r5_data(BusMode::Native), 0xAB);
        assert_eq!(resp.r5_data(BusMode::Spi), 0x12);
        assert_eq!(resp.r5_io_state(), IoState::Cmd);
    }

    #[test]
    fn test_ocr_fields() {
        let ocr = Ocr(0x8000_0000 | (2 << 28) | (1 << 27) | 0x30_0000);
        assert!(ocr.ready());
        assert_eq!(ocr.num_functions(), 2);
        assert!(ocr.memory_present());
        assert_eq!(ocr.voltages(), 0x30_0000);
        assert_eq!(ocr.select_voltage(0x10_0000), 0x10_0000);
        assert_eq!(ocr.select_voltage(0x80), 0);
    }
}
