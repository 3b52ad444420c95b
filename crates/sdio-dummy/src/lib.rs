//! sdio-dummy - In-memory SDIO card emulator for testing
//!
//! This crate provides a dummy host whose "bus" ends in an emulated SDIO
//! card with a register window per function. It's useful for testing and
//! development without real hardware.

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

#[cfg(feature = "std")]
mod error;

#[cfg(feature = "std")]
pub use error::DummyError;

#[cfg(feature = "alloc")]
use alloc::vec;
#[cfg(feature = "alloc")]
use alloc::vec::Vec;

use sdio_core::cmd::BusMode;
#[cfg(feature = "alloc")]
use sdio_core::cmd::{
    arg, DataBuf, DataTransfer, R5Flags, RequestStatus, Response, SdioCommand,
    MAX_BYTE_MODE_SIZE, R4_CARD_READY, R4_MEMORY_PRESENT, R4_NUM_FUNCTIONS_SHIFT, R4_OCR_MASK,
    SDIO_CCCR_ABORT, SDIO_CCCR_ABORT_RES, SDIO_CCCR_CCCR, SDIO_CCCR_SD, SD_IO_RW_DIRECT,
    SD_IO_RW_EXTENDED, SD_IO_SEND_OP_COND,
};
#[cfg(feature = "alloc")]
use sdio_core::error::TransportError;
#[cfg(feature = "alloc")]
use sdio_core::host::SdioHost;

/// R5 I/O state: command state
#[cfg(feature = "alloc")]
const R5_STATE_CMD: u32 = 1 << 12;
/// R5 I/O state: transfer state
#[cfg(feature = "alloc")]
const R5_STATE_TRN: u32 = 2 << 12;

/// Configuration for the dummy card
#[derive(Debug, Clone)]
pub struct DummyConfig {
    /// Bus mode the host reports
    pub bus_mode: BusMode,
    /// Voltage window the card supports (OCR bits 23..0)
    pub voltages: u32,
    /// Number of I/O functions besides function 0 (0-7)
    pub num_functions: u8,
    /// Report an SD memory portion
    pub memory_present: bool,
    /// Negotiating IO_SEND_OP_COND polls answered "busy" before the card
    /// reports ready
    pub ready_after: u32,
    /// Size of each function's register window in bytes
    pub window: u32,
}

impl Default for DummyConfig {
    fn default() -> Self {
        Self {
            bus_mode: BusMode::Native,
            voltages: 0x00FF_8000, // 2.7-3.6V
            num_functions: 2,
            memory_present: false,
            ready_after: 2,
            window: 0x2_0000,
        }
    }
}

#[cfg(feature = "std")]
impl DummyConfig {
    /// Build a configuration from `key=value` programmer parameters
    ///
    /// Recognized keys: `spi`, `functions`, `memory`, `ready_after`, `ocr`,
    /// `window`. Numbers may be decimal or `0x`-prefixed hex.
    pub fn from_params(
        params: &std::collections::HashMap<String, String>,
    ) -> Result<Self, DummyError> {
        let mut config = Self::default();

        for (key, value) in params {
            let invalid = || DummyError::InvalidParameter {
                key: key.clone(),
                value: value.clone(),
            };

            match key.as_str() {
                "spi" => {
                    config.bus_mode = if parse_bool(value).ok_or_else(invalid)? {
                        BusMode::Spi
                    } else {
                        BusMode::Native
                    }
                }
                "memory" => config.memory_present = parse_bool(value).ok_or_else(invalid)?,
                "functions" => {
                    config.num_functions = parse_u32(value)
                        .filter(|&n| n <= 7)
                        .ok_or_else(invalid)? as u8
                }
                "ready_after" => config.ready_after = parse_u32(value).ok_or_else(invalid)?,
                "ocr" => {
                    config.voltages = parse_u32(value)
                        .map(|v| v & R4_OCR_MASK)
                        .filter(|&v| v != 0)
                        .ok_or_else(invalid)?
                }
                "window" => {
                    config.window = parse_u32(value)
                        .filter(|&w| w > 0 && w <= arg::ADDRESS_MAX + 1)
                        .ok_or_else(invalid)?
                }
                _ => return Err(DummyError::UnknownParameter(key.clone())),
            }
        }

        Ok(config)
    }
}

#[cfg(feature = "std")]
fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(feature = "std")]
fn parse_u32(s: &str) -> Option<u32> {
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => s.parse().ok(),
    }
}

/// Outcome of decoding an I/O command against the card
#[cfg(feature = "alloc")]
enum Access {
    /// Register `offset` in the flat register array
    Ok(usize),
    /// Card answers with these R5 error flags
    Rejected(R5Flags),
}

/// Dummy SDIO host with an emulated card behind it
///
/// Emulates the card side of IO_SEND_OP_COND, IO_RW_DIRECT and
/// IO_RW_EXTENDED, and records every command it is given.
#[cfg(feature = "alloc")]
pub struct DummySdio {
    config: DummyConfig,
    /// Register windows for functions 0..=num_functions, back to back
    regs: Vec<u8>,
    polls: u32,
    ready: bool,
    commands: Vec<SdioCommand>,
    delayed_ms: u64,
    fail_command: Option<TransportError>,
    fail_data: Option<TransportError>,
    force_status: Option<R5Flags>,
}

#[cfg(feature = "alloc")]
impl DummySdio {
    /// Create a new dummy card with the given configuration
    pub fn new(config: DummyConfig) -> Self {
        let functions = config.num_functions as usize + 1;
        let mut card = Self {
            regs: vec![0; functions * config.window as usize],
            config,
            polls: 0,
            ready: false,
            commands: Vec::new(),
            delayed_ms: 0,
            fail_command: None,
            fail_data: None,
            force_status: None,
        };
        card.init_cccr();
        card
    }

    /// Create a new dummy card with default configuration
    pub fn new_default() -> Self {
        Self::new(DummyConfig::default())
    }

    /// Get the configuration
    pub fn config(&self) -> &DummyConfig {
        &self.config
    }

    /// Returns true once the card has reported ready
    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Every command issued since creation or the last [`clear_log`](Self::clear_log)
    pub fn commands(&self) -> &[SdioCommand] {
        &self.commands
    }

    /// Forget recorded commands
    pub fn clear_log(&mut self) {
        self.commands.clear();
    }

    /// Total time the host was asked to wait
    pub fn delayed_ms(&self) -> u64 {
        self.delayed_ms
    }

    /// Read a register directly, bypassing the bus
    pub fn register(&self, func: u8, addr: u32) -> Option<u8> {
        self.offset(func, addr).map(|off| self.regs[off])
    }

    /// Write a register directly, bypassing the bus
    pub fn set_register(&mut self, func: u8, addr: u32, value: u8) -> bool {
        match self.offset(func, addr) {
            Some(off) => {
                self.regs[off] = value;
                true
            }
            None => false,
        }
    }

    /// Fail the next command with `err` before it reaches the card
    pub fn fail_next_command(&mut self, err: TransportError) {
        self.fail_command = Some(err);
    }

    /// Fail the data phase of the next IO_RW_EXTENDED with `err`
    pub fn fail_next_data(&mut self, err: TransportError) {
        self.fail_data = Some(err);
    }

    /// Add `flags` to the next R5 response
    pub fn force_next_status(&mut self, flags: R5Flags) {
        self.force_status = Some(flags);
    }

    fn init_cccr(&mut self) {
        // SDIO 3.00, CCCR 3.00; SD 3.00
        self.regs[SDIO_CCCR_CCCR as usize] = 0x43;
        self.regs[SDIO_CCCR_SD as usize] = 0x03;
    }

    fn reset(&mut self) {
        log::debug!("dummy: card reset");
        self.polls = 0;
        self.ready = false;
        for byte in &mut self.regs[..self.config.window as usize] {
            *byte = 0;
        }
        self.init_cccr();
    }

    fn offset(&self, func: u8, addr: u32) -> Option<usize> {
        if func > self.config.num_functions || addr >= self.config.window {
            return None;
        }
        Some(func as usize * self.config.window as usize + addr as usize)
    }

    fn check_access(&self, func: u8, addr: u32) -> Access {
        if func > self.config.num_functions {
            return Access::Rejected(R5Flags::FUNCTION_NUMBER);
        }
        match self.offset(func, addr) {
            Some(off) => Access::Ok(off),
            None => Access::Rejected(R5Flags::OUT_OF_RANGE),
        }
    }

    fn ocr(&self) -> u32 {
        let mut ocr = self.config.voltages
            | ((self.config.num_functions as u32 & 0x7) << R4_NUM_FUNCTIONS_SHIFT);
        if self.config.memory_present {
            ocr |= R4_MEMORY_PRESENT;
        }
        if self.ready {
            ocr |= R4_CARD_READY;
        }
        ocr
    }

    fn r4(&self) -> Response {
        match self.config.bus_mode {
            BusMode::Native => Response::short(self.ocr()),
            BusMode::Spi => Response([0, self.ocr(), 0, 0]),
        }
    }

    /// Build an R5 response, or the transport error an SPI host would raise
    fn r5(&mut self, flags: R5Flags, state: u32, data: u8) -> Result<Response, TransportError> {
        let flags = flags | self.force_status.take().unwrap_or(R5Flags::empty());
        match self.config.bus_mode {
            BusMode::Native => Ok(Response::short(flags.bits() | state | data as u32)),
            BusMode::Spi if flags.is_empty() => Ok(Response::short((data as u32) << 8)),
            BusMode::Spi => Err(TransportError::Other(Some("R5 error status"))),
        }
    }

    fn handle_op_cond(&mut self, arg: u32) -> Response {
        if arg & R4_OCR_MASK & self.config.voltages != 0 && !self.ready {
            self.polls += 1;
            if self.polls > self.config.ready_after {
                log::debug!("dummy: card ready after {} polls", self.polls);
                self.ready = true;
            }
        }
        self.r4()
    }

    fn handle_direct(&mut self, cmd_arg: u32) -> Result<Response, TransportError> {
        let write = arg::RW_FLAG.decode(cmd_arg) != 0;
        let func = arg::FUNCTION.decode(cmd_arg) as u8;
        let raw = arg::RAW_FLAG.decode(cmd_arg) != 0;
        let addr = arg::ADDRESS.decode(cmd_arg);
        let data = arg::DATA.decode(cmd_arg) as u8;

        let off = match self.check_access(func, addr) {
            Access::Ok(off) => off,
            Access::Rejected(flags) => return self.r5(flags, R5_STATE_CMD, 0),
        };

        if write {
            if func == 0 && addr == SDIO_CCCR_ABORT && data & SDIO_CCCR_ABORT_RES != 0 {
                self.reset();
                return self.r5(R5Flags::empty(), R5_STATE_CMD, 0);
            }
            self.regs[off] = data;
        }

        // Writes without RAW echo the written byte
        let out = if write && !raw { data } else { self.regs[off] };
        self.r5(R5Flags::empty(), R5_STATE_CMD, out)
    }

    fn handle_extended(
        &mut self,
        cmd: &SdioCommand,
        data: &mut DataTransfer<'_>,
    ) -> RequestStatus {
        let write = arg::RW_FLAG.decode(cmd.arg) != 0;
        let func = arg::FUNCTION.decode(cmd.arg) as u8;
        let block_mode = arg::BLOCK_MODE.decode(cmd.arg) != 0;
        let incr = arg::INCR_ADDR.decode(cmd.arg) != 0;
        let addr = arg::ADDRESS.decode(cmd.arg);
        let count = arg::COUNT.decode(cmd.arg);

        let len = if block_mode {
            if count != data.blocks {
                return RequestStatus::command_failed(TransportError::Other(Some(
                    "block count does not match data phase",
                )));
            }
            count as usize * data.blksz as usize
        } else if count == 0 {
            MAX_BYTE_MODE_SIZE as usize
        } else {
            count as usize
        };

        if write != data.buf.is_write() || len != data.len() || data.buf.len() < len {
            return RequestStatus::command_failed(TransportError::Other(Some(
                "command does not match data phase",
            )));
        }

        let last = if incr && len > 0 { addr + len as u32 - 1 } else { addr };
        let base = match (self.check_access(func, addr), self.check_access(func, last)) {
            (Access::Ok(base), Access::Ok(_)) => base,
            (Access::Rejected(flags), _) | (_, Access::Rejected(flags)) => {
                return match self.r5(flags, R5_STATE_CMD, 0) {
                    Ok(resp) => RequestStatus::ok(resp),
                    Err(e) => RequestStatus::command_failed(e),
                };
            }
        };

        let resp = match self.r5(R5Flags::empty(), R5_STATE_TRN, 0) {
            Ok(resp) => resp,
            Err(e) => return RequestStatus::command_failed(e),
        };

        if let Some(err) = self.fail_data.take() {
            return RequestStatus::data_failed(resp, err);
        }

        match &mut data.buf {
            DataBuf::Read(buf) => {
                for (i, byte) in buf[..len].iter_mut().enumerate() {
                    *byte = self.regs[if incr { base + i } else { base }];
                }
            }
            DataBuf::Write(buf) => {
                for (i, &byte) in buf[..len].iter().enumerate() {
                    self.regs[if incr { base + i } else { base }] = byte;
                }
            }
        }

        log::trace!(
            "dummy: CMD53 {} F{} 0x{:05X} {} bytes{}",
            if write { "write" } else { "read" },
            func,
            addr,
            len,
            if incr { "" } else { " (fixed)" }
        );
        RequestStatus::ok(resp)
    }
}

#[cfg(feature = "alloc")]
impl SdioHost for DummySdio {
    fn bus_mode(&self) -> BusMode {
        self.config.bus_mode
    }

    fn execute(&mut self, cmd: &SdioCommand) -> Result<Response, TransportError> {
        self.commands.push(*cmd);

        if let Some(err) = self.fail_command.take() {
            return Err(err);
        }

        match cmd.opcode {
            SD_IO_SEND_OP_COND => Ok(self.handle_op_cond(cmd.arg)),
            SD_IO_RW_DIRECT => self.handle_direct(cmd.arg),
            _ => Err(TransportError::NotSupported),
        }
    }

    fn execute_with_data(
        &mut self,
        cmd: &SdioCommand,
        data: &mut DataTransfer<'_>,
    ) -> RequestStatus {
        self.commands.push(*cmd);

        if let Some(err) = self.fail_command.take() {
            return RequestStatus::command_failed(err);
        }

        match cmd.opcode {
            SD_IO_RW_EXTENDED => self.handle_extended(cmd, data),
            _ => RequestStatus::command_failed(TransportError::NotSupported),
        }
    }

    fn delay_ms(&mut self, ms: u32) {
        // No delay needed for an in-memory card
        self.delayed_ms += ms as u64;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdio_core::cmd::{FunctionNumber, OP_COND_MAX_POLLS};
    use sdio_core::error::Error;
    use sdio_core::protocol::{self, OpCondState};
    use std::collections::HashMap;

    fn all_functions() -> DummySdio {
        DummySdio::new(DummyConfig {
            num_functions: 7,
            ..DummyConfig::default()
        })
    }

    #[test]
    fn test_probe_is_single_command() {
        let mut card = DummySdio::new_default();
        let reply = protocol::send_io_op_cond(&mut card, 0);
        assert_eq!(card.commands().len(), 1);

        let ocr = reply.ocr();
        assert!(!ocr.ready());
        assert_eq!(ocr.num_functions(), 2);
        assert_eq!(ocr.voltages(), 0x00FF_8000);
    }

    #[test]
    fn test_ready_on_sixth_poll() {
        let mut card = DummySdio::new(DummyConfig {
            ready_after: 5,
            ..DummyConfig::default()
        });
        let ocr = protocol::send_io_op_cond(&mut card, 0x0030_0000).into_result().unwrap();
        assert_eq!(card.commands().len(), 6);
        assert_eq!(card.delayed_ms(), 50);
        assert_ne!(ocr & R4_CARD_READY, 0);
        assert!(card.is_ready());
    }

    #[test]
    fn test_never_ready() {
        let mut card = DummySdio::new(DummyConfig {
            ready_after: u32::MAX,
            ..DummyConfig::default()
        });
        let reply = protocol::send_io_op_cond(&mut card, 0x0030_0000);
        assert_eq!(reply.state, OpCondState::TimedOut);
        assert_eq!(card.commands().len(), OP_COND_MAX_POLLS as usize);
        assert_eq!(card.delayed_ms(), 1000);
        // Stale OCR still carries the card's capabilities
        assert_eq!(reply.ocr().num_functions(), 2);
        assert_eq!(reply.into_result(), Err(Error::Timeout));
    }

    #[test]
    fn test_io_init_spi() {
        let mut card = DummySdio::new(DummyConfig {
            bus_mode: BusMode::Spi,
            memory_present: true,
            ..DummyConfig::default()
        });
        let ocr = protocol::io_init(&mut card, 0x0010_0000).unwrap();
        assert!(ocr.ready());
        assert!(ocr.memory_present());
        // Probe + 2 busy polls + ready poll
        assert_eq!(card.commands().len(), 4);
    }

    #[test]
    fn test_direct_round_trip_all_functions() {
        for mode in [BusMode::Native, BusMode::Spi] {
            let mut card = DummySdio::new(DummyConfig {
                bus_mode: mode,
                num_functions: 7,
                ..DummyConfig::default()
            });

            for func in FunctionNumber::all() {
                for (i, addr) in [0x10u32, 0x1234, 0x1FFFF].into_iter().enumerate() {
                    let value = func.get().wrapping_mul(31).wrapping_add(i as u8) ^ 0xA5;
                    protocol::io_write_byte(&mut card, func, addr, value).unwrap();
                    assert_eq!(protocol::io_read_byte(&mut card, func, addr), Ok(value));
                }
            }
        }
    }

    #[test]
    fn test_read_after_write() {
        let mut card = DummySdio::new_default();
        let out = protocol::io_write_read_byte(&mut card, FunctionNumber::F1, 0x20, 0x3C).unwrap();
        assert_eq!(out, 0x3C);
        assert_eq!(card.register(1, 0x20), Some(0x3C));
    }

    #[test]
    fn test_cccr_revision() {
        let mut card = DummySdio::new_default();
        assert_eq!(
            protocol::io_read_byte(&mut card, FunctionNumber::F0, SDIO_CCCR_CCCR),
            Ok(0x43)
        );
    }

    #[test]
    fn test_bad_address_issues_nothing() {
        let mut card = all_functions();
        assert_eq!(
            protocol::io_write_byte(&mut card, FunctionNumber::F1, 0x2_0000, 1),
            Err(Error::InvalidArgument)
        );
        let data = [0u8; 4];
        assert_eq!(
            protocol::io_rw_extended(
                &mut card,
                FunctionNumber::F1,
                0x4_0000,
                true,
                DataBuf::Write(&data),
                1,
                4
            ),
            Err(Error::InvalidArgument)
        );
        assert!(card.commands().is_empty());
    }

    #[test]
    fn test_card_rejects_function_and_range() {
        let mut card = DummySdio::new(DummyConfig {
            num_functions: 1,
            window: 0x100,
            ..DummyConfig::default()
        });

        assert_eq!(
            protocol::io_read_byte(&mut card, FunctionNumber::F4, 0),
            Err(Error::InvalidArgument)
        );
        assert_eq!(
            protocol::io_read_byte(&mut card, FunctionNumber::F1, 0x100),
            Err(Error::OutOfRange)
        );

        // Function number takes priority over range
        assert_eq!(
            protocol::io_read_byte(&mut card, FunctionNumber::F4, 0x1000),
            Err(Error::InvalidArgument)
        );

        // A transfer running off the end of the window
        let mut buf = [0u8; 32];
        assert_eq!(
            protocol::io_rw_extended(
                &mut card,
                FunctionNumber::F1,
                0xF0,
                true,
                DataBuf::Read(&mut buf),
                1,
                32
            ),
            Err(Error::OutOfRange)
        );
    }

    #[test]
    fn test_forced_status() {
        let mut card = DummySdio::new_default();
        card.force_next_status(R5Flags::ERROR | R5Flags::OUT_OF_RANGE);
        assert_eq!(
            protocol::io_read_byte(&mut card, FunctionNumber::F1, 0),
            Err(Error::IoError)
        );
        assert!(protocol::io_read_byte(&mut card, FunctionNumber::F1, 0).is_ok());
    }

    #[test]
    fn test_spi_errors_come_from_host() {
        let mut card = DummySdio::new(DummyConfig {
            bus_mode: BusMode::Spi,
            num_functions: 1,
            ..DummyConfig::default()
        });
        let err = protocol::io_read_byte(&mut card, FunctionNumber::F3, 0).unwrap_err();
        assert!(matches!(err, Error::Command(TransportError::Other(_))));
    }

    #[test]
    fn test_extended_block_round_trip() {
        let mut card = DummySdio::new_default();
        let data: Vec<u8> = (0..256u32).map(|i| (i * 7) as u8).collect();

        protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F2,
            0x1000,
            true,
            DataBuf::Write(&data),
            4,
            64,
        )
        .unwrap();

        let cmd = card.commands()[0];
        assert_eq!(arg::BLOCK_MODE.decode(cmd.arg), 1);
        assert_eq!(arg::COUNT.decode(cmd.arg), 4);

        let mut buf = vec![0u8; 256];
        protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F2,
            0x1000,
            true,
            DataBuf::Read(&mut buf),
            4,
            64,
        )
        .unwrap();
        assert_eq!(buf, data);
        assert_eq!(card.register(2, 0x1000 + 255), Some(data[255]));
    }

    #[test]
    fn test_extended_byte_mode_512() {
        let mut card = DummySdio::new_default();
        let data = [0x77u8; 512];
        protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F1,
            0x100,
            true,
            DataBuf::Write(&data),
            1,
            512,
        )
        .unwrap();

        let cmd = card.commands()[0];
        assert_eq!(cmd.arg & 0x1FF, 0);
        assert_eq!(arg::BLOCK_MODE.decode(cmd.arg), 0);
        assert_eq!(card.register(1, 0x100 + 511), Some(0x77));
        assert_eq!(card.register(1, 0x100 + 512), Some(0));
    }

    #[test]
    fn test_fixed_address_fifo() {
        let mut card = DummySdio::new_default();
        let data = [1u8, 2, 3, 4];
        protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F1,
            0x08,
            false,
            DataBuf::Write(&data),
            1,
            4,
        )
        .unwrap();
        assert_eq!(card.register(1, 0x08), Some(4));
        assert_eq!(card.register(1, 0x09), Some(0));
    }

    #[test]
    fn test_multi_round_trip() {
        let mut card = DummySdio::new_default();
        let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        protocol::io_write_multi(&mut card, FunctionNumber::F1, 0x200, true, &data, 512).unwrap();

        let mut buf = vec![0u8; data.len()];
        protocol::io_read_multi(&mut card, FunctionNumber::F1, 0x200, true, &mut buf, 512)
            .unwrap();
        assert_eq!(buf, data);
    }

    #[test]
    fn test_command_error_wins() {
        let mut card = DummySdio::new_default();
        card.fail_next_command(TransportError::Timeout);
        card.fail_next_data(TransportError::Crc);

        let mut buf = [0u8; 16];
        let err = protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F1,
            0,
            true,
            DataBuf::Read(&mut buf),
            1,
            16,
        )
        .unwrap_err();
        assert_eq!(err, Error::Command(TransportError::Timeout));
        assert!(err.is_timeout());

        // The data fault is still armed for the next transfer
        let err = protocol::io_rw_extended(
            &mut card,
            FunctionNumber::F1,
            0,
            true,
            DataBuf::Read(&mut buf),
            1,
            16,
        )
        .unwrap_err();
        assert_eq!(err, Error::Data(TransportError::Crc));
    }

    #[test]
    fn test_io_reset() {
        let mut card = DummySdio::new_default();
        protocol::io_init(&mut card, 0x0030_0000).unwrap();
        assert!(card.is_ready());

        protocol::io_reset(&mut card).unwrap();
        assert!(!card.is_ready());
        assert_eq!(card.register(0, SDIO_CCCR_ABORT), Some(0));
    }

    #[test]
    fn test_config_from_params() {
        let mut params = HashMap::new();
        params.insert("spi".to_string(), "1".to_string());
        params.insert("functions".to_string(), "7".to_string());
        params.insert("ocr".to_string(), "0x300000".to_string());
        let config = DummyConfig::from_params(&params).unwrap();
        assert_eq!(config.bus_mode, BusMode::Spi);
        assert_eq!(config.num_functions, 7);
        assert_eq!(config.voltages, 0x30_0000);

        params.insert("functions".to_string(), "8".to_string());
        assert!(matches!(
            DummyConfig::from_params(&params),
            Err(DummyError::InvalidParameter { .. })
        ));

        let mut params = HashMap::new();
        params.insert("speed".to_string(), "fast".to_string());
        assert!(matches!(
            DummyConfig::from_params(&params),
            Err(DummyError::UnknownParameter(_))
        ));
    }
}
