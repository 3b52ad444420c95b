//! SDIO I/O command sequences
//!
//! This module implements the IO_SEND_OP_COND, IO_RW_DIRECT and
//! IO_RW_EXTENDED exchanges on top of an [`SdioHost`].
//!
//! Every function is a self-contained protocol exchange: build the command,
//! hand it to the host, decode the response. Nothing is kept between calls.
//! Argument checks happen before the first command, so a rejected call never
//! touches the bus.

use crate::cmd::{
    arg, BlockMode, BusMode, DataBuf, DataTransfer, FunctionNumber, Ocr, Response, SdioCommand,
    MAX_BLOCK_COUNT, MAX_BYTE_MODE_SIZE, OP_COND_MAX_POLLS, OP_COND_POLL_DELAY_MS,
    SDIO_CCCR_ABORT, SDIO_CCCR_ABORT_RES,
};
use crate::error::{Error, Result, TransportError};
use crate::host::SdioHost;

// ============================================================================
// IO_SEND_OP_COND
// ============================================================================

/// State of the IO_SEND_OP_COND poll loop
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpCondState {
    /// Card not ready yet, keep polling
    Polling,
    /// Card reported ready, or a probe-only pass completed
    Succeeded,
    /// Poll budget exhausted without the card becoming ready
    TimedOut,
    /// Host reported an error; polling stopped
    Failed(Error),
}

impl OpCondState {
    /// Transition after one command
    fn next(
        probe_only: bool,
        result: &core::result::Result<Response, TransportError>,
        mode: BusMode,
    ) -> Self {
        match result {
            Err(e) => Self::Failed(Error::Command(*e)),
            Ok(_) if probe_only => Self::Succeeded,
            Ok(resp) if resp.card_ready(mode) => Self::Succeeded,
            Ok(_) => Self::Polling,
        }
    }
}

/// Outcome of [`send_io_op_cond`]
///
/// `ocr` holds the OCR from the last command issued, whatever the final
/// state. After a timeout it is the last busy OCR; after a host error it is
/// zero. Check [`OpCondReply::state`] (or use [`OpCondReply::into_result`])
/// before trusting it.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpCondReply {
    /// OCR reported by the card
    pub ocr: u32,
    /// Final state of the poll loop
    pub state: OpCondState,
    /// Number of commands issued
    pub polls: u32,
}

impl OpCondReply {
    /// Returns true if the card is ready (or the probe completed)
    pub fn is_ok(&self) -> bool {
        self.state == OpCondState::Succeeded
    }

    /// Decoded view of the reported OCR
    pub fn ocr(&self) -> Ocr {
        Ocr(self.ocr)
    }

    /// Convert into the negotiated OCR or the error that ended the loop
    pub fn into_result(self) -> Result<u32> {
        match self.state {
            OpCondState::Succeeded => Ok(self.ocr),
            OpCondState::Failed(e) => Err(e),
            OpCondState::Polling | OpCondState::TimedOut => Err(Error::Timeout),
        }
    }
}

/// Send IO_SEND_OP_COND until the card reports ready
///
/// With `ocr == 0` the card is only probed: exactly one command is sent and
/// its OCR returned. Otherwise the command is repeated every 10 ms, up to 100
/// times, until the card sets its ready bit. A host error stops the loop
/// immediately.
pub fn send_io_op_cond<H: SdioHost + ?Sized>(host: &mut H, ocr: u32) -> OpCondReply {
    let mode = host.bus_mode();
    let cmd = SdioCommand::io_send_op_cond(ocr);
    let probe_only = ocr == 0;

    let mut resp = Response::default();
    let mut state = OpCondState::Polling;
    let mut polls = 0;

    while state == OpCondState::Polling {
        if polls == OP_COND_MAX_POLLS {
            state = OpCondState::TimedOut;
            break;
        }
        polls += 1;

        // A failed command leaves no response words behind
        let result = host.execute(&cmd);
        resp = result.unwrap_or_default();

        state = OpCondState::next(probe_only, &result, mode);
        if state == OpCondState::Polling {
            log::trace!("IO_SEND_OP_COND poll {}: card busy", polls);
            host.delay_ms(OP_COND_POLL_DELAY_MS);
        }
    }

    let reply = OpCondReply {
        ocr: resp.r4_ocr(mode),
        state,
        polls,
    };
    log::debug!(
        "IO_SEND_OP_COND(0x{:08X}): {:?} after {} poll(s), OCR 0x{:08X}",
        ocr,
        reply.state,
        reply.polls,
        reply.ocr
    );
    reply
}

/// Probe the card and negotiate a voltage window
///
/// Sends a probe-only IO_SEND_OP_COND, intersects the card's voltage window
/// with `host_ocr`, and polls with the result until the card is ready.
/// Returns the card's final OCR.
pub fn io_init<H: SdioHost + ?Sized>(host: &mut H, host_ocr: u32) -> Result<Ocr> {
    let card = Ocr(send_io_op_cond(host, 0).into_result()?);
    log::debug!(
        "SDIO card: {} function(s), memory {}, voltages 0x{:06X}",
        card.num_functions(),
        if card.memory_present() { "present" } else { "absent" },
        card.voltages()
    );

    let request = card.select_voltage(host_ocr);
    if request == 0 {
        log::debug!(
            "no common voltage: card 0x{:06X}, host 0x{:06X}",
            card.voltages(),
            host_ocr
        );
        return Err(Error::InvalidArgument);
    }

    send_io_op_cond(host, request).into_result().map(Ocr)
}

// ============================================================================
// IO_RW_DIRECT
// ============================================================================

/// Read or write one register byte with IO_RW_DIRECT
///
/// When `want_output` is set the byte returned by the card is passed back;
/// on a write this also sets the read-after-write flag so the card returns
/// the register's new value.
///
/// # Errors
/// * `InvalidArgument` - `addr` does not fit 17 bits (no command issued), or
///   the card rejected the function number
/// * `IoError` / `OutOfRange` - R5 status flags
/// * `Command` - host error
pub fn io_rw_direct<H: SdioHost + ?Sized>(
    host: &mut H,
    write: bool,
    func: FunctionNumber,
    addr: u32,
    input: u8,
    want_output: bool,
) -> Result<Option<u8>> {
    if !arg::address_valid(addr) {
        return Err(Error::InvalidArgument);
    }

    let mode = host.bus_mode();
    let cmd = SdioCommand::io_rw_direct(write, func, addr, want_output, input);
    let resp = host.execute(&cmd).map_err(Error::Command)?;

    resp.r5_check(mode)?;

    Ok(want_output.then(|| resp.r5_data(mode)))
}

/// Read one register byte
pub fn io_read_byte<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
) -> Result<u8> {
    io_rw_direct(host, false, func, addr, 0, true).map(Option::unwrap_or_default)
}

/// Write one register byte
pub fn io_write_byte<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
    value: u8,
) -> Result<()> {
    io_rw_direct(host, true, func, addr, value, false).map(|_| ())
}

/// Write one register byte and return the value read back
pub fn io_write_read_byte<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
    value: u8,
) -> Result<u8> {
    io_rw_direct(host, true, func, addr, value, true).map(Option::unwrap_or_default)
}

/// Reset the I/O portion of the card
///
/// Sets RES in the CCCR ABORT register. If reading ABORT fails, RES is
/// written on its own.
pub fn io_reset<H: SdioHost + ?Sized>(host: &mut H) -> Result<()> {
    let abort = match io_read_byte(host, FunctionNumber::F0, SDIO_CCCR_ABORT) {
        Ok(value) => value | SDIO_CCCR_ABORT_RES,
        Err(e) => {
            log::debug!("reading CCCR ABORT failed ({}), resetting anyway", e);
            SDIO_CCCR_ABORT_RES
        }
    };

    io_write_byte(host, FunctionNumber::F0, SDIO_CCCR_ABORT, abort)
}

// ============================================================================
// IO_RW_EXTENDED
// ============================================================================

/// Transfer `blocks` x `blksz` bytes with one IO_RW_EXTENDED command
///
/// The direction comes from `buf`. A single block of at most 512 bytes is
/// sent in byte mode, anything else in block mode (the function's block size
/// must already be set to `blksz`). With `incr_addr` unset every byte goes
/// to the same register (FIFO access).
///
/// Callers must not pass a single block larger than 512 bytes. Zero
/// `blocks` or `blksz` is allowed but logged, since the card decides what
/// such a transfer means.
///
/// # Errors
/// * `InvalidArgument` - `addr` does not fit 17 bits, `blocks > 511`, `buf`
///   shorter than the transfer (no command issued), or the card rejected
///   the function number
/// * `Command` - host error during the command phase; data status is
///   ignored
/// * `Data` - host error during the data phase
/// * `IoError` / `OutOfRange` - R5 status flags
pub fn io_rw_extended<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
    incr_addr: bool,
    buf: DataBuf<'_>,
    blocks: u32,
    blksz: u32,
) -> Result<()> {
    debug_assert!(
        !(blocks == 1 && blksz > MAX_BYTE_MODE_SIZE),
        "single-block IO_RW_EXTENDED larger than 512 bytes"
    );
    if blocks == 0 {
        log::warn!("IO_RW_EXTENDED {} 0x{:05X}: zero block count", func, addr);
    }
    if blksz == 0 {
        log::warn!("IO_RW_EXTENDED {} 0x{:05X}: zero block size", func, addr);
    }

    if !arg::address_valid(addr) || blocks > MAX_BLOCK_COUNT {
        return Err(Error::InvalidArgument);
    }
    if buf.len() < blocks as usize * blksz as usize {
        return Err(Error::InvalidArgument);
    }

    let mode = host.bus_mode();
    let cmd = SdioCommand::io_rw_extended(
        buf.is_write(),
        func,
        addr,
        incr_addr,
        BlockMode::select(blocks, blksz),
    );
    let mut data = DataTransfer::new(buf, blocks, blksz);

    let status = host.execute_with_data(&cmd, &mut data);
    if let Some(e) = status.cmd_error {
        return Err(Error::Command(e));
    }
    if let Some(e) = status.data_error {
        return Err(Error::Data(e));
    }

    status.resp.r5_check(mode)
}

/// Split `len` bytes into IO_RW_EXTENDED transfers
///
/// Whole blocks go out in block mode (at most 511 per command), the tail in
/// byte mode chunks of at most `min(blksz, 512)` bytes. Calls `f` with
/// `(offset, blocks, blksz)` for each command.
fn for_each_chunk<F>(len: usize, blksz: u32, mut f: F) -> Result<()>
where
    F: FnMut(usize, u32, u32) -> Result<()>,
{
    if blksz == 0 {
        return Err(Error::InvalidArgument);
    }

    let block = blksz as usize;
    let mut offset = 0;
    let mut remainder = len;

    if remainder > block {
        while remainder >= block {
            let blocks = core::cmp::min(remainder / block, MAX_BLOCK_COUNT as usize);
            f(offset, blocks as u32, blksz)?;
            offset += blocks * block;
            remainder -= blocks * block;
        }
    }

    let byte_max = core::cmp::min(blksz, MAX_BYTE_MODE_SIZE) as usize;
    while remainder > 0 {
        let size = core::cmp::min(remainder, byte_max);
        f(offset, 1, size as u32)?;
        offset += size;
        remainder -= size;
    }

    Ok(())
}

/// Address of the chunk at `offset`
fn chunk_addr(addr: u32, incr_addr: bool, offset: usize) -> u32 {
    if incr_addr {
        addr + offset as u32
    } else {
        addr
    }
}

/// Read `buf.len()` bytes, splitting into as many IO_RW_EXTENDED commands
/// as needed
///
/// `blksz` must match the function's current block size.
pub fn io_read_multi<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
    incr_addr: bool,
    buf: &mut [u8],
    blksz: u32,
) -> Result<()> {
    for_each_chunk(buf.len(), blksz, |offset, blocks, size| {
        let end = offset + (blocks * size) as usize;
        io_rw_extended(
            &mut *host,
            func,
            chunk_addr(addr, incr_addr, offset),
            incr_addr,
            DataBuf::Read(&mut buf[offset..end]),
            blocks,
            size,
        )
    })
}

/// Write `data`, splitting into as many IO_RW_EXTENDED commands as needed
///
/// `blksz` must match the function's current block size.
pub fn io_write_multi<H: SdioHost + ?Sized>(
    host: &mut H,
    func: FunctionNumber,
    addr: u32,
    incr_addr: bool,
    data: &[u8],
    blksz: u32,
) -> Result<()> {
    for_each_chunk(data.len(), blksz, |offset, blocks, size| {
        let end = offset + (blocks * size) as usize;
        io_rw_extended(
            &mut *host,
            func,
            chunk_addr(addr, incr_addr, offset),
            incr_addr,
            DataBuf::Write(&data[offset..end]),
            blocks,
            size,
        )
    })
}
