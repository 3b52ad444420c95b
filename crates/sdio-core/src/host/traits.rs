//! Host transport trait

use crate::cmd::{BusMode, DataTransfer, RequestStatus, Response, SdioCommand};
use crate::error::TransportError;

/// SD host controller (sync)
///
/// This trait represents the bus driver that puts commands on the wire.
/// The protocol functions in [`crate::protocol`] build each command, hand it
/// to the host, and decode whatever comes back.
///
/// Implementations:
///
/// 1. Honor `cmd.retries` by resending the command on a transport error
/// 2. Fill in the response words in the layout of the active [`BusMode`]
///    (native R4/R5 in word 0, SPI R4 OCR in word 1, SPI R5 data in bits 15..8)
/// 3. In SPI mode, turn R5 status bits into transport errors, since the
///    protocol layer does not inspect them there
/// 4. Compute the data timeout for `execute_with_data` from the block size
///    and count
///
/// Both execute calls block until the exchange finishes or the host's own
/// timeout fires. Only one request may be outstanding on a bus; `&mut self`
/// serializes callers sharing a host.
///
/// ## Example
///
/// ```ignore
/// impl SdioHost for MyController {
///     fn bus_mode(&self) -> BusMode {
///         BusMode::Native
///     }
///
///     fn execute(&mut self, cmd: &SdioCommand) -> Result<Response, TransportError> {
///         self.send(cmd.opcode, cmd.arg, cmd.flags)?;
///         self.wait_response()
///     }
///
///     fn execute_with_data(
///         &mut self,
///         cmd: &SdioCommand,
///         data: &mut DataTransfer<'_>,
///     ) -> RequestStatus {
///         self.send_with_dma(cmd, data)
///     }
///
///     fn delay_ms(&mut self, ms: u32) {
///         self.timer.delay_ms(ms);
///     }
/// }
/// ```
pub trait SdioHost {
    /// Bus mode the host is currently running in
    fn bus_mode(&self) -> BusMode;

    /// Execute a command without a data phase
    fn execute(&mut self, cmd: &SdioCommand) -> Result<Response, TransportError>;

    /// Execute a command followed by a data phase
    ///
    /// For reads the host fills `data.buf`; for writes it sends it.
    fn execute_with_data(&mut self, cmd: &SdioCommand, data: &mut DataTransfer<'_>)
        -> RequestStatus;

    /// Delay for the specified number of milliseconds
    fn delay_ms(&mut self, ms: u32);
}
