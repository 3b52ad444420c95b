//! Data phase of an IO_RW_EXTENDED request

use super::Response;
use crate::error::TransportError;

/// Direction of a data transfer
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DataDirection {
    /// Card to host
    Read,
    /// Host to card
    Write,
}

/// Buffer for a data transfer, tagged with its direction
#[derive(Debug)]
pub enum DataBuf<'a> {
    /// Filled with data read from the card
    Read(&'a mut [u8]),
    /// Sent to the card
    Write(&'a [u8]),
}

impl DataBuf<'_> {
    /// Direction implied by the buffer kind
    pub fn direction(&self) -> DataDirection {
        match self {
            Self::Read(_) => DataDirection::Read,
            Self::Write(_) => DataDirection::Write,
        }
    }

    /// Returns true for host-to-card transfers
    pub fn is_write(&self) -> bool {
        matches!(self, Self::Write(_))
    }

    /// Buffer length in bytes
    pub fn len(&self) -> usize {
        match self {
            Self::Read(buf) => buf.len(),
            Self::Write(buf) => buf.len(),
        }
    }

    /// Returns true if the buffer is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Data phase descriptor handed to the host with the command
///
/// The host derives its data timeout from `blksz` and `blocks`.
#[derive(Debug)]
pub struct DataTransfer<'a> {
    /// Bytes per block
    pub blksz: u32,
    /// Number of blocks
    pub blocks: u32,
    /// Source or destination buffer, `blksz * blocks` bytes long
    pub buf: DataBuf<'a>,
}

impl<'a> DataTransfer<'a> {
    /// Create a data phase of `blocks` x `blksz` bytes over `buf`
    pub fn new(buf: DataBuf<'a>, blocks: u32, blksz: u32) -> Self {
        Self { blksz, blocks, buf }
    }

    /// Direction of the transfer
    pub fn direction(&self) -> DataDirection {
        self.buf.direction()
    }

    /// Total number of bytes moved
    pub fn len(&self) -> usize {
        self.blksz as usize * self.blocks as usize
    }

    /// Returns true if the transfer moves no data
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Completion status of a command + data request
///
/// Command and data phases fail independently; a data error means the card
/// accepted the command but the transfer broke.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RequestStatus {
    /// Response to the command
    pub resp: Response,
    /// Command phase failure
    pub cmd_error: Option<TransportError>,
    /// Data phase failure
    pub data_error: Option<TransportError>,
}

impl RequestStatus {
    /// Both phases completed
    pub fn ok(resp: Response) -> Self {
        Self {
            resp,
            cmd_error: None,
            data_error: None,
        }
    }

    /// The command itself failed; no data moved
    pub fn command_failed(err: TransportError) -> Self {
        Self {
            resp: Response::default(),
            cmd_error: Some(err),
            data_error: None,
        }
    }

    /// The command was accepted but the data phase failed
    pub fn data_failed(resp: Response, err: TransportError) -> Self {
        Self {
            resp,
            cmd_error: None,
            data_error: Some(err),
        }
    }
}
