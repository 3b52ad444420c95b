//! CLI argument parsing

use crate::hosts;
use clap::{Parser, Subcommand};
use sdio_core::cmd::FunctionNumber;
use std::path::PathBuf;

/// Parse a string as a hex or decimal u32
fn parse_hex_u32(s: &str) -> Result<u32, String> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        u32::from_str_radix(hex, 16).map_err(|e| format!("Invalid hex value: {}", e))
    } else {
        s.parse::<u32>().map_err(|e| format!("Invalid number: {}", e))
    }
}

/// Parse a string as a hex or decimal byte
fn parse_hex_u8(s: &str) -> Result<u8, String> {
    let value = parse_hex_u32(s)?;
    u8::try_from(value).map_err(|_| format!("Value 0x{:X} does not fit in a byte", value))
}

/// Parse an I/O function number (0-7)
fn parse_function(s: &str) -> Result<FunctionNumber, String> {
    let num = parse_hex_u32(s)?;
    u8::try_from(num)
        .ok()
        .and_then(FunctionNumber::new)
        .ok_or_else(|| format!("Function number {} out of range (0-7)", num))
}

/// Generate dynamic help text for the host argument
fn host_help() -> String {
    format!(
        "Host to use, as name[:key=value,...] [available: {}]",
        hosts::host_names_short()
    )
}

#[derive(Parser)]
#[command(name = "sdioctl")]
#[command(author, version, about = "SDIO card command tool", long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Voltage window the host offers the card (OCR bits 23..0)
    #[arg(long, global = true, value_parser = parse_hex_u32, default_value = "0x00FF8000")]
    pub host_ocr: u32,

    #[command(subcommand)]
    pub command: Commands,
}

/// Register location shared across commands
#[derive(clap::Args, Debug, Clone)]
pub struct Target {
    /// I/O function (0-7)
    #[arg(short, long, value_parser = parse_function, default_value = "1")]
    pub function: FunctionNumber,

    /// Register address (17 bits, hex or decimal)
    #[arg(short, long, value_parser = parse_hex_u32)]
    pub address: u32,
}

/// Extended transfer options
#[derive(clap::Args, Debug, Clone)]
pub struct TransferArgs {
    /// Block size; must match the function's configured block size
    #[arg(short, long, value_parser = parse_hex_u32, default_value = "512")]
    pub block_size: u32,

    /// Keep the address fixed (FIFO access) instead of incrementing it
    #[arg(long)]
    pub fixed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the card and show its capabilities
    Probe {
        #[arg(short = 'H', long, help = host_help())]
        host: String,
    },

    /// Reset the card's I/O portion
    Reset {
        #[arg(short = 'H', long, help = host_help())]
        host: String,
    },

    /// Read one register
    ReadByte {
        #[arg(short = 'H', long, help = host_help())]
        host: String,

        #[command(flatten)]
        target: Target,
    },

    /// Write one register
    WriteByte {
        #[arg(short = 'H', long, help = host_help())]
        host: String,

        #[command(flatten)]
        target: Target,

        /// Value to write
        #[arg(short, long, value_parser = parse_hex_u8)]
        data: u8,

        /// Read the register back in the same command
        #[arg(long)]
        read_back: bool,
    },

    /// Read a register range to file
    Read {
        #[arg(short = 'H', long, help = host_help())]
        host: String,

        #[command(flatten)]
        target: Target,

        /// Number of bytes to read
        #[arg(short, long, value_parser = parse_hex_u32)]
        length: u32,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// Write file contents to a register range
    Write {
        #[arg(short = 'H', long, help = host_help())]
        host: String,

        #[command(flatten)]
        target: Target,

        /// Input file path
        #[arg(short, long)]
        input: PathBuf,

        #[command(flatten)]
        transfer: TransferArgs,
    },

    /// List supported hosts
    ListHosts,
}
