//! sdioctl - SDIO card command tool
//!
//! Brings an SDIO card up with IO_SEND_OP_COND and then reads and writes its
//! registers with IO_RW_DIRECT and IO_RW_EXTENDED.
//!
//! # Architecture
//!
//! The protocol lives in `sdio-core` and only talks to an `SdioHost`. Hosts
//! are opened by name from the `hosts` registry; every command is written
//! against the trait, so it works the same on any host.

mod cli;
mod commands;
mod hosts;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    let host_ocr = cli.host_ocr;

    let result = match cli.command {
        Commands::Probe { host } => {
            let mut host = hosts::open_host(&host)?;
            commands::run_probe(host.as_mut(), host_ocr)
        }
        Commands::Reset { host } => {
            let mut host = hosts::open_host(&host)?;
            commands::init_card(host.as_mut(), host_ocr)?;
            commands::run_reset(host.as_mut())
        }
        Commands::ReadByte { host, target } => {
            let mut host = hosts::open_host(&host)?;
            commands::init_card(host.as_mut(), host_ocr)?;
            commands::run_read_byte(host.as_mut(), &target)
        }
        Commands::WriteByte {
            host,
            target,
            data,
            read_back,
        } => {
            let mut host = hosts::open_host(&host)?;
            commands::init_card(host.as_mut(), host_ocr)?;
            commands::run_write_byte(host.as_mut(), &target, data, read_back)
        }
        Commands::Read {
            host,
            target,
            length,
            output,
            transfer,
        } => {
            let mut host = hosts::open_host(&host)?;
            commands::init_card(host.as_mut(), host_ocr)?;
            commands::run_read(host.as_mut(), &target, &transfer, length, &output)
        }
        Commands::Write {
            host,
            target,
            input,
            transfer,
        } => {
            let mut host = hosts::open_host(&host)?;
            commands::init_card(host.as_mut(), host_ocr)?;
            commands::run_write(host.as_mut(), &target, &transfer, &input)
        }
        Commands::ListHosts => {
            commands::list_hosts();
            Ok(())
        }
    };

    result
}
