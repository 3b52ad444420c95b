//! Single-register commands (IO_RW_DIRECT)

use crate::cli::Target;
use sdio_core::host::SdioHost;
use sdio_core::protocol;

/// Read one register and print it
pub fn run_read_byte<H: SdioHost + ?Sized>(
    host: &mut H,
    target: &Target,
) -> Result<(), Box<dyn std::error::Error>> {
    let value = protocol::io_read_byte(host, target.function, target.address)?;
    println!("{} 0x{:05X}: 0x{:02X}", target.function, target.address, value);
    Ok(())
}

/// Write one register, optionally reading it back in the same command
pub fn run_write_byte<H: SdioHost + ?Sized>(
    host: &mut H,
    target: &Target,
    data: u8,
    read_back: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if read_back {
        let value = protocol::io_write_read_byte(host, target.function, target.address, data)?;
        println!(
            "{} 0x{:05X}: wrote 0x{:02X}, read back 0x{:02X}",
            target.function, target.address, data, value
        );
        if value != data {
            log::warn!("Register did not keep the written value");
        }
    } else {
        protocol::io_write_byte(host, target.function, target.address, data)?;
        println!("{} 0x{:05X}: wrote 0x{:02X}", target.function, target.address, data);
    }
    Ok(())
}

/// Reset the card's I/O portion
pub fn run_reset<H: SdioHost + ?Sized>(host: &mut H) -> Result<(), Box<dyn std::error::Error>> {
    protocol::io_reset(host)?;
    println!("I/O reset issued");
    Ok(())
}
