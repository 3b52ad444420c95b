//! Probe command implementation

use sdio_core::cmd::{FunctionNumber, Ocr, SDIO_CCCR_CCCR, SDIO_CCCR_SD};
use sdio_core::host::SdioHost;
use sdio_core::protocol;

/// Bring the card out of reset and negotiate the voltage window
pub fn init_card<H: SdioHost + ?Sized>(
    host: &mut H,
    host_ocr: u32,
) -> Result<Ocr, Box<dyn std::error::Error>> {
    match protocol::io_init(host, host_ocr) {
        Ok(ocr) => {
            log::info!("Card ready (OCR 0x{:08X})", ocr.0);
            Ok(ocr)
        }
        Err(e) if e.is_timeout() => {
            Err(format!("Card did not become ready: {}", e).into())
        }
        Err(e) => Err(Box::new(e)),
    }
}

/// Initialize the card and print what it reports
pub fn run_probe<H: SdioHost + ?Sized>(
    host: &mut H,
    host_ocr: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let ocr = init_card(host, host_ocr)?;

    let cccr = protocol::io_read_byte(host, FunctionNumber::F0, SDIO_CCCR_CCCR)?;
    let sd = protocol::io_read_byte(host, FunctionNumber::F0, SDIO_CCCR_SD)?;

    println!("Found SDIO card:");
    println!("  Bus:        {:?}", host.bus_mode());
    println!("  OCR:        0x{:08X}", ocr.0);
    println!("  Voltages:   0x{:06X}", ocr.voltages());
    println!("  Functions:  {}", ocr.num_functions());
    println!(
        "  Memory:     {}",
        if ocr.memory_present() { "present (combo card)" } else { "none" }
    );
    println!("  SDIO spec:  {}", sdio_revision(cccr >> 4));
    println!("  CCCR:       {}", cccr_revision(cccr & 0x0F));
    println!("  SD spec:    {}", sd_revision(sd & 0x0F));

    Ok(())
}

fn sdio_revision(rev: u8) -> &'static str {
    match rev {
        0 => "1.00",
        1 => "1.10",
        2 => "1.20",
        3 => "2.00",
        4 => "3.00",
        _ => "unknown",
    }
}

fn cccr_revision(rev: u8) -> &'static str {
    match rev {
        0 => "1.00",
        1 => "1.10",
        2 => "2.00",
        3 => "3.00",
        _ => "unknown",
    }
}

fn sd_revision(rev: u8) -> &'static str {
    match rev {
        0 => "1.01",
        1 => "1.10",
        2 => "2.00",
        3 => "3.0x",
        _ => "unknown",
    }
}

#[cfg(all(test, feature = "dummy"))]
mod tests {
    use super::*;
    use sdio_dummy::{DummyConfig, DummySdio};

    #[test]
    fn test_probe_dummy() {
        let mut card = DummySdio::new_default();
        run_probe(&mut card, 0x00FF_8000).unwrap();
        assert!(card.is_ready());
    }

    #[test]
    fn test_no_common_voltage() {
        let mut card = DummySdio::new(DummyConfig {
            voltages: 0x0000_0080,
            ..DummyConfig::default()
        });
        assert!(init_card(&mut card, 0x00FF_8000).is_err());
        // Only the probe went out
        assert_eq!(card.commands().len(), 1);
    }
}
