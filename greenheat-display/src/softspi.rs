//! Bit-banged SPI for the OLED panel.
//!
//! The panel hangs off plain GPIO rather than a hardware SPI block, so the
//! bus is emulated by toggling the clock and data pins directly. Mode 0,
//! MSB first, write only (the SSD1306 has no MISO line).

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::{Error, ErrorKind, ErrorType, SpiBus};

/// Raised when one of the bus pins fails to toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SoftSpiError;

impl Error for SoftSpiError {
    fn kind(&self) -> ErrorKind {
        ErrorKind::Other
    }
}

pub struct SoftSpi<SCLK, MOSI> {
    sclk: SCLK,
    mosi: MOSI,
}

impl<SCLK, MOSI> SoftSpi<SCLK, MOSI>
where
    SCLK: OutputPin,
    MOSI: OutputPin,
{
    /// Takes the clock and data pins. The clock must already idle low.
    pub fn new(sclk: SCLK, mosi: MOSI) -> Self {
        Self { sclk, mosi }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), SoftSpiError> {
        for bit in (0..8).rev() {
            if byte & (1 << bit) != 0 {
                self.mosi.set_high().map_err(|_| SoftSpiError)?;
            } else {
                self.mosi.set_low().map_err(|_| SoftSpiError)?;
            }
            // The panel samples MOSI on the rising edge
            self.sclk.set_high().map_err(|_| SoftSpiError)?;
            self.sclk.set_low().map_err(|_| SoftSpiError)?;
        }
        Ok(())
    }

    /// Eight clock pulses with MOSI held low, for read slots on a bus
    /// that has no return line.
    fn clock_byte(&mut self) -> Result<(), SoftSpiError> {
        self.write_byte(0x00)
    }
}

impl<SCLK, MOSI> ErrorType for SoftSpi<SCLK, MOSI>
where
    SCLK: OutputPin,
    MOSI: OutputPin,
{
    type Error = SoftSpiError;
}

impl<SCLK, MOSI> SpiBus for SoftSpi<SCLK, MOSI>
where
    SCLK: OutputPin,
    MOSI: OutputPin,
{
    fn read(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        for word in words.iter_mut() {
            self.clock_byte()?;
            *word = 0;
        }
        Ok(())
    }

    fn write(&mut self, words: &[u8]) -> Result<(), Self::Error> {
        for word in words {
            self.write_byte(*word)?;
        }
        Ok(())
    }

    fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Self::Error> {
        self.write(write)?;
        for _ in write.len()..read.len() {
            self.clock_byte()?;
        }
        read.fill(0);
        Ok(())
    }

    fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Self::Error> {
        self.write(words)?;
        words.fill(0);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        // Every write completes before returning, nothing is buffered
        Ok(())
    }
}
