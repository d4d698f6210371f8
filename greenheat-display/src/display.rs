//! Heating status screen on top of the SSD1306 driver.

use core::fmt::Write;

use display_interface::DisplayError;
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use embedded_hal_async::delay::DelayNs;
use heapless::String;

use crate::ssd1306::SSD1306;
use crate::temperature::Temperature;

// Text baselines of the four status rows, one per 16 pixel band
const ROW_HEATER: i32 = 12;
const ROW_TANK: i32 = 28;
const ROW_AMBIENT: i32 = 44;
const ROW_GREEN: i32 = 60;

pub struct Display<SPI, DC, RESET> {
    driver: SSD1306<SPI, DC, RESET>,
}

impl<SPI, DC, RESET> Display<SPI, DC, RESET>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RESET: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RESET) -> Self {
        Self {
            driver: SSD1306::new(spi, dc, rst),
        }
    }

    /// Bring the panel up and push the boot screen.
    pub async fn begin<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.driver.init(delay).await?;
        self.driver.splash().await?;
        self.driver.show().await
    }

    /// Blank the panel.
    pub async fn clear(&mut self) -> Result<(), DisplayError> {
        self.driver.clear().await?;
        self.driver.show().await
    }

    /// Render the heating status screen and push it to the panel.
    ///
    /// The heater row is always present. Each readout row is drawn only when
    /// its flag is set, in a fixed slot: tank temperature, ambient
    /// temperature, green production percentage. The single temperature
    /// reading feeds whichever temperature rows are enabled.
    pub async fn display_status(
        &mut self,
        display_gp: bool,
        display_ti: bool,
        display_ta: bool,
        heater_on: bool,
        temp: Temperature,
        green_prod_percentage: f32,
    ) -> Result<(), DisplayError> {
        self.draw_status(
            display_gp,
            display_ti,
            display_ta,
            heater_on,
            temp,
            green_prod_percentage,
        )
        .await?;
        self.driver.show().await
    }

    async fn draw_status(
        &mut self,
        display_gp: bool,
        display_ti: bool,
        display_ta: bool,
        heater_on: bool,
        temp: Temperature,
        green_prod_percentage: f32,
    ) -> Result<(), DisplayError> {
        self.driver.clear().await?;

        let heater = if heater_on { "Heater ON" } else { "Heater OFF" };
        self.driver
            .draw_text(heater, Point::new(0, ROW_HEATER), BinaryColor::On)
            .await?;

        if display_ti {
            let line = temp_line("Tank", temp)?;
            self.driver
                .draw_text(&line, Point::new(0, ROW_TANK), BinaryColor::On)
                .await?;
        }
        if display_ta {
            let line = temp_line("Amb", temp)?;
            self.driver
                .draw_text(&line, Point::new(0, ROW_AMBIENT), BinaryColor::On)
                .await?;
        }
        if display_gp {
            let line = green_line(green_prod_percentage)?;
            self.driver
                .draw_text(&line, Point::new(0, ROW_GREEN), BinaryColor::On)
                .await?;
        }
        Ok(())
    }
}

fn temp_line(label: &str, temp: Temperature) -> Result<String<16>, DisplayError> {
    let mut line = String::new();
    write!(line, "{:<6}{:.1}C", label, temp.celsius())
        .map_err(|_| DisplayError::InvalidFormatError)?;
    Ok(line)
}

fn green_line(percentage: f32) -> Result<String<16>, DisplayError> {
    let mut line = String::new();
    write!(line, "{:<6}{:.0}%", "Green", percentage)
        .map_err(|_| DisplayError::InvalidFormatError)?;
    Ok(line)
}
