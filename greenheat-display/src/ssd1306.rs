use display_interface::DisplayError;
use embedded_graphics::mono_font::{ascii::FONT_8X13, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyleBuilder, Rectangle};
use embedded_graphics::text::Text;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use embedded_hal_async::delay::DelayNs;

pub const WIDTH: u8 = 128;
pub const HEIGHT: u8 = 64;
const PAGES: usize = HEIGHT as usize / 8;
const BUFFER_SIZE: usize = (WIDTH as usize * HEIGHT as usize) / 8;

pub struct SSD1306<SPI, DC, RESET> {
    spi: SPI,
    dc: DC,
    rst: RESET,
    buffer: [u8; BUFFER_SIZE],
}

impl<SPI, DC, RESET> SSD1306<SPI, DC, RESET>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RESET: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, rst: RESET) -> Self {
        Self {
            spi,
            dc,
            rst,
            buffer: [0; BUFFER_SIZE],
        }
    }

    pub async fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.reset(delay).await?;
        self.off().await?;
        self.send_commands(&[0xD5, 0x80]).await?; // Set clock divide ratio / oscillator frequency
        self.send_commands(&[0xA8, 0x3F]).await?; // Set multiplex ratio (display height - 1)
        self.send_commands(&[0xD3, 0x00]).await?; // Set display offset
        self.send_commands(&[0x40]).await?; // Set display start line
        self.send_commands(&[0x8D, 0x14]).await?; // Charge pump on, panel runs off the internal switchcap
        self.send_commands(&[0x20, 0x00]).await?; // Set memory addressing mode (0x00 = Horizontal / 0x02 = Page)
        self.send_commands(&[0xA1]).await?; // Set segment remap (0xA0 / 0xA1)
        self.send_commands(&[0xC8]).await?; // Set common output scan direction (0xC0 / 0xC8)
        self.send_commands(&[0xDA, 0x12]).await?; // Set COM pins hardware configuration
        self.send_commands(&[0x81, 0xCF]).await?; // Set contrast control
        self.send_commands(&[0xD9, 0xF1]).await?; // Set discharge / precharge period
        self.send_commands(&[0xDB, 0x40]).await?; // Set VCOM deselect level
        self.send_commands(&[0xA4]).await?; // Set entire display on (0xA4 = follow RAM / 0xA5 = all on)
        self.send_commands(&[0xA6]).await?; // Set normal or reverse display (0xA6 = Normal / 0xA7 = Reverse)
        self.on().await?;
        delay.delay_ms(10).await;
        Ok(())
    }

    async fn reset<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), DisplayError> {
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(1).await;
        self.rst.set_low().map_err(|_| DisplayError::RSError)?;
        delay.delay_ms(10).await;
        self.rst.set_high().map_err(|_| DisplayError::RSError)?;
        Ok(())
    }

    pub async fn off(&mut self) -> Result<(), DisplayError> {
        self.send_commands(&[0xAE]).await?; // Display OFF
        Ok(())
    }

    pub async fn on(&mut self) -> Result<(), DisplayError> {
        self.send_commands(&[0xAF]).await?; // Display ON
        Ok(())
    }

    async fn send_commands(&mut self, commands: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_low().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(commands)
            .map_err(|_| DisplayError::BusWriteError)?;
        Ok(())
    }

    async fn send_data(&mut self, data: &[u8]) -> Result<(), DisplayError> {
        self.dc.set_high().map_err(|_| DisplayError::DCError)?;
        self.spi
            .write(data)
            .map_err(|_| DisplayError::BusWriteError)?;
        Ok(())
    }

    /// Push the framebuffer to the panel, one page of 128 bytes at a time.
    pub async fn show(&mut self) -> Result<(), DisplayError> {
        self.send_commands(&[0x21, 0x00, WIDTH - 1]).await?; // Set column address range
        self.send_commands(&[0x22, 0x00, PAGES as u8 - 1]).await?; // Set page address range
        for page in 0..PAGES {
            let mut row = [0u8; WIDTH as usize];
            let start = page * WIDTH as usize;
            row.copy_from_slice(&self.buffer[start..start + WIDTH as usize]);
            self.send_data(&row).await?;
        }
        Ok(())
    }

    pub async fn clear(&mut self) -> Result<(), DisplayError> {
        self.buffer.fill(0x00);
        Ok(())
    }

    /// Default boot content shown until the first clear.
    pub async fn splash(&mut self) -> Result<(), DisplayError> {
        self.draw_rectangle(
            Point::new(0, 0),
            Size::new(WIDTH as u32, HEIGHT as u32),
            BinaryColor::On,
            false,
        )
        .await?;
        self.draw_text("   GreenHeat   ", Point::new(0, 28), BinaryColor::On)
            .await?;
        self.draw_text("     v0.1.0    ", Point::new(0, 44), BinaryColor::On)
            .await?;
        Ok(())
    }

    pub async fn draw_rectangle(
        &mut self,
        top_left: Point,
        size: Size,
        colour: BinaryColor,
        fill: bool,
    ) -> Result<(), DisplayError> {
        let style = if fill {
            PrimitiveStyleBuilder::new()
                .stroke_color(colour)
                .stroke_width(1)
                .fill_color(colour)
                .build()
        } else {
            PrimitiveStyleBuilder::new()
                .stroke_color(colour)
                .stroke_width(1)
                .build()
        };
        Rectangle::new(top_left, size).into_styled(style).draw(self)?;
        Ok(())
    }

    pub async fn draw_text(
        &mut self,
        text: &str,
        top_left: Point,
        colour: BinaryColor,
    ) -> Result<(), DisplayError> {
        let style = MonoTextStyle::new(&FONT_8X13, colour);
        Text::new(text, top_left, style).draw(self)?;
        Ok(())
    }
}

#[cfg(test)]
impl<SPI, DC, RESET> SSD1306<SPI, DC, RESET> {
    pub(crate) fn framebuffer(&self) -> &[u8] {
        &self.buffer
    }
}

impl<SPI, DC, RESET> DrawTarget for SSD1306<SPI, DC, RESET>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RESET: OutputPin,
{
    type Color = BinaryColor;
    type Error = DisplayError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, colour) in pixels {
            let (x, y) = (coord.x, coord.y);
            if x >= 0 && x < WIDTH as i32 && y >= 0 && y < HEIGHT as i32 {
                // One byte per column slice, eight rows per page
                let index = (y as usize / 8) * WIDTH as usize + x as usize;
                let bit = 1u8 << (y % 8);
                if colour == BinaryColor::On {
                    self.buffer[index] |= bit;
                } else {
                    self.buffer[index] &= !bit;
                }
            }
        }
        Ok(())
    }
}

impl<SPI, DC, RST> Dimensions for SSD1306<SPI, DC, RST> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(Point::zero(), Size::new(WIDTH as u32, HEIGHT as u32))
    }
}
