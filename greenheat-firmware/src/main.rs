#![no_std]
#![no_main]

use defmt::*;

use embassy_executor::Spawner;
use embassy_futures::yield_now;
use embassy_rp::gpio::{Level, Output};
use embassy_time::{Delay, Timer};
use embedded_hal_bus::spi::ExclusiveDevice;

use {defmt_rtt as _, panic_probe as _};

use greenheat_display::{Display, SoftSpi, SPLASH_HOLD_SECS};

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Program start");
    let peripherals = embassy_rp::init(Default::default());
    let mut delay = Delay;

    // Display pins, software SPI
    let mosi = Output::new(peripherals.PIN_0, Level::Low); // Master Out Slave In
    let sclk = Output::new(peripherals.PIN_1, Level::Low); // Serial Clock
    let dc = Output::new(peripherals.PIN_2, Level::Low); // Data/Command
    let rst = Output::new(peripherals.PIN_3, Level::Low); // Reset
    let cs = Output::new(peripherals.PIN_4, Level::High); // Chip Select

    let bus = SoftSpi::new(sclk, mosi);
    let spi_device = ExclusiveDevice::new(bus, cs, Delay).unwrap();

    let mut display = Display::new(spi_device, dc, rst);

    if display.begin(&mut delay).await.is_err() {
        error!("SSD1306 allocation failed");
        // TODO: Stop the execution of the program
    }
    Timer::after_secs(SPLASH_HOLD_SECS).await;

    if display.clear().await.is_err() {
        error!("display clear failed");
    }

    info!("Display ready");
    loop {
        idle().await;
    }
}

/// One pass of the main loop. Nothing is scheduled after startup.
async fn idle() {
    yield_now().await;
}
