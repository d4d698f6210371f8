//! Display integration tests — drive the panel stack against bus mocks.
//!
//! Covers the boot contract of the monitor: the documented power-up command
//! sequence, the failure path when the panel does not come up, and the
//! clear-and-flush that follows the splash.
//!
//! Run with: cargo test -p greenheat-display --test integration_display

use display_interface::DisplayError;
use embedded_hal_mock::eh1::delay::NoopDelay;
use embedded_hal_mock::eh1::digital::{
    Mock as PinMock, State as PinState, Transaction as PinTransaction,
};
use embedded_hal_mock::eh1::spi::{Mock as SpiMock, Transaction as SpiTransaction};
use embedded_hal_mock::eh1::MockError;

use greenheat_display::ssd1306::SSD1306;
use greenheat_display::Display;

/// Power-up command batches, in issue order, as one `SpiDevice` write each.
const INIT_COMMANDS: &[&[u8]] = &[
    &[0xAE],       // display off
    &[0xD5, 0x80], // clock divide
    &[0xA8, 0x3F], // multiplex ratio
    &[0xD3, 0x00], // display offset
    &[0x40],       // start line
    &[0x8D, 0x14], // charge pump on
    &[0x20, 0x00], // horizontal addressing
    &[0xA1],       // segment remap
    &[0xC8],       // COM scan direction
    &[0xDA, 0x12], // COM pins
    &[0x81, 0xCF], // contrast
    &[0xD9, 0xF1], // precharge
    &[0xDB, 0x40], // VCOM deselect
    &[0xA4],       // follow RAM
    &[0xA6],       // normal display
    &[0xAF],       // display on
];

/// The three SPI expectations behind one `spi.write(&data)` call
/// via the `SpiDevice` trait.
fn spi_write(data: &[u8]) -> [SpiTransaction<u8>; 3] {
    [
        SpiTransaction::transaction_start(),
        SpiTransaction::write_vec(data.to_vec()),
        SpiTransaction::transaction_end(),
    ]
}

/// SPI expectations for flushing an all-black frame.
fn blank_flush_spi() -> Vec<SpiTransaction<u8>> {
    let mut expect = Vec::new();
    expect.extend(spi_write(&[0x21, 0x00, 127]));
    expect.extend(spi_write(&[0x22, 0x00, 7]));
    for _ in 0..8 {
        expect.extend(spi_write(&[0u8; 128]));
    }
    expect
}

/// DC expectations for flushing a frame: two command writes, eight data pages.
fn blank_flush_dc() -> Vec<PinTransaction> {
    let mut expect = vec![
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::Low),
    ];
    expect.extend((0..8).map(|_| PinTransaction::set(PinState::High)));
    expect
}

#[tokio::test]
async fn init_issues_the_documented_command_sequence() {
    let mut spi_expect = Vec::new();
    for commands in INIT_COMMANDS {
        spi_expect.extend(spi_write(commands));
    }
    let mut spi = SpiMock::new(&spi_expect);

    let dc_expect: Vec<_> = INIT_COMMANDS
        .iter()
        .map(|_| PinTransaction::set(PinState::Low))
        .collect();
    let mut dc = PinMock::new(&dc_expect);

    // Reset pulse: high, low, high
    let mut rst = PinMock::new(&[
        PinTransaction::set(PinState::High),
        PinTransaction::set(PinState::Low),
        PinTransaction::set(PinState::High),
    ]);

    let mut driver = SSD1306::new(spi.clone(), dc.clone(), rst.clone());
    driver.init(&mut NoopDelay).await.unwrap();

    spi.done();
    dc.done();
    rst.done();
}

#[tokio::test]
async fn failed_reset_reports_an_error_without_panicking() {
    let mut spi = SpiMock::new(&[]);
    let mut dc = PinMock::new(&[]);
    let mut rst = PinMock::new(&[PinTransaction::set(PinState::High)
        .with_error(MockError::Io(std::io::ErrorKind::NotConnected))]);

    let mut display = Display::new(spi.clone(), dc.clone(), rst.clone());
    let result = display.begin(&mut NoopDelay).await;
    assert!(matches!(result, Err(DisplayError::RSError)));

    spi.done();
    dc.done();
    rst.done();
}

#[tokio::test]
async fn caller_can_keep_going_after_a_failed_begin() {
    // The monitor logs the failure and carries on, so later calls against
    // the (possibly dead) panel must still behave.
    let mut spi = SpiMock::new(&blank_flush_spi());
    let mut dc = PinMock::new(&blank_flush_dc());
    let mut rst = PinMock::new(&[PinTransaction::set(PinState::High)
        .with_error(MockError::Io(std::io::ErrorKind::NotConnected))]);

    let mut display = Display::new(spi.clone(), dc.clone(), rst.clone());
    assert!(display.begin(&mut NoopDelay).await.is_err());
    display.clear().await.unwrap();

    spi.done();
    dc.done();
    rst.done();
}

#[tokio::test]
async fn clear_flushes_an_all_black_frame() {
    let mut spi = SpiMock::new(&blank_flush_spi());
    let mut dc = PinMock::new(&blank_flush_dc());
    let mut rst = PinMock::new(&[]);

    let mut display = Display::new(spi.clone(), dc.clone(), rst.clone());
    display.clear().await.unwrap();

    spi.done();
    dc.done();
    rst.done();
}
