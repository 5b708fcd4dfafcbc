//! PicoCalc LCD panel
//!
//! The panel is an ILI9488 on SPI1 (320x320). The frame buffer holds 4-bit
//! palette indices, two pixels per byte, high nibble first. Flushing expands
//! one row at a time to 18-bit colour, which is the only format the
//! controller accepts over SPI.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use picocalc_hal::FlushTarget;

/// Panel width in pixels
pub const WIDTH: usize = 320;

/// Panel height in pixels
pub const HEIGHT: usize = 320;

/// Frame buffer size in bytes
pub const FRAME_BYTES: usize = WIDTH * HEIGHT / 2;

const CMD_SWRESET: u8 = 0x01;
const CMD_SLPOUT: u8 = 0x11;
const CMD_INVON: u8 = 0x21;
const CMD_DISPON: u8 = 0x29;
const CMD_CASET: u8 = 0x2A;
const CMD_PASET: u8 = 0x2B;
const CMD_RAMWR: u8 = 0x2C;
const CMD_MADCTL: u8 = 0x36;
const CMD_PIXFMT: u8 = 0x3A;

/// 18 bits per pixel
const PIXFMT_RGB666: u8 = 0x66;

/// BGR order, column address mirrored
const MADCTL_DEFAULT: u8 = 0x48;

/// ANSI colours 0-15 as RGB888
const DEFAULT_PALETTE: [[u8; 3]; 16] = [
    [0x00, 0x00, 0x00],
    [0xAA, 0x00, 0x00],
    [0x00, 0xAA, 0x00],
    [0xAA, 0x55, 0x00],
    [0x00, 0x00, 0xAA],
    [0xAA, 0x00, 0xAA],
    [0x00, 0xAA, 0xAA],
    [0xAA, 0xAA, 0xAA],
    [0x55, 0x55, 0x55],
    [0xFF, 0x55, 0x55],
    [0x55, 0xFF, 0x55],
    [0xFF, 0xFF, 0x55],
    [0x55, 0x55, 0xFF],
    [0xFF, 0x55, 0xFF],
    [0x55, 0xFF, 0xFF],
    [0xFF, 0xFF, 0xFF],
];

/// 4-bit indexed frame buffer
pub struct Frame {
    pub pixels: [u8; FRAME_BYTES],
}

impl Frame {
    pub const fn new() -> Self {
        Self {
            pixels: [0; FRAME_BYTES],
        }
    }

    /// Palette index at `x`, `y`
    pub fn pixel(&self, x: usize, y: usize) -> u8 {
        let byte = self.pixels[(y * WIDTH + x) / 2];
        if x % 2 == 0 {
            byte >> 4
        } else {
            byte & 0x0F
        }
    }

    /// Set the palette index at `x`, `y`
    pub fn set_pixel(&mut self, x: usize, y: usize, index: u8) {
        let byte = &mut self.pixels[(y * WIDTH + x) / 2];
        if x % 2 == 0 {
            *byte = (*byte & 0x0F) | (index << 4);
        } else {
            *byte = (*byte & 0xF0) | (index & 0x0F);
        }
    }

    /// Fill with one palette index
    pub fn clear(&mut self, index: u8) {
        let index = index & 0x0F;
        self.pixels.fill((index << 4) | index);
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::new()
    }
}

/// Panel transfer error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PanelError {
    /// SPI transfer failed
    Spi,
    /// DC or CS pin could not be driven
    Pin,
}

/// ILI9488 panel on a dedicated SPI bus
pub struct LcdPanel<SPI, DC, CS> {
    spi: SPI,
    dc: DC,
    cs: CS,
    palette: [[u8; 3]; 16],
    row: [u8; WIDTH * 3],
}

impl<SPI, DC, CS> LcdPanel<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    pub fn new(spi: SPI, dc: DC, cs: CS) -> Self {
        Self {
            spi,
            dc,
            cs,
            palette: DEFAULT_PALETTE,
            row: [0; WIDTH * 3],
        }
    }

    /// Reset and configure the controller
    pub fn init<D: DelayNs>(&mut self, delay: &mut D) -> Result<(), PanelError> {
        self.command(CMD_SWRESET, &[])?;
        delay.delay_ms(120);
        self.command(CMD_SLPOUT, &[])?;
        delay.delay_ms(120);
        self.command(CMD_PIXFMT, &[PIXFMT_RGB666])?;
        self.command(CMD_MADCTL, &[MADCTL_DEFAULT])?;
        self.command(CMD_INVON, &[])?;
        self.command(CMD_DISPON, &[])?;
        delay.delay_ms(20);
        Ok(())
    }

    /// Replace palette entry `index` with an RGB888 colour
    pub fn set_palette(&mut self, index: u8, rgb: [u8; 3]) {
        self.palette[usize::from(index & 0x0F)] = rgb;
    }

    fn command(&mut self, cmd: u8, data: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.command_selected(cmd, data);
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }

    fn command_selected(&mut self, cmd: u8, data: &[u8]) -> Result<(), PanelError> {
        self.dc.set_low().map_err(|_| PanelError::Pin)?;
        self.spi.write(&[cmd]).map_err(|_| PanelError::Spi)?;
        self.dc.set_high().map_err(|_| PanelError::Pin)?;
        if !data.is_empty() {
            self.spi.write(data).map_err(|_| PanelError::Spi)?;
        }
        self.spi.flush().map_err(|_| PanelError::Spi)
    }

    fn write_frame(&mut self, frame: &Frame) -> Result<(), PanelError> {
        let [w_hi, w_lo] = ((WIDTH - 1) as u16).to_be_bytes();
        let [h_hi, h_lo] = ((HEIGHT - 1) as u16).to_be_bytes();
        self.command_selected(CMD_CASET, &[0, 0, w_hi, w_lo])?;
        self.command_selected(CMD_PASET, &[0, 0, h_hi, h_lo])?;
        self.command_selected(CMD_RAMWR, &[])?;

        for line in frame.pixels.chunks_exact(WIDTH / 2) {
            for (pair, out) in line.iter().zip(self.row.chunks_exact_mut(6)) {
                out[..3].copy_from_slice(&self.palette[usize::from(pair >> 4)]);
                out[3..].copy_from_slice(&self.palette[usize::from(pair & 0x0F)]);
            }
            self.spi.write(&self.row).map_err(|_| PanelError::Spi)?;
        }
        self.spi.flush().map_err(|_| PanelError::Spi)
    }
}

impl<SPI, DC, CS> FlushTarget<Frame> for LcdPanel<SPI, DC, CS>
where
    SPI: SpiBus<u8>,
    DC: OutputPin,
    CS: OutputPin,
{
    type Error = PanelError;

    fn flush(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.cs.set_low().map_err(|_| PanelError::Pin)?;
        let result = self.write_frame(frame);
        self.cs.set_high().map_err(|_| PanelError::Pin)?;
        result
    }
}
