//! Keyboard controller battery gauge
//!
//! The PicoCalc keyboard MCU also monitors the battery. Reading register
//! `0x0B` returns two bytes: the echoed register and a status byte whose
//! low seven bits are the charge percentage and whose top bit is set while
//! charging.

use picocalc_hal::I2cBus;

/// Keyboard controller I2C address
pub const KEYBOARD_ADDRESS: u8 = 0x1F;

/// Battery status register
pub const REG_BATTERY: u8 = 0x0B;

const CHARGING_BIT: u8 = 0x80;

/// Anything that can report a battery percentage
pub trait BatteryGauge {
    /// Error type for a failed reading
    type Error;

    /// Charge level, `0..=100`
    fn percent(&mut self) -> Result<u8, Self::Error>;
}

/// Decoded battery status byte
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryReading {
    /// Charge level, `0..=100`
    pub percent: u8,
    /// Charger connected
    pub charging: bool,
}

impl BatteryReading {
    /// Decode the status byte
    pub fn from_status(status: u8) -> Self {
        Self {
            percent: (status & !CHARGING_BIT).min(100),
            charging: status & CHARGING_BIT != 0,
        }
    }
}

/// Battery gauge backed by the keyboard controller
pub struct KeyboardBattery<I> {
    bus: I,
}

impl<I: I2cBus> KeyboardBattery<I> {
    /// Wrap the keyboard I2C bus
    pub fn new(bus: I) -> Self {
        Self { bus }
    }

    /// Read and decode the battery register
    pub fn read(&mut self) -> Result<BatteryReading, I::Error> {
        let mut reply = [0u8; 2];
        self.bus
            .write_read(KEYBOARD_ADDRESS, &[REG_BATTERY], &mut reply)?;
        Ok(BatteryReading::from_status(reply[1]))
    }

    /// Release the bus
    pub fn into_inner(self) -> I {
        self.bus
    }
}

impl<I: I2cBus> BatteryGauge for KeyboardBattery<I> {
    type Error = I::Error;

    fn percent(&mut self) -> Result<u8, Self::Error> {
        self.read().map(|r| r.percent)
    }
}
