//! Keyboard controller bus

use embedded_hal::i2c::I2c;
use picocalc_hal::I2cBus;

/// Adapts any embedded-hal I2C master (e.g. `embassy_rp::i2c::I2c` in
/// blocking mode) to [`I2cBus`]
pub struct KeyboardI2c<T> {
    bus: T,
}

impl<T: I2c> KeyboardI2c<T> {
    pub fn new(bus: T) -> Self {
        Self { bus }
    }

    pub fn into_inner(self) -> T {
        self.bus
    }
}

impl<T: I2c> I2cBus for KeyboardI2c<T> {
    type Error = T::Error;

    fn write(&mut self, address: u8, data: &[u8]) -> Result<(), Self::Error> {
        self.bus.write(address, data)
    }

    fn read(&mut self, address: u8, buf: &mut [u8]) -> Result<(), Self::Error> {
        self.bus.read(address, buf)
    }
}
