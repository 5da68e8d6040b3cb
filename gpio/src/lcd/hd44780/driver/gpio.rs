use crate::lcd::hd44780::driver::SignalInterface;
use crate::{GpioError, GpioOutput, GpioResult};
use std::thread::sleep;
use std::time::Duration;

/// [SignalInterface] over plain GPIO output lines.
///
/// Delays use [sleep], which never returns early. On a loaded system it may oversleep, which only
/// makes the display slower.
#[derive(Debug)]
pub struct GpioSignalInterface<'a> {
    pin_e: &'a dyn GpioOutput,
    pin_rs: &'a dyn GpioOutput,
    data_bus: [&'a dyn GpioOutput; 4],
}

impl<'a> GpioSignalInterface<'a> {
    /// Creates a new GpioSignalInterface.
    ///
    /// # Parameters
    ///
    /// - `pin_e`: Enable output pin.
    /// - `pin_rs`: Register select output pin.
    /// - `data_bus`: Data output pins D4, D5, D6 and D7, in this order. D0-D3 of the display are
    ///   left unconnected, and R/W must be connected to GND.
    pub fn new(
        pin_e: &'a dyn GpioOutput,
        pin_rs: &'a dyn GpioOutput,
        data_bus: [&'a dyn GpioOutput; 4],
    ) -> Self {
        GpioSignalInterface {
            pin_e,
            pin_rs,
            data_bus,
        }
    }
}

impl SignalInterface for GpioSignalInterface<'_> {
    fn set_data_line(&mut self, index: u8, value: bool) -> GpioResult<()> {
        let pin = self
            .data_bus
            .get(index as usize)
            .ok_or(GpioError::InvalidArgument)?;
        pin.write(value)
    }

    fn set_register_select(&mut self, value: bool) -> GpioResult<()> {
        self.pin_rs.write(value)
    }

    fn set_enable(&mut self, value: bool) -> GpioResult<()> {
        self.pin_e.write(value)
    }

    fn delay_us(&mut self, micros: u32) -> GpioResult<()> {
        sleep(Duration::from_micros(micros.into()));
        Ok(())
    }
}
