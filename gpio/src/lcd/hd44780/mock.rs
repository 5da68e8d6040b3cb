//! Recording [SignalInterface] for running the driver without hardware.
//!
//! Every line change and delay is appended to an event log. Whenever the enable line falls, the
//! current state of the data and register-select lines is latched, the same way the controller
//! samples the bus.

use crate::lcd::hd44780::driver::SignalInterface;
use crate::{GpioError, GpioResult};

/// A single call made on the signal interface.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum SignalEvent {
    DataLine { index: u8, value: bool },
    RegisterSelect(bool),
    Enable(bool),
    Delay(u32),
}

/// A nibble sampled on a falling enable edge.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct LatchedNibble {
    pub value: u8,
    pub register_select: bool,
    /// Index of the falling [SignalEvent::Enable] in the event log.
    pub event: usize,
}

#[derive(Debug, Default)]
pub struct RecordingSignal {
    events: Vec<SignalEvent>,
    latched: Vec<LatchedNibble>,
    data: [bool; 4],
    register_select: bool,
    enable: bool,
}

impl RecordingSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[SignalEvent] {
        &self.events
    }

    pub fn latched(&self) -> &[LatchedNibble] {
        &self.latched
    }

    /// Values of all latched nibbles, in order.
    pub fn nibbles(&self) -> Vec<u8> {
        self.latched.iter().map(|n| n.value).collect()
    }

    /// Pairs up latched nibbles into bytes, high nibble first.
    ///
    /// Returns the byte and the register-select state it was latched with. A trailing unpaired
    /// nibble is ignored.
    pub fn bytes(&self) -> Vec<(u8, bool)> {
        self.latched
            .chunks_exact(2)
            .map(|pair| ((pair[0].value << 4) | pair[1].value, pair[0].register_select))
            .collect()
    }

    /// Command bytes (register-select low) in the order they were latched.
    pub fn commands(&self) -> Vec<u8> {
        self.bytes()
            .into_iter()
            .filter(|&(_, rs)| !rs)
            .map(|(b, _)| b)
            .collect()
    }

    /// The run of delays recorded right after the event at `index`.
    pub fn delays_after(&self, index: usize) -> Vec<u32> {
        self.events
            .iter()
            .skip(index + 1)
            .map_while(|event| match event {
                SignalEvent::Delay(us) => Some(*us),
                _ => None,
            })
            .collect()
    }

    /// Sum of all recorded delays in microseconds.
    pub fn total_delay(&self) -> u64 {
        self.events
            .iter()
            .map(|event| match event {
                SignalEvent::Delay(us) => *us as u64,
                _ => 0,
            })
            .sum()
    }

    /// Forgets recorded events and latches. Line states are kept.
    pub fn clear(&mut self) {
        self.events.clear();
        self.latched.clear();
    }

    fn data_nibble(&self) -> u8 {
        self.data
            .iter()
            .enumerate()
            .fold(0, |nibble, (i, &bit)| nibble | ((bit as u8) << i))
    }
}

impl SignalInterface for RecordingSignal {
    fn set_data_line(&mut self, index: u8, value: bool) -> GpioResult<()> {
        let line = self
            .data
            .get_mut(index as usize)
            .ok_or(GpioError::InvalidArgument)?;
        *line = value;
        self.events.push(SignalEvent::DataLine { index, value });
        Ok(())
    }

    fn set_register_select(&mut self, value: bool) -> GpioResult<()> {
        self.register_select = value;
        self.events.push(SignalEvent::RegisterSelect(value));
        Ok(())
    }

    fn set_enable(&mut self, value: bool) -> GpioResult<()> {
        let falling = self.enable && !value;
        self.enable = value;
        self.events.push(SignalEvent::Enable(value));
        if falling {
            self.latched.push(LatchedNibble {
                value: self.data_nibble(),
                register_select: self.register_select,
                event: self.events.len() - 1,
            });
        }
        Ok(())
    }

    fn delay_us(&mut self, micros: u32) -> GpioResult<()> {
        self.events.push(SignalEvent::Delay(micros));
        Ok(())
    }
}
