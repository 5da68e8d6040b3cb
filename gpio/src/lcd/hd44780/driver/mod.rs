//! HD44780 display driver.
//!
//! [Hd44780] keeps the display state (function, display control and entry mode flags, row
//! addresses) and turns every operation into command or data bytes. Bytes go out as two nibbles
//! over a [SignalInterface], see [GpioSignalInterface] for the GPIO implementation.

mod gpio;

use crate::GpioResult;
pub use gpio::*;
use crate::lcd::hd44780::{
    ControlFlags, EntryFlags, FunctionFlags, ShiftFlags, clear_display, cursor_shift,
    display_control, entry_mode_set, function_set, return_home, set_cgram_address,
    set_ddram_address,
};
use log::{debug, trace, warn};
use std::fmt::Debug;

/// The lines an HD44780 needs in 4-bit write-only mode, plus a way to wait.
///
/// The R/W line of the display must be tied to ground, the driver never reads.
pub trait SignalInterface: Debug {
    /// Sets data line `index` (0 for D4 up to 3 for D7).
    fn set_data_line(&mut self, index: u8, value: bool) -> GpioResult<()>;

    /// Sets the RS line. `false` selects the instruction register, `true` the data register.
    fn set_register_select(&mut self, value: bool) -> GpioResult<()>;

    /// Sets the E line. The controller samples the bus on the falling edge.
    fn set_enable(&mut self, value: bool) -> GpioResult<()>;

    /// Blocks for at least `micros` microseconds.
    fn delay_us(&mut self, micros: u32) -> GpioResult<()>;
}

impl<T: SignalInterface + ?Sized> SignalInterface for &mut T {
    fn set_data_line(&mut self, index: u8, value: bool) -> GpioResult<()> {
        (**self).set_data_line(index, value)
    }

    fn set_register_select(&mut self, value: bool) -> GpioResult<()> {
        (**self).set_register_select(value)
    }

    fn set_enable(&mut self, value: bool) -> GpioResult<()> {
        (**self).set_enable(value)
    }

    fn delay_us(&mut self, micros: u32) -> GpioResult<()> {
        (**self).delay_us(micros)
    }
}

/// Character font of the display.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub enum Font {
    #[default]
    Dots5x8,
    /// Only available on one-line displays, ignored otherwise.
    Dots5x10,
}

/// Geometry and font passed to [Hd44780::begin_with].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct DisplayConfig {
    pub columns: u8,
    pub lines: u8,
    pub font: Font,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            columns: 16,
            lines: 2,
            font: Font::Dots5x8,
        }
    }
}

/// Driver for an HD44780 display on a 4-bit bus.
///
/// Nothing is sent until [Hd44780::init] or [Hd44780::begin] runs the power-on sequence. Every
/// operation blocks until the controller is done with it, using fixed delays.
///
/// Operations only fail if the [SignalInterface] fails. Out-of-range rows are clamped and
/// character slots are masked rather than rejected.
#[derive(Debug)]
pub struct Hd44780<S: SignalInterface> {
    signal: S,
    function: FunctionFlags,
    control: ControlFlags,
    entry: EntryFlags,
    lines: u8,
    row_offsets: [u8; 4],
}

impl<S: SignalInterface> Hd44780<S> {
    /// Wait after power rises above 2.7 V, the datasheet asks for at least 40 ms.
    pub const POWER_ON_DELAY_US: u32 = 50_000;
    /// Wait after the first two reset nibbles, at least 4.1 ms.
    pub const RESET_DELAY_US: u32 = 4_500;
    /// Wait after the third reset nibble, at least 100 us.
    pub const LAST_RESET_DELAY_US: u32 = 150;
    /// E high time, at least 450 ns.
    pub const ENABLE_PULSE_US: u32 = 1;
    /// Wait after each nibble, commands need more than 37 us.
    pub const SETTLE_DELAY_US: u32 = 100;
    /// Extra wait after clear and home, which are much slower than other commands.
    pub const CLEAR_DELAY_US: u32 = 2_000;

    pub fn new(signal: S) -> Self {
        Hd44780 {
            signal,
            function: FunctionFlags::empty(),
            control: ControlFlags::empty(),
            entry: EntryFlags::empty(),
            lines: 0,
            row_offsets: [0; 4],
        }
    }

    /// Initializes a 16x2 display with the 5x8 font.
    pub fn init(&mut self) -> GpioResult<()> {
        self.begin_with(DisplayConfig::default())
    }

    /// Initializes a display with the given geometry and the 5x8 font.
    pub fn begin(&mut self, columns: u8, lines: u8) -> GpioResult<()> {
        self.begin_with(DisplayConfig {
            columns,
            lines,
            font: Font::Dots5x8,
        })
    }

    /// Brings the controller from an unknown power-on state to 4-bit mode and sets it up.
    ///
    /// Follows the "initializing by instruction" procedure of the HD44780 datasheet (figure 24):
    /// three `0011` nibbles force 8-bit mode whatever state the controller was in, then `0010`
    /// switches to 4-bit mode. After that the display is turned on with no cursor, cleared, and
    /// set to left-to-right entry without autoscroll.
    ///
    /// Has to run to completion. If it is interrupted, it has to be restarted from the beginning.
    pub fn begin_with(&mut self, config: DisplayConfig) -> GpioResult<()> {
        debug!(
            "Initializing {}x{} display ({:?})",
            config.columns, config.lines, config.font
        );

        let lines = config.lines.max(1);
        self.function = FunctionFlags::empty();
        if lines > 1 {
            self.function |= FunctionFlags::TWO_LINE;
        } else if config.font == Font::Dots5x10 {
            self.function |= FunctionFlags::DOTS_5X10;
        }
        self.lines = lines;
        self.set_row_offsets(
            0x00,
            0x40,
            config.columns,
            0x40u8.wrapping_add(config.columns),
        );

        self.signal.delay_us(Self::POWER_ON_DELAY_US)?;
        self.signal.set_register_select(false)?;
        self.signal.set_enable(true)?;

        // Single nibbles: the controller might still expect 8-bit transfers
        self.write_nibble(0b0011)?;
        self.signal.delay_us(Self::RESET_DELAY_US)?;
        self.write_nibble(0b0011)?;
        self.signal.delay_us(Self::RESET_DELAY_US)?;
        self.write_nibble(0b0011)?;
        self.signal.delay_us(Self::LAST_RESET_DELAY_US)?;
        self.write_nibble(0b0010)?;
        debug!("Switched to 4-bit mode");

        self.command(function_set(self.function))?;

        self.control = ControlFlags::DISPLAY_ON;
        self.command(display_control(self.control))?;

        self.clear()?;

        self.entry = EntryFlags::ENTRY_LEFT;
        self.command(entry_mode_set(self.entry))?;

        debug!("Display initialized");
        Ok(())
    }

    /// Clears the display and sets the cursor to the home position.
    pub fn clear(&mut self) -> GpioResult<()> {
        self.command(clear_display())?;
        self.signal.delay_us(Self::CLEAR_DELAY_US)
    }

    /// Sets the cursor to the home position and undoes any display shift.
    pub fn home(&mut self) -> GpioResult<()> {
        self.command(return_home())?;
        self.signal.delay_us(Self::CLEAR_DELAY_US)
    }

    /// Overrides the DDRAM address of each row's first column.
    ///
    /// [Hd44780::begin] sets these to `0x00, 0x40, columns, 0x40 + columns`, which fits the usual
    /// 16x2, 20x2 and 20x4 modules.
    pub fn set_row_offsets(&mut self, row0: u8, row1: u8, row2: u8, row3: u8) {
        self.row_offsets = [row0, row1, row2, row3];
    }

    /// Moves the cursor to the given column and row, both counted from 0.
    ///
    /// The row is clamped to the last configured row. The column is not checked: past the end of
    /// the row, the address lands wherever the controller maps it.
    pub fn set_cursor(&mut self, col: u8, row: u8) -> GpioResult<()> {
        let last_row = (self.lines as usize)
            .min(self.row_offsets.len())
            .saturating_sub(1);
        let row = (row as usize).min(last_row);
        self.command(set_ddram_address(col.wrapping_add(self.row_offsets[row])))
    }

    pub fn display_on(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::DISPLAY_ON, true)
    }

    /// Blanks the display. Its contents are kept and come back on [Hd44780::display_on].
    pub fn display_off(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::DISPLAY_ON, false)
    }

    pub fn cursor_on(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::CURSOR_ON, true)
    }

    pub fn cursor_off(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::CURSOR_ON, false)
    }

    pub fn blink_on(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::BLINK_ON, true)
    }

    pub fn blink_off(&mut self) -> GpioResult<()> {
        self.update_control(ControlFlags::BLINK_ON, false)
    }

    /// Shifts the whole display one position to the left without changing DDRAM.
    pub fn scroll_left(&mut self) -> GpioResult<()> {
        self.command(cursor_shift(ShiftFlags::DISPLAY_MOVE))
    }

    /// Shifts the whole display one position to the right without changing DDRAM.
    pub fn scroll_right(&mut self) -> GpioResult<()> {
        self.command(cursor_shift(ShiftFlags::DISPLAY_MOVE | ShiftFlags::MOVE_RIGHT))
    }

    pub fn left_to_right(&mut self) -> GpioResult<()> {
        self.update_entry(EntryFlags::ENTRY_LEFT, true)
    }

    pub fn right_to_left(&mut self) -> GpioResult<()> {
        self.update_entry(EntryFlags::ENTRY_LEFT, false)
    }

    /// Shifts the display on each write, so text appears to be pushed out of the cursor.
    pub fn autoscroll_on(&mut self) -> GpioResult<()> {
        self.update_entry(EntryFlags::SHIFT_INCREMENT, true)
    }

    pub fn autoscroll_off(&mut self) -> GpioResult<()> {
        self.update_entry(EntryFlags::SHIFT_INCREMENT, false)
    }

    /// Uploads a custom 5x8 character into one of the 8 CGRAM slots.
    ///
    /// Each glyph byte is one row, top first, using the low 5 bits. The slot is masked to 0-7.
    /// Afterwards, writing the slot number prints the character. The address counter is left in
    /// CGRAM, so call [Hd44780::set_cursor] or [Hd44780::clear] before writing text again.
    pub fn create_char(&mut self, slot: u8, glyph: &[u8; 8]) -> GpioResult<()> {
        let slot = slot & 0b111;
        self.command(set_cgram_address(slot << 3))?;
        // The controller increments the CGRAM address after each row
        for &row in glyph {
            self.write(row)?;
        }
        Ok(())
    }

    /// Writes a character code at the cursor.
    pub fn write(&mut self, value: u8) -> GpioResult<()> {
        self.send(value, true)
    }

    /// Writes raw character codes, one after another.
    pub fn write_bytes(&mut self, bytes: &[u8]) -> GpioResult<()> {
        for &byte in bytes {
            self.write(byte)?;
        }
        Ok(())
    }

    /// Writes a string at the cursor. Characters outside ASCII are shown as `?`.
    pub fn print(&mut self, s: &str) -> GpioResult<()> {
        for c in s.chars() {
            if c.is_ascii() {
                self.write(c as u8)?;
            } else {
                warn!("Non-ASCII character: {}", c);
                self.write(b'?')?;
            }
        }
        Ok(())
    }

    /// Sends a raw instruction byte.
    pub fn command(&mut self, value: u8) -> GpioResult<()> {
        self.send(value, false)
    }

    pub fn function_flags(&self) -> FunctionFlags {
        self.function
    }

    pub fn control_flags(&self) -> ControlFlags {
        self.control
    }

    pub fn entry_flags(&self) -> EntryFlags {
        self.entry
    }

    pub fn line_count(&self) -> u8 {
        self.lines
    }

    pub fn row_offsets(&self) -> [u8; 4] {
        self.row_offsets
    }

    pub fn signal(&self) -> &S {
        &self.signal
    }

    pub fn signal_mut(&mut self) -> &mut S {
        &mut self.signal
    }

    /// Gives the signal interface back. The display keeps showing whatever it showed.
    pub fn release(self) -> S {
        self.signal
    }

    fn update_control(&mut self, flag: ControlFlags, value: bool) -> GpioResult<()> {
        self.control.set(flag, value);
        self.command(display_control(self.control))
    }

    fn update_entry(&mut self, flag: EntryFlags, value: bool) -> GpioResult<()> {
        self.entry.set(flag, value);
        self.command(entry_mode_set(self.entry))
    }

    fn pulse_enable(&mut self) -> GpioResult<()> {
        self.signal.set_enable(true)?;
        self.signal.delay_us(Self::ENABLE_PULSE_US)?;
        self.signal.set_enable(false)?;
        self.signal.delay_us(Self::SETTLE_DELAY_US)
    }

    fn write_nibble(&mut self, nibble: u8) -> GpioResult<()> {
        for i in 0..4 {
            self.signal.set_data_line(i, (nibble >> i) & 1 == 1)?;
        }
        self.pulse_enable()
    }

    fn send(&mut self, value: u8, rs: bool) -> GpioResult<()> {
        trace!("Sending data: {:08b}, RS: {}", value, rs);

        self.signal.set_register_select(rs)?;
        self.write_nibble(value >> 4)?;
        self.write_nibble(value & 0x0F)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GpioError;
    use crate::lcd::hd44780::mock::{RecordingSignal, SignalEvent};
    use proptest::prelude::*;

    type Lcd = Hd44780<RecordingSignal>;

    fn begun(columns: u8, lines: u8) -> Lcd {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.begin(columns, lines).unwrap();
        lcd.signal_mut().clear();
        lcd
    }

    fn nibble_events(nibble: u8) -> Vec<SignalEvent> {
        let mut events: Vec<_> = (0..4)
            .map(|index| SignalEvent::DataLine {
                index,
                value: (nibble >> index) & 1 == 1,
            })
            .collect();
        events.extend([
            SignalEvent::Enable(true),
            SignalEvent::Delay(1),
            SignalEvent::Enable(false),
            SignalEvent::Delay(100),
        ]);
        events
    }

    proptest! {
        #[test]
        fn send_latches_high_nibble_then_low_nibble(value in any::<u8>(), rs in any::<bool>()) {
            let mut lcd = Hd44780::new(RecordingSignal::new());
            lcd.send(value, rs).unwrap();

            let latched = lcd.signal().latched();
            prop_assert_eq!(latched.len(), 2);
            prop_assert_eq!(latched[0].value, (value >> 4) & 0x0F);
            prop_assert_eq!(latched[1].value, value & 0x0F);
            prop_assert!(latched.iter().all(|n| n.register_select == rs));
        }
    }

    #[test]
    fn each_nibble_is_one_enable_pulse() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.command(0xA5).unwrap();

        let mut expected = vec![SignalEvent::RegisterSelect(false)];
        expected.extend(nibble_events(0xA));
        expected.extend(nibble_events(0x5));
        assert_eq!(lcd.signal().events(), expected.as_slice());
    }

    #[test]
    fn write_selects_data_register() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.write(b'A').unwrap();
        assert_eq!(lcd.signal().bytes(), vec![(b'A', true)]);
    }

    #[test]
    fn begin_runs_power_on_sequence() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.begin(16, 2).unwrap();
        let signal = lcd.signal();

        assert_eq!(
            &signal.events()[..3],
            &[
                SignalEvent::Delay(50_000),
                SignalEvent::RegisterSelect(false),
                SignalEvent::Enable(true),
            ]
        );

        assert_eq!(
            signal.nibbles(),
            vec![0x3, 0x3, 0x3, 0x2, 0x2, 0x8, 0x0, 0xC, 0x0, 0x1, 0x0, 0x6]
        );
        assert!(signal.latched().iter().all(|n| !n.register_select));

        let latched = signal.latched();
        assert_eq!(signal.delays_after(latched[0].event), vec![100, 4_500]);
        assert_eq!(signal.delays_after(latched[1].event), vec![100, 4_500]);
        assert_eq!(signal.delays_after(latched[2].event), vec![100, 150]);
        assert_eq!(signal.delays_after(latched[3].event), vec![100]);
        // Low nibble of the clear command
        assert_eq!(signal.delays_after(latched[9].event), vec![100, 2_000]);
    }

    #[test]
    fn begin_waits_for_every_settle_time() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.init().unwrap();

        // Power-on, three reset waits, clear, and 12 nibbles of 1 + 100 us
        let expected = 50_000 + 4_500 + 4_500 + 150 + 2_000 + 12 * (1 + 100);
        assert_eq!(lcd.signal().total_delay(), expected);
    }

    #[test]
    fn begin_latches_session_state() {
        let lcd = begun(16, 2);
        assert_eq!(lcd.function_flags(), FunctionFlags::TWO_LINE);
        assert_eq!(lcd.control_flags(), ControlFlags::DISPLAY_ON);
        assert_eq!(lcd.entry_flags(), EntryFlags::ENTRY_LEFT);
        assert_eq!(lcd.line_count(), 2);
        assert_eq!(lcd.row_offsets(), [0x00, 0x40, 0x10, 0x50]);
    }

    #[test]
    fn init_sets_up_16x2() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.init().unwrap();
        // The four single reset nibbles pair up as 0x33, 0x32
        assert_eq!(
            lcd.signal().commands(),
            vec![0x33, 0x32, 0x28, 0x0C, 0x01, 0x06]
        );
        assert_eq!(lcd.row_offsets(), [0x00, 0x40, 0x10, 0x50]);
    }

    #[test]
    fn tall_font_only_on_one_line() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.begin_with(DisplayConfig {
            columns: 20,
            lines: 1,
            font: Font::Dots5x10,
        })
        .unwrap();
        assert_eq!(lcd.function_flags(), FunctionFlags::DOTS_5X10);

        lcd.begin_with(DisplayConfig {
            columns: 20,
            lines: 2,
            font: Font::Dots5x10,
        })
        .unwrap();
        assert_eq!(lcd.function_flags(), FunctionFlags::TWO_LINE);
    }

    #[test]
    fn zero_lines_is_treated_as_one() {
        let lcd = begun(16, 0);
        assert_eq!(lcd.line_count(), 1);
        assert_eq!(lcd.function_flags(), FunctionFlags::empty());
    }

    #[test]
    fn set_cursor_adds_row_offset() {
        let mut lcd = begun(16, 2);
        lcd.set_cursor(5, 1).unwrap();
        assert_eq!(lcd.signal().commands(), vec![0xC5]);
    }

    #[test]
    fn set_cursor_clamps_row_to_line_count() {
        let mut lcd = begun(16, 2);
        lcd.set_cursor(0, 3).unwrap();

        let mut one_line = begun(16, 1);
        one_line.set_cursor(3, 1).unwrap();

        let mut four_lines = begun(20, 4);
        four_lines.set_cursor(2, 7).unwrap();

        assert_eq!(lcd.signal().commands(), vec![0xC0]);
        assert_eq!(one_line.signal().commands(), vec![0x83]);
        // Row 3 of a 20x4 starts at 0x54
        assert_eq!(four_lines.signal().commands(), vec![0xD6]);
    }

    #[test]
    fn set_cursor_before_begin_uses_row_zero() {
        let mut lcd = Hd44780::new(RecordingSignal::new());
        lcd.set_cursor(4, 1).unwrap();
        assert_eq!(lcd.signal().commands(), vec![0x84]);
    }

    #[test]
    fn set_cursor_leaves_column_unchecked() {
        let mut lcd = begun(16, 2);
        lcd.set_cursor(20, 0).unwrap();
        assert_eq!(lcd.signal().commands(), vec![0x94]);
    }

    #[test]
    fn custom_row_offsets() {
        let mut lcd = begun(16, 4);
        lcd.set_row_offsets(0x00, 0x40, 0x14, 0x54);
        lcd.set_cursor(1, 2).unwrap();
        assert_eq!(lcd.signal().commands(), vec![0x95]);
    }

    #[test]
    fn create_char_uploads_eight_rows() {
        let glyph = [0x00, 0x0A, 0x1F, 0x1F, 0x0E, 0x04, 0x00, 0x00];
        let mut lcd = begun(16, 2);
        lcd.create_char(3, &glyph).unwrap();

        let mut expected = vec![(0x58, false)];
        expected.extend(glyph.iter().map(|&row| (row, true)));
        assert_eq!(lcd.signal().bytes(), expected);
    }

    #[test]
    fn create_char_masks_slot() {
        let mut lcd = begun(16, 2);
        lcd.create_char(11, &[0; 8]).unwrap();
        assert_eq!(lcd.signal().commands(), vec![0x58]);
    }

    #[test]
    fn control_toggles_compose() {
        let mut lcd = begun(16, 2);
        lcd.cursor_on().unwrap();
        lcd.blink_on().unwrap();
        lcd.cursor_off().unwrap();

        assert_eq!(
            lcd.control_flags(),
            ControlFlags::DISPLAY_ON | ControlFlags::BLINK_ON
        );
        assert_eq!(lcd.signal().commands(), vec![0x0E, 0x0F, 0x0D]);
    }

    #[test]
    fn display_off_keeps_cursor_settings() {
        let mut lcd = begun(16, 2);
        lcd.cursor_on().unwrap();
        lcd.display_off().unwrap();
        lcd.display_on().unwrap();
        lcd.blink_off().unwrap();
        assert_eq!(lcd.signal().commands(), vec![0x0E, 0x0A, 0x0E, 0x0E]);
    }

    #[test]
    fn entry_toggles_compose() {
        let mut lcd = begun(16, 2);
        lcd.right_to_left().unwrap();
        lcd.autoscroll_on().unwrap();
        lcd.left_to_right().unwrap();
        lcd.autoscroll_off().unwrap();

        assert_eq!(lcd.entry_flags(), EntryFlags::ENTRY_LEFT);
        assert_eq!(lcd.signal().commands(), vec![0x04, 0x05, 0x07, 0x06]);
    }

    #[test]
    fn scrolling_leaves_flags_alone() {
        let mut lcd = begun(16, 2);
        lcd.scroll_left().unwrap();
        lcd.scroll_right().unwrap();

        assert_eq!(lcd.signal().commands(), vec![0x18, 0x1C]);
        assert_eq!(lcd.control_flags(), ControlFlags::DISPLAY_ON);
        assert_eq!(lcd.entry_flags(), EntryFlags::ENTRY_LEFT);
    }

    #[test]
    fn clear_and_home_wait_for_controller() {
        let mut lcd = begun(16, 2);
        lcd.clear().unwrap();
        lcd.home().unwrap();

        let signal = lcd.signal();
        assert_eq!(signal.commands(), vec![0x01, 0x02]);
        let latched = signal.latched();
        assert_eq!(signal.delays_after(latched[1].event), vec![100, 2_000]);
        assert_eq!(signal.delays_after(latched[3].event), vec![100, 2_000]);
        assert_eq!(signal.events().last(), Some(&SignalEvent::Delay(2_000)));
    }

    #[test]
    fn print_replaces_non_ascii() {
        let mut lcd = begun(16, 2);
        lcd.print("Hi ü").unwrap();
        lcd.write_bytes(&[0x00, 0xFF]).unwrap();

        let data: Vec<u8> = lcd.signal().bytes().into_iter().map(|(b, _)| b).collect();
        assert_eq!(data, b"Hi ?\x00\xFF");
    }

    #[derive(Debug)]
    struct StuckEnable;

    impl SignalInterface for StuckEnable {
        fn set_data_line(&mut self, _index: u8, _value: bool) -> GpioResult<()> {
            Ok(())
        }

        fn set_register_select(&mut self, _value: bool) -> GpioResult<()> {
            Ok(())
        }

        fn set_enable(&mut self, _value: bool) -> GpioResult<()> {
            Err(GpioError::Io(std::io::ErrorKind::BrokenPipe))
        }

        fn delay_us(&mut self, _micros: u32) -> GpioResult<()> {
            Ok(())
        }
    }

    #[test]
    fn signal_errors_propagate() {
        let mut lcd = Hd44780::new(StuckEnable);
        assert_eq!(
            lcd.init(),
            Err(GpioError::Io(std::io::ErrorKind::BrokenPipe))
        );
        assert_eq!(
            lcd.write(b'x'),
            Err(GpioError::Io(std::io::ErrorKind::BrokenPipe))
        );
    }

    #[test]
    fn borrowed_signal_can_be_inspected_after_use() {
        let mut signal = RecordingSignal::new();
        {
            let mut lcd = Hd44780::new(&mut signal);
            lcd.init().unwrap();
        }
        assert_eq!(&signal.nibbles()[4..], &[0x2u8, 0x8, 0x0, 0xC, 0x0, 0x1, 0x0, 0x6]);
    }
}
