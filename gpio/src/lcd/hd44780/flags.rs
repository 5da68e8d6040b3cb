use bitflags::bitflags;

/// HD44780 instruction opcodes. The opcode is the highest set bit of a command byte; the bits below
/// it carry the instruction's arguments.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Instruction {
    ClearDisplay = 0b0000_0001,
    ReturnHome = 0b0000_0010,
    EntryModeSet = 0b0000_0100,
    DisplayControl = 0b0000_1000,
    CursorShift = 0b0001_0000,
    FunctionSet = 0b0010_0000,
    SetCgramAddress = 0b0100_0000,
    SetDdramAddress = 0b1000_0000,
}

bitflags! {
    /// Arguments of [Instruction::EntryModeSet].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct EntryFlags: u8 {
        /// Cursor moves right after each write, so text flows left to right.
        const ENTRY_LEFT = 0b0000_0010;
        /// The whole display shifts on each write, "right justifying" text from the cursor.
        const SHIFT_INCREMENT = 0b0000_0001;
    }
}

bitflags! {
    /// Arguments of [Instruction::DisplayControl].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct ControlFlags: u8 {
        const DISPLAY_ON = 0b0000_0100;
        /// Underline cursor.
        const CURSOR_ON = 0b0000_0010;
        /// Blinking block cursor.
        const BLINK_ON = 0b0000_0001;
    }
}

bitflags! {
    /// Arguments of [Instruction::CursorShift].
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct ShiftFlags: u8 {
        /// Shift the whole display instead of only moving the cursor.
        const DISPLAY_MOVE = 0b0000_1000;
        const MOVE_RIGHT = 0b0000_0100;
    }
}

bitflags! {
    /// Arguments of [Instruction::FunctionSet].
    ///
    /// An empty set means 4-bit bus, one line, 5x8 dots.
    #[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
    pub struct FunctionFlags: u8 {
        /// Never set by this driver, only 4-bit wiring is supported.
        const EIGHT_BIT = 0b0001_0000;
        const TWO_LINE = 0b0000_1000;
        /// 5x10 dot font. Only honored by the controller in one-line mode.
        const DOTS_5X10 = 0b0000_0100;
    }
}

pub fn clear_display() -> u8 {
    Instruction::ClearDisplay as u8
}

pub fn return_home() -> u8 {
    Instruction::ReturnHome as u8
}

pub fn entry_mode_set(flags: EntryFlags) -> u8 {
    Instruction::EntryModeSet as u8 | flags.bits()
}

pub fn display_control(flags: ControlFlags) -> u8 {
    Instruction::DisplayControl as u8 | flags.bits()
}

pub fn cursor_shift(flags: ShiftFlags) -> u8 {
    Instruction::CursorShift as u8 | flags.bits()
}

pub fn function_set(flags: FunctionFlags) -> u8 {
    Instruction::FunctionSet as u8 | flags.bits()
}

/// Sets the CGRAM address. Only the low 6 bits are meaningful.
pub fn set_cgram_address(address: u8) -> u8 {
    Instruction::SetCgramAddress as u8 | (address & 0b0011_1111)
}

/// Sets the DDRAM address. Only the low 7 bits are meaningful.
pub fn set_ddram_address(address: u8) -> u8 {
    Instruction::SetDdramAddress as u8 | (address & 0b0111_1111)
}
