//! User input validation
//!
//! Raw text from the entry and search forms is parsed here. Only values that
//! pass these checks ever reach the store.

use crate::consts::{MAX_NUM, MAX_POS, MAX_VALUE};
use crate::error::{Field, InputError};

/// A validated (num, pos, value) triple ready to be recorded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntryInput {
    num: u16,
    pos: u8,
    value: u8,
}

impl EntryInput {
    /// Bounds-check integer input
    pub fn new(num: i64, pos: i64, value: i64) -> Result<Self, InputError> {
        Ok(Self {
            num: check_range(Field::Num, num, MAX_NUM.into())? as u16,
            pos: check_range(Field::Pos, pos, MAX_POS.into())? as u8,
            value: check_range(Field::Value, value, MAX_VALUE.into())? as u8,
        })
    }

    /// Parse and bounds-check raw form text
    pub fn parse(num: &str, pos: &str, value: &str) -> Result<Self, InputError> {
        Self::new(
            parse_int(Field::Num, num)?,
            parse_int(Field::Pos, pos)?,
            parse_int(Field::Value, value)?,
        )
    }

    pub fn num(&self) -> u16 {
        self.num
    }

    pub fn pos(&self) -> u8 {
        self.pos
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

/// Parse the Consult view's search number
pub fn parse_num(raw: &str) -> Result<u16, InputError> {
    let num = parse_int(Field::Num, raw)?;
    Ok(check_range(Field::Num, num, MAX_NUM.into())? as u16)
}

fn parse_int(field: Field, raw: &str) -> Result<i64, InputError> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix('-')
        .or_else(|| trimmed.strip_prefix('+'))
        .unwrap_or(trimmed);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(InputError::NotANumber {
            field,
            raw: raw.to_string(),
        });
    }
    // Digit-only strings only fail to parse on overflow, which is out of range anyway
    trimmed.parse::<i64>().map_err(|_| InputError::OutOfRange {
        field,
        value: i64::MAX,
        max: max_for(field),
    })
}

fn check_range(field: Field, value: i64, max: i64) -> Result<i64, InputError> {
    if (0..=max).contains(&value) {
        Ok(value)
    } else {
        Err(InputError::OutOfRange { field, value, max })
    }
}

fn max_for(field: Field) -> i64 {
    match field {
        Field::Num => MAX_NUM.into(),
        Field::Pos => MAX_POS.into(),
        Field::Value => MAX_VALUE.into(),
    }
}
