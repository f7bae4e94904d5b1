use std::fmt::{Display, Formatter};

use time::{Date, Month};

use crate::ValidationError;

/// Calendar date in the compact `YYYYMMDD` form Stooq expects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TradeDate(Date);

impl TradeDate {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let value = input.trim();
        if value.len() != 8 || !value.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(ValidationError::DateNotNumeric {
                value: input.to_owned(),
            });
        }

        let invalid = || ValidationError::InvalidDate {
            value: value.to_owned(),
        };
        let year: i32 = value[0..4].parse().map_err(|_| invalid())?;
        let month: u8 = value[4..6].parse().map_err(|_| invalid())?;
        let day: u8 = value[6..8].parse().map_err(|_| invalid())?;
        let month = Month::try_from(month).map_err(|_| invalid())?;
        let date = Date::from_calendar_date(year, month, day).map_err(|_| invalid())?;

        Ok(Self(date))
    }

    pub fn format_compact(self) -> String {
        format!(
            "{:04}{:02}{:02}",
            self.0.year(),
            u8::from(self.0.month()),
            self.0.day()
        )
    }
}

impl Display for TradeDate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.format_compact())
    }
}
