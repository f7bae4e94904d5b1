//! # Domain Models
//!
//! Typed building blocks of a price-history fetch.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Validated Stooq ticker |
//! | [`TradeDate`] | `YYYYMMDD` calendar date |
//! | [`Interval`] | Sampling interval (daily through yearly) |
//! | [`PriceRecord`] | One OHLCV row |
//!
//! Constructors validate their input and return [`ValidationError`](crate::ValidationError)
//! on failure, so a value of any of these types is always well-formed.

mod interval;
mod price;
mod symbol;
mod trade_date;

pub use interval::Interval;
pub use price::PriceRecord;
pub use symbol::Symbol;
pub use trade_date::TradeDate;
