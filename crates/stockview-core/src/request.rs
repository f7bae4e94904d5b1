//! Inbound request shapes and the validator between them.
//!
//! [`FetchParams`] is the loose payload a caller hands over (every field
//! optional, as it arrives off the wire). [`FetchRequest::validate`] turns it
//! into a fully typed [`FetchRequest`] or reports every offending field at once.
//! [`FetchRequest::validate_json`] does the same straight from a JSON body,
//! so wrongly typed fields are reported alongside missing and malformed ones.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::{FieldError, Interval, Symbol, TradeDate, ValidationError, ValidationErrors};

/// Raw fetch arguments before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchParams {
    pub symbol: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub interval: Option<String>,
}

impl FetchParams {
    pub fn new(
        symbol: impl Into<String>,
        start_date: impl Into<String>,
        end_date: impl Into<String>,
    ) -> Self {
        Self {
            symbol: Some(symbol.into()),
            start_date: Some(start_date.into()),
            end_date: Some(end_date.into()),
            interval: None,
        }
    }

    pub fn with_interval(mut self, interval: impl Into<String>) -> Self {
        self.interval = Some(interval.into());
        self
    }
}

/// One inbound field: absent, a string, or a value of the wrong JSON type.
type RawField<'a> = Result<Option<&'a str>, ValidationError>;

/// Validated fetch request, ready to be sent upstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchRequest {
    pub symbol: Symbol,
    pub start_date: TradeDate,
    pub end_date: TradeDate,
    pub interval: Interval,
}

impl FetchRequest {
    /// Validate every field of `params`, collecting all failures.
    pub fn validate(params: &FetchParams) -> Result<Self, ValidationErrors> {
        Self::validate_fields(
            Ok(params.symbol.as_deref()),
            Ok(params.start_date.as_deref()),
            Ok(params.end_date.as_deref()),
            Ok(params.interval.as_deref()),
        )
    }

    /// Validate a JSON request body. `null` counts as absent; any other
    /// non-string value is reported against its field.
    pub fn validate_json(body: &Value) -> Result<Self, ValidationErrors> {
        let Some(object) = body.as_object() else {
            return Err(ValidationErrors::new(vec![FieldError::new(
                "body",
                ValidationError::NotAnObject {
                    found: json_type(body),
                },
            )]));
        };

        Self::validate_fields(
            json_field(object, "symbol"),
            json_field(object, "start_date"),
            json_field(object, "end_date"),
            json_field(object, "interval"),
        )
    }

    fn validate_fields(
        symbol: RawField<'_>,
        start_date: RawField<'_>,
        end_date: RawField<'_>,
        interval: RawField<'_>,
    ) -> Result<Self, ValidationErrors> {
        let mut errors = Vec::new();

        let symbol = required(&mut errors, "symbol", symbol, Symbol::parse);
        let start_date = required(&mut errors, "start_date", start_date, TradeDate::parse);
        let end_date = required(&mut errors, "end_date", end_date, TradeDate::parse);

        let interval = match interval {
            Ok(None) => Some(Interval::default()),
            Ok(Some(raw)) => Interval::from_str(raw)
                .map_err(|error| errors.push(FieldError::new("interval", error)))
                .ok(),
            Err(error) => {
                errors.push(FieldError::new("interval", error));
                None
            }
        };

        if let (Some(start), Some(end)) = (start_date, end_date) {
            if end < start {
                errors.push(FieldError::new(
                    "end_date",
                    ValidationError::DateRangeReversed,
                ));
            }
        }

        match (symbol, start_date, end_date, interval) {
            (Some(symbol), Some(start_date), Some(end_date), Some(interval))
                if errors.is_empty() =>
            {
                Ok(Self {
                    symbol,
                    start_date,
                    end_date,
                    interval,
                })
            }
            _ => Err(ValidationErrors::new(errors)),
        }
    }
}

fn json_field<'a>(object: &'a Map<String, Value>, name: &str) -> RawField<'a> {
    match object.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(value)) => Ok(Some(value.as_str())),
        Some(other) => Err(ValidationError::NotAString {
            found: json_type(other),
        }),
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn required<T>(
    errors: &mut Vec<FieldError>,
    field: &'static str,
    value: RawField<'_>,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Option<T> {
    let value = match value {
        Ok(Some(value)) => value,
        Ok(None) => {
            errors.push(FieldError::new(field, ValidationError::Missing));
            return None;
        }
        Err(error) => {
            errors.push(FieldError::new(field, error));
            return None;
        }
    };

    match parse(value) {
        Ok(parsed) => Some(parsed),
        Err(error) => {
            errors.push(FieldError::new(field, error));
            None
        }
    }
}
