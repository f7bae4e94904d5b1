use serde::Serialize;

/// One row of historical trading data, fields in upstream column order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRecord {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl PriceRecord {
    pub fn new(
        date: impl Into<String>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            date: date.into(),
            open,
            high,
            low,
            close,
            volume,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_fields_in_column_order() {
        let record = PriceRecord::new("2000-05-01", 1452.43, 1481.51, 1452.43, 1468.25, 536833333.0);
        let json = serde_json::to_string(&record).expect("serialize");
        assert_eq!(
            json,
            r#"{"date":"2000-05-01","open":1452.43,"high":1481.51,"low":1452.43,"close":1468.25,"volume":536833333.0}"#
        );
    }
}
