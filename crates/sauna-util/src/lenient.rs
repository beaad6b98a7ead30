//! Serde helpers for records written by the browser front desk.
//!
//! The browser tool stored form inputs verbatim, so numbers may arrive as
//! strings ("500"), blank inputs as "" and unset fields as `null`. These
//! helpers accept all of those shapes; serialization always uses the plain
//! typed form.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Int(i64),
    Float(f64),
    Text(String),
}

impl NumberOrText {
    fn into_amount(self) -> Result<Option<i64>, String> {
        match self {
            NumberOrText::Int(n) => Ok(Some(n)),
            NumberOrText::Float(f) if f.is_finite() => Ok(Some(f.round() as i64)),
            NumberOrText::Float(f) => Err(format!("invalid number {}", f)),
            NumberOrText::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                if let Ok(n) = s.parse::<i64>() {
                    return Ok(Some(n));
                }
                match s.parse::<f64>() {
                    Ok(f) if f.is_finite() => Ok(Some(f.round() as i64)),
                    _ => Err(format!("'{}' is not a number", s)),
                }
            }
        }
    }
}

/// Required whole-unit number
pub fn amount<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i64, D::Error> {
    NumberOrText::deserialize(deserializer)?
        .into_amount()
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("expected a number, got an empty value"))
}

/// Optional whole-unit number; `null` and "" mean absent
pub fn optional_amount<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<i64>, D::Error> {
    match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(raw) => raw.into_amount().map_err(D::Error::custom),
        None => Ok(None),
    }
}

/// Non-negative count; negative values clamp to zero
pub fn count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u32, D::Error> {
    let n = amount(deserializer)?;
    Ok(n.clamp(0, u32::MAX as i64) as u32)
}

/// Free text; `null` reads as ""
pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Optional ticket number; `null` and blank text mean absent
pub fn optional_ticket<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<crate::TicketNumber>, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.and_then(crate::TicketNumber::new))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TicketNumber;

    #[derive(Deserialize)]
    struct Form {
        #[serde(deserialize_with = "amount")]
        amount: i64,
        #[serde(default, deserialize_with = "optional_amount")]
        cash: Option<i64>,
        #[serde(deserialize_with = "count")]
        remaining: u32,
        #[serde(default, deserialize_with = "text")]
        notes: String,
        #[serde(default, deserialize_with = "optional_ticket")]
        ticket: Option<TicketNumber>,
    }

    #[test]
    fn accepts_browser_form_values() {
        let form: Form = serde_json::from_str(
            r#"{"amount": "1200", "cash": "", "remaining": -2, "notes": null, "ticket": " A1 "}"#,
        )
        .unwrap();

        assert_eq!(form.amount, 1200);
        assert_eq!(form.cash, None);
        assert_eq!(form.remaining, 0);
        assert_eq!(form.notes, "");
        assert_eq!(form.ticket, TicketNumber::new("A1"));
    }

    #[test]
    fn accepts_typed_values() {
        let form: Form =
            serde_json::from_str(r#"{"amount": 350, "cash": 500.4, "remaining": 3}"#).unwrap();

        assert_eq!(form.amount, 350);
        assert_eq!(form.cash, Some(500));
        assert_eq!(form.remaining, 3);
        assert!(form.ticket.is_none());
    }

    #[test]
    fn rejects_non_numeric_text() {
        let result = serde_json::from_str::<Form>(r#"{"amount": "abc", "remaining": 1}"#);
        assert!(result.is_err());

        let result = serde_json::from_str::<Form>(r#"{"amount": "", "remaining": 1}"#);
        assert!(result.is_err());
    }
}
