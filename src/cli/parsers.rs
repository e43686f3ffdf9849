use eyre::{eyre, Context, Result};
use reqwest::Url;
use serde_json::Value;

/// `value_parser` to parse a `str` to `Url`.
pub fn parse_url(value: &str) -> Result<Url> {
    Url::parse(value).map_err(Into::into)
}

/// `value_parser` to parse a `str` to a JSON event object.
pub fn parse_event(value: &str) -> Result<Value> {
    let event = serde_json::from_str::<Value>(value).wrap_err("could not parse event")?;
    if !event.is_object() {
        return Err(eyre!("event must be a JSON object"));
    }

    Ok(event)
}
