//! Event feed loading from a file, standard input, or a URL.

use std::fmt;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use tracing::{debug, info};

use e2p_model::EventRecord;

use crate::error::LoadError;

/// Browser User-Agent sent with feed requests; some feed hosts reject
/// non-browser clients.
pub const BROWSER_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10.12; rv:55.0) Gecko/20100101 Firefox/55.0";

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Where the event feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Stdin,
    Url(String),
    File(PathBuf),
}

impl InputSource {
    /// Classify an input argument: `-` is stdin, anything mentioning `http`
    /// is a URL, everything else is a file path.
    pub fn parse(arg: &str) -> Self {
        if arg == "-" {
            InputSource::Stdin
        } else if arg.contains("http") {
            InputSource::Url(arg.to_string())
        } else {
            InputSource::File(PathBuf::from(arg))
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::Stdin => f.write_str("<stdin>"),
            InputSource::Url(url) => f.write_str(url),
            InputSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Load and parse the event feed.
///
/// # Errors
///
/// Returns a [`LoadError`] if the source cannot be read, the payload is not
/// a JSON array of events, or the array is empty.
pub fn load_events(source: &InputSource) -> Result<Vec<EventRecord>, LoadError> {
    let bytes = match source {
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            io::stdin()
                .lock()
                .read_to_end(&mut buffer)
                .map_err(LoadError::Stdin)?;
            buffer
        }
        InputSource::Url(url) => fetch(url)?,
        InputSource::File(path) => fs::read(path).map_err(|source| LoadError::FileRead {
            path: path.clone(),
            source,
        })?,
    };
    debug!(source = %source, bytes = bytes.len(), "read event feed");
    let events = parse_events(&bytes, &source.to_string())?;
    info!(source = %source, events = events.len(), "loaded events");
    Ok(events)
}

/// Parse a feed payload, tolerating a leading UTF-8 byte-order mark.
///
/// # Errors
///
/// Returns [`LoadError::Json`] for malformed payloads and
/// [`LoadError::NoEvents`] for an empty array.
pub fn parse_events(bytes: &[u8], origin: &str) -> Result<Vec<EventRecord>, LoadError> {
    let payload = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let events: Vec<EventRecord> =
        serde_json::from_slice(payload).map_err(|source| LoadError::Json {
            origin: origin.to_string(),
            source,
        })?;
    if events.is_empty() {
        return Err(LoadError::NoEvents {
            origin: origin.to_string(),
        });
    }
    Ok(events)
}

/// One blocking GET with no timeout and no retry.
fn fetch(url: &str) -> Result<Vec<u8>, LoadError> {
    let http_error = |error: reqwest::Error| LoadError::Http {
        url: url.to_string(),
        message: error.to_string(),
    };
    let client = Client::builder()
        .timeout(None::<Duration>)
        .build()
        .map_err(http_error)?;

    debug!(url, "fetching event feed");
    let response = client
        .get(url)
        .header(USER_AGENT, BROWSER_USER_AGENT)
        .send()
        .map_err(http_error)?;

    if !response.status().is_success() {
        return Err(LoadError::HttpStatus {
            url: url.to_string(),
            status: response.status().as_u16(),
        });
    }
    let body = response.bytes().map_err(http_error)?;
    Ok(body.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_input_arguments() {
        assert_eq!(InputSource::parse("-"), InputSource::Stdin);
        assert_eq!(
            InputSource::parse("https://example.org/wp-json/tsml/meetings"),
            InputSource::Url("https://example.org/wp-json/tsml/meetings".to_string())
        );
        assert_eq!(
            InputSource::parse("meetings.json"),
            InputSource::File(PathBuf::from("meetings.json"))
        );
    }

    #[test]
    fn strips_byte_order_mark() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice(br#"[{"name": "Noon", "day": 1}]"#);
        let events = parse_events(&bytes, "<stdin>").expect("parse");
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].name.as_deref(), Some("Noon"));
    }

    #[test]
    fn empty_feed_is_an_error() {
        let err = parse_events(b"[]", "feed.json").unwrap_err();
        assert!(matches!(err, LoadError::NoEvents { .. }));
    }

    #[test]
    fn non_array_payload_is_an_error() {
        let err = parse_events(br#"{"name": "Noon"}"#, "feed.json").unwrap_err();
        assert!(matches!(err, LoadError::Json { .. }));
    }

    #[test]
    fn wrong_field_type_is_an_error() {
        let err = parse_events(br#"[{"day": "Monday"}]"#, "feed.json").unwrap_err();
        assert!(err.to_string().contains("feed.json"));
    }
}
