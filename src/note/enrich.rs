//! Derived fields: display timestamps and watermark-free media URLs.
//!
//! Every step here is best effort. A field that cannot be derived is left
//! null or unchanged and the rest of the note is still enriched.

use chrono::{Local, TimeZone};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::note::value::{is_truthy, kind_of};
use crate::note::NoteRecord;

const IMAGE_CDN: &str = "https://sns-img-hw.xhscdn.com";
const IMAGE_VIEW_QUERY: &str = "imageView2/2/w/0/format/jpg";
const VIDEO_CDN: &str = "https://sns-video-hw.xhscdn.com";

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Note fields holding millisecond epoch timestamps.
pub const TIME_FIELDS: [&str; 2] = ["time", "lastUpdateTime"];

#[derive(Debug, Error, PartialEq)]
pub enum TimestampFormatError {
    #[error("expected a millisecond timestamp, found {0}")]
    NotANumber(&'static str),

    #[error("timestamp {0} is out of range")]
    OutOfRange(String),
}

/// Format a millisecond epoch value as local `YYYY-MM-DD HH:MM:SS`.
///
/// `Ok(None)` means there was nothing to format (missing, null, zero).
pub fn format_timestamp(value: Option<&Value>) -> Result<Option<String>, TimestampFormatError> {
    let Some(value) = value.filter(|v| is_truthy(v)) else {
        return Ok(None);
    };

    let millis = match value {
        Value::Number(n) => match n.as_i64() {
            Some(ms) => ms,
            None => n
                .as_f64()
                .filter(|f| f.is_finite() && f.abs() < i64::MAX as f64)
                .map(|f| f.floor() as i64)
                .ok_or_else(|| TimestampFormatError::OutOfRange(n.to_string()))?,
        },
        other => return Err(TimestampFormatError::NotANumber(kind_of(other))),
    };

    Local
        .timestamp_millis_opt(millis)
        .single()
        .map(|dt| Some(dt.format(TIMESTAMP_FORMAT).to_string()))
        .ok_or_else(|| TimestampFormatError::OutOfRange(millis.to_string()))
}

/// Replace each timestamp field with its formatted form, or null.
pub fn enrich_times(record: &mut NoteRecord) {
    for field in TIME_FIELDS {
        let formatted = match format_timestamp(record.get(field)) {
            Ok(Some(text)) => {
                debug!(field, formatted = %text, "formatted timestamp");
                Value::String(text)
            }
            Ok(None) => Value::Null,
            Err(err) => {
                warn!(field, error = %err, "could not format timestamp");
                Value::Null
            }
        };
        record.insert(field, formatted);
    }
}

/// Image location recovered from an image's `urlDefault`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TracePath {
    /// `prefix/traceId` when the parent segment is a CDN bucket (it contains
    /// an underscore), otherwise just the trace id.
    pub extracted_path: String,
    pub trace_id: String,
}

pub fn extract_trace_path(url_default: &str) -> Option<TracePath> {
    let mut segments = url_default.rsplitn(3, '/');
    let last = segments.next()?;
    let trace_id = last.split('!').next().unwrap_or_default();
    if trace_id.is_empty() {
        return None;
    }

    let extracted_path = match segments.next() {
        Some(prefix) if prefix.contains('_') => format!("{prefix}/{trace_id}"),
        _ => trace_id.to_string(),
    };

    Some(TracePath {
        extracted_path,
        trace_id: trace_id.to_string(),
    })
}

pub fn watermark_free_image_url(extracted_path: &str) -> String {
    format!("{IMAGE_CDN}/{extracted_path}?{IMAGE_VIEW_QUERY}")
}

pub fn watermark_free_video_url(origin_video_key: &str) -> String {
    format!("{VIDEO_CDN}/{origin_video_key}")
}

/// Copy `imageList`, dropping entries that are not objects and adding
/// `extracted_path`, `traceId` and `urlNoWatermark` where `urlDefault` allows.
pub fn enrich_images(images: Option<&Value>) -> Vec<Value> {
    let images = match images {
        None | Some(Value::Null) => return Vec::new(),
        Some(Value::Array(images)) => images,
        Some(other) => {
            warn!(found = kind_of(other), "imageList is not an array, writing an empty list");
            return Vec::new();
        }
    };

    let enriched: Vec<Value> = images
        .iter()
        .filter_map(Value::as_object)
        .map(|image| Value::Object(enrich_image(image)))
        .collect();
    debug!(count = enriched.len(), "processed imageList");
    enriched
}

fn enrich_image(image: &Map<String, Value>) -> Map<String, Value> {
    let mut image = image.clone();
    let trace = image
        .get("urlDefault")
        .and_then(Value::as_str)
        .and_then(extract_trace_path);

    if let Some(trace) = trace {
        let url = watermark_free_image_url(&trace.extracted_path);
        image.insert("extracted_path".into(), Value::String(trace.extracted_path));
        image.insert("traceId".into(), Value::String(trace.trace_id));
        image.insert("urlNoWatermark".into(), Value::String(url));
    }
    image
}

/// Copy `video` and add `urlNoWatermark` built from
/// `consumer.originVideoKey`.
pub fn enrich_video(video: &Value) -> Value {
    let Some(video) = video.as_object() else {
        warn!(found = kind_of(video), "video is not an object, leaving it unchanged");
        return video.clone();
    };

    let mut video = video.clone();
    let origin_key = video
        .get("consumer")
        .and_then(|consumer| consumer.get("originVideoKey"))
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    video.insert(
        "urlNoWatermark".into(),
        Value::String(watermark_free_video_url(&origin_key)),
    );
    Value::Object(video)
}
