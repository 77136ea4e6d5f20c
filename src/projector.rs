//! Result projection
//!
//! Pure narrowing of the engine's raw output tree into the public response
//! shape: page geometry, flattened text runs, flattened form-field values.
//! Order-preserving and lossy - nothing outside the projected fields
//! survives - and the input tree is never mutated.

use serde::Serialize;
use serde_json::Value;

use crate::engine::{EngineOutput, RawFieldEntry, RawPage, RawTextEntry};

/// One projected page, in engine units.
#[derive(Debug, Clone, Serialize)]
pub struct PageProjection {
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Height")]
    pub height: f64,
    #[serde(rename = "Texts")]
    pub texts: Vec<TextProjection>,
    #[serde(rename = "Fields")]
    pub fields: Vec<FieldProjection>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TextProjection {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    /// Decoded run fragments joined with single spaces; absent when the
    /// entry has no runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FieldProjection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub x: f64,
    pub y: f64,
    pub w: f64,
    /// Raw engine value, passed through unmodified.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Projects the engine output into the public page sequence, preserving the
/// engine's page order.
pub fn project(output: &EngineOutput) -> Vec<PageProjection> {
    output.pages.iter().map(project_page).collect()
}

fn project_page(page: &RawPage) -> PageProjection {
    PageProjection {
        width: page.width,
        height: page.height,
        texts: page.texts.iter().map(project_text).collect(),
        fields: page.fields.iter().map(project_field).collect(),
    }
}

fn project_text(entry: &RawTextEntry) -> TextProjection {
    let text = match &entry.runs {
        Some(runs) if !runs.is_empty() => Some(
            runs.iter()
                .map(|run| decode_fragment(&run.text))
                .collect::<Vec<_>>()
                .join(" "),
        ),
        _ => None,
    };

    TextProjection {
        x: entry.x,
        y: entry.y,
        w: entry.w,
        text,
    }
}

fn project_field(entry: &RawFieldEntry) -> FieldProjection {
    FieldProjection {
        id: entry.id.as_ref().and_then(|id| id.id.clone()),
        x: entry.x,
        y: entry.y,
        w: entry.w,
        value: entry.value.clone(),
    }
}

/// Percent-decodes one run fragment and trims surrounding whitespace. A
/// fragment that does not decode to valid UTF-8 is kept in its raw form.
fn decode_fragment(fragment: &str) -> String {
    match urlencoding::decode(fragment) {
        Ok(decoded) => decoded.trim().to_string(),
        Err(_) => fragment.trim().to_string(),
    }
}
