//! Structural gate for API payloads.
//!
//! Rejects anything that is not `{"homeworks": [...], "current_date": <int>}`
//! before the status diff sees it.

use serde_json::Value;
use tracing::debug;

use crate::error::ShapeError;
use crate::practicum::Validated;

pub fn validate(payload: &Value) -> Result<Validated, ShapeError> {
    let obj = payload
        .as_object()
        .ok_or(ShapeError::NotAnObject { what: "response" })?;

    let homeworks = obj
        .get("homeworks")
        .ok_or(ShapeError::MissingField("homeworks"))?;
    let current_date = obj
        .get("current_date")
        .ok_or(ShapeError::MissingField("current_date"))?;

    let homeworks = homeworks
        .as_array()
        .ok_or(ShapeError::WrongType("homeworks"))?;
    let current_date = current_date
        .as_i64()
        .ok_or(ShapeError::WrongType("current_date"))?;

    debug!(count = homeworks.len(), current_date, "API response passed validation");
    Ok(Validated {
        homeworks: homeworks.clone(),
        current_date,
    })
}
