// 📐 Shape Layer - Payload validation for both export variants
// Checks only what is needed to build the download; bucket contents stay opaque.

use crate::error::ExportError;
use serde_json::{Map, Value};

/// Full backup: named data buckets (debitos, bancos, movimientos, metas, ...)
pub type BackupPayload = Map<String, Value>;

/// Fields every household movement must carry, checked in this order.
pub const REQUIRED_MOVEMENT_FIELDS: [&str; 4] = ["date", "amount", "type", "description"];

/// Household export request after validation.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseholdExport {
    pub movimientos: Vec<Value>,
    /// Period label, used verbatim in the filename.
    pub mes: String,
}

// ============================================================================
// FULL BACKUP
// ============================================================================

/// Accept any JSON object. Arrays, primitives and null are rejected.
pub fn validate_backup(value: Value) -> Result<BackupPayload, ExportError> {
    match value {
        Value::Object(buckets) => Ok(buckets),
        _ => Err(ExportError::InvalidShape("Invalid data format: expected object")),
    }
}

// ============================================================================
// HOUSEHOLD MOVEMENTS
// ============================================================================

/// Validate `{ movimientos: [...], mes: "..." }`.
///
/// Stops at the first violation: request shape, then `movimientos`, then
/// `mes`, then each movement in order with its fields in
/// [`REQUIRED_MOVEMENT_FIELDS`] order. A field set to `null` counts as present.
pub fn validate_household(value: Value) -> Result<HouseholdExport, ExportError> {
    let mut request = match value {
        Value::Object(request) => request,
        _ => return Err(ExportError::InvalidShape("Invalid request format")),
    };

    let movimientos = match request.remove("movimientos") {
        Some(Value::Array(movimientos)) => movimientos,
        _ => return Err(ExportError::InvalidShape("movimientos must be an array")),
    };

    let mes = match request.remove("mes") {
        Some(Value::String(mes)) if !mes.trim().is_empty() => mes,
        _ => return Err(ExportError::InvalidShape("mes must be a non-empty string")),
    };

    for (index, movimiento) in movimientos.iter().enumerate() {
        validate_movement(index, movimiento)?;
    }

    Ok(HouseholdExport { movimientos, mes })
}

fn validate_movement(index: usize, movimiento: &Value) -> Result<(), ExportError> {
    let fields = movimiento
        .as_object()
        .ok_or(ExportError::InvalidMovement { index })?;

    match REQUIRED_MOVEMENT_FIELDS
        .into_iter()
        .find(|field| !fields.contains_key(*field))
    {
        Some(field) => Err(ExportError::MissingField { field, index }),
        None => Ok(()),
    }
}
