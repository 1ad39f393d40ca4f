//! Response sanitization - parse service output into entity drafts
//!
//! The service is asked for a bare JSON array but real responses arrive
//! fenced, chatty, or cut off mid-record. Sanitization strips code-fence
//! decoration, tries a direct parse, and on failure salvages everything up
//! to the last complete record before giving up.

use crate::error::ExtractError;
use crate::types::EntityDraft;
use plotboard_domain::EntityKind;
use serde_json::Value;
use tracing::warn;

/// Parse raw service output into entity drafts
///
/// Fails with `MalformedResponse` only when salvage is impossible; records
/// that are individually invalid are skipped with a warning rather than
/// failing the chunk.
pub fn sanitize(raw: &str) -> Result<Vec<EntityDraft>, ExtractError> {
    let json_str = strip_fences(raw);

    let value = match serde_json::from_str::<Value>(&json_str) {
        Ok(value) => value,
        Err(direct_err) => match salvage(&json_str) {
            Some(repaired) => serde_json::from_str::<Value>(&repaired).map_err(|e| {
                ExtractError::MalformedResponse(format!(
                    "Salvage failed: {} (direct parse: {})",
                    e, direct_err
                ))
            })?,
            None => {
                return Err(ExtractError::MalformedResponse(format!(
                    "No complete record to salvage (direct parse: {})",
                    direct_err
                )))
            }
        },
    };

    let records = value.as_array().ok_or_else(|| {
        ExtractError::MalformedResponse("Expected a JSON array of entities".to_string())
    })?;

    let mut drafts = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        match parse_draft(record) {
            Ok(draft) => {
                if let Err(e) = draft.validate() {
                    warn!("Entity record {} failed validation: {}", idx, e);
                    continue;
                }
                drafts.push(draft);
            }
            Err(e) => {
                warn!("Failed to parse entity record {}: {}", idx, e);
            }
        }
    }

    Ok(drafts)
}

/// Strip markdown code-fence decoration if present
fn strip_fences(raw: &str) -> String {
    let trimmed = raw.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return String::new();
        }
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        lines[1..end].join("\n")
    } else {
        trimmed.to_string()
    }
}

/// Repair a truncated JSON array by cutting at the last complete record
///
/// Finds the last `},` boundary, drops everything after the `}`, and closes
/// the array. Returns None when no such boundary exists, in which case
/// nothing can be recovered.
fn salvage(json_str: &str) -> Option<String> {
    let boundary = json_str.rfind("},")?;
    let mut repaired = json_str[..=boundary].to_string();
    repaired.push(']');
    Some(repaired)
}

/// Parse one entity record, leniently
fn parse_draft(record: &Value) -> Result<EntityDraft, String> {
    let obj = record
        .as_object()
        .ok_or_else(|| "Record is not a JSON object".to_string())?;

    let kind_str = obj
        .get("type")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'type'".to_string())?;
    let kind = EntityKind::parse(kind_str)
        .ok_or_else(|| format!("Unknown entity type '{}'", kind_str))?;

    let name = obj
        .get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| "Missing or invalid 'name'".to_string())?
        .to_string();

    let description = obj
        .get("description")
        .and_then(|v| v.as_str())
        .unwrap_or_default()
        .to_string();

    let sections = obj
        .get("sections")
        .and_then(|v| v.as_array())
        .map(|arr| {
            arr.iter()
                .filter_map(|n| n.as_u64())
                .map(|n| n as usize)
                .collect()
        })
        .unwrap_or_default();

    Ok(EntityDraft {
        kind,
        name,
        description,
        sections,
    })
}
