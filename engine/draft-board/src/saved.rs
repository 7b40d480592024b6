//! Saved draft schema and its migration chain
//!
//! Version history:
//! - v1: slot keys written as `QB_0`
//! - v2: slot keys `QB-0`, estimation weight stored as a 0.0-1.0 fraction
//! - v3: estimation weight stored as an integer percentage

use crate::error::Result;
use crate::settings::SearchSettings;
use persistence::{DraftRecord, Migrator};
use player_registry::Player;
use price_engine::EstimationSettings;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub const CURRENT_VERSION: u32 = 3;

/// Everything persisted for one named draft. All four fields are required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedDraft {
    /// slot key -> occupant, `None` for an open slot
    pub roster_selections: BTreeMap<String, Option<Player>>,
    pub cost_adjustments: BTreeMap<String, i64>,
    pub estimation_settings: EstimationSettings,
    pub search_settings: SearchSettings,
}

impl SavedDraft {
    /// Wrap in a record at the current schema version
    pub fn to_record(&self) -> Result<DraftRecord> {
        Ok(DraftRecord::new(CURRENT_VERSION, serde_json::to_value(self)?))
    }

    /// Upgrade and decode a stored record; `None` if it cannot be used
    pub fn from_record(record: DraftRecord) -> Option<Self> {
        let data = migrator().upgrade(record)?;
        match serde_json::from_value(data) {
            Ok(saved) => Some(saved),
            Err(e) => {
                warn!("Saved draft is incomplete, using defaults: {}", e);
                None
            }
        }
    }
}

pub fn migrator() -> Migrator {
    Migrator::new(CURRENT_VERSION).with_step(1, v1_slot_keys).with_step(2, v2_weight_percent)
}

fn object_field<'a>(
    data: &'a mut Map<String, Value>,
    field: &str,
) -> std::result::Result<Option<&'a mut Map<String, Value>>, String> {
    match data.get_mut(field) {
        None => Ok(None),
        Some(Value::Object(map)) => Ok(Some(map)),
        Some(other) => Err(format!("{field} must be an object, found {other}")),
    }
}

/// `QB_0` -> `QB-0` in selections and adjustments
fn v1_slot_keys(mut data: Value) -> std::result::Result<Value, String> {
    let root = data.as_object_mut().ok_or("saved draft must be an object")?;

    for field in ["rosterSelections", "costAdjustments"] {
        if let Some(map) = object_field(root, field)? {
            let renamed: Map<String, Value> = std::mem::take(map)
                .into_iter()
                .map(|(key, value)| {
                    let key = match key.rsplit_once('_') {
                        Some((position, index)) => format!("{position}-{index}"),
                        None => key,
                    };
                    (key, value)
                })
                .collect();
            *map = renamed;
        }
    }

    Ok(data)
}

/// Estimation weight fraction -> integer percentage
fn v2_weight_percent(mut data: Value) -> std::result::Result<Value, String> {
    let root = data.as_object_mut().ok_or("saved draft must be an object")?;

    if let Some(settings) = object_field(root, "estimationSettings")? {
        if let Some(weight) = settings.get("weight") {
            let fraction =
                weight.as_f64().ok_or_else(|| format!("weight must be a number, found {weight}"))?;
            if !(0.0..=1.0).contains(&fraction) {
                return Err(format!("weight fraction {fraction} is outside 0-1"));
            }
            let percent = (fraction * 100.0).round() as u64;
            settings.insert("weight".to_string(), Value::from(percent));
        }
    }

    Ok(data)
}
