//! Schema migration framework.
//!
//! Migrations run on the raw YAML tree so that legacy documents, which do not
//! deserialize into the current schema, can still be upgraded.

use serde_yaml::{Mapping, Value};

use crate::ProjectError;

pub const LATEST_VERSION: u32 = 1;

/// Legacy flat thermistor keys and their current names.
const THERMISTOR_RENAMES: [(&str, &str); 4] = [
    ("R_fixed", "r_fixed_ohm"),
    ("R_nominal", "r_nominal_ohm"),
    ("T_nominal", "t_nominal_c"),
    ("B", "beta"),
];

pub fn migrate_to_latest(mut doc: Value) -> Result<Value, ProjectError> {
    let mut version = document_version(&doc)?;
    while version < LATEST_VERSION {
        doc = migrate_one_version(doc, version)?;
        version += 1;
    }
    Ok(doc)
}

/// A document without `version` predates versioning and is version 0.
fn document_version(doc: &Value) -> Result<u32, ProjectError> {
    let root = doc.as_mapping().ok_or_else(|| ProjectError::Migration {
        what: "Rig document must be a mapping".to_string(),
    })?;
    match root.get("version") {
        None | Some(Value::Null) => Ok(0),
        Some(v) => v
            .as_u64()
            .and_then(|v| u32::try_from(v).ok())
            .ok_or_else(|| ProjectError::Migration {
                what: format!("Invalid version field: {v:?}"),
            }),
    }
}

fn migrate_one_version(doc: Value, version: u32) -> Result<Value, ProjectError> {
    match version {
        0 => migrate_v0_to_v1(doc),
        v => Err(ProjectError::Migration {
            what: format!("No migration path from version {}", v),
        }),
    }
}

fn migrate_v0_to_v1(mut doc: Value) -> Result<Value, ProjectError> {
    let root = doc.as_mapping_mut().ok_or_else(|| ProjectError::Migration {
        what: "Rig document must be a mapping".to_string(),
    })?;

    // Legacy thermistor constants sat at the top level or directly under
    // `calibration`.
    let mut legacy_thermistor = take_keys(root, &THERMISTOR_RENAMES);

    let calibration = child_mapping(root, "calibration")?;
    legacy_thermistor.extend(take_keys(calibration, &THERMISTOR_RENAMES));

    if !legacy_thermistor.is_empty() {
        let thermistor = child_mapping(calibration, "thermistor")?;
        for (key, value) in legacy_thermistor {
            if !thermistor.contains_key(key) {
                thermistor.insert(key.into(), value);
            }
        }
    }

    if let Some(v_ref) = calibration.remove("voltage_ref") {
        let pressure = child_mapping(calibration, "pressure")?;
        if !pressure.contains_key("v_ref") {
            pressure.insert("v_ref".into(), v_ref);
        }
    }

    if let Some(flow) = calibration.remove("flow_rate_m3s") {
        if !root.contains_key("flow_rate_m3s") {
            root.insert("flow_rate_m3s".into(), flow);
        }
    }

    root.insert("version".into(), Value::from(1u32));
    Ok(doc)
}

/// Remove legacy keys from `map`, returning them under their new names.
fn take_keys(map: &mut Mapping, renames: &[(&str, &'static str)]) -> Vec<(&'static str, Value)> {
    renames
        .iter()
        .filter_map(|(old, new)| map.remove(*old).map(|v| (*new, v)))
        .collect()
}

/// Mutable access to a nested mapping, creating it if absent.
fn child_mapping<'a>(map: &'a mut Mapping, key: &str) -> Result<&'a mut Mapping, ProjectError> {
    let entry = map
        .entry(key.into())
        .or_insert_with(|| Value::Mapping(Mapping::new()));
    entry.as_mapping_mut().ok_or_else(|| ProjectError::Migration {
        what: format!("Expected '{key}' to be a mapping"),
    })
}
