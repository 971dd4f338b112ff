//! Engine id lookup tables built while reading unitdefs
//!
//! Populated during the first pass over the export so that later passes can
//! resolve cross references (build options, weapons) by engine id.

use std::collections::HashMap;

use serde_json::Value;
use tracing::warn;

use crate::error::{ReshapeError, Result};

#[derive(Debug, Default)]
pub struct UnitIndex {
    names: HashMap<i64, String>,
    weapon_defs: HashMap<i64, Value>,
}

impl UnitIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_unit(&mut self, id: i64, name: &str) {
        if let Some(previous) = self.names.insert(id, name.to_string()) {
            warn!("unit id {id} registered twice ({previous}, {name})");
        }
    }

    /// Register the weapon definitions a unit carries, keyed by their own id.
    ///
    /// Returns how many were registered; entries without an integer `id` are
    /// skipped.
    pub fn register_weapon_defs(&mut self, unit: &str, defs: &[Value]) -> usize {
        let mut registered = 0;
        for def in defs {
            let Some(id) = def.get("id").and_then(Value::as_i64) else {
                warn!("{unit}: weapon definition without id");
                continue;
            };
            // Units routinely share weapon defs, so a repeat id is expected.
            self.weapon_defs.insert(id, def.clone());
            registered += 1;
        }
        registered
    }

    pub fn resolve(&self, id: i64) -> Result<&str> {
        self.names
            .get(&id)
            .map(String::as_str)
            .ok_or(ReshapeError::UnknownId(id))
    }

    pub fn weapon_def(&self, id: i64) -> Option<&Value> {
        self.weapon_defs.get(&id)
    }

    pub fn unit_count(&self) -> usize {
        self.names.len()
    }

    pub fn weapon_def_count(&self) -> usize {
        self.weapon_defs.len()
    }
}
