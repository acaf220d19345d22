//! Storage file data structures.

use serde::{Deserialize, Serialize};

/// Schema tag written to `version` on every successful write.
pub const SCHEMA_VERSION: &str = "1.0.1";

pub const KEY_MACHINE_ID: &str = "telemetry.machineId";
pub const KEY_MAC_MACHINE_ID: &str = "telemetry.macMachineId";
pub const KEY_DEV_DEVICE_ID: &str = "telemetry.devDeviceId";
pub const KEY_SQM_ID: &str = "telemetry.sqmId";
pub const KEY_LAST_MODIFIED: &str = "lastModified";
pub const KEY_VERSION: &str = "version";

/// The full set of telemetry identifiers applied by a write.
///
/// Every field is always written; there are no partial updates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryIds {
    #[serde(rename = "telemetry.machineId")]
    pub machine_id: String,

    #[serde(rename = "telemetry.macMachineId")]
    pub mac_machine_id: String,

    #[serde(rename = "telemetry.devDeviceId")]
    pub dev_device_id: String,

    #[serde(rename = "telemetry.sqmId")]
    pub sqm_id: String,
}

impl TelemetryIds {
    /// Returns the identifiers as `(key, value)` pairs in file order.
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            (KEY_MACHINE_ID, &self.machine_id),
            (KEY_MAC_MACHINE_ID, &self.mac_machine_id),
            (KEY_DEV_DEVICE_ID, &self.dev_device_id),
            (KEY_SQM_ID, &self.sqm_id),
        ]
    }
}

/// Managed fields as currently stored on disk.
///
/// Foreign keys are never surfaced here; they only survive through writes.
/// A managed key missing from the file reads as an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(rename = "telemetry.machineId", default)]
    pub machine_id: String,

    #[serde(rename = "telemetry.macMachineId", default)]
    pub mac_machine_id: String,

    #[serde(rename = "telemetry.devDeviceId", default)]
    pub dev_device_id: String,

    #[serde(rename = "telemetry.sqmId", default)]
    pub sqm_id: String,

    #[serde(rename = "lastModified", default)]
    pub last_modified: String,

    #[serde(default)]
    pub version: String,
}

impl StorageConfig {
    /// Extracts the telemetry identifiers, e.g. to rewrite them unchanged.
    pub fn ids(&self) -> TelemetryIds {
        TelemetryIds {
            machine_id: self.machine_id.clone(),
            mac_machine_id: self.mac_machine_id.clone(),
            dev_device_id: self.dev_device_id.clone(),
            sqm_id: self.sqm_id.clone(),
        }
    }

    /// Returns the identifiers only when all four are present.
    ///
    /// Rewriting an incomplete set would store empty strings in their place.
    pub fn complete_ids(&self) -> Option<TelemetryIds> {
        let ids = self.ids();
        ids.entries()
            .iter()
            .all(|(_, value)| !value.is_empty())
            .then_some(ids)
    }
}

/// Permission state applied to the storage file after a write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FileMode {
    /// Read-write for owner, group and others (0666).
    #[default]
    Writable,
    /// Read-only for everyone (0444).
    Locked,
}

impl FileMode {
    pub fn from_read_only(read_only: bool) -> Self {
        if read_only {
            FileMode::Locked
        } else {
            FileMode::Writable
        }
    }

    /// Unix permission bits for this mode.
    pub fn bits(self) -> u32 {
        match self {
            FileMode::Writable => 0o666,
            FileMode::Locked => 0o444,
        }
    }

    pub fn is_locked(self) -> bool {
        self == FileMode::Locked
    }
}
