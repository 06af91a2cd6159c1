//! Queue catalog data model.
//!
//! A catalog is an ordered mapping from DisplayName to queue definition,
//! built once by the generator and embedded in the installer script. The
//! serialized form is a compatibility contract: pretty JSON with 4-space
//! indentation, `": "` key separators, and keys in insertion order, so
//! downstream tooling can diff generated files.

use crate::error::Result;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Columns that must be present in the input CSV header.
pub const REQUIRED_FIELDS: &[&str] = &["DisplayName", "URI", "Driver", "DriverTrigger", "Location"];

/// One printer queue definition.
///
/// Field names in the serialized form match the CSV header columns. An empty
/// `Driver` means the queue uses the generic PostScript driver and needs no
/// driver resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueRecord {
    #[serde(rename = "DisplayName")]
    pub display_name: String,
    #[serde(rename = "URI")]
    pub uri: String,
    #[serde(rename = "Driver", default)]
    pub driver: String,
    #[serde(rename = "DriverTrigger", default)]
    pub driver_trigger: String,
    #[serde(rename = "Location", default)]
    pub location: String,
    /// Name the queue is registered under in the print subsystem, when it
    /// differs from DisplayName. Only present if the CSV carried the column.
    #[serde(rename = "CUPSName", default, skip_serializing_if = "Option::is_none")]
    pub cups_name: Option<String>,
    /// Driver options passed as `-o key=value` pairs at mapping time.
    /// Serializes as `""` when empty, as an object otherwise.
    #[serde(rename = "Options", default, with = "options_field")]
    pub options: BTreeMap<String, String>,
}

impl QueueRecord {
    /// Whether this queue requires a vendor-specific driver.
    pub fn has_vendor_driver(&self) -> bool {
        !self.driver.is_empty()
    }

    /// Look up a string field by its serialized name, for runtime filtering.
    ///
    /// Returns `None` for unknown keys and for `Options` (not a string field).
    pub fn field(&self, key: &str) -> Option<&str> {
        match key {
            "DisplayName" => Some(&self.display_name),
            "URI" => Some(&self.uri),
            "Driver" => Some(&self.driver),
            "DriverTrigger" => Some(&self.driver_trigger),
            "Location" => Some(&self.location),
            "CUPSName" => self.cups_name.as_deref(),
            _ => None,
        }
    }
}

/// Ordered catalog of queue definitions, keyed by DisplayName.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueCatalog {
    records: Vec<QueueRecord>,
}

impl QueueCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a record keyed by its DisplayName.
    ///
    /// A later duplicate overwrites the earlier record in place, keeping the
    /// original position so the serialized key order stays stable.
    pub fn insert(&mut self, record: QueueRecord) {
        if let Some(existing) = self
            .records
            .iter_mut()
            .find(|r| r.display_name == record.display_name)
        {
            *existing = record;
        } else {
            self.records.push(record);
        }
    }

    pub fn get(&self, display_name: &str) -> Option<&QueueRecord> {
        self.records.iter().find(|r| r.display_name == display_name)
    }

    pub fn records(&self) -> &[QueueRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize using the exact formatting contract: 4-space indentation,
    /// `": "` separators, insertion order.
    pub fn to_pretty_json(&self) -> Result<String> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.serialize(&mut ser)?;
        Ok(String::from_utf8_lossy(&buf).into_owned())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

impl Serialize for QueueCatalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.display_name, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for QueueCatalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = QueueCatalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of queue labels to queue records")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut catalog = QueueCatalog::new();
                while let Some((_label, record)) =
                    access.next_entry::<String, QueueRecord>()?
                {
                    catalog.insert(record);
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}

/// Serde adapter for the `Options` field.
///
/// The historical catalog format writes an empty options set as the empty
/// string (the raw CSV cell passed through) and a populated set as a JSON
/// object; both forms must parse.
mod options_field {
    use super::*;

    pub fn serialize<S: Serializer>(
        options: &BTreeMap<String, String>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        if options.is_empty() {
            serializer.serialize_str("")
        } else {
            let mut map = serializer.serialize_map(Some(options.len()))?;
            for (key, value) in options {
                map.serialize_entry(key, value)?;
            }
            map.end()
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<BTreeMap<String, String>, D::Error> {
        struct OptionsVisitor;

        impl<'de> Visitor<'de> for OptionsVisitor {
            type Value = BTreeMap<String, String>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an empty string or a map of option keys to values")
            }

            fn visit_str<E: serde::de::Error>(
                self,
                value: &str,
            ) -> std::result::Result<Self::Value, E> {
                if value.is_empty() {
                    Ok(BTreeMap::new())
                } else {
                    Err(E::custom(format!(
                        "unparsed options string {value:?}; expected a map or \"\""
                    )))
                }
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut options = BTreeMap::new();
                while let Some((key, value)) = access.next_entry::<String, String>()? {
                    options.insert(key, value);
                }
                Ok(options)
            }
        }

        deserializer.deserialize_any(OptionsVisitor)
    }
}
