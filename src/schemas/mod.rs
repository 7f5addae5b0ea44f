pub mod activity;
pub mod database;
pub mod domain;
pub mod project;
pub mod system_metric;

pub use activity::*;
pub use database::*;
pub use domain::*;
pub use project::*;
pub use system_metric::*;

use serde::{Deserialize, Deserializer};

/// Distinguish an absent field (`None`) from an explicit `null` (`Some(None)`)
/// in PATCH bodies. Use together with `#[serde(default)]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Trim and drop empty strings, so `"  "` behaves like an omitted value
pub(crate) fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Trim while deserialising, so `validator` rules see the value that gets stored
pub(crate) fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(|v| v.trim().to_string())
}

pub(crate) fn trimmed_option<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|v| v.map(|v| v.trim().to_string()))
}
