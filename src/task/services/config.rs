//! Configuration for task list services.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Tunables for [`super::TaskListService`].
///
/// Deserialises with per-field defaults so hosts can embed it in their own
/// configuration files.
///
/// # Examples
///
/// ```
/// use cuido::task::services::TaskListConfig;
/// use std::time::Duration;
///
/// let config = TaskListConfig::default();
/// assert_eq!(config.request_timeout, Duration::from_secs(10));
///
/// let parsed: TaskListConfig =
///     serde_json::from_str(r#"{ "request_timeout_ms": 2500 }"#).expect("valid config");
/// assert_eq!(parsed.request_timeout, Duration::from_millis(2500));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskListConfig {
    /// Upper bound on a single task store call.
    #[serde(rename = "request_timeout_ms", with = "millis")]
    pub request_timeout: Duration,
}

impl Default for TaskListConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
        }
    }
}

impl TaskListConfig {
    /// Creates a configuration with a custom store timeout.
    #[must_use]
    pub const fn with_request_timeout(request_timeout: Duration) -> Self {
        Self { request_timeout }
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub(super) fn serialize<S: Serializer>(
        value: &Duration,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(u64::try_from(value.as_millis()).unwrap_or(u64::MAX))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
