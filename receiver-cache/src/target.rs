use std::fmt;

/// Consumer group used when a [`Target`] does not name one explicitly.
pub const DEFAULT_CONSUMER_GROUP: &str = "$Default";

/// Identifies what a cached receiver is bound to: the connection string of
/// the event stream, the consumer group reading it, and the partition id.
/// Immutable once constructed; only used to derive the registry key and to
/// open protocol receivers.
#[derive(Debug, Clone)]
pub struct Target {
    connection_string: String,
    consumer_group: String,
    partition_id: String,
}

impl Target {
    /// A target reading `partition_id` on the default consumer group.
    pub fn new(connection_string: impl Into<String>, partition_id: impl Into<String>) -> Self {
        Self {
            connection_string: connection_string.into(),
            consumer_group: DEFAULT_CONSUMER_GROUP.to_owned(),
            partition_id: partition_id.into(),
        }
    }

    /// Read from `consumer_group` instead of the default group.
    pub fn with_consumer_group(mut self, consumer_group: impl Into<String>) -> Self {
        self.consumer_group = consumer_group.into();
        self
    }

    pub fn connection_string(&self) -> &str {
        &self.connection_string
    }

    pub fn consumer_group(&self) -> &str {
        &self.consumer_group
    }

    pub fn partition_id(&self) -> &str {
        &self.partition_id
    }

    /// Derive the registry key for this target. Targets differing only by
    /// letter case in any component map to the same key.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey(
            format!(
                "{}{}{}",
                self.connection_string, self.consumer_group, self.partition_id
            )
            .to_lowercase(),
        )
    }
}

/// Normalized registry key derived from a [`Target`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
