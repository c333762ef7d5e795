use envconfig::Envconfig;

/// Configuration for the receiver cache. Also read by callers building
/// [`Target`](crate::target::Target)s from the configured connection string.
#[derive(Envconfig, Debug, Clone)]
pub struct CacheConfig {
    pub connection_string: String,

    #[envconfig(default = "$Default")]
    pub consumer_group: String,

    /// Exclusivity epoch used for every receiver this process opens.
    /// Raising it across a deployment evicts receivers left behind by
    /// previous deployments.
    #[envconfig(default = "0")]
    pub receiver_epoch: i64,

    /// Read-ahead count receivers are created with.
    #[envconfig(default = "500")]
    pub default_prefetch: u32,

    /// Prefetch never shrinks below this, even when the caller asks for a
    /// tiny batch; very small windows degrade throughput disproportionately.
    #[envconfig(default = "10")]
    pub prefetch_floor: u32,
}

/// Identity of the hosting worker, supplied by the scheduling framework.
/// Only used to tag receivers for diagnostics.
#[derive(Debug, Clone)]
pub struct WorkerIdentity {
    pub worker: String,
    pub task: String,
}

impl WorkerIdentity {
    pub fn new(worker: impl Into<String>, task: impl Into<String>) -> Self {
        Self {
            worker: worker.into(),
            task: task.into(),
        }
    }

    pub(crate) fn receiver_identifier(&self, partition_id: &str) -> String {
        format!("{}-{}-{}", self.worker, self.task, partition_id)
    }
}

impl Default for WorkerIdentity {
    fn default() -> Self {
        Self::new("standalone", "0")
    }
}
