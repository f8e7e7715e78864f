use thiserror::Error;

/// A failed provider call, classified just enough for the caller to pick
/// the user-facing error.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("cluster not found: {0}")]
    ClusterNotFound(String),

    #[error("service not found: {0}")]
    ServiceNotFound(String),

    #[error("{operation} failed: {message}")]
    Provider {
        operation: &'static str,
        message: String,
    },
}

impl ApiError {
    pub fn provider(operation: &'static str, message: impl Into<String>) -> Self {
        ApiError::Provider {
            operation,
            message: message.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum MonError {
    #[error("Please provide an AWS profile or set AWS_PROFILE env")]
    MissingProfile,

    #[error("Cannot use AWS profile {profile}: {reason}")]
    Authentication { profile: String, reason: String },

    #[error("Cannot find ECS cluster: {0}")]
    ClusterNotFound(String),

    #[error("Cannot find ECS service: {0}")]
    ServiceNotFound(String),

    #[error("This service does not connect to a load balancer. ({0})")]
    NoLoadBalancer(String),

    #[error("An error occurred getting source zone records: {0}")]
    DnsQuery(#[source] ApiError),

    #[error("Cannot find ECS services from the provided ECS cluster: {0}")]
    ServiceList(#[source] ApiError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Cannot write the report: {0}")]
    Output(#[from] std::io::Error),
}

impl MonError {
    /// Maps the not-found classes of a provider error onto the user-facing
    /// variants and keeps everything else as a plain API failure.
    pub fn from_lookup(err: ApiError) -> Self {
        match err {
            ApiError::ClusterNotFound(name) => MonError::ClusterNotFound(name),
            ApiError::ServiceNotFound(name) => MonError::ServiceNotFound(name),
            other => MonError::Api(other),
        }
    }
}
