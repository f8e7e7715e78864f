//! The slices of the ECS, ELBv2, Route 53 and STS APIs this tool consumes.
//!
//! Each trait returns small owned structs instead of SDK output types so the
//! orchestration code can be driven by in-memory fakes in tests.

use crate::error::ApiError;
use async_trait::async_trait;

/// One page of a paginated listing. `next` is the provider's opaque cursor;
/// `None` marks the last page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T, C = String> {
    pub items: Vec<T>,
    pub next: Option<C>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterSummary {
    pub name: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceSummary {
    pub name: String,
    /// Target group ARNs of the service's load balancer attachments, in
    /// provider order.
    pub target_group_arns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskSummary {
    pub task_arn: String,
    pub task_definition_arn: String,
    pub last_status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetGroupSummary {
    pub arn: String,
    pub health_check_protocol: Option<String>,
    pub health_check_path: Option<String>,
    pub load_balancer_arns: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadBalancerSummary {
    pub arn: String,
    pub dns_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    pub name: String,
    pub record_type: String,
    /// DNS name of the alias target, `None` for records holding literal values.
    pub alias_target: Option<String>,
}

/// Where a Route 53 record set listing resumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCursor {
    pub name: String,
    pub record_type: Option<String>,
    pub identifier: Option<String>,
}

#[async_trait]
pub trait EcsApi: Send + Sync {
    async fn describe_cluster(&self, cluster: &str) -> Result<Option<ClusterSummary>, ApiError>;

    async fn list_services_page(
        &self,
        cluster: &str,
        cursor: Option<String>,
        page_size: i32,
    ) -> Result<Page<String>, ApiError>;

    async fn list_task_arns(&self, cluster: &str, service: &str) -> Result<Vec<String>, ApiError>;

    /// Tasks the provider returned for `task_ids`, in no guaranteed order.
    async fn task_summaries(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskSummary>, ApiError>;

    /// Container images of a task definition, in container definition order.
    async fn task_definition_images(&self, task_definition: &str) -> Result<Vec<String>, ApiError>;

    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceSummary>, ApiError>;
}

#[async_trait]
pub trait ElbApi: Send + Sync {
    async fn describe_target_group(
        &self,
        arn: &str,
    ) -> Result<Option<TargetGroupSummary>, ApiError>;

    async fn describe_load_balancer(
        &self,
        arn: &str,
    ) -> Result<Option<LoadBalancerSummary>, ApiError>;
}

#[async_trait]
pub trait DnsApi: Send + Sync {
    async fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
        max_items: i32,
    ) -> Result<Page<RecordSet, RecordCursor>, ApiError>;
}

#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn caller_account(&self) -> Result<String, ApiError>;
}
