//! In-memory fakes of the provider APIs, recording the calls they receive.

use crate::api::*;
use crate::error::ApiError;
use crate::helpers::short_id;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeEcs {
    clusters: HashMap<String, String>,
    service_pages: Vec<Page<String>>,
    service_list_error: Option<String>,
    service_cursors: Mutex<Vec<Option<String>>>,
    service_tasks: HashMap<String, Vec<String>>,
    tasks: Vec<TaskSummary>,
    task_definitions: HashMap<String, Vec<String>>,
    services: HashMap<String, ServiceSummary>,
    describe_task_batches: Mutex<Vec<usize>>,
    describe_service_calls: Mutex<usize>,
}

impl FakeEcs {
    pub fn with_cluster(mut self, name: &str, status: &str) -> Self {
        self.clusters.insert(name.into(), status.into());
        self
    }

    /// Pages served by ListServices. With no pages the cluster is unknown.
    pub fn with_service_pages(mut self, pages: Vec<Page<String>>) -> Self {
        self.service_pages = pages;
        self
    }

    pub fn failing_service_list(mut self, message: &str) -> Self {
        self.service_list_error = Some(message.into());
        self
    }

    pub fn with_service_tasks(mut self, service: &str, task_arns: Vec<String>) -> Self {
        self.service_tasks.insert(service.into(), task_arns);
        self
    }

    pub fn with_task(mut self, task_id: &str, task_definition_arn: &str, status: &str) -> Self {
        self.tasks.push(TaskSummary {
            task_arn: format!("arn:aws:ecs:us-east-1:123456789012:task/prod/{task_id}"),
            task_definition_arn: task_definition_arn.into(),
            last_status: status.into(),
        });
        self
    }

    pub fn with_task_definition(mut self, arn: &str, images: &[&str]) -> Self {
        let images = images.iter().map(|image| image.to_string()).collect();
        self.task_definitions.insert(arn.into(), images);
        self
    }

    pub fn with_service(mut self, service: ServiceSummary) -> Self {
        self.services.insert(service.name.clone(), service);
        self
    }

    pub fn service_cursors(&self) -> Vec<Option<String>> {
        self.service_cursors.lock().unwrap().clone()
    }

    pub fn describe_task_calls(&self) -> usize {
        self.describe_task_batches.lock().unwrap().len()
    }

    /// Number of ids sent with each DescribeTasks call.
    pub fn describe_task_batches(&self) -> Vec<usize> {
        self.describe_task_batches.lock().unwrap().clone()
    }

    pub fn describe_service_calls(&self) -> usize {
        *self.describe_service_calls.lock().unwrap()
    }
}

#[async_trait]
impl EcsApi for FakeEcs {
    async fn describe_cluster(&self, cluster: &str) -> Result<Option<ClusterSummary>, ApiError> {
        Ok(self.clusters.get(cluster).map(|status| ClusterSummary {
            name: cluster.into(),
            status: status.clone(),
        }))
    }

    async fn list_services_page(
        &self,
        cluster: &str,
        cursor: Option<String>,
        _page_size: i32,
    ) -> Result<Page<String>, ApiError> {
        let mut cursors = self.service_cursors.lock().unwrap();
        let index = cursors.len();
        cursors.push(cursor);

        if let Some(message) = &self.service_list_error {
            return Err(ApiError::provider("ListServices", message.clone()));
        }
        if self.service_pages.is_empty() {
            return Err(ApiError::ClusterNotFound(cluster.into()));
        }
        match self.service_pages.get(index) {
            Some(page) => Ok(page.clone()),
            None => Err(ApiError::provider("ListServices", "page past the last one")),
        }
    }

    async fn list_task_arns(&self, _cluster: &str, service: &str) -> Result<Vec<String>, ApiError> {
        self.service_tasks
            .get(service)
            .cloned()
            .ok_or_else(|| ApiError::ServiceNotFound(service.into()))
    }

    async fn task_summaries(
        &self,
        _cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskSummary>, ApiError> {
        self.describe_task_batches.lock().unwrap().push(task_ids.len());
        Ok(self
            .tasks
            .iter()
            .filter(|task| task_ids.iter().any(|id| id == short_id(&task.task_arn)))
            .cloned()
            .collect())
    }

    async fn task_definition_images(&self, task_definition: &str) -> Result<Vec<String>, ApiError> {
        let images = self.task_definitions.get(task_definition).cloned();
        images.ok_or_else(|| {
            let message = format!("unknown {task_definition}");
            ApiError::provider("DescribeTaskDefinition", message)
        })
    }

    async fn describe_service(
        &self,
        _cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceSummary>, ApiError> {
        *self.describe_service_calls.lock().unwrap() += 1;
        Ok(self.services.get(service).cloned())
    }
}

#[derive(Default)]
pub struct FakeElb {
    target_groups: HashMap<String, TargetGroupSummary>,
    load_balancers: HashMap<String, LoadBalancerSummary>,
}

impl FakeElb {
    pub fn with_target_group(mut self, group: TargetGroupSummary) -> Self {
        self.target_groups.insert(group.arn.clone(), group);
        self
    }

    pub fn with_load_balancer(mut self, lb: LoadBalancerSummary) -> Self {
        self.load_balancers.insert(lb.arn.clone(), lb);
        self
    }
}

#[async_trait]
impl ElbApi for FakeElb {
    async fn describe_target_group(
        &self,
        arn: &str,
    ) -> Result<Option<TargetGroupSummary>, ApiError> {
        Ok(self.target_groups.get(arn).cloned())
    }

    async fn describe_load_balancer(
        &self,
        arn: &str,
    ) -> Result<Option<LoadBalancerSummary>, ApiError> {
        Ok(self.load_balancers.get(arn).cloned())
    }
}

#[derive(Default)]
pub struct FakeDns {
    pages: Vec<Page<RecordSet, RecordCursor>>,
    error: Option<String>,
    requested: Mutex<Vec<Option<RecordCursor>>>,
}

impl FakeDns {
    pub fn with_pages(mut self, pages: Vec<Page<RecordSet, RecordCursor>>) -> Self {
        self.pages = pages;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.error = Some(message.into());
        self
    }

    pub fn requested(&self) -> Vec<Option<RecordCursor>> {
        self.requested.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsApi for FakeDns {
    async fn list_record_sets(
        &self,
        _zone_id: &str,
        cursor: Option<RecordCursor>,
        _max_items: i32,
    ) -> Result<Page<RecordSet, RecordCursor>, ApiError> {
        let mut requested = self.requested.lock().unwrap();
        let index = requested.len();
        requested.push(cursor);

        if let Some(message) = &self.error {
            return Err(ApiError::provider("ListResourceRecordSets", message.clone()));
        }
        Ok(self.pages.get(index).cloned().unwrap_or(Page {
            items: Vec::new(),
            next: None,
        }))
    }
}

pub struct FakeIdentity {
    pub account: Option<String>,
}

#[async_trait]
impl IdentityApi for FakeIdentity {
    async fn caller_account(&self) -> Result<String, ApiError> {
        self.account
            .clone()
            .ok_or_else(|| ApiError::provider("GetCallerIdentity", "ExpiredToken"))
    }
}
