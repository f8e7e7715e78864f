//! `api` traits implemented on top of the AWS SDK clients.

use crate::api::*;
use crate::error::ApiError;
use async_trait::async_trait;
use aws_sdk_ecs::error::DisplayErrorContext;
use aws_sdk_route53::types::RrType;
use std::error::Error;

fn provider_error<E: Error>(operation: &'static str, err: &E) -> ApiError {
    ApiError::provider(operation, DisplayErrorContext(err).to_string())
}

#[async_trait]
impl EcsApi for aws_sdk_ecs::Client {
    async fn describe_cluster(&self, cluster: &str) -> Result<Option<ClusterSummary>, ApiError> {
        debug!(cluster, "DescribeClusters");
        let response = self
            .describe_clusters()
            .clusters(cluster)
            .send()
            .await
            .map_err(|err| provider_error("DescribeClusters", &err))?;

        Ok(response.clusters().first().map(|found| ClusterSummary {
            name: found.cluster_name().unwrap_or(cluster).to_string(),
            status: found.status().unwrap_or_default().to_string(),
        }))
    }

    async fn list_services_page(
        &self,
        cluster: &str,
        cursor: Option<String>,
        page_size: i32,
    ) -> Result<Page<String>, ApiError> {
        debug!(cluster, has_cursor = cursor.is_some(), "ListServices");
        let response = self
            .list_services()
            .cluster(cluster)
            .max_results(page_size)
            .set_next_token(cursor)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_cluster_not_found_exception() => {
                    ApiError::ClusterNotFound(cluster.to_string())
                }
                _ => provider_error("ListServices", &err),
            })?;

        Ok(Page {
            items: response.service_arns().to_vec(),
            next: response.next_token().map(str::to_string),
        })
    }

    async fn list_task_arns(&self, cluster: &str, service: &str) -> Result<Vec<String>, ApiError> {
        debug!(cluster, service, "ListTasks");
        let response = self
            .list_tasks()
            .cluster(cluster)
            .service_name(service)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_cluster_not_found_exception() => {
                    ApiError::ClusterNotFound(cluster.to_string())
                }
                Some(e) if e.is_service_not_found_exception() => {
                    ApiError::ServiceNotFound(service.to_string())
                }
                _ => provider_error("ListTasks", &err),
            })?;

        Ok(response.task_arns().to_vec())
    }

    async fn task_summaries(
        &self,
        cluster: &str,
        task_ids: &[String],
    ) -> Result<Vec<TaskSummary>, ApiError> {
        debug!(cluster, count = task_ids.len(), "DescribeTasks");
        let response = self
            .describe_tasks()
            .cluster(cluster)
            .set_tasks(Some(task_ids.to_vec()))
            .send()
            .await
            .map_err(|err| provider_error("DescribeTasks", &err))?;

        for failure in response.failures() {
            warn!(
                arn = failure.arn().unwrap_or_default(),
                reason = failure.reason().unwrap_or_default(),
                "task could not be described"
            );
        }

        let tasks = response
            .tasks()
            .iter()
            .filter_map(|task| {
                Some(TaskSummary {
                    task_arn: task.task_arn()?.to_string(),
                    task_definition_arn: task.task_definition_arn()?.to_string(),
                    last_status: task.last_status().unwrap_or("UNKNOWN").to_string(),
                })
            })
            .collect();

        Ok(tasks)
    }

    async fn task_definition_images(&self, task_definition: &str) -> Result<Vec<String>, ApiError> {
        debug!(task_definition, "DescribeTaskDefinition");
        let response = self
            .describe_task_definition()
            .task_definition(task_definition)
            .send()
            .await
            .map_err(|err| provider_error("DescribeTaskDefinition", &err))?;

        let Some(definition) = response.task_definition() else {
            return Ok(Vec::new());
        };

        Ok(definition
            .container_definitions()
            .iter()
            .filter_map(|container| container.image().map(str::to_string))
            .collect())
    }

    async fn describe_service(
        &self,
        cluster: &str,
        service: &str,
    ) -> Result<Option<ServiceSummary>, ApiError> {
        debug!(cluster, service, "DescribeServices");
        let response = self
            .describe_services()
            .cluster(cluster)
            .services(service)
            .send()
            .await
            .map_err(|err| match err.as_service_error() {
                Some(e) if e.is_cluster_not_found_exception() => {
                    ApiError::ClusterNotFound(cluster.to_string())
                }
                _ => provider_error("DescribeServices", &err),
            })?;

        // Deleted services linger as INACTIVE for a while.
        let found = response
            .services()
            .iter()
            .find(|found| found.status() != Some("INACTIVE"));

        Ok(found.map(|found| ServiceSummary {
            name: found.service_name().unwrap_or(service).to_string(),
            target_group_arns: found
                .load_balancers()
                .iter()
                .filter_map(|lb| lb.target_group_arn().map(str::to_string))
                .collect(),
        }))
    }
}

#[async_trait]
impl ElbApi for aws_sdk_elasticloadbalancingv2::Client {
    async fn describe_target_group(
        &self,
        arn: &str,
    ) -> Result<Option<TargetGroupSummary>, ApiError> {
        debug!(arn, "DescribeTargetGroups");
        let result = self
            .describe_target_groups()
            .target_group_arns(arn)
            .send()
            .await;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                return match err.as_service_error() {
                    Some(e) if e.is_target_group_not_found_exception() => Ok(None),
                    _ => Err(provider_error("DescribeTargetGroups", &err)),
                };
            }
        };

        Ok(response.target_groups().first().map(|group| TargetGroupSummary {
            arn: group.target_group_arn().unwrap_or(arn).to_string(),
            health_check_protocol: group
                .health_check_protocol()
                .map(|protocol| protocol.as_str().to_string()),
            health_check_path: group.health_check_path().map(str::to_string),
            load_balancer_arns: group.load_balancer_arns().to_vec(),
        }))
    }

    async fn describe_load_balancer(
        &self,
        arn: &str,
    ) -> Result<Option<LoadBalancerSummary>, ApiError> {
        debug!(arn, "DescribeLoadBalancers");
        let result = self
            .describe_load_balancers()
            .load_balancer_arns(arn)
            .send()
            .await;
        let response = match result {
            Ok(response) => response,
            Err(err) => {
                return match err.as_service_error() {
                    Some(e) if e.is_load_balancer_not_found_exception() => Ok(None),
                    _ => Err(provider_error("DescribeLoadBalancers", &err)),
                };
            }
        };

        Ok(response.load_balancers().first().map(|lb| LoadBalancerSummary {
            arn: lb.load_balancer_arn().unwrap_or(arn).to_string(),
            dns_name: lb.dns_name().unwrap_or_default().to_string(),
        }))
    }
}

#[async_trait]
impl DnsApi for aws_sdk_route53::Client {
    async fn list_record_sets(
        &self,
        zone_id: &str,
        cursor: Option<RecordCursor>,
        max_items: i32,
    ) -> Result<Page<RecordSet, RecordCursor>, ApiError> {
        debug!(zone_id, start = ?cursor, "ListResourceRecordSets");
        let (start_name, start_type, start_identifier) = match cursor {
            Some(cursor) => (
                Some(cursor.name),
                cursor.record_type.map(|t| RrType::from(t.as_str())),
                cursor.identifier,
            ),
            None => (None, None, None),
        };

        let response = self
            .list_resource_record_sets()
            .hosted_zone_id(zone_id)
            .max_items(max_items)
            .set_start_record_name(start_name)
            .set_start_record_type(start_type)
            .set_start_record_identifier(start_identifier)
            .send()
            .await
            .map_err(|err| provider_error("ListResourceRecordSets", &err))?;

        let items = response
            .resource_record_sets()
            .iter()
            .map(|record| RecordSet {
                name: record.name().to_string(),
                record_type: record.r#type().as_str().to_string(),
                alias_target: record
                    .alias_target()
                    .map(|alias| alias.dns_name().to_string()),
            })
            .collect();

        let next = match (response.is_truncated(), response.next_record_name()) {
            (true, Some(name)) => Some(RecordCursor {
                name: name.to_string(),
                record_type: response.next_record_type().map(|t| t.as_str().to_string()),
                identifier: response.next_record_identifier().map(str::to_string),
            }),
            _ => None,
        };

        Ok(Page { items, next })
    }
}

#[async_trait]
impl IdentityApi for aws_sdk_sts::Client {
    async fn caller_account(&self) -> Result<String, ApiError> {
        debug!("GetCallerIdentity");
        let response = self
            .get_caller_identity()
            .send()
            .await
            .map_err(|err| provider_error("GetCallerIdentity", &err))?;

        match response.account() {
            Some(account) => Ok(account.to_string()),
            None => Err(ApiError::provider("GetCallerIdentity", "no account id")),
        }
    }
}
