use crate::api::EcsApi;
use crate::error::{ApiError, MonError};
use crate::helpers::{collect_pages, short_id};

/// Page size requested from ListServices.
pub const SERVICE_PAGE_SIZE: i32 = 100;

/// Fails with `ClusterNotFound` unless the cluster exists and is active.
pub async fn ensure_cluster(ecs: &dyn EcsApi, cluster: &str) -> Result<(), MonError> {
    match ecs.describe_cluster(cluster).await? {
        Some(found) if found.status == "ACTIVE" => Ok(()),
        Some(found) => {
            debug!(cluster = %found.name, status = %found.status, "cluster is not active");
            Err(MonError::ClusterNotFound(cluster.to_string()))
        }
        None => Err(MonError::ClusterNotFound(cluster.to_string())),
    }
}

/// Short names of every service in the cluster, sorted.
pub async fn list_services(ecs: &dyn EcsApi, cluster: &str) -> Result<Vec<String>, MonError> {
    let fetch = |cursor| ecs.list_services_page(cluster, cursor, SERVICE_PAGE_SIZE);
    let arns = match collect_pages(fetch).await {
        Ok(arns) => arns,
        Err(ApiError::ClusterNotFound(name)) => return Err(MonError::ClusterNotFound(name)),
        Err(other) => return Err(MonError::ServiceList(other)),
    };

    let mut services: Vec<String> = arns.iter().map(|arn| short_id(arn).to_string()).collect();
    services.sort();
    Ok(services)
}

/// Running task ids of a service, in provider order.
pub async fn list_service_tasks(
    ecs: &dyn EcsApi,
    cluster: &str,
    service: &str,
) -> Result<Vec<String>, MonError> {
    let arns = ecs
        .list_task_arns(cluster, service)
        .await
        .map_err(MonError::from_lookup)?;

    Ok(arns.iter().map(|arn| short_id(arn).to_string()).collect())
}
