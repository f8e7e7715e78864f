use crate::api::{EcsApi, ElbApi};
use crate::error::MonError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HealthCheckInfo {
    pub load_balancer_arn: String,
    pub protocol: String,
    pub path: String,
    pub dns_name: String,
}

impl HealthCheckInfo {
    /// `<protocol>://<host><health path>` with the protocol lowercased.
    pub fn url_for(&self, host: &str) -> String {
        format!("{}://{}{}", self.protocol.to_lowercase(), host, self.path)
    }

    /// Health-check URL against the load balancer's own DNS name.
    pub fn service_url(&self) -> String {
        self.url_for(&self.dns_name)
    }
}

/// Target group of the service's first load balancer attachment, in the
/// order ECS reports them.
pub async fn resolve_target_group(
    ecs: &dyn EcsApi,
    cluster: &str,
    service: &str,
) -> Result<String, MonError> {
    let found = ecs
        .describe_service(cluster, service)
        .await
        .map_err(MonError::from_lookup)?
        .ok_or_else(|| MonError::ServiceNotFound(service.to_string()))?;

    found
        .target_group_arns
        .into_iter()
        .next()
        .ok_or(MonError::NoLoadBalancer(found.name))
}

/// Health-check settings of the target group plus the DNS name of the first
/// load balancer it is attached to.
pub async fn resolve_health_check_info(
    elb: &dyn ElbApi,
    target_group: &str,
) -> Result<HealthCheckInfo, MonError> {
    let Some(group) = elb.describe_target_group(target_group).await? else {
        let reason = format!("target group {target_group} not found");
        return Err(MonError::NoLoadBalancer(reason));
    };

    let Some(load_balancer_arn) = group.load_balancer_arns.first().cloned() else {
        let reason = format!("target group {} has no load balancer", group.arn);
        return Err(MonError::NoLoadBalancer(reason));
    };

    let Some(load_balancer) = elb.describe_load_balancer(&load_balancer_arn).await? else {
        let reason = format!("load balancer {load_balancer_arn} not found");
        return Err(MonError::NoLoadBalancer(reason));
    };

    let info = HealthCheckInfo {
        load_balancer_arn,
        protocol: group
            .health_check_protocol
            .unwrap_or_else(|| "HTTP".to_string()),
        path: group.health_check_path.unwrap_or_default(),
        dns_name: load_balancer.dns_name,
    };
    info!(
        load_balancer = %info.load_balancer_arn,
        dns_name = %info.dns_name,
        path = %info.path,
        "resolved load balancer"
    );
    Ok(info)
}
