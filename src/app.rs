use crate::alb::{resolve_health_check_info, resolve_target_group, HealthCheckInfo};
use crate::api::{DnsApi, EcsApi, ElbApi, IdentityApi};
use crate::cluster::{ensure_cluster, list_service_tasks, list_services};
use crate::config::ErrorPolicy;
use crate::dns::{find_alias_for, AliasSearch};
use crate::error::MonError;
use crate::report::Report;
use crate::tasks::build_task_rows;
use std::io::Write;

/// What one invocation should report on.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub profile: String,
    pub cluster: String,
    pub service: Option<String>,
    pub alb: bool,
    pub dns_zone: Option<String>,
    pub on_list_error: ErrorPolicy,
    pub on_dns_error: ErrorPolicy,
}

/// The provider APIs a run reads from.
pub struct Apis<'a> {
    pub ecs: &'a dyn EcsApi,
    pub elb: &'a dyn ElbApi,
    pub dns: &'a dyn DnsApi,
    pub identity: &'a dyn IdentityApi,
}

pub async fn run<W: Write>(
    opts: &RunOptions,
    apis: &Apis<'_>,
    report: &mut Report<W>,
) -> Result<(), MonError> {
    let account = apis
        .identity
        .caller_account()
        .await
        .map_err(|err| MonError::Authentication {
            profile: opts.profile.clone(),
            reason: err.to_string(),
        })?;
    report.field("account_id", &account)?;
    report.field("cluster name", &opts.cluster)?;

    ensure_cluster(apis.ecs, &opts.cluster).await?;

    let Some(service) = opts.service.as_deref() else {
        if opts.dns_zone.is_some() {
            warn!("--dns needs --svc, skipping the Route 53 lookup");
        }
        return report_services(opts, apis, report).await;
    };

    report.field("service name", service)?;

    let lb_info = if opts.alb || opts.dns_zone.is_some() {
        match resolve_load_balancer(apis, &opts.cluster, service).await {
            Ok(info) => Some(info),
            // Only the alias lookup needed it; the task table still prints.
            Err(MonError::NoLoadBalancer(reason)) if !opts.alb => {
                warn!(service, %reason, "no load balancer, skipping the Route 53 lookup");
                None
            }
            Err(err) => return Err(err),
        }
    } else {
        None
    };
    if let (true, Some(info)) = (opts.alb, &lb_info) {
        report.field("service url", &info.service_url())?;
    }

    let task_ids = list_service_tasks(apis.ecs, &opts.cluster, service).await?;
    let rows = build_task_rows(apis.ecs, &task_ids, &opts.cluster).await?;
    report.task_table(&rows)?;

    if let (Some(zone), Some(info)) = (opts.dns_zone.as_deref(), &lb_info) {
        report_dns_alias(opts, apis, report, zone, info).await?;
    }

    Ok(())
}

async fn resolve_load_balancer(
    apis: &Apis<'_>,
    cluster: &str,
    service: &str,
) -> Result<HealthCheckInfo, MonError> {
    let target_group = resolve_target_group(apis.ecs, cluster, service).await?;
    resolve_health_check_info(apis.elb, &target_group).await
}

async fn report_services<W: Write>(
    opts: &RunOptions,
    apis: &Apis<'_>,
    report: &mut Report<W>,
) -> Result<(), MonError> {
    let lenient = opts.on_list_error == ErrorPolicy::ReportAndContinue;
    match list_services(apis.ecs, &opts.cluster).await {
        Ok(services) => report.services(&services)?,
        Err(err @ MonError::ServiceList(_)) if lenient => report.line(&err.to_string())?,
        Err(err) => return Err(err),
    }
    Ok(())
}

async fn report_dns_alias<W: Write>(
    opts: &RunOptions,
    apis: &Apis<'_>,
    report: &mut Report<W>,
    zone: &str,
    info: &HealthCheckInfo,
) -> Result<(), MonError> {
    let lenient = opts.on_dns_error == ErrorPolicy::ReportAndContinue;
    match find_alias_for(apis.dns, zone, &info.dns_name).await {
        Ok(AliasSearch::Found { record, pages }) => {
            info!(zone, record = %record, pages, "found alias record");
            report.field("R53 URL", &info.url_for(&record))?;
        }
        Ok(AliasSearch::PagesExhaustedNoMatch { pages }) => {
            warn!(
                zone,
                pages,
                target = %info.dns_name,
                "no alias record points at the load balancer"
            );
        }
        Err(err @ MonError::DnsQuery(_)) if lenient => {
            warn!(zone, "{err}");
            report.line(&err.to_string())?;
        }
        Err(err) => return Err(err),
    }
    Ok(())
}
