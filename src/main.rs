#[macro_use]
extern crate tracing;

mod alb;
mod api;
mod app;
mod aws;
mod cluster;
mod config;
mod dns;
mod error;
mod helpers;
mod report;
mod sdk;
mod tasks;
#[cfg(test)]
mod testing;

use app::{Apis, RunOptions};
use aws::aws_login;
use clap::Parser;
use config::{resolve_profile, Environment, ErrorPolicy, ProfileSource};
use error::MonError;
use report::Report;
use std::io;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The AWS profile to run this request under, falls back to AWS_PROFILE
    #[arg(long)]
    profile: Option<String>,

    /// The AWS region, defaults to the profile's region
    #[arg(long)]
    region: Option<String>,

    /// The ECS cluster name
    #[arg(long)]
    cluster: String,

    /// The ECS service name; without it the cluster's services are listed
    #[arg(long)]
    svc: Option<String>,

    /// Print the health-check URL of the service's load balancer
    #[arg(long)]
    alb: bool,

    /// Route 53 hosted zone id to search for an alias of the load balancer
    #[arg(long)]
    dns: Option<String>,

    /// What to do when listing the cluster's services fails
    #[arg(long, value_enum, default_value = "continue")]
    on_list_error: ErrorPolicy,

    /// What to do when reading the Route 53 zone fails
    #[arg(long, value_enum, default_value = "abort")]
    on_dns_error: ErrorPolicy,
}

#[tokio::main]
async fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let env = Environment::capture();

    match monitor(cli, &env).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

async fn monitor(cli: Cli, env: &Environment) -> Result<(), MonError> {
    let profile = resolve_profile(cli.profile.as_deref(), env)?;

    let mut report = Report::new(io::stdout().lock());
    if profile.source == ProfileSource::Environment {
        report.field("aws profile", &profile.name)?;
    }

    let aws_config = aws_login(&profile, &cli.region, env).await?;
    let ecs = aws_sdk_ecs::Client::new(&aws_config);
    let elb = aws_sdk_elasticloadbalancingv2::Client::new(&aws_config);
    let route53 = aws_sdk_route53::Client::new(&aws_config);
    let sts = aws_sdk_sts::Client::new(&aws_config);

    let opts = RunOptions {
        profile: profile.name,
        cluster: cli.cluster,
        service: cli.svc,
        alb: cli.alb,
        dns_zone: cli.dns,
        on_list_error: cli.on_list_error,
        on_dns_error: cli.on_dns_error,
    };
    let apis = Apis {
        ecs: &ecs,
        elb: &elb,
        dns: &route53,
        identity: &sts,
    };

    app::run(&opts, &apis, &mut report).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn cluster_is_required() {
        assert!(Cli::try_parse_from(["ecs-mon", "--svc", "web"]).is_err());
    }

    #[test]
    fn flags_parse() {
        let args = [
            "ecs-mon",
            "--cluster",
            "prod",
            "--svc",
            "web",
            "--alb",
            "--dns",
            "Z123",
        ];
        let cli = Cli::try_parse_from(args).unwrap();

        assert_eq!(cli.cluster, "prod");
        assert_eq!(cli.svc.as_deref(), Some("web"));
        assert!(cli.alb);
        assert_eq!(cli.dns.as_deref(), Some("Z123"));
        assert_eq!(cli.on_list_error, ErrorPolicy::ReportAndContinue);
        assert_eq!(cli.on_dns_error, ErrorPolicy::Abort);
    }

    #[tokio::test]
    async fn missing_profile_stops_before_any_call() {
        let args = ["ecs-mon", "--cluster", "prod"];
        let cli = Cli::try_parse_from(args).unwrap();
        let err = monitor(cli, &Environment::default()).await.unwrap_err();

        assert!(matches!(err, MonError::MissingProfile));
        assert!(err.to_string().contains("provide an AWS profile"));
    }
}
