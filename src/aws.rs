use crate::config::{Environment, ResolvedProfile};
use crate::error::MonError;
use anyhow::{Context, Result};
use aws_config::{Region, SdkConfig};
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

type IniSections = HashMap<String, HashMap<String, String>>;

fn read_profile_names(path: &Path, prefixed: bool) -> Result<HashSet<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;
    let names = serde_ini::from_str::<IniSections>(&content)
        .with_context(|| format!("Could not parse {}", path.display()))?
        .into_keys()
        .map(|key| {
            let name = if prefixed {
                key.strip_prefix("profile ").unwrap_or(&key)
            } else {
                &key
            };
            name.trim().to_string()
        })
        .collect();

    Ok(names)
}

/// Profiles named in the shared config and credentials files. Missing or
/// unparseable files contribute nothing.
pub fn get_aws_profiles(env: &Environment) -> HashSet<String> {
    let mut profiles = HashSet::new();

    let sources = [
        (env.aws_credentials_path(), false),
        (env.aws_config_path(), true),
    ];
    for (path, prefixed) in sources {
        let Some(path) = path.filter(|p| p.exists()) else {
            continue;
        };
        match read_profile_names(&path, prefixed) {
            Ok(names) => profiles.extend(names),
            Err(err) => warn!("{err:#}"),
        }
    }

    profiles
}

/// Checks the profile exists locally and loads the shared SDK configuration
/// for it.
pub async fn aws_login(
    profile: &ResolvedProfile,
    region: &Option<String>,
    env: &Environment,
) -> Result<SdkConfig, MonError> {
    let profiles = get_aws_profiles(env);
    if !profiles.contains(&profile.name) && profile.name != "default" {
        return Err(MonError::Authentication {
            profile: profile.name.clone(),
            reason: "profile not found in the shared config or credentials file".into(),
        });
    }

    let mut aws_config = aws_config::from_env().profile_name(&profile.name);
    if let Some(region) = region {
        let region = Region::new(region.to_string());
        aws_config = aws_config.region(region);
    }
    let aws_config = aws_config.load().await;

    info!(profile = %profile.name, region = ?aws_config.region(), "loaded AWS configuration");
    Ok(aws_config)
}
