use crate::api::{DnsApi, RecordCursor};
use crate::error::{ApiError, MonError};
use crate::helpers::strip_root_dot;
use std::collections::HashMap;

/// Record sets requested per ListResourceRecordSets call.
pub const RECORD_PAGE_SIZE: i32 = 100;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AliasPage {
    /// Alias target DNS name to the name of the record pointing at it.
    pub aliases: HashMap<String, String>,
    pub next: Option<RecordCursor>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AliasSearch {
    Found { record: String, pages: usize },
    PagesExhaustedNoMatch { pages: usize },
}

/// Lowercased, without the root dot and without the `dualstack.` prefix
/// Route 53 puts in front of ALB alias targets.
fn normalize(name: &str) -> String {
    let name = strip_root_dot(name).to_ascii_lowercase();
    match name.strip_prefix("dualstack.") {
        Some(rest) => rest.to_string(),
        None => name,
    }
}

/// One page of alias `A` records. When two records point at the same
/// target the last one listed is kept.
pub async fn fetch_alias_page(
    dns: &dyn DnsApi,
    zone_id: &str,
    cursor: Option<RecordCursor>,
) -> Result<AliasPage, ApiError> {
    let page = dns.list_record_sets(zone_id, cursor, RECORD_PAGE_SIZE).await?;

    let mut aliases = HashMap::new();
    for record in page.items {
        if record.record_type != "A" {
            continue;
        }
        if let Some(target) = record.alias_target {
            let name = strip_root_dot(&record.name).to_ascii_lowercase();
            aliases.insert(normalize(&target), name);
        }
    }

    Ok(AliasPage {
        aliases,
        next: page.next,
    })
}

/// Looks for an alias record pointing at `target`. Returns as soon as a page
/// holds a match; a negative answer is only given once every page was read.
pub async fn find_alias_for(
    dns: &dyn DnsApi,
    zone_id: &str,
    target: &str,
) -> Result<AliasSearch, MonError> {
    let wanted = normalize(target);
    let mut cursor = None;
    let mut pages = 0;

    loop {
        let mut page = fetch_alias_page(dns, zone_id, cursor.take())
            .await
            .map_err(MonError::DnsQuery)?;
        pages += 1;
        debug!(zone_id, pages, aliases = page.aliases.len(), "scanned record page");

        if let Some(record) = page.aliases.remove(&wanted) {
            return Ok(AliasSearch::Found { record, pages });
        }
        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(AliasSearch::PagesExhaustedNoMatch { pages }),
        }
    }
}
