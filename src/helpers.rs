use crate::api::Page;
use std::future::Future;

/// The short identifier at the end of an ARN: everything after the last `/`.
pub fn short_id(arn: &str) -> &str {
    arn.rsplit('/').next().unwrap_or(arn)
}

/// Drops the trailing root dot of a fully qualified DNS name.
pub fn strip_root_dot(name: &str) -> &str {
    name.strip_suffix('.').unwrap_or(name)
}

/// Tag portion of a container image reference: the text after the last `:`
/// that does not belong to the registry host, so `repo:v2` gives `v2`.
///
/// References without such a tag do not fall back to the plain last-colon
/// split. An image pinned by digest gives the whole digest (`repo@sha256:abcd`
/// gives `sha256:abcd`, not `abcd`), and an untagged image gives `latest`, the
/// tag the registry resolves it to, instead of the full reference.
pub fn image_tag(image: &str) -> &str {
    if let Some((_, digest)) = image.split_once('@') {
        return digest;
    }
    match image.rsplit_once(':') {
        Some((_, tag)) if !tag.contains('/') => tag,
        _ => "latest",
    }
}

/// Walks a paginated listing: the first call passes no cursor, the walk stops
/// on the first page without one, and items are kept in page order.
pub async fn collect_pages<T, C, E, F, Fut>(mut fetch: F) -> Result<Vec<T>, E>
where
    F: FnMut(Option<C>) -> Fut,
    Fut: Future<Output = Result<Page<T, C>, E>>,
{
    let mut items = Vec::new();
    let mut cursor = None;
    let mut pages = 0usize;

    loop {
        let page = fetch(cursor.take()).await?;
        pages += 1;
        items.extend(page.items);
        match page.next {
            Some(next) => cursor = Some(next),
            None => break,
        }
    }

    debug!(pages, items = items.len(), "pagination finished");
    Ok(items)
}
