/// Read-through caching for session-scoped catalog data.
///
/// Evaluates to an `AppResult<V>`: `Ok` with the cached value when present,
/// otherwise awaits `$block`, stores its successful result under `$key` and
/// returns it. Errors are returned early with `?` and never cached, so the
/// macro must be used inside a function returning `AppResult`.
///
/// # Arguments
/// * `$cache`: a [`CatalogCache`](crate::cache::CatalogCache)
/// * `$key`: the key to read and fill
/// * `$block`: a future yielding `AppResult<V>`, evaluated only on a miss
///
/// # Example
/// ```rust,ignore
/// async fn cached_covers(&self, kind: CoverKind) -> AppResult<Vec<Cover>> {
///     crate::cached!(self.cache, kind, self.fetch_covers(kind))
/// }
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get(&$key).await {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.insert($key, value.clone()).await;
            Ok(value)
        }
    }};
}
