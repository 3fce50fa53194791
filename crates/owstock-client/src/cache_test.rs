use super::*;

const URL: &str = "https://www.officeworks.com.au/contact-us?view=stores&format=json";

fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - TimeDelta::days(days)
}

#[test]
fn cache_key_is_stable_hex() {
    let a = cache_key(URL);
    let b = cache_key(URL);
    assert_eq!(a, b);
    assert_eq!(a.len(), 64);
    assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    assert_ne!(a, cache_key("https://example.com/other"));
}

#[test]
fn entry_expires_exactly_at_ttl() {
    let created = Utc::now();
    let entry = CachedEntry::new(URL, "{}", created);
    let ttl = TimeDelta::days(7);
    assert!(!entry.is_expired_at(ttl, created + TimeDelta::days(6)));
    assert!(entry.is_expired_at(ttl, created + TimeDelta::days(7)));
}

#[test]
fn file_cache_lives_under_namespace() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    assert_eq!(cache.dir(), tmp.path().join("officeworks"));
}

#[test]
fn file_cache_round_trips_body() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    assert!(cache.get(URL).is_none());

    cache.put(URL, r#"{"stores": []}"#).unwrap();
    assert_eq!(cache.get(URL).as_deref(), Some(r#"{"stores": []}"#));

    let file = cache.dir().join(format!("{}.json", cache_key(URL)));
    assert!(file.exists(), "expected entry file at {}", file.display());
}

#[test]
fn file_cache_survives_new_handle() {
    let tmp = tempfile::tempdir().unwrap();
    FileCache::new(tmp.path(), 7).put(URL, "body").unwrap();
    let reopened = FileCache::new(tmp.path(), 7);
    assert_eq!(reopened.get(URL).as_deref(), Some("body"));
}

#[test]
fn file_cache_expired_entry_is_miss_and_removed() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    cache.put_at(URL, "stale", days_ago(8)).unwrap();

    assert!(cache.get(URL).is_none());
    let file = cache.dir().join(format!("{}.json", cache_key(URL)));
    assert!(!file.exists(), "expired entry should be deleted");
}

#[test]
fn file_cache_entry_within_ttl_is_hit() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    cache.put_at(URL, "fresh", days_ago(6)).unwrap();
    assert_eq!(cache.get(URL).as_deref(), Some("fresh"));
}

#[test]
fn file_cache_corrupt_entry_is_miss() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    std::fs::create_dir_all(cache.dir()).unwrap();
    std::fs::write(
        cache.dir().join(format!("{}.json", cache_key(URL))),
        "not json",
    )
    .unwrap();
    assert!(cache.get(URL).is_none());
}

#[test]
fn file_cache_put_replaces_entry() {
    let tmp = tempfile::tempdir().unwrap();
    let cache = FileCache::new(tmp.path(), 7);
    cache.put(URL, "first").unwrap();
    cache.put(URL, "second").unwrap();
    assert_eq!(cache.get(URL).as_deref(), Some("second"));
}

#[test]
fn memory_cache_respects_ttl() {
    let cache = MemoryCache::new(7);
    cache.insert_at(URL, "stale", days_ago(7));
    assert!(cache.get(URL).is_none());
    assert!(cache.is_empty());

    cache.put(URL, "fresh").unwrap();
    assert_eq!(cache.get(URL).as_deref(), Some("fresh"));
    assert_eq!(cache.len(), 1);
}

#[test]
fn no_cache_never_hits() {
    let cache = NoCache;
    cache.put(URL, "body").unwrap();
    assert!(cache.get(URL).is_none());
}
