use rocket::fairing::AdHoc;
use std::collections::HashMap;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// How long a rendered index page keeps being served as-is.
pub const PAGE_TTL: Duration = Duration::from_secs(20);

/// Rendered-body cache for listing routes that tolerate briefly stale
/// output. Entries are keyed by route (page number included) and expire
/// after a fixed TTL; writers never update entries in place, they only
/// `store` fresh renders or `invalidate` the lot.
pub struct PageCache {
    ttl: Duration,
    pages: RwLock<HashMap<String, CachedPage>>,
}

struct CachedPage {
    body: String,
    stored_at: Instant,
}

impl PageCache {
    pub fn new(ttl: Duration) -> Self {
        PageCache {
            ttl,
            pages: RwLock::new(HashMap::new()),
        }
    }

    pub fn manage() -> AdHoc {
        AdHoc::on_ignite("Manage page cache", |rocket| async move {
            rocket.manage(PageCache::new(PAGE_TTL))
        })
    }

    /// Cached body for `key`, as long as it is still within its TTL.
    pub fn fetch(&self, key: &str) -> Option<String> {
        let pages = self.pages.read().expect("page cache lock");
        let page = pages.get(key)?;
        if page.stored_at.elapsed() < self.ttl {
            Some(page.body.clone())
        } else {
            None
        }
    }

    pub fn store(&self, key: &str, body: String) {
        let mut pages = self.pages.write().expect("page cache lock");
        pages.insert(
            key.to_string(),
            CachedPage {
                body,
                stored_at: Instant::now(),
            },
        );
    }

    /// Drop every cached page immediately.
    pub fn invalidate(&self) {
        let mut pages = self.pages.write().expect("page cache lock");
        pages.clear();
    }
}
