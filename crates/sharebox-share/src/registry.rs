//! Token-to-file share registry.

use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use tracing::{debug, info};

use sharebox_core::error::AppError;
use sharebox_core::result::AppResult;

use crate::token;

/// One live share link.
///
/// The `file_name` is a weak reference: deleting the file does not remove
/// the entry, and the dangling link fails at the storage layer on access.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ShareEntry {
    /// Opaque unguessable token.
    pub token: String,
    /// Stored name of the target file.
    pub file_name: String,
    /// When the link was minted.
    pub created_at: DateTime<Utc>,
    /// When the link stops resolving (`created_at + ttl`).
    pub expires_at: DateTime<Utc>,
}

/// In-memory registry of share links.
///
/// Constructed once at startup and handed to handlers through the shared
/// application state. The map tolerates concurrent create/resolve from
/// any number of in-flight requests; expiry of one token never touches
/// another entry. Entries that are never resolved after expiring stay in
/// the map until process restart — an accepted tradeoff of lazy eviction.
#[derive(Debug)]
pub struct ShareRegistry {
    entries: DashMap<String, ShareEntry>,
    ttl: Duration,
}

impl ShareRegistry {
    /// Create a registry whose links live for `ttl_days` after creation.
    pub fn new(ttl_days: i64) -> Self {
        Self {
            entries: DashMap::new(),
            ttl: Duration::days(ttl_days),
        }
    }

    /// Link lifetime.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mint a share link for a stored file.
    ///
    /// The caller is responsible for checking that the file exists; the
    /// registry never re-validates the target after creation.
    pub fn create(&self, file_name: &str) -> ShareEntry {
        self.create_at(file_name, Utc::now())
    }

    /// Resolve a token to its entry.
    ///
    /// Unknown tokens fail with `NotFound`. Expired tokens are removed
    /// from the map (lazy eviction) and fail with `Expired`; a later
    /// resolve of the same token fails with `NotFound`.
    pub fn resolve(&self, token: &str) -> AppResult<ShareEntry> {
        self.resolve_at(token, Utc::now())
    }

    /// [`create`](Self::create) with an explicit clock, for tests.
    pub fn create_at(&self, file_name: &str, now: DateTime<Utc>) -> ShareEntry {
        let entry = ShareEntry {
            token: token::generate_token(),
            file_name: file_name.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
        };
        self.entries.insert(entry.token.clone(), entry.clone());

        info!(
            file = %entry.file_name,
            token_prefix = &entry.token[..8],
            expires_at = %entry.expires_at,
            "Share link created"
        );
        entry
    }

    /// [`resolve`](Self::resolve) with an explicit clock, for tests.
    pub fn resolve_at(&self, token: &str, now: DateTime<Utc>) -> AppResult<ShareEntry> {
        {
            let entry = self
                .entries
                .get(token)
                .ok_or_else(|| AppError::not_found("Invalid or expired sharing link"))?;
            if now <= entry.expires_at {
                return Ok(entry.value().clone());
            }
        }

        // Guard dropped above; safe to remove without deadlocking the shard.
        self.entries.remove(token);
        debug!(token_prefix = &token[..token.len().min(8)], "Evicted expired share link");
        Err(AppError::expired("Sharing link has expired"))
    }

    /// Number of entries currently in the map, expired or not.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sharebox_core::error::ErrorKind;

    #[test]
    fn test_create_sets_expiry_from_ttl() {
        let registry = ShareRegistry::new(7);
        let now = Utc::now();

        let entry = registry.create_at("report_abc.pdf", now);

        assert_eq!(entry.created_at, now);
        assert_eq!(entry.expires_at, now + Duration::days(7));
        assert!(entry.expires_at > entry.created_at);
    }

    #[test]
    fn test_resolve_active_token() {
        let registry = ShareRegistry::new(7);
        let entry = registry.create("file.txt");

        let resolved = registry.resolve(&entry.token).unwrap();
        assert_eq!(resolved.file_name, "file.txt");
        assert_eq!(registry.len(), 1, "resolve must not evict a live entry");
    }

    #[test]
    fn test_resolve_unknown_token() {
        let registry = ShareRegistry::new(7);
        let err = registry.resolve("deadbeef").unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_expired_token_evicted_then_not_found() {
        let registry = ShareRegistry::new(7);
        let now = Utc::now();
        let entry = registry.create_at("file.txt", now);

        let later = now + Duration::days(8);
        let err = registry.resolve_at(&entry.token, later).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Expired);
        assert!(registry.is_empty(), "expired entry must be removed");

        // Second resolve: the entry is gone, not merely expired.
        let err = registry.resolve_at(&entry.token, later).unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[test]
    fn test_resolve_at_exact_expiry_still_valid() {
        let registry = ShareRegistry::new(7);
        let now = Utc::now();
        let entry = registry.create_at("file.txt", now);

        // Expiry requires now > expires_at, not >=.
        let resolved = registry.resolve_at(&entry.token, entry.expires_at).unwrap();
        assert_eq!(resolved.file_name, "file.txt");
    }

    #[test]
    fn test_expiry_of_one_token_leaves_others_alone() {
        let registry = ShareRegistry::new(7);
        let now = Utc::now();

        let old = registry.create_at("a.txt", now - Duration::days(10));
        let fresh = registry.create_at("b.txt", now);

        assert!(registry.resolve_at(&old.token, now).is_err());
        let resolved = registry.resolve_at(&fresh.token, now).unwrap();
        assert_eq!(resolved.file_name, "b.txt");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_multiple_links_for_same_file_are_independent() {
        let registry = ShareRegistry::new(7);
        let a = registry.create("shared.txt");
        let b = registry.create("shared.txt");

        assert_ne!(a.token, b.token);
        assert!(registry.resolve(&a.token).is_ok());
        assert!(registry.resolve(&b.token).is_ok());
    }

    #[test]
    fn test_concurrent_create_and_resolve() {
        let registry = std::sync::Arc::new(ShareRegistry::new(7));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = std::sync::Arc::clone(&registry);
                std::thread::spawn(move || {
                    let mut tokens = Vec::new();
                    for j in 0..50 {
                        let entry = registry.create(&format!("file_{i}_{j}.txt"));
                        tokens.push(entry.token);
                    }
                    for token in &tokens {
                        registry.resolve(token).unwrap();
                    }
                    tokens
                })
            })
            .collect();

        let mut all: Vec<String> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        let total = all.len();
        all.sort();
        all.dedup();
        assert_eq!(all.len(), total, "tokens must be unique");
        assert_eq!(registry.len(), total);
    }
}
