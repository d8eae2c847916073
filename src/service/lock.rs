//! Per-(tenant, domain) write serialization

use crate::domain::{ConfigDomain, StringUuid};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

/// Exclusive sections for read-patch-validate-write sequences.
///
/// Locks are process-local; reads never take them. Entries nobody holds or
/// waits on are dropped on the next acquire.
#[derive(Default)]
pub struct DomainLocks {
    locks: Mutex<HashMap<(StringUuid, ConfigDomain), Arc<Mutex<()>>>>,
}

impl DomainLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, tenant_id: StringUuid, domain: ConfigDomain) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks.entry((tenant_id, domain)).or_default().clone()
        };
        lock.lock_owned().await
    }

    /// Acquire several domains of one tenant in lock order
    pub async fn acquire_all(
        &self,
        tenant_id: StringUuid,
        domains: &[ConfigDomain],
    ) -> Vec<OwnedMutexGuard<()>> {
        let mut ordered = domains.to_vec();
        ordered.sort();
        ordered.dedup();

        let mut guards = Vec::with_capacity(ordered.len());
        for domain in ordered {
            guards.push(self.acquire(tenant_id, domain).await);
        }
        guards
    }

    #[cfg(test)]
    async fn tracked(&self) -> usize {
        self.locks.lock().await.len()
    }
}
