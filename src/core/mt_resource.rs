use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A thread-safe, reference-counted handle with read-write locking.
///
/// `MtResource` is how chunks are shared between the chunk cache, the lighting
/// engine and any caller holding on to a chunk. Cloning the handle never clones
/// the value: every clone points at the same live instance, which can be checked
/// with [`MtResource::ptr_eq`].
///
/// # Examples
///
/// ```
/// use voxel_chunk_store::core::MtResource;
///
/// let counter = MtResource::new(0);
/// let alias = counter.clone();
///
/// *alias.get_mut() += 1;
///
/// assert_eq!(*counter.get(), 1);
/// assert!(counter.ptr_eq(&alias));
/// ```
///
/// # Locking
/// - Read guards (`get()`) can be held concurrently
/// - Write guards (`get_mut()`) are exclusive
/// - Locks are not reentrant: never request a guard on a resource while already
///   holding a write guard on it in the same thread
pub struct MtResource<T: Send + Sync> {
    resource: Arc<RwLock<T>>,
}

impl<T: Send + Sync + 'static> MtResource<T> {
    /// Wraps `resource` in a new shared handle.
    pub fn new(resource: T) -> Self {
        Self {
            resource: Arc::new(RwLock::new(resource)),
        }
    }

    /// Returns a guard that allows reading the contained value.
    ///
    /// A lock poisoned by a panicking writer is recovered: the value is still
    /// handed out, since every mutation of a chunk leaves it in a valid state.
    pub fn get(&self) -> RwLockReadGuard<'_, T> {
        self.resource.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns a guard that allows modifying the contained value.
    pub fn get_mut(&self) -> RwLockWriteGuard<'_, T> {
        self.resource.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns true if both handles refer to the same live value.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.resource, &other.resource)
    }

    /// Number of handles currently pointing at this value.
    pub fn handle_count(&self) -> usize {
        Arc::strong_count(&self.resource)
    }
}

impl<T: Send + Sync> Clone for MtResource<T> {
    fn clone(&self) -> Self {
        Self {
            resource: self.resource.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_the_same_value() {
        let resource = MtResource::new(vec![1, 2, 3]);
        let alias = resource.clone();

        alias.get_mut().push(4);

        assert_eq!(resource.get().len(), 4);
        assert!(resource.ptr_eq(&alias));
        assert_eq!(resource.handle_count(), 2);
    }

    #[test]
    fn distinct_resources_are_not_equal() {
        let a = MtResource::new(1u8);
        let b = MtResource::new(1u8);
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn poisoned_lock_is_recovered() {
        let resource = MtResource::new(7u32);
        let alias = resource.clone();

        let _ = std::thread::spawn(move || {
            let _guard = alias.get_mut();
            panic!("poison the lock");
        })
        .join();

        assert_eq!(*resource.get(), 7);
        *resource.get_mut() = 8;
        assert_eq!(*resource.get(), 8);
    }
}
