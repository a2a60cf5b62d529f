//! Lock policies for the execution context.
//!
//! The policy is chosen once, when the machine is constructed. `MutexLock`
//! serialises the read-and-select phase of concurrent steps; `NoLock` skips
//! that for single-threaded use. The mutex is reentrant, so a guard that reads
//! the current state through the context on the stepping thread does not
//! deadlock.

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoped lock acquisition. Released on drop or with [`StepGuard::unlock`].
#[must_use = "the lock is released as soon as the guard is dropped"]
pub struct StepGuard<'a> {
    inner: Option<ReentrantMutexGuard<'a, ()>>,
}

impl<'a> StepGuard<'a> {
    /// A guard that holds nothing.
    pub fn noop() -> Self {
        Self { inner: None }
    }

    fn held(guard: ReentrantMutexGuard<'a, ()>) -> Self {
        Self { inner: Some(guard) }
    }

    pub fn is_held(&self) -> bool {
        self.inner.is_some()
    }

    pub fn unlock(self) {
        drop(self);
    }
}

impl fmt::Debug for StepGuard<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StepGuard")
            .field("held", &self.is_held())
            .finish()
    }
}

/// Strategy deciding whether context access is serialised.
pub trait LockPolicy: Send + Sync {
    fn lock(&self) -> StepGuard<'_>;

    fn kind(&self) -> LockKind;
}

/// Lock policy that never blocks.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLock;

impl LockPolicy for NoLock {
    fn lock(&self) -> StepGuard<'_> {
        StepGuard::noop()
    }

    fn kind(&self) -> LockKind {
        LockKind::None
    }
}

/// Lock policy backed by a reentrant mutex.
#[derive(Default)]
pub struct MutexLock {
    mutex: ReentrantMutex<()>,
}

impl MutexLock {
    pub fn new() -> Self {
        Self::default()
    }
}

impl LockPolicy for MutexLock {
    fn lock(&self) -> StepGuard<'_> {
        StepGuard::held(self.mutex.lock())
    }

    fn kind(&self) -> LockKind {
        LockKind::Mutex
    }
}

impl fmt::Debug for MutexLock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("MutexLock")
    }
}

/// Configuration-level selector for the built-in policies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LockKind {
    #[default]
    None,
    Mutex,
}

impl LockKind {
    pub fn policy(self) -> Box<dyn LockPolicy> {
        match self {
            LockKind::None => Box::new(NoLock),
            LockKind::Mutex => Box::new(MutexLock::new()),
        }
    }
}
