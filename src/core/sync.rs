//=========================================================================
// Scoped Exclusive Access
//=========================================================================
//
// The only locking primitive used by the bridge.
//
// `Exclusive<T>` wraps a mutex and hands out access through a closure, so
// the guard can never escape the critical section. Callers cannot hold a
// channel lock across a display or audio system call without writing that
// call inside the closure, which keeps critical sections visibly short.
//
// Poisoning:
//   Every closure passed to `with()` leaves the protected value in a
//   consistent state at each step, so a panic on one thread must not take
//   the other threads down with it. Poisoned locks are recovered.
//
//=========================================================================

//=== Standard Library Imports ============================================

use std::sync::{Mutex, PoisonError};

//=== Exclusive ===========================================================

/// A value shared across threads, accessible only inside a lock scope.
#[derive(Debug, Default)]
pub(crate) struct Exclusive<T> {
    inner: Mutex<T>,
}

impl<T> Exclusive<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(value),
        }
    }

    /// Runs `f` with exclusive access to the value and returns its result.
    ///
    /// The lock is released as soon as `f` returns.
    pub(crate) fn with<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut guard = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn with_returns_closure_result() {
        let cell = Exclusive::new(41);
        let value = cell.with(|v| {
            *v += 1;
            *v
        });
        assert_eq!(value, 42);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let cell = Arc::new(Exclusive::new(0u32));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cell = Arc::clone(&cell);
                thread::spawn(move || {
                    for _ in 0..1000 {
                        cell.with(|v| *v += 1);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(cell.with(|v| *v), 4000);
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let cell = Arc::new(Exclusive::new(7));

        let poisoner = Arc::clone(&cell);
        let result = thread::spawn(move || {
            poisoner.with(|_| panic!("poison the lock"));
        })
        .join();
        assert!(result.is_err());

        assert_eq!(cell.with(|v| *v), 7);
    }
}
