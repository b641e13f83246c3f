//! Bounded queue with a deadline-aware blocking pop.
//!
//! `TimedQueue` is the "available" set behind [`ResourcePool`](crate::core::ResourcePool),
//! but it knows nothing about resources: it stores any `T`.
//!
//! - `push` never blocks. If a `timed_pop` is waiting, the value is handed
//!   straight to the oldest waiter, so a fresh caller cannot overtake it.
//! - `timed_pop` waits on a `parking_lot::Condvar` against a fixed deadline,
//!   so spurious wakeups never extend the total wait.
//! - `shutdown` drains stored items into a closer and fails every waiter.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use parking_lot::{Condvar, Mutex};

use crate::core::PoolError;

type Closer<T> = Box<dyn FnMut(T) + Send>;

struct QueueState<T> {
    /// Non-empty only while `waiters` is empty.
    items: VecDeque<T>,
    /// Tickets of blocked `timed_pop` calls, oldest first.
    waiters: VecDeque<u64>,
    /// Values pushed directly to a waiter, keyed by its ticket.
    granted: HashMap<u64, T>,
    next_ticket: u64,
    shutdown: bool,
}

/// Fixed-capacity FIFO buffer whose pop blocks for at most a caller-supplied duration.
pub struct TimedQueue<T> {
    capacity: usize,
    state: Mutex<QueueState<T>>,
    /// Signaled on every push and on shutdown.
    available: Condvar,
    /// Lock order: `closer` before `state`; never the reverse.
    closer: Mutex<Option<Closer<T>>>,
}

impl<T> TimedQueue<T> {
    /// Create an empty queue bounded by `capacity`.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            state: Mutex::new(QueueState {
                items: VecDeque::with_capacity(capacity),
                waiters: VecDeque::new(),
                granted: HashMap::new(),
                next_ticket: 0,
                shutdown: false,
            }),
            available: Condvar::new(),
            closer: Mutex::new(None),
        }
    }

    /// Insert a value, or hand it to the longest-waiting
    /// [`timed_pop`](Self::timed_pop) if one is blocked.
    ///
    /// After [`shutdown`](Self::shutdown) the value goes straight to the closer.
    ///
    /// # Errors
    ///
    /// Returns `PoolError::CapacityExceeded` if the queue is already full.
    pub fn push(&self, value: T) -> Result<(), PoolError> {
        let mut state = self.state.lock();

        if state.shutdown {
            drop(state);
            // Blocks until `shutdown` has installed the closer.
            if let Some(closer) = self.closer.lock().as_mut() {
                closer(value);
            }
            return Ok(());
        }

        if let Some(ticket) = state.waiters.pop_front() {
            state.granted.insert(ticket, value);
            drop(state);
            self.available.notify_all();
            return Ok(());
        }

        if state.items.len() >= self.capacity {
            return Err(PoolError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        state.items.push_back(value);
        Ok(())
    }

    /// Remove the next value, waiting up to `timeout` for one to arrive.
    ///
    /// A zero `timeout` is an immediate non-blocking check.
    ///
    /// # Errors
    ///
    /// - `PoolError::Timeout` if nothing arrived before the deadline
    /// - `PoolError::Shutdown` if the queue was shut down
    pub fn timed_pop(&self, timeout: Duration) -> Result<T, PoolError> {
        // A deadline that overflows `Instant` is treated as "wait forever".
        let deadline = Instant::now().checked_add(timeout);
        let mut state = self.state.lock();

        if state.shutdown {
            return Err(PoolError::Shutdown);
        }
        if let Some(item) = state.items.pop_front() {
            return Ok(item);
        }

        let ticket = state.next_ticket;
        state.next_ticket = state.next_ticket.wrapping_add(1);
        state.waiters.push_back(ticket);
        let mut timed_out = false;

        loop {
            if let Some(item) = state.granted.remove(&ticket) {
                return Ok(item);
            }
            if state.shutdown {
                return Err(PoolError::Shutdown);
            }
            if timed_out {
                state.waiters.retain(|&t| t != ticket);
                return Err(PoolError::Timeout(timeout));
            }

            timed_out = match deadline {
                Some(deadline) => self.available.wait_until(&mut state, deadline).timed_out(),
                None => {
                    self.available.wait(&mut state);
                    false
                }
            };
        }
    }

    /// Stop accepting values: every stored item (including one granted to a
    /// waiter that has not woken yet) is passed to `closer`, all waiters fail
    /// with `PoolError::Shutdown`, and later pushes go to `closer`.
    ///
    /// `closer` runs without the queue lock held, so it may inspect the queue
    /// and other threads may keep popping and reading its length meanwhile.
    /// It must not `push` or call `shutdown` itself.
    pub fn shutdown<F>(&self, closer: F)
    where
        F: FnMut(T) + Send + 'static,
    {
        let mut slot = self.closer.lock();

        let drained: Vec<T> = {
            let mut state = self.state.lock();
            state.shutdown = true;
            state.waiters.clear();
            let mut drained: Vec<T> = state.items.drain(..).collect();
            drained.extend(state.granted.drain().map(|(_, item)| item));
            drained
        };
        self.available.notify_all();

        let mut closer: Closer<T> = Box::new(closer);
        for item in drained {
            closer(item);
        }
        *slot = Some(closer);
    }

    /// Whether [`shutdown`](Self::shutdown) has been called.
    pub fn is_shutdown(&self) -> bool {
        self.state.lock().shutdown
    }

    /// Number of values currently stored.
    pub fn len(&self) -> usize {
        self.state.lock().items.len()
    }

    /// Whether no values are currently stored.
    pub fn is_empty(&self) -> bool {
        self.state.lock().items.is_empty()
    }

    /// Fixed capacity given at construction.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> std::fmt::Debug for TimedQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("TimedQueue")
            .field("capacity", &self.capacity)
            .field("len", &state.items.len())
            .field("waiters", &state.waiters.len())
            .field("shutdown", &state.shutdown)
            .finish()
    }
}
