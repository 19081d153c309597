//! Refresh coordination: one in-flight refresh per gateway, FIFO waiters behind it.
//!
//! [`RefreshCoordinator::claim`] is the only entry point. It inspects the refreshing flag and,
//! under the same lock, either flips it (making the caller the leader of a new refresh cycle)
//! or enqueues a one-shot waiter. Because the check, the set, and the enqueue never straddle a
//! suspension point or a lock release, two concurrent `401` responses cannot both start a
//! refresh, and no waiter can slip into a queue that has already been drained.
//!
//! The leader receives a [`RefreshGuard`]. [`RefreshGuard::settle`] clears the flag and drains
//! the queue in insertion order with the cycle's result; dropping an unsettled guard does the
//! same with [`RefreshError::Abandoned`], so the flag is released on every exit path.

mod metrics;

pub use metrics::RefreshMetrics;

// std
use std::{collections::VecDeque, mem};
// crates.io
use tokio::sync::oneshot;
// self
use crate::{_prelude::*, error::RefreshError, obs};

type RefreshResult = Result<(), RefreshError>;

/// Monotonic position of a waiter in the coordinator's queue.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WaiterTicket(u64);
impl WaiterTicket {
	/// Returns the raw sequence number.
	pub const fn get(self) -> u64 {
		self.0
	}
}
impl Display for WaiterTicket {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		write!(f, "#{}", self.0)
	}
}

/// Owner of the refreshing flag and the waiter queue shared by every clone of a gateway.
#[derive(Debug, Default)]
pub struct RefreshCoordinator {
	state: Mutex<RefreshState>,
	metrics: RefreshMetrics,
}
impl RefreshCoordinator {
	/// Atomically claims the next refresh cycle or joins the one in flight.
	pub fn claim(&self) -> RefreshClaim<'_> {
		let mut state = self.state.lock();

		if !state.refreshing {
			debug_assert!(state.waiters.is_empty(), "Waiters must not outlive a refresh cycle.");

			state.refreshing = true;

			drop(state);
			self.metrics.record_attempt();

			return RefreshClaim::Leader(RefreshGuard { coordinator: self, settled: false });
		}

		state.next_ticket += 1;

		let ticket = WaiterTicket(state.next_ticket);
		let (tx, rx) = oneshot::channel();

		state.waiters.push_back(Waiter { ticket, tx });

		drop(state);
		self.metrics.record_queued();

		RefreshClaim::Waiter(RefreshWaiter { ticket, rx })
	}

	/// Returns `true` while a refresh cycle is in flight.
	pub fn is_refreshing(&self) -> bool {
		self.state.lock().refreshing
	}

	/// Returns the number of callers currently queued behind the in-flight refresh.
	pub fn waiting(&self) -> usize {
		self.state.lock().waiters.len()
	}

	/// Returns the refresh counters.
	pub fn metrics(&self) -> &RefreshMetrics {
		&self.metrics
	}

	fn release(&self, result: RefreshResult) -> Vec<WaiterTicket> {
		let waiters = {
			let mut state = self.state.lock();

			state.refreshing = false;

			mem::take(&mut state.waiters)
		};

		match &result {
			Ok(()) => self.metrics.record_success(),
			Err(_) => self.metrics.record_failure(),
		}

		let mut released = Vec::with_capacity(waiters.len());

		for Waiter { ticket, tx } in waiters {
			// A dropped receiver belongs to a caller that stopped waiting.
			let _ = tx.send(result.clone());

			released.push(ticket);
		}

		obs::log_waiters_released(released.len(), result.as_ref().err());
		obs::record_waiters_released(released.len(), result.is_err());

		released
	}
}

#[derive(Debug, Default)]
struct RefreshState {
	refreshing: bool,
	next_ticket: u64,
	waiters: VecDeque<Waiter>,
}

#[derive(Debug)]
struct Waiter {
	ticket: WaiterTicket,
	tx: oneshot::Sender<RefreshResult>,
}

/// Result of [`RefreshCoordinator::claim`].
#[derive(Debug)]
pub enum RefreshClaim<'a> {
	/// The caller owns the new refresh cycle and must settle it.
	Leader(RefreshGuard<'a>),
	/// A refresh is already in flight; the caller waits for its result.
	Waiter(RefreshWaiter),
}

/// Scoped ownership of an in-flight refresh cycle.
#[derive(Debug)]
pub struct RefreshGuard<'a> {
	coordinator: &'a RefreshCoordinator,
	settled: bool,
}
impl RefreshGuard<'_> {
	/// Ends the cycle: clears the flag and releases every waiter, oldest first, with `result`.
	///
	/// Returns the released tickets in release order.
	pub fn settle(mut self, result: Result<(), RefreshError>) -> Vec<WaiterTicket> {
		self.settled = true;

		self.coordinator.release(result)
	}
}
impl Drop for RefreshGuard<'_> {
	fn drop(&mut self) {
		if !self.settled {
			self.coordinator.release(Err(RefreshError::Abandoned));
		}
	}
}

/// Handle held by a caller queued behind an in-flight refresh.
#[derive(Debug)]
pub struct RefreshWaiter {
	ticket: WaiterTicket,
	rx: oneshot::Receiver<RefreshResult>,
}
impl RefreshWaiter {
	/// Returns this waiter's queue position.
	pub fn ticket(&self) -> WaiterTicket {
		self.ticket
	}

	/// Suspends until the refresh cycle settles.
	pub async fn wait(self) -> Result<(), RefreshError> {
		self.rx.await.unwrap_or(Err(RefreshError::Abandoned))
	}
}
