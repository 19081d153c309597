//! Login redirect contract.
//!
//! The gateway does not own navigation. After a failed refresh cycle it hands the configured
//! login location to a [`LoginNavigator`] exactly once and moves on without waiting for, or
//! confirming, the navigation.

// self
use crate::_prelude::*;

/// Receiver of the login redirect side effect (router, page shell, CLI prompt, ...).
pub trait LoginNavigator
where
	Self: Send + Sync,
{
	/// Starts navigation to `location`. Must not block.
	fn navigate(&self, location: &str);
}
impl<F> LoginNavigator for F
where
	F: Send + Sync + Fn(&str),
{
	fn navigate(&self, location: &str) {
		self(location)
	}
}

/// Navigator that records every requested location in memory.
#[derive(Clone, Debug, Default)]
pub struct MemoryNavigator(Arc<Mutex<Vec<String>>>);
impl MemoryNavigator {
	/// Returns every recorded location, oldest first.
	pub fn navigations(&self) -> Vec<String> {
		self.0.lock().clone()
	}

	/// Returns the most recent location, if any.
	pub fn last(&self) -> Option<String> {
		self.0.lock().last().cloned()
	}

	/// Returns how many navigations were requested.
	pub fn count(&self) -> usize {
		self.0.lock().len()
	}
}
impl LoginNavigator for MemoryNavigator {
	fn navigate(&self, location: &str) {
		self.0.lock().push(location.to_owned());
	}
}
