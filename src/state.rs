//! Per-configuration flow flags shared between the login orchestrator and the
//! silent-renew subsystem.

// self
use crate::{_prelude::*, config::ConfigId};

/// Mutable flags tracked for one configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowState {
	/// Set right before a successful authorize-URL dispatch.
	pub code_flow_in_progress: bool,
	/// Set by the silent-renew subsystem while a background refresh runs.
	pub silent_renew_running: bool,
}

/// Keyed flow-state writes performed by the login orchestrator.
///
/// Implementations trust the orchestrator to call these at the correct pipeline
/// points and must tolerate repeated calls with the same state.
pub trait FlowStateStore
where
	Self: Send + Sync,
{
	/// Marks a code-flow login as underway for the configuration.
	fn set_code_flow_in_progress(&self, config_id: &ConfigId);

	/// Clears the silent-renew flag; a fresh interactive login supersedes any
	/// in-flight renewal.
	fn reset_silent_renew_running(&self, config_id: &ConfigId);
}

type StateMap = Arc<RwLock<HashMap<ConfigId, FlowState>>>;

/// Thread-safe in-process [`FlowStateStore`] with lazily created entries.
///
/// Besides the orchestrator-facing trait it carries the silent-renew side of the
/// contract plus read accessors, so one store instance serves both subsystems
/// for the application session.
#[derive(Clone, Debug, Default)]
pub struct MemoryFlowStateStore(StateMap);
impl MemoryFlowStateStore {
	/// Returns the flags for a configuration, or `None` when never touched.
	pub fn state_of(&self, config_id: &ConfigId) -> Option<FlowState> {
		self.0.read().get(config_id).copied()
	}

	/// Checks whether a code-flow login is currently marked as underway.
	pub fn is_code_flow_in_progress(&self, config_id: &ConfigId) -> bool {
		self.state_of(config_id).is_some_and(|state| state.code_flow_in_progress)
	}

	/// Checks whether a silent renew is currently marked as running.
	pub fn is_silent_renew_running(&self, config_id: &ConfigId) -> bool {
		self.state_of(config_id).is_some_and(|state| state.silent_renew_running)
	}

	/// Marks a silent renew as running for the configuration.
	pub fn set_silent_renew_running(&self, config_id: &ConfigId) {
		self.update(config_id, |state| state.silent_renew_running = true);
	}

	/// Clears the code-flow flag once the callback subsystem finishes a login.
	pub fn reset_code_flow_in_progress(&self, config_id: &ConfigId) {
		self.update(config_id, |state| state.code_flow_in_progress = false);
	}

	fn update(&self, config_id: &ConfigId, apply: impl FnOnce(&mut FlowState)) {
		let mut guard = self.0.write();
		let state = guard.entry(config_id.clone()).or_default();

		apply(state);
	}
}
impl FlowStateStore for MemoryFlowStateStore {
	fn set_code_flow_in_progress(&self, config_id: &ConfigId) {
		self.update(config_id, |state| state.code_flow_in_progress = true);
	}

	fn reset_silent_renew_running(&self, config_id: &ConfigId) {
		self.update(config_id, |state| state.silent_renew_running = false);
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn entries_are_created_lazily() {
		let store = MemoryFlowStateStore::default();
		let config_id = ConfigId::new("config-1").expect("Identifier fixture should be valid.");

		assert_eq!(store.state_of(&config_id), None);

		FlowStateStore::reset_silent_renew_running(&store, &config_id);

		assert_eq!(
			store.state_of(&config_id),
			Some(FlowState { code_flow_in_progress: false, silent_renew_running: false })
		);
	}

	#[test]
	fn writes_are_idempotent() {
		let store = MemoryFlowStateStore::default();
		let config_id = ConfigId::new("config-1").expect("Identifier fixture should be valid.");

		FlowStateStore::set_code_flow_in_progress(&store, &config_id);
		FlowStateStore::set_code_flow_in_progress(&store, &config_id);

		assert!(store.is_code_flow_in_progress(&config_id));

		store.set_silent_renew_running(&config_id);
		FlowStateStore::reset_silent_renew_running(&store, &config_id);
		FlowStateStore::reset_silent_renew_running(&store, &config_id);

		assert!(!store.is_silent_renew_running(&config_id));
		assert!(store.is_code_flow_in_progress(&config_id));
	}

	#[test]
	fn configurations_do_not_share_state() {
		let store = MemoryFlowStateStore::default();
		let first = ConfigId::new("config-1").expect("Identifier fixture should be valid.");
		let second = ConfigId::new("config-2").expect("Identifier fixture should be valid.");

		FlowStateStore::set_code_flow_in_progress(&store, &first);

		assert!(store.is_code_flow_in_progress(&first));
		assert!(!store.is_code_flow_in_progress(&second));
		assert_eq!(store.state_of(&second), None);
	}
}
