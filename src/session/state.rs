//! Session initialization state machine.

/// Initialization state of a [`crate::SessionStore`].
///
/// The original tri-valued flag (unknown / configured / started) is modeled
/// as an explicit enum so the boot guard has no hidden states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InitState {
    /// No configuration has been applied yet.
    #[default]
    Uninitialized,
    /// Configuration is applied but the backing storage is not started.
    Configured,
    /// The backing storage is active and the store is usable.
    Started,
}

impl InitState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - Uninitialized -> Configured
    /// - Uninitialized -> Started (auto-start or external start)
    /// - Configured -> Started
    pub fn can_transition_to(&self, target: InitState) -> bool {
        use InitState::*;
        matches!(
            (*self, target),
            (Uninitialized, Configured) | (Uninitialized, Started) | (Configured, Started)
        )
    }

    /// Check if the store is ready for data access.
    pub fn is_started(&self) -> bool {
        matches!(self, InitState::Started)
    }

    /// Check if configuration still needs to be applied.
    pub fn needs_config(&self) -> bool {
        matches!(self, InitState::Uninitialized)
    }
}
