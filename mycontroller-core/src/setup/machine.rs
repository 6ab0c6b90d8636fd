//! Setup handshake state machine
//!
//! The app announces itself with `-v`. With confirmation required, the
//! device only answers that it has settings and waits for `getSettings`;
//! without confirmation, `-v` starts the configuration burst directly.

use super::events::HandshakeEvent;

/// How the handshake answers the app's version query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SetupConfirmation {
    /// `-v` announces settings, `getSettings` sends them
    #[default]
    Required,
    /// `-v` sends settings immediately
    NotRequired,
}

/// Handshake phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakePhase {
    /// No handshake in progress
    #[default]
    Idle,
    /// Settings announced, waiting for `getSettings`
    AwaitingQuery,
    /// Configuration burst in progress
    Configuring,
}

/// Output the handshake must produce for a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeAction {
    /// Nothing to send
    None,
    /// Send `vc;hasSettings;1;`
    AnnounceSettings,
    /// Send the bracketed configuration burst
    SendConfiguration,
}

impl SetupConfirmation {
    /// Check if a handshake event starts handshake work in this mode
    pub fn is_trigger(self, event: HandshakeEvent) -> bool {
        match self {
            SetupConfirmation::Required => event.is_app_request(),
            SetupConfirmation::NotRequired => event == HandshakeEvent::VersionQuery,
        }
    }
}

impl HandshakePhase {
    /// Process an event and return the next phase with its output
    pub fn transition(
        self,
        mode: SetupConfirmation,
        event: HandshakeEvent,
    ) -> (Self, HandshakeAction) {
        use HandshakeAction::*;
        use HandshakeEvent::*;
        use HandshakePhase::*;
        use SetupConfirmation::*;

        match (self, mode, event) {
            // A new connection always restarts the exchange
            (_, _, Connected) => (Idle, None),

            (Configuring, _, ConfigurationSent) => (Idle, None),
            // Burst is synchronous, requests cannot interleave with it
            (Configuring, _, _) => (Configuring, None),

            (Idle | AwaitingQuery, Required, VersionQuery) => (AwaitingQuery, AnnounceSettings),
            // Reconnecting apps may skip the version query
            (Idle | AwaitingQuery, Required, SettingsRequest) => (Configuring, SendConfiguration),

            (Idle | AwaitingQuery, NotRequired, VersionQuery) => (Configuring, SendConfiguration),

            // Default: stay in current phase
            _ => (self, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confirmation_flow() {
        let mode = SetupConfirmation::Required;

        let (phase, action) = HandshakePhase::Idle.transition(mode, HandshakeEvent::VersionQuery);
        assert_eq!(phase, HandshakePhase::AwaitingQuery);
        assert_eq!(action, HandshakeAction::AnnounceSettings);

        let (phase, action) = phase.transition(mode, HandshakeEvent::SettingsRequest);
        assert_eq!(phase, HandshakePhase::Configuring);
        assert_eq!(action, HandshakeAction::SendConfiguration);

        let (phase, action) = phase.transition(mode, HandshakeEvent::ConfigurationSent);
        assert_eq!(phase, HandshakePhase::Idle);
        assert_eq!(action, HandshakeAction::None);
    }

    #[test]
    fn test_no_confirmation_flow() {
        let mode = SetupConfirmation::NotRequired;

        let (phase, action) = HandshakePhase::Idle.transition(mode, HandshakeEvent::VersionQuery);
        assert_eq!(phase, HandshakePhase::Configuring);
        assert_eq!(action, HandshakeAction::SendConfiguration);
    }

    #[test]
    fn test_settings_request_ignored_without_confirmation() {
        let mode = SetupConfirmation::NotRequired;
        let (phase, action) =
            HandshakePhase::Idle.transition(mode, HandshakeEvent::SettingsRequest);
        assert_eq!(phase, HandshakePhase::Idle);
        assert_eq!(action, HandshakeAction::None);
    }

    #[test]
    fn test_repeated_version_query_reannounces() {
        let mode = SetupConfirmation::Required;
        let (phase, action) =
            HandshakePhase::AwaitingQuery.transition(mode, HandshakeEvent::VersionQuery);
        assert_eq!(phase, HandshakePhase::AwaitingQuery);
        assert_eq!(action, HandshakeAction::AnnounceSettings);
    }

    #[test]
    fn test_connected_resets_from_any_phase() {
        let phases = [
            HandshakePhase::Idle,
            HandshakePhase::AwaitingQuery,
            HandshakePhase::Configuring,
        ];

        for phase in phases {
            for mode in [SetupConfirmation::Required, SetupConfirmation::NotRequired] {
                let (next, action) = phase.transition(mode, HandshakeEvent::Connected);
                assert_eq!(next, HandshakePhase::Idle);
                assert_eq!(action, HandshakeAction::None);
            }
        }
    }

    #[test]
    fn test_triggers_per_mode() {
        assert!(SetupConfirmation::Required.is_trigger(HandshakeEvent::VersionQuery));
        assert!(SetupConfirmation::Required.is_trigger(HandshakeEvent::SettingsRequest));
        assert!(SetupConfirmation::NotRequired.is_trigger(HandshakeEvent::VersionQuery));
        assert!(!SetupConfirmation::NotRequired.is_trigger(HandshakeEvent::SettingsRequest));
    }
}
