//! Events that drive the setup handshake

use mycontroller_protocol::command::{GET_SETTINGS, VERSION_QUERY};

/// Events that can trigger handshake transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HandshakeEvent {
    /// App asked whether settings exist (`-v`)
    VersionQuery,
    /// App asked for the settings (`getSettings`)
    SettingsRequest,
    /// Configuration burst finished
    ConfigurationSent,
    /// Transport reported a fresh connection
    Connected,
}

impl HandshakeEvent {
    /// Map a command name to the handshake event it carries
    pub fn from_command(name: &str) -> Option<Self> {
        match name {
            VERSION_QUERY => Some(HandshakeEvent::VersionQuery),
            GET_SETTINGS => Some(HandshakeEvent::SettingsRequest),
            _ => None,
        }
    }

    /// Check if this event comes from the app
    pub fn is_app_request(&self) -> bool {
        matches!(
            self,
            HandshakeEvent::VersionQuery | HandshakeEvent::SettingsRequest
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_command() {
        assert_eq!(
            HandshakeEvent::from_command("-v"),
            Some(HandshakeEvent::VersionQuery)
        );
        assert_eq!(
            HandshakeEvent::from_command("getSettings"),
            Some(HandshakeEvent::SettingsRequest)
        );
        assert_eq!(HandshakeEvent::from_command("v"), None);
        assert_eq!(HandshakeEvent::from_command("getsettings"), None);
    }

    #[test]
    fn test_app_requests() {
        assert!(HandshakeEvent::VersionQuery.is_app_request());
        assert!(!HandshakeEvent::Connected.is_app_request());
    }
}
