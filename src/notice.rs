/// Follow-up the shell should report back when the user taps a notice
/// action button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoticeAction {
    RequestPermission,
    OpenAppSettings,
}

/// User-facing prompts raised by the controller. Transient notices are
/// toast-style and dismiss themselves; the others stay up until acted on.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Notice {
    /// Location settings cannot be fixed from inside the app.
    AdjustSettingsManually,
    /// Why we are about to ask for the location permission again.
    PermissionRationale,
    /// Permission denied; the only way back is the system settings page.
    PermissionDeniedOpenSettings,
}

impl Notice {
    pub fn message(&self) -> &'static str {
        match self {
            Notice::AdjustSettingsManually => "Adjust location settings on your device",
            Notice::PermissionRationale => "Location permission is needed for app functionality",
            Notice::PermissionDeniedOpenSettings => "Turn on location on settings",
        }
    }

    pub fn action_label(&self) -> Option<&'static str> {
        match self {
            Notice::AdjustSettingsManually => None,
            Notice::PermissionRationale => Some("Ok"),
            Notice::PermissionDeniedOpenSettings => Some("Settings"),
        }
    }

    pub fn action(&self) -> Option<NoticeAction> {
        match self {
            Notice::AdjustSettingsManually => None,
            Notice::PermissionRationale => Some(NoticeAction::RequestPermission),
            Notice::PermissionDeniedOpenSettings => Some(NoticeAction::OpenAppSettings),
        }
    }

    pub fn is_transient(&self) -> bool {
        self.action().is_none()
    }
}

#[cfg(test)]
mod tests {
    use crate::notice::{Notice, NoticeAction};

    #[test]
    fn actions_match_labels() {
        for notice in [
            Notice::AdjustSettingsManually,
            Notice::PermissionRationale,
            Notice::PermissionDeniedOpenSettings,
        ] {
            assert_eq!(notice.action().is_some(), notice.action_label().is_some());
        }
        assert_eq!(
            Notice::PermissionDeniedOpenSettings.action(),
            Some(NoticeAction::OpenAppSettings)
        );
        assert!(Notice::AdjustSettingsManually.is_transient());
    }
}
