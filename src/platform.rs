use anyhow::Result;
use strum_macros::Display;

use crate::notice::Notice;
use crate::request::UpdateRequestSpec;
use crate::view::ViewState;

/// Runtime location permissions the controller cares about.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Permission {
    FineLocation,
    CoarseLocation,
}

/// Outcome of a device location-settings check, delivered back to the
/// controller via `on_settings_check_result`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Display)]
pub enum SettingsVerdict {
    /// Settings already satisfy the update request.
    Satisfied,
    /// Settings are insufficient but the platform can offer a dialog that
    /// fixes them without leaving the app.
    Resolvable,
    /// Settings are insufficient and only a manual change can fix them.
    Unresolvable,
}

/// Outcome of a permission grant request, delivered back via
/// `on_permission_result`. `Cancelled` is the platform reporting an empty
/// result (the user dismissed the dialog).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PermissionDecision {
    Cancelled,
    Granted,
    Denied,
}

/// OS-level runtime permission state. `check_granted` and
/// `should_show_rationale` are synchronous reads; `request_grant` is
/// fire-and-forget with the decision delivered via `on_permission_result`.
pub trait PermissionGateway {
    fn check_granted(&self, permission: Permission) -> bool;
    fn should_show_rationale(&self, permission: Permission) -> bool;
    fn request_grant(&self, permissions: &[Permission]);
    /// Deep link into the system settings page for this app, for recovery
    /// after a denial.
    fn open_app_settings(&self);
}

/// Device location-settings validation. `check_settings` is fire-and-forget
/// with the verdict delivered via `on_settings_check_result`;
/// `prompt_resolution` launches the system resolution dialog (decision
/// delivered via `on_settings_resolution`) and fails only when the dialog
/// cannot be launched at all.
pub trait SettingsResolver {
    fn check_settings(&self, spec: &UpdateRequestSpec);
    fn prompt_resolution(&self) -> Result<()>;
}

/// The platform service emitting periodic position fixes. Subscribing again
/// replaces the previous registration; `unsubscribe` is acknowledged
/// asynchronously via `on_unsubscribe_complete`.
pub trait LocationSource {
    fn subscribe(&self, spec: &UpdateRequestSpec);
    fn unsubscribe(&self);
}

/// The screen. Receives a full derived snapshot on every refresh plus the
/// occasional user-facing prompt.
pub trait DisplaySurface {
    fn render(&self, view: &ViewState);
    fn show_notice(&self, notice: Notice);
}
