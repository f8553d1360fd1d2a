use crate::fix::{Fix, LatestFix};
use crate::notice::{Notice, NoticeAction};
use crate::platform::{
    DisplaySurface, LocationSource, Permission, PermissionDecision, PermissionGateway,
    SettingsResolver, SettingsVerdict,
};
use crate::request::UpdateRequestSpec;
use crate::view::ViewState;

/* The lifecycle of a location-update subscription.

`start` walks a linear callback chain: permission gate -> settings check ->
arm the fix stream. Every asynchronous answer from the platform comes back
through one of the `on_*` methods below, and every state transition ends
with the screen re-rendered from current state.

The session separates what the user wants (`desired_active`) from what the
platform is doing (`state`). Intent survives a foreground pause and a
permission round-trip so the subscription can be re-armed; it is dropped
when the user explicitly stops, declines the settings dialog, or the
settings turn out to be unfixable. */

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrackingState {
    /// No subscription.
    Idle,
    /// Settings verification in flight, or the resolution dialog is up.
    CheckingSettings,
    /// Subscribed, receiving fixes.
    Active,
}

pub struct TrackingSession {
    state: TrackingState,
    desired_active: bool,
}

impl TrackingSession {
    fn new() -> Self {
        TrackingSession {
            state: TrackingState::Idle,
            desired_active: false,
        }
    }

    pub fn state(&self) -> TrackingState {
        self.state
    }

    /// True iff a live subscription to the location source exists.
    pub fn active(&self) -> bool {
        self.state == TrackingState::Active
    }

    pub fn desired_active(&self) -> bool {
        self.desired_active
    }
}

pub struct LocationUpdateController {
    spec: UpdateRequestSpec,
    session: TrackingSession,
    latest_fix: Option<LatestFix>,
    permissions: Box<dyn PermissionGateway + Send>,
    settings: Box<dyn SettingsResolver + Send>,
    source: Box<dyn LocationSource + Send>,
    display: Box<dyn DisplaySurface + Send>,
}

impl LocationUpdateController {
    pub fn new(
        permissions: Box<dyn PermissionGateway + Send>,
        settings: Box<dyn SettingsResolver + Send>,
        source: Box<dyn LocationSource + Send>,
        display: Box<dyn DisplaySurface + Send>,
    ) -> Self {
        LocationUpdateController {
            spec: UpdateRequestSpec::new(),
            session: TrackingSession::new(),
            latest_fix: None,
            permissions,
            settings,
            source,
            display,
        }
    }

    pub fn spec(&self) -> &UpdateRequestSpec {
        &self.spec
    }

    pub fn session(&self) -> &TrackingSession {
        &self.session
    }

    pub fn latest_fix(&self) -> Option<&LatestFix> {
        self.latest_fix.as_ref()
    }

    pub fn view(&self) -> ViewState {
        ViewState::derive(&self.session, &self.latest_fix)
    }

    /// Kick off (or re-arm) the update subscription. Idempotent in effect:
    /// calling while already active re-runs the whole chain and the
    /// re-subscription replaces the old registration.
    pub fn start(&mut self) {
        self.session.desired_active = true;

        // Known gap carried over from the first shipped flow: without a
        // grant we bail out silently here and wait for a permission result
        // or a foreground resume to pick the intent back up.
        if !self.permission_granted() {
            debug!("start requested without location permission, ignoring");
            return;
        }

        self.session.state = TrackingState::CheckingSettings;
        self.refresh_display();
        self.settings.check_settings(&self.spec);
    }

    /// Settings-check verdict, delivered asynchronously by the resolver.
    pub fn on_settings_check_result(&mut self, verdict: SettingsVerdict) {
        debug!("location settings verdict: {}", verdict);
        match verdict {
            SettingsVerdict::Satisfied => {
                // The grant can be revoked while the check is in flight.
                // The original flow returns here without prompting or
                // touching the screen; kept as-is.
                if !self.permission_granted() {
                    warn!("location permission disappeared during settings check");
                    return;
                }
                self.source.subscribe(&self.spec);
                self.session.state = TrackingState::Active;
                info!(
                    "location updates armed: priority={} interval={}ms min_interval={}ms",
                    self.spec.priority, self.spec.interval_ms, self.spec.min_interval_ms
                );
                self.refresh_display();
            }
            SettingsVerdict::Resolvable => {
                if let Err(e) = self.settings.prompt_resolution() {
                    // Not surfaced; the attempt just dies here and the user
                    // can tap start again.
                    error!("failed to launch settings resolution dialog: {:#}", e);
                    self.session.state = TrackingState::Idle;
                    self.refresh_display();
                }
                // Otherwise stay in CheckingSettings until the user decides.
            }
            SettingsVerdict::Unresolvable => {
                self.display.show_notice(Notice::AdjustSettingsManually);
                self.session.state = TrackingState::Idle;
                self.session.desired_active = false;
                self.refresh_display();
            }
        }
    }

    /// The user's answer to the settings resolution dialog.
    pub fn on_settings_resolution(&mut self, approved: bool) {
        if approved {
            debug!("user agreed to change location settings");
            self.start();
        } else {
            debug!("user declined to change location settings");
            self.session.state = TrackingState::Idle;
            self.session.desired_active = false;
            self.refresh_display();
        }
    }

    /// Tear down the subscription. No-op when there is nothing to tear down.
    pub fn stop(&mut self) {
        if !self.session.active() {
            return;
        }
        self.source.unsubscribe();

        // Flip the screen ahead of the unsubscribe ack; the ack repeats the
        // same transition and both writers land on Idle.
        self.session.state = TrackingState::Idle;
        self.session.desired_active = false;
        self.refresh_display();
    }

    /// Asynchronous acknowledgment of `unsubscribe`. Redundant with the
    /// optimistic flip in `stop`, and must not touch `desired_active`: a
    /// late ack after a foreground pause would otherwise cancel the re-arm.
    pub fn on_unsubscribe_complete(&mut self) {
        self.session.state = TrackingState::Idle;
        self.refresh_display();
    }

    /// A fix arrived. No active-session guard: a fix already in flight when
    /// the user stopped still lands here and refreshes the screen.
    pub fn on_fix_received(&mut self, fix: &Fix, received_timestamp_ms: i64) {
        self.latest_fix = Some(LatestFix::from_fix(fix, received_timestamp_ms));
        self.refresh_display();
    }

    pub fn on_foreground_resume(&mut self) {
        if self.session.desired_active && self.permission_granted() {
            self.start();
        } else if !self.permission_granted() {
            self.request_permission();
        }
    }

    /// The screen is leaving the foreground; tear everything down so we
    /// never track in the background. Intent survives for the next resume.
    pub fn on_foreground_pause(&mut self) {
        let desired = self.session.desired_active;
        self.stop();
        self.session.desired_active = desired;
    }

    /// Outcome of a permission grant request.
    pub fn on_permission_result(&mut self, decision: PermissionDecision) {
        match decision {
            PermissionDecision::Cancelled => {
                debug!("permission request was cancelled");
            }
            PermissionDecision::Granted => {
                if self.session.desired_active {
                    self.start();
                }
            }
            PermissionDecision::Denied => {
                self.display.show_notice(Notice::PermissionDeniedOpenSettings);
            }
        }
    }

    /// The user tapped a notice's action button.
    pub fn on_notice_action(&mut self, action: NoticeAction) {
        match action {
            NoticeAction::RequestPermission => {
                self.permissions.request_grant(&[Permission::FineLocation]);
            }
            NoticeAction::OpenAppSettings => {
                self.permissions.open_app_settings();
            }
        }
    }

    fn permission_granted(&self) -> bool {
        self.permissions.check_granted(Permission::FineLocation)
            || self.permissions.check_granted(Permission::CoarseLocation)
    }

    fn request_permission(&mut self) {
        if self
            .permissions
            .should_show_rationale(Permission::FineLocation)
        {
            self.display.show_notice(Notice::PermissionRationale);
        } else {
            self.permissions.request_grant(&[Permission::FineLocation]);
        }
    }

    fn refresh_display(&self) {
        self.display
            .render(&ViewState::derive(&self.session, &self.latest_fix));
    }
}
