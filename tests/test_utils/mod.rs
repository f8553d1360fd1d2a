use std::sync::{Arc, Mutex};

use anyhow::{bail, Result};
use pinpoint_core::controller::LocationUpdateController;
use pinpoint_core::notice::Notice;
use pinpoint_core::platform::{
    DisplaySurface, LocationSource, Permission, PermissionGateway, SettingsResolver,
    SettingsVerdict,
};
use pinpoint_core::request::UpdateRequestSpec;
use pinpoint_core::view::ViewState;

#[derive(Default)]
pub struct PermissionScript {
    pub fine_granted: bool,
    pub coarse_granted: bool,
    pub show_rationale: bool,
    pub grant_requests: Vec<Vec<Permission>>,
    pub open_settings_calls: usize,
}

pub struct FakePermissionGateway(pub Arc<Mutex<PermissionScript>>);

impl PermissionGateway for FakePermissionGateway {
    fn check_granted(&self, permission: Permission) -> bool {
        let script = self.0.lock().unwrap();
        match permission {
            Permission::FineLocation => script.fine_granted,
            Permission::CoarseLocation => script.coarse_granted,
        }
    }

    fn should_show_rationale(&self, _permission: Permission) -> bool {
        self.0.lock().unwrap().show_rationale
    }

    fn request_grant(&self, permissions: &[Permission]) {
        self.0
            .lock()
            .unwrap()
            .grant_requests
            .push(permissions.to_vec());
    }

    fn open_app_settings(&self) {
        self.0.lock().unwrap().open_settings_calls += 1;
    }
}

#[derive(Default)]
pub struct SettingsLog {
    pub check_calls: Vec<UpdateRequestSpec>,
    pub prompt_calls: usize,
    pub fail_prompt_launch: bool,
}

pub struct FakeSettingsResolver(pub Arc<Mutex<SettingsLog>>);

impl SettingsResolver for FakeSettingsResolver {
    fn check_settings(&self, spec: &UpdateRequestSpec) {
        self.0.lock().unwrap().check_calls.push(spec.clone());
    }

    fn prompt_resolution(&self) -> Result<()> {
        let mut log = self.0.lock().unwrap();
        log.prompt_calls += 1;
        if log.fail_prompt_launch {
            bail!("no activity to launch the resolution dialog from");
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct SourceLog {
    pub subscribe_calls: Vec<UpdateRequestSpec>,
    pub unsubscribe_calls: usize,
}

pub struct FakeLocationSource(pub Arc<Mutex<SourceLog>>);

impl LocationSource for FakeLocationSource {
    fn subscribe(&self, spec: &UpdateRequestSpec) {
        self.0.lock().unwrap().subscribe_calls.push(spec.clone());
    }

    fn unsubscribe(&self) {
        self.0.lock().unwrap().unsubscribe_calls += 1;
    }
}

#[derive(Default)]
pub struct Screen {
    pub views: Vec<ViewState>,
    pub notices: Vec<Notice>,
}

pub struct FakeDisplay(pub Arc<Mutex<Screen>>);

impl DisplaySurface for FakeDisplay {
    fn render(&self, view: &ViewState) {
        self.0.lock().unwrap().views.push(view.clone());
    }

    fn show_notice(&self, notice: Notice) {
        self.0.lock().unwrap().notices.push(notice);
    }
}

pub struct Harness {
    pub controller: LocationUpdateController,
    pub permissions: Arc<Mutex<PermissionScript>>,
    pub settings: Arc<Mutex<SettingsLog>>,
    pub source: Arc<Mutex<SourceLog>>,
    pub screen: Arc<Mutex<Screen>>,
}

impl Harness {
    /// Walk the happy path to an armed subscription.
    pub fn arm(&mut self) {
        self.controller.start();
        self.controller
            .on_settings_check_result(SettingsVerdict::Satisfied);
        assert!(self.controller.session().active());
    }

    pub fn last_view(&self) -> ViewState {
        self.screen
            .lock()
            .unwrap()
            .views
            .last()
            .cloned()
            .expect("nothing rendered yet")
    }
}

pub fn harness() -> Harness {
    let permissions = Arc::new(Mutex::new(PermissionScript::default()));
    let settings = Arc::new(Mutex::new(SettingsLog::default()));
    let source = Arc::new(Mutex::new(SourceLog::default()));
    let screen = Arc::new(Mutex::new(Screen::default()));
    let controller = LocationUpdateController::new(
        Box::new(FakePermissionGateway(permissions.clone())),
        Box::new(FakeSettingsResolver(settings.clone())),
        Box::new(FakeLocationSource(source.clone())),
        Box::new(FakeDisplay(screen.clone())),
    );
    Harness {
        controller,
        permissions,
        settings,
        source,
        screen,
    }
}

pub fn harness_with_grant() -> Harness {
    let harness = harness();
    harness.permissions.lock().unwrap().fine_granted = true;
    harness
}
