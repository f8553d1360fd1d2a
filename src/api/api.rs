use std::collections::VecDeque;
use std::sync::{Arc, Mutex, OnceLock};

use flutter_rust_bridge::frb;

use crate::controller::LocationUpdateController;
use crate::fix::Fix;
use crate::logs;
use crate::notice::{Notice, NoticeAction};
use crate::platform::{PermissionDecision, SettingsVerdict};
use crate::view::ViewState;

use super::platform_proxy::{
    CommandQueue, HostDisplay, HostLocationSource, HostPermissionGateway, HostSettingsResolver,
    PermissionSnapshot, PlatformCommand,
};

struct MainState {
    controller: Mutex<LocationUpdateController>,
    commands: CommandQueue,
    permissions: Arc<Mutex<PermissionSnapshot>>,
    view: Arc<Mutex<Option<ViewState>>>,
    notices: Arc<Mutex<Vec<Notice>>>,
}

static MAIN_STATE: OnceLock<MainState> = OnceLock::new();

pub fn init(cache_dir: String) {
    let mut already_initialized = true;
    MAIN_STATE.get_or_init(|| {
        already_initialized = false;

        logs::init(&cache_dir).expect("Failed to initialize logging");

        let commands: CommandQueue = Arc::new(Mutex::new(VecDeque::new()));
        let permissions = Arc::new(Mutex::new(PermissionSnapshot::default()));
        let view = Arc::new(Mutex::new(None));
        let notices = Arc::new(Mutex::new(Vec::new()));

        let controller = LocationUpdateController::new(
            Box::new(HostPermissionGateway {
                snapshot: permissions.clone(),
                commands: commands.clone(),
            }),
            Box::new(HostSettingsResolver {
                commands: commands.clone(),
            }),
            Box::new(HostLocationSource {
                commands: commands.clone(),
            }),
            Box::new(HostDisplay {
                view: view.clone(),
                notices: notices.clone(),
            }),
        );
        info!("initialized");

        MainState {
            controller: Mutex::new(controller),
            commands,
            permissions,
            view,
            notices,
        }
    });
    if already_initialized {
        warn!("`init` is called multiple times");
    }
}

fn get() -> &'static MainState {
    MAIN_STATE.get().expect("main state is not initialized")
}

pub fn start_location_update() {
    get().controller.lock().unwrap().start();
}

pub fn stop_location_update() {
    get().controller.lock().unwrap().stop();
}

/// The platform may deliver a whole batch of fixes at once; they are applied
/// in order so the newest entry wins the display.
pub fn on_location_update(fixes: Vec<Fix>, received_timestamp_ms: i64) {
    let mut controller = get().controller.lock().unwrap();
    for fix in &fixes {
        controller.on_fix_received(fix, received_timestamp_ms);
    }
}

pub fn on_settings_check_result(verdict: SettingsVerdict) {
    get()
        .controller
        .lock()
        .unwrap()
        .on_settings_check_result(verdict);
}

pub fn on_settings_resolution(approved: bool) {
    get()
        .controller
        .lock()
        .unwrap()
        .on_settings_resolution(approved);
}

pub fn on_unsubscribe_complete() {
    get().controller.lock().unwrap().on_unsubscribe_complete();
}

/// Raw grant results as the platform reports them: an empty list means the
/// request was cancelled, otherwise element 0 is the fine-location grant.
/// The shell should push the refreshed snapshot via
/// `update_permission_state` before calling this.
pub fn on_permission_result(granted_flags: Vec<bool>) {
    let decision = match granted_flags.first().copied() {
        None => PermissionDecision::Cancelled,
        Some(true) => PermissionDecision::Granted,
        Some(false) => PermissionDecision::Denied,
    };
    get()
        .controller
        .lock()
        .unwrap()
        .on_permission_result(decision);
}

pub fn update_permission_state(fine_granted: bool, coarse_granted: bool, show_rationale: bool) {
    *get().permissions.lock().unwrap() = PermissionSnapshot {
        fine_granted,
        coarse_granted,
        show_rationale,
    };
}

pub fn notify_foreground_resume() {
    get().controller.lock().unwrap().on_foreground_resume();
}

pub fn notify_foreground_pause() {
    get().controller.lock().unwrap().on_foreground_pause();
}

pub fn perform_notice_action(action: NoticeAction) {
    get().controller.lock().unwrap().on_notice_action(action);
}

#[frb(sync)]
pub fn current_view() -> ViewState {
    let state = get();
    let cached = state.view.lock().unwrap().clone();
    match cached {
        Some(view) => view,
        None => state.controller.lock().unwrap().view(),
    }
}

pub fn take_platform_commands() -> Vec<PlatformCommand> {
    get().commands.lock().unwrap().drain(..).collect()
}

pub fn take_notices() -> Vec<Notice> {
    std::mem::take(&mut *get().notices.lock().unwrap())
}
