use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use anyhow::Result;

use crate::notice::Notice;
use crate::platform::{
    DisplaySurface, LocationSource, Permission, PermissionGateway, SettingsResolver,
};
use crate::request::UpdateRequestSpec;
use crate::view::ViewState;

/* The OS APIs live on the shell side of the bridge, so the collaborators
handed to the controller here do not talk to the OS at all. They queue
`PlatformCommand`s; the shell drains the queue, performs each action, and
reports outcomes back through the `on_*` entry points in `api`. */

/// A request from the core to the embedding shell to perform an OS-level
/// action on its behalf.
#[derive(Clone, Debug, PartialEq)]
pub enum PlatformCommand {
    CheckSettings { spec: UpdateRequestSpec },
    PromptResolution,
    RequestPermissions { permissions: Vec<Permission> },
    OpenAppSettings,
    Subscribe { spec: UpdateRequestSpec },
    Unsubscribe,
}

/// Last known OS permission state, pushed down by the shell with
/// `update_permission_state` whenever it changes.
#[derive(Clone, Debug, Default)]
pub struct PermissionSnapshot {
    pub fine_granted: bool,
    pub coarse_granted: bool,
    pub show_rationale: bool,
}

pub(crate) type CommandQueue = Arc<Mutex<VecDeque<PlatformCommand>>>;

pub(crate) struct HostPermissionGateway {
    pub snapshot: Arc<Mutex<PermissionSnapshot>>,
    pub commands: CommandQueue,
}

impl PermissionGateway for HostPermissionGateway {
    fn check_granted(&self, permission: Permission) -> bool {
        let snapshot = self.snapshot.lock().unwrap();
        match permission {
            Permission::FineLocation => snapshot.fine_granted,
            Permission::CoarseLocation => snapshot.coarse_granted,
        }
    }

    fn should_show_rationale(&self, _permission: Permission) -> bool {
        self.snapshot.lock().unwrap().show_rationale
    }

    fn request_grant(&self, permissions: &[Permission]) {
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::RequestPermissions {
                permissions: permissions.to_vec(),
            });
    }

    fn open_app_settings(&self) {
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::OpenAppSettings);
    }
}

pub(crate) struct HostSettingsResolver {
    pub commands: CommandQueue,
}

impl SettingsResolver for HostSettingsResolver {
    fn check_settings(&self, spec: &UpdateRequestSpec) {
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::CheckSettings { spec: spec.clone() });
    }

    fn prompt_resolution(&self) -> Result<()> {
        // Launching the dialog is the shell's job; queueing cannot fail.
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::PromptResolution);
        Ok(())
    }
}

pub(crate) struct HostLocationSource {
    pub commands: CommandQueue,
}

impl LocationSource for HostLocationSource {
    fn subscribe(&self, spec: &UpdateRequestSpec) {
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::Subscribe { spec: spec.clone() });
    }

    fn unsubscribe(&self) {
        self.commands
            .lock()
            .unwrap()
            .push_back(PlatformCommand::Unsubscribe);
    }
}

pub(crate) struct HostDisplay {
    pub view: Arc<Mutex<Option<ViewState>>>,
    pub notices: Arc<Mutex<Vec<Notice>>>,
}

impl DisplaySurface for HostDisplay {
    fn render(&self, view: &ViewState) {
        *self.view.lock().unwrap() = Some(view.clone());
    }

    fn show_notice(&self, notice: Notice) {
        self.notices.lock().unwrap().push(notice);
    }
}
