//! Views and the capabilities injected into them.

mod birthdate;
mod profile;

pub use birthdate::BirthdateView;
pub use profile::ProfileView;

use std::sync::Arc;

use tma_core::{PlatformBridge, Store, View};
use tma_picker::PickerWidget;

use crate::routes::ViewKind;

/// Capabilities every view is constructed with.
#[derive(Clone)]
pub struct ViewContext {
    pub platform: Arc<dyn PlatformBridge>,
    pub picker: Arc<PickerWidget>,
    pub store: Arc<Store>,
}

/// Store key of a user's saved birthdate.
pub fn birthdate_key(user_id: &str) -> String {
    format!("birthdate:{}", user_id)
}

/// One constructed instance per view kind.
pub struct Views {
    birthdate: BirthdateView,
    profile: ProfileView,
}

impl Views {
    pub fn new(context: &ViewContext) -> Self {
        Self {
            birthdate: BirthdateView::new(context.clone()),
            profile: ProfileView::new(context.clone()),
        }
    }

    pub fn get(&self, kind: ViewKind) -> &dyn View {
        match kind {
            ViewKind::Birthdate => &self.birthdate,
            ViewKind::Profile => &self.profile,
        }
    }

    pub fn birthdate(&self) -> &BirthdateView {
        &self.birthdate
    }
}
