//! Application bootstrap: ordered capability registration, then mount.
//!
//! Registration order is fixed: platform, picker, store, router. Any registration error moves the
//! bootstrap to `Failed` and mount is refused. States never move backwards.

use std::fmt;
use std::sync::Arc;

use tma_core::{PlatformBridge, Rendered, Result, RouteError, Store, TmaError};
use tma_picker::PickerWidget;
use tma_router::{ResolvedRoute, RouteParams, Router};
use tracing::{info, instrument, warn};

use crate::document::{element_id, HostDocument};
use crate::routes::{ViewKind, BIRTHDATE_VIEW, PROFILE_VIEW, USER_ID_PARAM};
use crate::views::{ViewContext, Views};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapState {
    Unconfigured,
    Configuring,
    Mounted,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    Platform,
    Picker,
    Store,
    Router,
}

/// The only accepted registration order.
pub const REGISTRATION_ORDER: [CapabilityKind; 4] = [
    CapabilityKind::Platform,
    CapabilityKind::Picker,
    CapabilityKind::Store,
    CapabilityKind::Router,
];

/// A capability handed to the bootstrap.
pub enum Capability {
    Platform(Arc<dyn PlatformBridge>),
    Picker(Arc<PickerWidget>),
    Store(Arc<Store>),
    Router(Router<ViewKind>),
}

impl Capability {
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Capability::Platform(_) => CapabilityKind::Platform,
            Capability::Picker(_) => CapabilityKind::Picker,
            Capability::Store(_) => CapabilityKind::Store,
            Capability::Router(_) => CapabilityKind::Router,
        }
    }
}

/// Single-use initialization sequence.
pub struct Bootstrap {
    mount_selector: String,
    state: BootstrapState,
    registered: Vec<CapabilityKind>,
    platform: Option<Arc<dyn PlatformBridge>>,
    picker: Option<Arc<PickerWidget>>,
    store: Option<Arc<Store>>,
    router: Option<Router<ViewKind>>,
}

impl Bootstrap {
    /// Creates an unconfigured bootstrap that will mount onto `mount_selector` (e.g. `#app`).
    pub fn new(mount_selector: &str) -> Self {
        Self {
            mount_selector: mount_selector.to_string(),
            state: BootstrapState::Unconfigured,
            registered: Vec::new(),
            platform: None,
            picker: None,
            store: None,
            router: None,
        }
    }

    pub fn state(&self) -> BootstrapState {
        self.state
    }

    pub fn registered(&self) -> &[CapabilityKind] {
        &self.registered
    }

    fn fail(&mut self, reason: String) -> TmaError {
        warn!(reason = %reason, "step: bootstrap failed");
        self.state = BootstrapState::Failed;
        TmaError::Registration(reason)
    }

    /// Registers the next capability. Out-of-order or repeated registration fails the bootstrap.
    #[instrument(skip(self, capability), fields(kind = ?capability.kind()))]
    pub fn register(&mut self, capability: Capability) -> Result<()> {
        match self.state {
            BootstrapState::Unconfigured | BootstrapState::Configuring => {}
            state => {
                return Err(TmaError::Registration(format!(
                    "cannot register in state {:?}",
                    state
                )))
            }
        }

        let kind = capability.kind();
        let expected = REGISTRATION_ORDER.get(self.registered.len()).copied();
        if expected != Some(kind) {
            return Err(self.fail(format!("expected {:?}, got {:?}", expected, kind)));
        }

        match capability {
            Capability::Platform(platform) => self.platform = Some(platform),
            Capability::Picker(picker) => self.picker = Some(picker),
            Capability::Store(store) => self.store = Some(store),
            Capability::Router(router) => self.router = Some(router),
        }
        self.registered.push(kind);
        self.state = BootstrapState::Configuring;
        info!(kind = ?kind, "step: capability registered");
        Ok(())
    }

    /// Builds a capability with `make` and registers it; a build error fails the bootstrap.
    pub fn register_with<F>(&mut self, make: F) -> Result<()>
    where
        F: FnOnce() -> Result<Capability>,
    {
        match make() {
            Ok(capability) => self.register(capability),
            Err(e) => Err(self.fail(format!("capability construction failed: {}", e))),
        }
    }

    /// Mounts onto the host document. Requires all four capabilities and the anchor element.
    #[instrument(skip(self, document), fields(selector = %self.mount_selector))]
    pub fn mount(&mut self, document: Arc<dyn HostDocument>) -> Result<Application> {
        if self.state != BootstrapState::Configuring || self.registered.len() != REGISTRATION_ORDER.len() {
            let missing: Vec<_> = REGISTRATION_ORDER
                .iter()
                .filter(|k| !self.registered.contains(*k))
                .collect();
            let reason = format!("cannot mount in state {:?}, missing {:?}", self.state, missing);
            return Err(if self.state == BootstrapState::Failed {
                TmaError::Registration(reason)
            } else {
                self.fail(reason)
            });
        }

        let anchor = match element_id(&self.mount_selector) {
            Ok(id) => id.to_string(),
            Err(e) => {
                self.state = BootstrapState::Failed;
                return Err(e);
            }
        };
        if !document.has_element(&anchor) {
            self.state = BootstrapState::Failed;
            return Err(TmaError::MountTargetMissing(self.mount_selector.clone()));
        }

        let (Some(platform), Some(picker), Some(store), Some(router)) = (
            self.platform.take(),
            self.picker.take(),
            self.store.take(),
            self.router.take(),
        ) else {
            return Err(self.fail("capability slots empty after registration".to_string()));
        };

        let context = ViewContext {
            platform,
            picker,
            store,
        };
        let mut app = Application {
            views: Views::new(&context),
            context,
            router,
            document,
            anchor,
            rendered: None,
        };

        if let Err(e) = app.start() {
            self.state = BootstrapState::Failed;
            return Err(e);
        }
        self.state = BootstrapState::Mounted;
        info!("step: application mounted");
        Ok(app)
    }
}

/// A mounted application. Owns the router; views hold their injected capabilities.
pub struct Application {
    context: ViewContext,
    views: Views,
    router: Router<ViewKind>,
    document: Arc<dyn HostDocument>,
    anchor: String,
    rendered: Option<Rendered>,
}

impl fmt::Debug for Application {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Application")
            .field("anchor", &self.anchor)
            .field("location", &self.router.current_location())
            .field("current", &self.router.current().map(|r| &r.name))
            .finish_non_exhaustive()
    }
}

impl Application {
    /// Signals the host, then activates the host's current location.
    ///
    /// An unmatched initial location is replaced by `/`. On `/`, a start param opens that profile.
    fn start(&mut self) -> Result<()> {
        self.context.platform.ready()?;
        self.context.platform.expand()?;

        let location = self.document.location();
        let initial = match self.router.resolve(&location) {
            Ok(_) => location,
            Err(RouteError::NotFound(_)) => {
                warn!(location = %location, "step: initial location not found, redirecting to /");
                self.router.href(BIRTHDATE_VIEW, &RouteParams::new())?
            }
            Err(e) => return Err(e.into()),
        };
        self.activate(&initial, true)?;

        let on_root = self
            .router
            .current()
            .is_some_and(|r| r.component == ViewKind::Birthdate);
        if let Some(start_param) = self.context.platform.start_param().filter(|p| !p.is_empty()) {
            if on_root {
                let href = self.profile_href(&start_param)?;
                info!(start_param = %start_param, "step: opening profile from start param");
                self.activate(&href, false)?;
            }
        }
        Ok(())
    }

    /// Navigates to `location` (host form, base included when configured).
    ///
    /// Unknown locations fail with `RouteError::NotFound`; the current view, location and history stay as they were.
    #[instrument(skip(self))]
    pub fn navigate(&mut self, location: &str) -> Result<&Rendered> {
        self.activate(location, false)
    }

    /// Goes back one history entry. `Ok(None)` at the start of history.
    pub fn back(&mut self) -> Result<Option<&Rendered>> {
        self.step(-1)
    }

    pub fn forward(&mut self) -> Result<Option<&Rendered>> {
        self.step(1)
    }

    /// Saves the platform user's birthdate and opens their profile.
    pub fn submit_birthdate(&mut self, day: u32, month: u32, year: i32) -> Result<&Rendered> {
        let user_id = self.views.birthdate().submit(day, month, year)?;
        let href = self.profile_href(&user_id)?;
        self.activate(&href, false)
    }

    pub fn current_route(&self) -> Option<&ResolvedRoute<ViewKind>> {
        self.router.current()
    }

    pub fn rendered(&self) -> Option<&Rendered> {
        self.rendered.as_ref()
    }

    pub fn router(&self) -> &Router<ViewKind> {
        &self.router
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.context.store
    }

    pub fn platform(&self) -> &Arc<dyn PlatformBridge> {
        &self.context.platform
    }

    /// Base-prefixed href of a user's profile.
    pub fn profile_href(&self, user_id: &str) -> Result<String> {
        let mut params = RouteParams::new();
        params.insert(USER_ID_PARAM.to_string(), user_id.to_string());
        Ok(self.router.href(PROFILE_VIEW, &params)?)
    }

    /// Clears application state. The application is not usable afterwards.
    pub fn teardown(self) {
        self.context.store.clear();
        info!("step: application torn down");
    }

    /// Resolves and renders before touching router state, so a failure activates nothing.
    fn activate(&mut self, location: &str, replace: bool) -> Result<&Rendered> {
        let resolved = self.router.resolve(location)?;
        let rendered = self.views.get(resolved.component).render(&resolved.inputs)?;
        if replace {
            self.router.replace(location)?;
        } else {
            self.router.push(location)?;
        }
        self.commit(rendered)
    }

    fn step(&mut self, delta: isize) -> Result<Option<&Rendered>> {
        let Some(resolved) = self.router.go(delta)?.cloned() else {
            return Ok(None);
        };
        let rendered = match self.views.get(resolved.component).render(&resolved.inputs) {
            Ok(rendered) => rendered,
            Err(e) => {
                self.router.go(-delta)?;
                return Err(e);
            }
        };
        self.commit(rendered).map(Some)
    }

    fn commit(&mut self, rendered: Rendered) -> Result<&Rendered> {
        self.document.set_content(&self.anchor, &rendered.markup)?;
        if let Some(location) = self.router.current_location() {
            self.document.set_location(location);
        }
        Ok(&*self.rendered.insert(rendered))
    }
}
