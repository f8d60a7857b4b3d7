//! The app's route table: `/` → BirthdateView, `/profile/:user_id` → ProfileView (params forwarded).

use tma_core::RouteError;
use tma_router::{RouteDescriptor, RouteTable};

pub const BIRTHDATE_VIEW: &str = "BirthdateView";
pub const PROFILE_VIEW: &str = "ProfileView";
/// Path parameter carrying the profile owner's id.
pub const USER_ID_PARAM: &str = "user_id";

/// Component reference stored in the route table; resolved to a constructed view by the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Birthdate,
    Profile,
}

/// Builds the route table. Same input, same table: safe to call once per application.
pub fn route_table() -> Result<RouteTable<ViewKind>, RouteError> {
    RouteTable::new(vec![
        RouteDescriptor::new("/", BIRTHDATE_VIEW, ViewKind::Birthdate)?,
        RouteDescriptor::new("/profile/:user_id", PROFILE_VIEW, ViewKind::Profile)?.with_props(true),
    ])
}
