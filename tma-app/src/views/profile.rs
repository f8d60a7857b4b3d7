//! ProfileView: shows the saved birthdate of the user named by the `user_id` input.

use chrono::NaiveDate;
use maud::html;
use tma_core::{Rendered, Result, RouteError, View, ViewInputs};

use super::{birthdate_key, ViewContext};
use crate::routes::{PROFILE_VIEW, USER_ID_PARAM};

pub struct ProfileView {
    context: ViewContext,
}

impl ProfileView {
    pub fn new(context: ViewContext) -> Self {
        Self { context }
    }
}

impl View for ProfileView {
    fn name(&self) -> &'static str {
        PROFILE_VIEW
    }

    fn render(&self, inputs: &ViewInputs) -> Result<Rendered> {
        let user_id = inputs
            .get(USER_ID_PARAM)
            .ok_or_else(|| RouteError::MissingParam(USER_ID_PARAM.to_string()))?;
        let birthdate: Option<NaiveDate> = self.context.store.get(&birthdate_key(user_id))?;
        let own = self
            .context
            .platform
            .user()
            .is_some_and(|u| u.id.to_string() == user_id);

        let markup = html! {
            section class="profile-view" data-view=(PROFILE_VIEW) data-user-id=(user_id) {
                h1 { "Profile " (user_id) }
                @if own {
                    p class="own" { "This is your profile" }
                }
                @if let Some(date) = birthdate {
                    p class="birthdate" { "Birthday: " (date.format("%-d %B").to_string()) }
                } @else {
                    p class="empty" { "No birthdate saved yet" }
                }
            }
        };
        Ok(Rendered::new(PROFILE_VIEW, markup.into_string()))
    }
}
