//! BirthdateView: asks the platform user for their birthdate with three scroll pickers.

use chrono::{Datelike, Month, NaiveDate, Utc};
use maud::html;
use tma_core::{Rendered, Result, TmaError, View, ViewInputs};
use tma_picker::{PickerOption, ScrollPicker};
use tracing::{info, instrument};

use super::{birthdate_key, ViewContext};
use crate::routes::BIRTHDATE_VIEW;

pub const FIRST_YEAR: i32 = 1900;

pub struct BirthdateView {
    context: ViewContext,
}

impl BirthdateView {
    pub fn new(context: ViewContext) -> Self {
        Self { context }
    }

    fn saved_or_default(&self) -> Result<NaiveDate> {
        let saved = match self.context.platform.user() {
            Some(user) => self
                .context
                .store
                .get::<NaiveDate>(&birthdate_key(&user.id.to_string()))?,
            None => None,
        };
        match saved {
            Some(date) => Ok(date),
            None => NaiveDate::from_ymd_opt(2000, 1, 1)
                .ok_or_else(|| TmaError::View("default birthdate".to_string())),
        }
    }

    fn month_picker(&self) -> ScrollPicker<u32> {
        let options = (1..=12u8)
            .filter_map(|m| Month::try_from(m).ok())
            .map(|m| PickerOption::new(m.name(), m.number_from_month()))
            .collect();
        self.context.picker.picker(options)
    }

    /// Validates and saves the birthdate of the current platform user. Returns the user id.
    #[instrument(skip(self))]
    pub fn submit(&self, day: u32, month: u32, year: i32) -> Result<String> {
        let user = self
            .context
            .platform
            .user()
            .ok_or_else(|| TmaError::View("no platform user to save a birthdate for".to_string()))?;

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| TmaError::View(format!("{}-{}-{} is not a calendar date", year, month, day)))?;
        if year < FIRST_YEAR || date > Utc::now().date_naive() {
            return Err(TmaError::View(format!("birthdate {} out of range", date)));
        }

        let user_id = user.id.to_string();
        self.context.store.set(birthdate_key(&user_id), &date)?;
        info!(user_id = %user_id, birthdate = %date, "step: birthdate saved");
        Ok(user_id)
    }
}

impl View for BirthdateView {
    fn name(&self) -> &'static str {
        BIRTHDATE_VIEW
    }

    fn render(&self, _inputs: &ViewInputs) -> Result<Rendered> {
        let selected = self.saved_or_default()?;
        let widget = &self.context.picker;
        let this_year = Utc::now().year().max(FIRST_YEAR);

        let mut day = widget.range(1, 31);
        let mut month = self.month_picker();
        let mut year = widget.range(FIRST_YEAR as u32, this_year as u32);
        let selections = [
            day.select_value(&selected.day()),
            month.select_value(&selected.month()),
            year.select_value(&(selected.year() as u32)),
        ];
        for result in selections {
            result.map_err(|e| TmaError::View(e.to_string()))?;
        }

        let greeting = self
            .context
            .platform
            .user()
            .map(|u| u.full_name())
            .unwrap_or_else(|| "guest".to_string());

        let markup = html! {
            section class="birthdate-view" data-view=(BIRTHDATE_VIEW) data-theme=(self.context.platform.color_scheme().as_str()) {
                h1 { "Hello, " (greeting) "!" }
                p { "When is your birthday?" }
                div class="pickers" {
                    (day.render("day"))
                    (month.render("month"))
                    (year.render("year"))
                }
                button type="submit" { "Save" }
            }
        };
        Ok(Rendered::new(BIRTHDATE_VIEW, markup.into_string()))
    }
}
