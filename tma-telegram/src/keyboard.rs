//! Inline keyboards that open the mini app from a bot chat.

pub use teloxide::types::InlineKeyboardMarkup;
use teloxide::types::{InlineKeyboardButton, WebAppInfo};
use url::Url;

pub const CREATE_PROFILE_TEXT: &str = "Create your profile";
pub const VIEW_PROFILE_TEXT: &str = "View this profile";

/// Web-app URL for an in-app href: origin of `webapp_url`, path and query from `href`.
pub fn web_app_url(webapp_url: &Url, href: &str) -> Url {
    let mut url = webapp_url.clone();
    let (path, query) = match href.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (href, None),
    };
    url.set_path(path);
    url.set_query(query);
    url.set_fragment(None);
    url
}

/// Start keyboard: "create profile" opens the app root; with `profile_link`, a "view profile" row comes first.
pub fn start_keyboard(webapp_url: &Url, profile_link: Option<Url>) -> InlineKeyboardMarkup {
    let mut rows = vec![vec![InlineKeyboardButton::web_app(
        CREATE_PROFILE_TEXT,
        WebAppInfo {
            url: webapp_url.clone(),
        },
    )]];

    if let Some(link) = profile_link {
        rows.insert(
            0,
            vec![InlineKeyboardButton::web_app(
                VIEW_PROFILE_TEXT,
                WebAppInfo { url: link },
            )],
        );
    }

    InlineKeyboardMarkup::new(rows)
}
