//! Adapters from Telegram WebApp user types to [`PlatformUser`].

use tma_core::PlatformUser;

use crate::init_data::WebAppUser;

/// Converts a transport-specific user type to [`PlatformUser`].
pub trait ToPlatformUser {
    fn to_platform_user(&self) -> PlatformUser;
}

impl ToPlatformUser for WebAppUser {
    fn to_platform_user(&self) -> PlatformUser {
        PlatformUser {
            id: self.id,
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            username: self.username.clone(),
            language_code: self.language_code.clone(),
            is_premium: self.is_premium,
            photo_url: self.photo_url.clone(),
        }
    }
}
