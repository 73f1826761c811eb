pub mod in_memory;
pub mod keys;

use crate::core::errors::RoomshareError;
use crate::core::models::preferences::{AppSettings, Language, LifestylePreferences, Theme};
use async_trait::async_trait;
use keys::{FOOD_PREFERENCE, LANGUAGE_KEY, SMOKING_PREFERENCE, SOCIAL_HABITS, THEME_KEY, user_preference_key};
use log::debug;
use tokio::sync::broadcast;

/// Client-side key-value storage. Values are plain strings without a schema.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, RoomshareError>;
    async fn set(&self, key: &str, value: &str) -> Result<(), RoomshareError>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingChange {
    Theme { user_id: String, theme: Theme },
    Language { user_id: String, language: Language },
    Lifestyle { user_id: String },
}

const CHANGE_CHANNEL_CAPACITY: usize = 32;

/// Per-user settings backed by a [`PreferenceStore`]. Every write is
/// announced to subscribers.
pub struct Settings<P: PreferenceStore> {
    store: P,
    changes: broadcast::Sender<SettingChange>,
}

impl<P: PreferenceStore> Settings<P> {
    pub fn new(store: P) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Settings { store, changes }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SettingChange> {
        self.changes.subscribe()
    }

    fn announce(&self, change: SettingChange) {
        debug!("Setting changed: {:?}", change);
        // Nobody listening is fine.
        let _ = self.changes.send(change);
    }

    async fn user_value(&self, user_id: &str, name: &str) -> Result<Option<String>, RoomshareError> {
        self.store.get(&user_preference_key(user_id, name)).await
    }

    async fn set_user_value(&self, user_id: &str, name: &str, value: &str) -> Result<(), RoomshareError> {
        self.store.set(&user_preference_key(user_id, name), value).await
    }

    // Unknown stored values fall back to the default.
    async fn read_or_default<T: std::str::FromStr + Default>(
        &self,
        user_id: &str,
        name: &str,
    ) -> Result<T, RoomshareError> {
        Ok(self
            .user_value(user_id, name)
            .await?
            .and_then(|v| v.parse().ok())
            .unwrap_or_default())
    }

    pub async fn theme(&self, user_id: &str) -> Result<Theme, RoomshareError> {
        self.read_or_default(user_id, THEME_KEY).await
    }

    pub async fn set_theme(&self, user_id: &str, theme: Theme) -> Result<(), RoomshareError> {
        self.set_user_value(user_id, THEME_KEY, theme.as_str()).await?;
        self.announce(SettingChange::Theme {
            user_id: user_id.to_string(),
            theme,
        });
        Ok(())
    }

    pub async fn toggle_theme(&self, user_id: &str) -> Result<Theme, RoomshareError> {
        let next = self.theme(user_id).await?.toggled();
        self.set_theme(user_id, next).await?;
        Ok(next)
    }

    pub async fn language(&self, user_id: &str) -> Result<Language, RoomshareError> {
        self.read_or_default(user_id, LANGUAGE_KEY).await
    }

    pub async fn set_language(&self, user_id: &str, language: Language) -> Result<(), RoomshareError> {
        self.set_user_value(user_id, LANGUAGE_KEY, language.as_str()).await?;
        self.announce(SettingChange::Language {
            user_id: user_id.to_string(),
            language,
        });
        Ok(())
    }

    pub async fn toggle_language(&self, user_id: &str) -> Result<Language, RoomshareError> {
        let next = self.language(user_id).await?.toggled();
        self.set_language(user_id, next).await?;
        Ok(next)
    }

    pub async fn current(&self, user_id: &str) -> Result<AppSettings, RoomshareError> {
        Ok(AppSettings {
            theme: self.theme(user_id).await?,
            language: self.language(user_id).await?,
        })
    }

    pub async fn lifestyle(&self, user_id: &str) -> Result<LifestylePreferences, RoomshareError> {
        Ok(LifestylePreferences {
            smoking_preference: self.user_value(user_id, SMOKING_PREFERENCE).await?.unwrap_or_default(),
            food_preference: self.user_value(user_id, FOOD_PREFERENCE).await?.unwrap_or_default(),
            social_habits: self.user_value(user_id, SOCIAL_HABITS).await?.unwrap_or_default(),
        })
    }

    pub async fn set_lifestyle(&self, user_id: &str, prefs: &LifestylePreferences) -> Result<(), RoomshareError> {
        for (name, value) in [
            (SMOKING_PREFERENCE, &prefs.smoking_preference),
            (FOOD_PREFERENCE, &prefs.food_preference),
            (SOCIAL_HABITS, &prefs.social_habits),
        ] {
            self.set_user_value(user_id, name, value).await?;
        }
        self.announce(SettingChange::Lifestyle {
            user_id: user_id.to_string(),
        });
        Ok(())
    }
}
