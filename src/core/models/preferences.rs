use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

labelled_enum!(Theme {
    Light => "light",
    Dark => "dark",
});

labelled_enum!(Language {
    En => "en",
    Es => "es",
});

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}

impl Default for Language {
    fn default() -> Self {
        Language::En
    }
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::En => Language::Es,
            Language::Es => Language::En,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppSettings {
    pub theme: Theme,
    pub language: Language,
}

/// Per-user lifestyle answers kept in the client preference store.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LifestylePreferences {
    pub smoking_preference: String,
    pub food_preference: String,
    pub social_habits: String,
}
