// Every key is stored per user through `user_preference_key`.
pub const THEME_KEY: &str = "theme";
pub const LANGUAGE_KEY: &str = "language";

pub const SMOKING_PREFERENCE: &str = "smokingPreference";
pub const FOOD_PREFERENCE: &str = "foodPreference";
pub const SOCIAL_HABITS: &str = "socialHabits";

pub fn user_preference_key(user_id: &str, name: &str) -> String {
    format!("user_{}_{}", user_id, name)
}
