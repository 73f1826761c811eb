/// Declares a closed set of values stored by their display label, e.g.
/// `"Rent + Lease"`. Generates serde renames, `Display`, `FromStr` and `as_str`.
macro_rules! labelled_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($label => Ok($name::$variant),)+
                    other => Err(format!("unknown {} `{}`", stringify!($name), other)),
                }
            }
        }
    };
}

pub mod audit;
pub mod expense;
pub mod group;
pub mod listing;
pub mod preferences;
pub mod profile;

/// A typed value that lives in one collection of the record store.
pub trait Record: serde::Serialize + serde::de::DeserializeOwned + Clone + Send + Sync {
    const COLLECTION: crate::infrastructure::storage::Collection;

    fn id(&self) -> &str;
}
