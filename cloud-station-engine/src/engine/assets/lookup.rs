use thiserror::Error;

/// A keyed lookup into loaded configuration found nothing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    #[error("no waypoint named `{0}`")]
    Waypoint(String),
    #[error("no `{key}` card in the `{section}` content section")]
    ContentCard { section: &'static str, key: String },
}
