use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Display, Formatter};

/// A unique user identifier, as assigned by the server.
#[derive(
    Debug,
    Default,
    Clone,
    PartialEq,
    Hash,
    Eq,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct Id(String);

impl<S: Into<String>> From<S> for Id {
    fn from(other: S) -> Id { Id(other.into()) }
}

impl Display for Id {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
