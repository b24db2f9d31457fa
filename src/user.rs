use crate::Id;
use serde_derive::{Deserialize, Serialize};
use std::fmt::{self, Debug, Formatter};

/// The logged-in user's profile.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct User {
    #[serde(alias = "_id")]
    pub id: Id,
    pub username: String,
    pub email: String,
    /// The hosting plan the user is subscribed to (e.g. `"free"`).
    pub plan: String,
    pub resource_limits: ResourceLimits,
}

/// How many resources the user's plan entitles them to.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResourceLimits {
    pub max_servers: u32,
    /// Memory, in megabytes.
    pub memory: u64,
    /// Disk space, in megabytes.
    pub storage: u64,
    /// CPU allowance, as a percentage of a single core.
    pub cpu: u32,
}

/// Everything needed to create a new account.
///
/// The `Debug` impl leaves out the password.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub plan: String,
}

impl Debug for Registration {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("username", &self.username)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .field("plan", &self.plan)
            .finish()
    }
}

impl Registration {
    pub(crate) fn is_complete(&self) -> bool {
        !self.username.trim().is_empty()
            && !self.email.trim().is_empty()
            && !self.password.is_empty()
    }
}

/// A partial profile update. Fields left as `None` are not sent to the
/// server.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_profile() {
        let src = include_str!("endpoints/me_response_okay.json");
        let doc: serde_json::Value = serde_json::from_str(src).unwrap();
        let should_be = User {
            id: Id::from("64b7f2c1e4a1c2d3e4f5a6b7"),
            username: String::from("steve"),
            email: String::from("steve@example.com"),
            plan: String::from("premium"),
            resource_limits: ResourceLimits {
                max_servers: 5,
                memory: 8192,
                storage: 20480,
                cpu: 400,
            },
        };

        let got: User = serde_json::from_value(doc["data"].clone()).unwrap();

        assert_eq!(got, should_be);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let got: User =
            serde_json::from_str(r#"{ "username": "user" }"#).unwrap();

        assert_eq!(got.username, "user");
        assert_eq!(got.id, Id::default());
        assert_eq!(got.resource_limits, ResourceLimits::default());
    }

    #[test]
    fn registration_debug_output_hides_the_password() {
        let registration = Registration {
            username: String::from("alex"),
            email: String::from("alex@example.com"),
            password: String::from("hunter2"),
            plan: String::from("free"),
        };

        let got = format!("{:?}", registration);

        assert!(!got.contains("hunter2"), "{}", got);
        assert!(got.contains("alex@example.com"));
    }

    #[test]
    fn profile_updates_only_send_what_changed() {
        let update = ProfileUpdate {
            email: Some(String::from("alex@example.com")),
            ..Default::default()
        };

        let got = serde_json::to_value(&update).unwrap();

        assert_eq!(got, serde_json::json!({ "email": "alex@example.com" }));
    }
}
