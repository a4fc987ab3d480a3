use std::env;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Firebase web app configuration, as shown in the Firebase console.
///
/// Field names serialize in camelCase so the struct can be embedded verbatim
/// into the generated script as the argument of `firebase.initializeApp`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirebaseConfig {
    /// Web API key of the Firebase project. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Auth domain (e.g. `my-project.firebaseapp.com`). Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth_domain: Option<String>,

    /// Firebase project ID. Required.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,

    /// Cloud Storage bucket
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage_bucket: Option<String>,

    /// Cloud Messaging sender ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub messaging_sender_id: Option<String>,

    /// Firebase app ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_id: Option<String>,

    /// Google Analytics measurement ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub measurement_id: Option<String>,
}

impl FirebaseConfig {
    /// Creates a config holding only the required fields.
    pub fn new(
        api_key: impl Into<String>,
        auth_domain: impl Into<String>,
        project_id: impl Into<String>,
    ) -> FirebaseConfig {
        FirebaseConfig {
            api_key: Some(api_key.into()),
            auth_domain: Some(auth_domain.into()),
            project_id: Some(project_id.into()),
            ..FirebaseConfig::default()
        }
    }

    /// Reads the configuration from `FIREBASE_*` environment variables.
    ///
    /// Unset variables leave the corresponding field empty; call
    /// [`FirebaseConfig::validate`] (or build a
    /// [`SwaggerUiFirebase`](crate::SwaggerUiFirebase)) to reject incomplete
    /// configurations.
    pub fn from_env() -> FirebaseConfig {
        let var = |name: &str| env::var(name).ok().filter(|v| !v.trim().is_empty());

        FirebaseConfig {
            api_key: var("FIREBASE_API_KEY"),
            auth_domain: var("FIREBASE_AUTH_DOMAIN"),
            project_id: var("FIREBASE_PROJECT_ID"),
            storage_bucket: var("FIREBASE_STORAGE_BUCKET"),
            messaging_sender_id: var("FIREBASE_MESSAGING_SENDER_ID"),
            app_id: var("FIREBASE_APP_ID"),
            measurement_id: var("FIREBASE_MEASUREMENT_ID"),
        }
    }

    /// Checks that every field FirebaseUI needs is present and non-blank.
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("apiKey", &self.api_key),
            ("authDomain", &self.auth_domain),
            ("projectId", &self.project_id),
        ];

        for (name, value) in required {
            match value {
                Some(v) if !v.trim().is_empty() => {}
                _ => return Err(Error::MissingConfigField(name)),
            }
        }

        Ok(())
    }

    /// Returns the web API key, if set.
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn complete_config_validates() {
        let config = FirebaseConfig::new("key", "demo.firebaseapp.com", "demo");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn reports_first_missing_field() {
        let mut config = FirebaseConfig::new("key", "demo.firebaseapp.com", "demo");
        config.auth_domain = None;

        let result = config.validate();
        assert!(matches!(result, Err(Error::MissingConfigField("authDomain"))));
    }

    #[test]
    fn blank_field_counts_as_missing() {
        let config = FirebaseConfig::new("  ", "demo.firebaseapp.com", "demo");
        let result = config.validate();
        assert!(matches!(result, Err(Error::MissingConfigField("apiKey"))));
    }

    #[test]
    fn deserializes_console_snippet() {
        let config: FirebaseConfig = serde_json::from_value(json!({
            "apiKey": "key",
            "authDomain": "demo.firebaseapp.com",
            "projectId": "demo",
            "appId": "1:123:web:abc"
        }))
        .unwrap();

        assert_eq!(config.project_id.as_deref(), Some("demo"));
        assert_eq!(config.app_id.as_deref(), Some("1:123:web:abc"));
        assert!(config.storage_bucket.is_none());
    }

    #[test]
    fn serializes_only_present_fields() {
        let config = FirebaseConfig::new("key", "demo.firebaseapp.com", "demo");
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(
            value,
            json!({
                "apiKey": "key",
                "authDomain": "demo.firebaseapp.com",
                "projectId": "demo"
            })
        );
    }
}
