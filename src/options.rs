use serde::{Deserialize, Serialize};
use url::Url;

use crate::provider::SignInProvider;
use crate::{Error, Result};

/// Default lead time before token expiry at which a refresh is triggered.
pub const DEFAULT_REFRESH_BEFORE_EXPIRY_MS: u64 = 300_000;

/// Default key under which the token is registered in Swagger UI.
pub const DEFAULT_SECURITY_SCHEME_NAME: &str = "firebase";

/// How FirebaseUI presents federated sign-in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignInFlow {
    /// Sign in inside a popup window.
    #[default]
    Popup,
    /// Navigate away to the provider and back.
    Redirect,
}

impl SignInFlow {
    /// The value of FirebaseUI's `signInFlow` option.
    pub fn as_str(self) -> &'static str {
        match self {
            SignInFlow::Popup => "popup",
            SignInFlow::Redirect => "redirect",
        }
    }
}

/// Options controlling the generated sign-in modal and token refresh.
///
/// Every field has a default; when deserialized, keys that are absent keep
/// their default value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Options {
    /// Sign-in methods shown in the modal, in display order.
    pub providers: Vec<SignInProvider>,

    /// How long before expiry the ID token is refreshed, in milliseconds.
    pub refresh_before_expiry_ms: u64,

    /// Popup or redirect sign-in.
    pub sign_in_flow: SignInFlow,

    /// Security scheme the token is authorized under in Swagger UI.
    pub security_scheme_name: String,

    /// Terms of service link shown by FirebaseUI.
    pub tos_url: Option<Url>,

    /// Privacy policy link shown by FirebaseUI.
    pub privacy_policy_url: Option<Url>,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            providers: vec![SignInProvider::Email],
            refresh_before_expiry_ms: DEFAULT_REFRESH_BEFORE_EXPIRY_MS,
            sign_in_flow: SignInFlow::Popup,
            security_scheme_name: DEFAULT_SECURITY_SCHEME_NAME.to_owned(),
            tos_url: None,
            privacy_policy_url: None,
        }
    }
}

/// A sparse set of overrides for [`Options`].
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialOptions {
    /// See [`Options::providers`].
    pub providers: Option<Vec<SignInProvider>>,
    /// See [`Options::refresh_before_expiry_ms`].
    pub refresh_before_expiry_ms: Option<u64>,
    /// See [`Options::sign_in_flow`].
    pub sign_in_flow: Option<SignInFlow>,
    /// See [`Options::security_scheme_name`].
    pub security_scheme_name: Option<String>,
    /// See [`Options::tos_url`].
    pub tos_url: Option<Url>,
    /// See [`Options::privacy_policy_url`].
    pub privacy_policy_url: Option<Url>,
}

impl Options {
    /// Overlays every field set in `overrides` on top of `self`.
    #[must_use]
    pub fn merge(mut self, overrides: PartialOptions) -> Options {
        if let Some(providers) = overrides.providers {
            self.providers = providers;
        }
        if let Some(ms) = overrides.refresh_before_expiry_ms {
            self.refresh_before_expiry_ms = ms;
        }
        if let Some(flow) = overrides.sign_in_flow {
            self.sign_in_flow = flow;
        }
        if let Some(name) = overrides.security_scheme_name {
            self.security_scheme_name = name;
        }
        if overrides.tos_url.is_some() {
            self.tos_url = overrides.tos_url;
        }
        if overrides.privacy_policy_url.is_some() {
            self.privacy_policy_url = overrides.privacy_policy_url;
        }
        self
    }

    /// Rejects values the generated script cannot work with.
    pub fn validate(&self) -> Result<()> {
        if self.security_scheme_name.trim().is_empty() {
            return Err(Error::InvalidOption(
                "securitySchemeName must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_documented_values() {
        let options = Options::default();
        assert_eq!(options.refresh_before_expiry_ms, 300_000);
        assert_eq!(options.security_scheme_name, "firebase");
        assert_eq!(options.sign_in_flow, SignInFlow::Popup);
        assert_eq!(options.providers, vec![SignInProvider::Email]);
        assert!(options.tos_url.is_none());
    }

    #[test]
    fn absent_keys_keep_defaults() {
        let options: Options = serde_json::from_value(json!({
            "signInFlow": "redirect",
            "providers": ["google", "github"]
        }))
        .unwrap();

        assert_eq!(options.sign_in_flow, SignInFlow::Redirect);
        assert_eq!(
            options.providers,
            vec![SignInProvider::Google, SignInProvider::Github]
        );
        assert_eq!(options.refresh_before_expiry_ms, DEFAULT_REFRESH_BEFORE_EXPIRY_MS);
        assert_eq!(options.security_scheme_name, DEFAULT_SECURITY_SCHEME_NAME);
    }

    #[test]
    fn merge_overrides_only_set_fields() {
        let overrides: PartialOptions = serde_json::from_value(json!({
            "refreshBeforeExpiryMs": 60000,
            "tosUrl": "https://example.com/tos"
        }))
        .unwrap();

        let merged = Options::default().merge(overrides);
        assert_eq!(merged.refresh_before_expiry_ms, 60_000);
        assert_eq!(merged.tos_url.unwrap().as_str(), "https://example.com/tos");
        assert_eq!(merged.security_scheme_name, "firebase");
        assert_eq!(merged.providers, vec![SignInProvider::Email]);
    }

    #[test]
    fn invalid_url_is_rejected_at_parse_time() {
        let result: std::result::Result<Options, _> =
            serde_json::from_value(json!({ "privacyPolicyUrl": "not a url" }));
        assert!(result.is_err());
    }

    #[test]
    fn blank_scheme_name_is_invalid() {
        let options = Options {
            security_scheme_name: " ".into(),
            ..Options::default()
        };
        assert!(matches!(options.validate(), Err(Error::InvalidOption(_))));
    }
}
