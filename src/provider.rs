//! Sign-in providers offered by the FirebaseUI widget.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};

/// A sign-in method shown in the sign-in modal.
///
/// Known providers are written by name (`"email"`, `"google"`, ...). Anything
/// else can be supplied as a raw FirebaseUI provider descriptor object, which
/// is passed through to the widget unmodified.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(try_from = "RawProvider")]
pub enum SignInProvider {
    /// Email and password
    Email,
    /// Google
    Google,
    /// GitHub
    Github,
    /// Facebook
    Facebook,
    /// Twitter / X
    Twitter,
    /// Microsoft
    Microsoft,
    /// Apple
    Apple,
    /// Yahoo
    Yahoo,
    /// Phone number (SMS)
    Phone,
    /// Anonymous sign-in
    Anonymous,
    /// A FirebaseUI `signInOptions` entry given as an object.
    Custom(Map<String, Value>),
}

impl SignInProvider {
    /// All providers that can be selected by name.
    pub const KNOWN: [SignInProvider; 10] = [
        SignInProvider::Email,
        SignInProvider::Google,
        SignInProvider::Github,
        SignInProvider::Facebook,
        SignInProvider::Twitter,
        SignInProvider::Microsoft,
        SignInProvider::Apple,
        SignInProvider::Yahoo,
        SignInProvider::Phone,
        SignInProvider::Anonymous,
    ];

    /// The name this provider is configured with, or `None` for custom descriptors.
    pub fn name(&self) -> Option<&'static str> {
        let name = match self {
            SignInProvider::Email => "email",
            SignInProvider::Google => "google",
            SignInProvider::Github => "github",
            SignInProvider::Facebook => "facebook",
            SignInProvider::Twitter => "twitter",
            SignInProvider::Microsoft => "microsoft",
            SignInProvider::Apple => "apple",
            SignInProvider::Yahoo => "yahoo",
            SignInProvider::Phone => "phone",
            SignInProvider::Anonymous => "anonymous",
            SignInProvider::Custom(_) => return None,
        };
        Some(name)
    }

    /// The Firebase provider ID FirebaseUI expects (the value of e.g.
    /// `firebase.auth.GoogleAuthProvider.PROVIDER_ID`).
    pub fn provider_id(&self) -> Option<&str> {
        let id = match self {
            SignInProvider::Email => "password",
            SignInProvider::Google => "google.com",
            SignInProvider::Github => "github.com",
            SignInProvider::Facebook => "facebook.com",
            SignInProvider::Twitter => "twitter.com",
            SignInProvider::Microsoft => "microsoft.com",
            SignInProvider::Apple => "apple.com",
            SignInProvider::Yahoo => "yahoo.com",
            SignInProvider::Phone => "phone",
            SignInProvider::Anonymous => "anonymous",
            SignInProvider::Custom(descriptor) => {
                return descriptor.get("provider").and_then(Value::as_str);
            }
        };
        Some(id)
    }

    /// The entry for this provider in FirebaseUI's `signInOptions` list.
    pub fn sign_in_option(&self) -> Value {
        match self {
            SignInProvider::Custom(descriptor) => Value::Object(descriptor.clone()),
            known => Value::String(known.provider_id().unwrap_or_default().to_owned()),
        }
    }
}

/// Builds FirebaseUI's `signInOptions`: one entry per provider, in input order.
pub fn sign_in_options(providers: &[SignInProvider]) -> Vec<Value> {
    providers.iter().map(SignInProvider::sign_in_option).collect()
}

/// Error returned when a provider name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sign-in provider `{0}`")]
pub struct UnknownProvider(pub String);

impl FromStr for SignInProvider {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        SignInProvider::KNOWN
            .into_iter()
            .find(|p| p.name() == Some(wanted.as_str()))
            .ok_or_else(|| UnknownProvider(s.to_owned()))
    }
}

impl fmt::Display for SignInProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "custom({})", self.provider_id().unwrap_or("?")),
        }
    }
}

impl Serialize for SignInProvider {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            SignInProvider::Custom(descriptor) => descriptor.serialize(serializer),
            known => serializer.serialize_str(known.name().unwrap_or_default()),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawProvider {
    Name(String),
    Descriptor(Map<String, Value>),
}

impl TryFrom<RawProvider> for SignInProvider {
    type Error = UnknownProvider;

    fn try_from(raw: RawProvider) -> Result<Self, Self::Error> {
        match raw {
            RawProvider::Name(name) => name.parse(),
            RawProvider::Descriptor(descriptor) => Ok(SignInProvider::Custom(descriptor)),
        }
    }
}
