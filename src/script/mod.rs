//! Generation of the browser script that wires Firebase Authentication into
//! Swagger UI.
//!
//! The script is a pure function of a [`FirebaseConfig`] and [`Options`]: all
//! configurable values are serialized into a single escaped JSON literal that
//! is passed to a fixed function body. Nothing from the configuration is ever
//! spliced into code.

mod assets;
#[cfg(test)]
mod browser;
mod escape;
mod page;

use serde::Serialize;
use serde_json::Value;

use crate::config::FirebaseConfig;
use crate::options::Options;
use crate::provider::sign_in_options;
use crate::Result;

pub use assets::*;
pub use escape::{html_text, script_literal};

/// Prefix of every console message written by the generated script.
pub const LOG_PREFIX: &str = "[swagger-firebase]";

const SCRIPT_BODY: &str = include_str!("swagger-firebase.js");

/// Values the generated script reads at startup.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ScriptSettings<'a> {
    firebase_config: &'a FirebaseConfig,
    sign_in_options: Vec<Value>,
    sign_in_flow: &'static str,
    refresh_before_expiry_ms: u64,
    security_scheme_name: &'a str,
    tos_url: Option<&'a str>,
    privacy_policy_url: Option<&'a str>,
    log_prefix: &'static str,
}

/// Renders the script for `config` and `options`.
///
/// Does not validate its inputs; [`SwaggerUiFirebase::new`] does.
pub fn render_script(config: &FirebaseConfig, options: &Options) -> Result<String> {
    let settings = ScriptSettings {
        firebase_config: config,
        sign_in_options: sign_in_options(&options.providers),
        sign_in_flow: options.sign_in_flow.as_str(),
        refresh_before_expiry_ms: options.refresh_before_expiry_ms,
        security_scheme_name: &options.security_scheme_name,
        tos_url: options.tos_url.as_ref().map(url::Url::as_str),
        privacy_policy_url: options.privacy_policy_url.as_ref().map(url::Url::as_str),
        log_prefix: LOG_PREFIX,
    };

    let literal = script_literal(&settings)?;

    Ok(format!(
        "/* Generated by actix-swagger-firebase {version}. */\n(function (settings) {{\n{SCRIPT_BODY}}})({literal});\n",
        version = env!("CARGO_PKG_VERSION"),
    ))
}

/// A validated Swagger UI / Firebase integration and its generated assets.
///
/// # Example
///
/// ```
/// use actix_swagger_firebase::{FirebaseConfig, Options, SignInProvider, SwaggerUiFirebase};
///
/// let config = FirebaseConfig::new("api-key", "demo.firebaseapp.com", "demo");
/// let options = Options {
///     providers: vec![SignInProvider::Email, SignInProvider::Google],
///     ..Options::default()
/// };
///
/// let docs = SwaggerUiFirebase::new(config, options).unwrap();
/// assert!(docs.script().contains("\"google.com\""));
/// ```
#[derive(Clone, Debug)]
pub struct SwaggerUiFirebase {
    config: FirebaseConfig,
    options: Options,
    script: String,
}

impl SwaggerUiFirebase {
    /// Validates the inputs and renders the script.
    pub fn new(config: FirebaseConfig, options: Options) -> Result<SwaggerUiFirebase> {
        config.validate()?;
        options.validate()?;
        let script = render_script(&config, &options)?;

        Ok(SwaggerUiFirebase {
            config,
            options,
            script,
        })
    }

    /// The generated script text.
    pub fn script(&self) -> &str {
        &self.script
    }

    /// Scripts to load, in order, before [`script`](Self::script).
    pub fn external_scripts(&self) -> &'static [&'static str] {
        &EXTERNAL_SCRIPTS
    }

    /// Stylesheets to load alongside the script.
    pub fn external_stylesheets(&self) -> &'static [&'static str] {
        &EXTERNAL_STYLESHEETS
    }

    /// Styles for the sign-in modal.
    pub fn custom_css(&self) -> &'static str {
        CUSTOM_CSS
    }

    /// The Firebase configuration the script was rendered with.
    pub fn config(&self) -> &FirebaseConfig {
        &self.config
    }

    /// The options the script was rendered with.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// A complete Swagger UI page for the OpenAPI document at `spec_url`.
    pub fn html_page(&self, spec_url: &str, title: &str) -> Result<String> {
        page::render(self, spec_url, title)
    }
}
