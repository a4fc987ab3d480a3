//! Third-party assets the generated page depends on.

/// Firebase JS SDK version loaded by the page.
pub const FIREBASE_SDK_VERSION: &str = "9.23.0";

/// FirebaseUI version loaded by the page.
pub const FIREBASE_UI_VERSION: &str = "6.1.0";

/// Swagger UI version used by [`html_page`](crate::SwaggerUiFirebase::html_page).
pub const SWAGGER_UI_VERSION: &str = "5.17.14";

/// Scripts that must be loaded before the generated script, in order.
pub const EXTERNAL_SCRIPTS: [&str; 3] = [
    "https://www.gstatic.com/firebasejs/9.23.0/firebase-app-compat.js",
    "https://www.gstatic.com/firebasejs/9.23.0/firebase-auth-compat.js",
    "https://www.gstatic.com/firebasejs/ui/6.1.0/firebase-ui-auth.js",
];

/// Stylesheets for the FirebaseUI widget.
pub const EXTERNAL_STYLESHEETS: [&str; 1] =
    ["https://www.gstatic.com/firebasejs/ui/6.1.0/firebase-ui-auth.css"];

pub(crate) const SWAGGER_UI_CSS: &str =
    "https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css";

pub(crate) const SWAGGER_UI_BUNDLE: &str =
    "https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-bundle.js";

pub(crate) const SWAGGER_UI_STANDALONE_PRESET: &str =
    "https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui-standalone-preset.js";

/// Styles for the sign-in modal.
pub const CUSTOM_CSS: &str = r".swagger-firebase-overlay {
  display: none;
  position: fixed;
  inset: 0;
  z-index: 10000;
  align-items: center;
  justify-content: center;
  background: rgba(0, 0, 0, 0.45);
}
.swagger-firebase-overlay.is-open {
  display: flex;
}
.swagger-firebase-modal {
  position: relative;
  min-width: 360px;
  max-width: 90vw;
  padding: 24px;
  border-radius: 4px;
  background: #fff;
  box-shadow: 0 4px 24px rgba(0, 0, 0, 0.3);
  font-family: sans-serif;
}
.swagger-firebase-title {
  margin: 0 0 16px;
  text-align: center;
}
.swagger-firebase-close {
  position: absolute;
  top: 8px;
  right: 12px;
  border: none;
  background: none;
  font-size: 24px;
  cursor: pointer;
}
.swagger-firebase-user {
  text-align: center;
}
";
