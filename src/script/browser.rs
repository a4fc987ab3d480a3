//! Runs the generated script in an embedded JavaScript engine against stubbed
//! Firebase, Swagger UI and timer globals.

use boa_engine::{Context, Source};
use serde_json::{json, Value};

use super::render_script;
use crate::config::FirebaseConfig;
use crate::options::Options;
use crate::token::tests::token_expiring_at;

const STUBS: &str = include_str!("browser-stubs.js");

const NOW_MS: u64 = 1_700_000_000_000;
const NOW_SECS: u64 = NOW_MS / 1000;

struct Browser {
    context: Context,
}

impl Browser {
    fn with_options(options: &Options) -> Browser {
        let config = FirebaseConfig::new("api-key", "demo.firebaseapp.com", "demo");
        let script = render_script(&config, options).unwrap();

        let mut browser = Browser {
            context: Context::default(),
        };
        browser.exec(STUBS);
        browser.exec(&format!("now = {NOW_MS};"));
        browser.exec(&script);
        browser
    }

    fn new() -> Browser {
        Browser::with_options(&Options::default())
    }

    /// Evaluates `code`, then drains the promise job queue.
    fn exec(&mut self, code: &str) {
        self.context.eval(Source::from_bytes(code)).unwrap();
        self.context.run_jobs();
    }

    fn state(&mut self) -> Value {
        self.eval_json("snapshot()")
    }

    /// Evaluates `expr` inside the page and returns it as JSON.
    fn eval_json(&mut self, expr: &str) -> Value {
        let code = format!("JSON.stringify({expr})");
        let value = self.context.eval(Source::from_bytes(&code)).unwrap();
        let text = value.to_string(&mut self.context).unwrap();
        serde_json::from_str(&text.to_std_string_escaped()).unwrap()
    }
}

fn literal(token: &str) -> String {
    serde_json::to_string(token).unwrap()
}

fn bearer(token: &str) -> Value {
    json!(["authorize", "firebase", format!("Bearer {token}")])
}

#[test]
fn initializes_firebase_and_listens_for_identity() {
    let mut browser = Browser::new();
    let state = browser.state();

    assert_eq!(state["initializedProject"], json!("demo"));
    assert_eq!(state["listening"], json!(true));
    assert_eq!(state["clickCapture"], json!(true));
    assert_eq!(state["calls"], json!([]));
}

#[test]
fn sign_in_projects_token_and_arms_timer() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!("authState.listener(makeUser({}, []));", literal(&token)));
    let state = browser.state();

    assert_eq!(
        state["calls"],
        json!([["logout", "firebase"], bearer(&token)])
    );
    assert_eq!(state["activeDelays"], json!([3_300_000]));
}

#[test]
fn timer_refresh_logs_out_then_authorizes_new_token() {
    let mut browser = Browser::new();
    let first = token_expiring_at(NOW_SECS + 3600);
    let second = token_expiring_at(NOW_SECS + 3300 + 3600);

    browser.exec(&format!(
        "var user = makeUser({}, [{}]); authState.listener(user);",
        literal(&first),
        literal(&second)
    ));
    browser.exec("fireLatestTimer();");
    let state = browser.state();

    assert_eq!(browser.eval_json("user.forced"), json!(1));
    assert_eq!(
        state["calls"],
        json!([
            ["logout", "firebase"],
            bearer(&first),
            ["logout", "firebase"],
            bearer(&second)
        ])
    );
    // Re-armed relative to the new token and the advanced clock.
    assert_eq!(state["activeDelays"], json!([3_300_000]));
}

#[test]
fn token_inside_window_refreshes_immediately_without_timer() {
    let mut browser = Browser::new();
    let stale = token_expiring_at(NOW_SECS + 60);

    browser.exec(&format!(
        "var user = makeUser({}, [{{ error: 'auth/network-request-failed' }}]); authState.listener(user);",
        literal(&stale)
    ));
    let state = browser.state();

    assert_eq!(browser.eval_json("user.forced"), json!(1));
    assert_eq!(state["timersCreated"], json!(0));
    assert_eq!(state["signOuts"], json!(0));
}

#[test]
fn invalid_user_token_signs_out_once_and_clears() {
    let mut browser = Browser::new();
    let stale = token_expiring_at(NOW_SECS + 60);

    browser.exec(&format!(
        "var user = makeUser({}, [{{ error: 'auth/invalid-user-token' }}]); authState.listener(user);",
        literal(&stale)
    ));
    let state = browser.state();

    assert_eq!(state["signOuts"], json!(1));
    assert_eq!(browser.eval_json("user.forced"), json!(1));
    assert_eq!(
        state["calls"],
        json!([["logout", "firebase"], bearer(&stale), ["logout", "firebase"]])
    );
    assert_eq!(state["activeDelays"], json!([]));
}

#[test]
fn transient_refresh_failure_is_not_retried() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!(
        "var user = makeUser({}, [{{ error: 'auth/network-request-failed' }}]); authState.listener(user);",
        literal(&token)
    ));
    browser.exec("fireLatestTimer();");
    let state = browser.state();

    assert_eq!(browser.eval_json("user.forced"), json!(1));
    assert_eq!(state["activeDelays"], json!([]));
    assert_eq!(state["signOuts"], json!(0));
}

#[test]
fn sign_out_cancels_timer_and_clears() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!("authState.listener(makeUser({}, []));", literal(&token)));
    browser.exec("authState.listener(null);");
    let state = browser.state();

    assert_eq!(state["activeDelays"], json!([]));
    assert_eq!(
        state["calls"].as_array().unwrap().last(),
        Some(&json!(["logout", "firebase"]))
    );
}

#[test]
fn switching_to_unreadable_user_clears_previous_token() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!("authState.listener(makeUser({}, []));", literal(&token)));
    browser.exec("authState.listener(makeUser({ error: 'auth/network-request-failed' }, []));");
    let state = browser.state();

    assert_eq!(
        state["calls"],
        json!([["logout", "firebase"], bearer(&token), ["logout", "firebase"]])
    );
    assert_eq!(state["activeDelays"], json!([]));
}

#[test]
fn long_delays_are_clamped_to_timer_maximum() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 100 * 24 * 3600);

    browser.exec(&format!("authState.listener(makeUser({}, []));", literal(&token)));

    assert_eq!(browser.state()["activeDelays"], json!([2_147_483_647]));
}

#[test]
fn authorization_waits_for_swagger_ui() {
    let mut browser = Browser::new();
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!(
        "window.ui = undefined; authState.listener(makeUser({}, []));",
        literal(&token)
    ));
    let state = browser.state();
    assert_eq!(state["calls"], json!([]));
    assert_eq!(state["activeDelays"], json!([100, 3_300_000]));

    browser.exec("window.ui = makeSwaggerUi(); var poll = timers[0]; poll.done = true; poll.callback();");
    let state = browser.state();
    assert_eq!(
        state["calls"],
        json!([["logout", "firebase"], bearer(&token)])
    );
    assert_eq!(state["activeDelays"], json!([3_300_000]));
}

#[test]
fn custom_scheme_and_lead_time_are_used() {
    let options = Options {
        security_scheme_name: "bearerAuth".into(),
        refresh_before_expiry_ms: 60_000,
        ..Options::default()
    };
    let mut browser = Browser::with_options(&options);
    let token = token_expiring_at(NOW_SECS + 3600);

    browser.exec(&format!("authState.listener(makeUser({}, []));", literal(&token)));
    let state = browser.state();

    assert_eq!(
        state["calls"],
        json!([
            ["logout", "bearerAuth"],
            ["authorize", "bearerAuth", format!("Bearer {token}")]
        ])
    );
    assert_eq!(state["activeDelays"], json!([3_540_000]));
}
