use super::assets::{SWAGGER_UI_BUNDLE, SWAGGER_UI_CSS, SWAGGER_UI_STANDALONE_PRESET};
use super::escape::{html_text, script_literal};
use super::SwaggerUiFirebase;
use crate::Result;

/// Renders a standalone Swagger UI page with the Firebase sign-in script
/// inlined.
pub(super) fn render(docs: &SwaggerUiFirebase, spec_url: &str, title: &str) -> Result<String> {
    let stylesheets: String = std::iter::once(SWAGGER_UI_CSS)
        .chain(docs.external_stylesheets().iter().copied())
        .map(|href| {
            format!(
                "    <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\" />\n",
                html_text(href)
            )
        })
        .collect();

    let scripts: String = [SWAGGER_UI_BUNDLE, SWAGGER_UI_STANDALONE_PRESET]
        .into_iter()
        .chain(docs.external_scripts().iter().copied())
        .map(|src| format!("    <script src=\"{}\"></script>\n", html_text(src)))
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
{stylesheets}    <style>
{css}    </style>
</head>
<body>
    <div id="swagger-ui"></div>
{scripts}    <script>
        window.ui = SwaggerUIBundle({{
            url: {spec_url},
            dom_id: '#swagger-ui',
            deepLinking: true,
            presets: [
                SwaggerUIBundle.presets.apis,
                SwaggerUIStandalonePreset
            ],
            layout: 'StandaloneLayout'
        }});
    </script>
    <script>
{script}    </script>
</body>
</html>
"#,
        title = html_text(title),
        css = docs.custom_css(),
        spec_url = script_literal(spec_url)?,
        script = docs.script(),
    );

    Ok(html)
}

#[cfg(test)]
mod tests {
    use crate::{FirebaseConfig, Options, SwaggerUiFirebase};

    fn docs() -> SwaggerUiFirebase {
        SwaggerUiFirebase::new(
            FirebaseConfig::new("api-key", "demo.firebaseapp.com", "demo"),
            Options::default(),
        )
        .unwrap()
    }

    #[test]
    fn page_loads_assets_in_order() {
        let html = docs().html_page("/openapi.json", "Demo API").unwrap();

        let bundle = html.find("swagger-ui-bundle.js").unwrap();
        let app = html.find("firebase-app-compat.js").unwrap();
        let auth = html.find("firebase-auth-compat.js").unwrap();
        let ui = html.find("firebase-ui-auth.js").unwrap();
        let init = html.find("window.ui = SwaggerUIBundle").unwrap();
        let generated = html.find("Generated by actix-swagger-firebase").unwrap();

        assert!(bundle < app && app < auth && auth < ui && ui < init && init < generated);
        assert!(html.contains("firebase-ui-auth.css"));
        assert!(html.contains(".swagger-firebase-overlay"));
        assert!(html.contains(r#"url: "/openapi.json","#));
        assert!(html.contains("<title>Demo API</title>"));
    }

    #[test]
    fn each_asset_tag_is_on_its_own_line() {
        let html = docs().html_page("/openapi.json", "Demo API").unwrap();

        let links = html.lines().filter(|l| l.trim_start().starts_with("<link ")).count();
        let scripts = html
            .lines()
            .filter(|l| l.trim_start().starts_with("<script src="))
            .count();
        assert_eq!(links, 2);
        assert_eq!(scripts, 5);
        assert!(html.contains(
            "    <link rel=\"stylesheet\" type=\"text/css\" href=\"https://unpkg.com/swagger-ui-dist@5.17.14/swagger-ui.css\" />\n"
        ));
    }

    #[test]
    fn title_and_spec_url_are_escaped() {
        let html = docs()
            .html_page("/spec.json?x=</script>", "<img src=x onerror=alert(1)>")
            .unwrap();

        assert!(html.contains("<title>&lt;img src=x onerror=alert(1)&gt;</title>"));
        assert!(html.contains(r#"url: "/spec.json?x=\u003c/script\u003e","#));
    }
}
