//! Default TOML config template with inline documentation comments.

pub(crate) fn default_config_toml() -> &'static str {
    r##"# webbridge configuration
# Only override what you want to change -- missing fields use defaults.

[content]
# root = "./dist"           # directory holding the production index.html
# dev_html = "dev.html"     # fallback page, relative to root

[webview]
# user_agent = "webbridge/0.1.0"
# zoom = 1.0                # 0.25-5.0
# devtools = false
# transparent = false

[logging]
# level = "info"            # trace, debug, info, warn, error
"##
}
