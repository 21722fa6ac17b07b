//! Default configuration values

use super::types::Config;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "relnote.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "relnote.yaml";

/// Alternative configuration file name
pub const ALT_CONFIG_FILE: &str = ".relnote.toml";

/// GitHub REST API root
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Build-graph task queried for affectedness
pub const DEFAULT_GRAPH_TASK: &str = "build";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ALT_CONFIG_FILE,
        ".relnote.yaml",
    ]
}

/// Command prefix used to invoke the build-graph tool
pub fn default_graph_runner() -> Vec<String> {
    vec!["pnpm".to_string(), "turbo".to_string()]
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# relnote configuration

[release]
# prefix = "my-app"
# workspace = "my-app"

[graph]
runner = ["pnpm", "turbo"]
task = "build"

[git]
to = "HEAD"

[publish]
api_url = "https://api.github.com"
# repository = "owner/repo"
draft = false
prerelease = false
"#;
