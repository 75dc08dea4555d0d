//! Config serialization to TOML
//!
//! Single source of truth for the config file format. The template is
//! also what `ensure_config_exists` writes on first run, so every
//! field a user can set shows up here with its current value.

use super::Config;

impl Config {
    /// Render this config as a TOML document with explanatory comments.
    pub fn to_toml(&self) -> String {
        let units = self
            .widget
            .units
            .as_deref()
            .map(|u| format!("units = \"{}\"\n", u))
            .unwrap_or_else(|| "# units = \"req/s\"\n".to_string());

        format!(
            r#"# gaugemon configuration
# Environment variables override these values (GAUGEMON_SERVER,
# GAUGEMON_EXPR, GAUGEMON_REFRESH, GAUGEMON_THEME).

# Base URL of the query server. The widget polls
# <server_url>/api/query?expr=<expression>. Empty disables polling.
server_url = "{server_url}"

# Theme: "dark" or "light"
theme = "{theme}"

[widget]
# Query expression to evaluate; must yield a scalar result.
expression = "{expression}"
# Refresh interval in seconds (0 falls back to 1).
refresh = {refresh}
# Visible time range, e.g. "5m", "1h", "2d".
range = "{range}"
# Gauge maximum; the fill fraction is value/max.
max = {max}
# Optional units suffix shown after the value.
{units}# Thresholds as percent of max (0-100).
warning = {warning}
danger = {danger}
# Decimal digits in the label.
precision = {precision}

[logging]
# Log level: trace, debug, info, warn, error
level = "{level}"
# Write logs to rotating files in addition to the TUI panel
file_enabled = {file_enabled}
file_dir = "{file_dir}"
# Rotation: "hourly", "daily", "never"
file_rotation = "{file_rotation}"
file_prefix = "{file_prefix}"
"#,
            server_url = self.server_url,
            theme = self.theme,
            expression = self.widget.expression,
            refresh = self.widget.refresh,
            range = self.widget.range,
            max = self.widget.max,
            units = units,
            warning = self.widget.warning,
            danger = self.widget.danger,
            precision = self.widget.precision,
            level = self.logging.level,
            file_enabled = self.logging.file_enabled,
            file_dir = self.logging.file_dir.display(),
            file_rotation = self.logging.file_rotation.as_str(),
            file_prefix = self.logging.file_prefix,
        )
    }
}
