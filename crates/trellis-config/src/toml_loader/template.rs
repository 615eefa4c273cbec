/// The default TOML config with every option commented out.
pub(crate) fn default_config_toml() -> &'static str {
    r##"# Trellis Configuration
# Only override what you want to change -- missing fields use defaults.

[layout]
# inner_gap = 5          # 0-50, pixels around every tiled window
# outer_gap = 0          # 0-100, margin inside the screen edges
# auto_columns = 2       # 1-8, columns opened before windows stack
# resize_step = 40       # 1-500, pixels per resize step

[decoration]
# border_width = 0       # 0-20
# titlebar_height = 18   # 0-64, 0 disables the title bar
# border_color = "#222222"

[workspaces]
# count = 10             # 1-10

[logging]
# level = "INFO"         # DEBUG, INFO, WARNING, ERROR
"##
}
