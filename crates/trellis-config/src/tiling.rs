//! Conversion of the user-facing schema into the tiling engine's settings.

use trellis_tiling::TilingConfig;

use crate::schema::TrellisConfig;

impl From<&TrellisConfig> for TilingConfig {
    fn from(config: &TrellisConfig) -> Self {
        Self {
            inner_gap: config.layout.inner_gap,
            outer_gap: config.layout.outer_gap,
            auto_columns: config.layout.auto_columns.max(1) as usize,
            resize_step: config.layout.resize_step,
            border_width: config.decoration.border_width,
            titlebar_height: config.decoration.titlebar_height,
            workspace_count: config.workspaces.count.max(1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_engine_defaults() {
        let tiling = TilingConfig::from(&TrellisConfig::default());
        let engine = TilingConfig::default();
        assert_eq!(tiling.inner_gap, engine.inner_gap);
        assert_eq!(tiling.outer_gap, engine.outer_gap);
        assert_eq!(tiling.auto_columns, engine.auto_columns);
        assert_eq!(tiling.resize_step, engine.resize_step);
        assert_eq!(tiling.titlebar_height, engine.titlebar_height);
        assert_eq!(tiling.workspace_count, engine.workspace_count);
    }

    #[test]
    fn copies_every_field() {
        let mut config = TrellisConfig::default();
        config.layout.inner_gap = 7;
        config.layout.outer_gap = 12;
        config.layout.auto_columns = 3;
        config.layout.resize_step = 25;
        config.decoration.border_width = 2;
        config.decoration.titlebar_height = 0;
        config.workspaces.count = 4;

        let tiling = TilingConfig::from(&config);
        assert_eq!(tiling.inner_gap, 7);
        assert_eq!(tiling.outer_gap, 12);
        assert_eq!(tiling.auto_columns, 3);
        assert_eq!(tiling.resize_step, 25);
        assert_eq!(tiling.border_width, 2);
        assert_eq!(tiling.titlebar_height, 0);
        assert_eq!(tiling.workspace_count, 4);
    }
}
