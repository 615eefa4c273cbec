use crate::schema::TrellisConfig;

use super::helpers::validate_range;

pub(crate) fn validate_layout(errors: &mut Vec<String>, config: &TrellisConfig) {
    let layout = &config.layout;
    validate_range(errors, "layout.inner_gap", layout.inner_gap, 0, 50);
    validate_range(errors, "layout.outer_gap", layout.outer_gap, 0, 100);
    validate_range(errors, "layout.auto_columns", layout.auto_columns, 1, 8);
    validate_range(errors, "layout.resize_step", layout.resize_step, 1, 500);
}
