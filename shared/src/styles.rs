//! Stylesheet injected once per document while any controller is attached
//!
//! Timetable layouts highlight rows and columns on hover. While a session is
//! being carried those highlights fight with the drop indicator, so the
//! override neutralises them whenever the body carries the dragging class.

use crate::config::DragConfig;

pub const COLUMN_BORDER_COLOR: &str = "#d1d5db";
pub const INDICATOR_BORDER: &str = "2px dashed #3b82f6";
pub const INDICATOR_BACKGROUND: &str = "rgba(59, 130, 246, 0.05)";
pub const INDICATOR_Z_INDEX: u32 = 9999;

/// Render the override rules for the selectors in `config`.
pub fn override_stylesheet(config: &DragConfig) -> String {
    let body = format!("body.{}", config.dragging_body_class);
    let column = &config.column_selector;
    let cell = &config.cell_selector;
    format!(
        "\n{body} {column}:hover,\n\
         {body} {cell}:hover,\n\
         {body} {column},\n\
         {body} {cell} {{\n  \
           background-color: transparent !important;\n  \
           box-shadow: none !important;\n\
         }}\n\
         {body} {column} {{\n  \
           border-color: {COLUMN_BORDER_COLOR} !important;\n\
         }}\n\
         .{indicator} {{\n  \
           position: fixed;\n  \
           border: {INDICATOR_BORDER};\n  \
           background-color: {INDICATOR_BACKGROUND};\n  \
           pointer-events: none;\n  \
           z-index: {INDICATOR_Z_INDEX};\n  \
           border-radius: 4px;\n\
         }}\n",
        indicator = config.indicator_class,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_stylesheet_targets_timetable_classes() {
        let css = override_stylesheet(&DragConfig::default());
        assert!(css.contains("body.dragging .day-column:hover,"));
        assert!(css.contains("body.dragging .time-slot {"));
        assert!(css.contains("border-color: #d1d5db !important;"));
        assert!(css.contains(".drop-indicator {"));
        assert!(css.contains("pointer-events: none;"));
        assert!(css.contains("z-index: 9999;"));
    }

    #[test]
    fn test_stylesheet_follows_custom_selectors() {
        let config = DragConfig {
            column_selector: ".weekday".to_string(),
            cell_selector: ".slot".to_string(),
            dragging_body_class: "carrying".to_string(),
            indicator_class: "target".to_string(),
            ..DragConfig::default()
        };
        let css = override_stylesheet(&config);
        assert!(css.contains("body.carrying .weekday:hover,"));
        assert!(css.contains("body.carrying .slot {"));
        assert!(css.contains(".target {"));
        assert!(!css.contains("day-column"));
    }
}
