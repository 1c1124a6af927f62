use serde::{Deserialize, Serialize};

// ===== DRAG CONFIGURATION =====

/// Selectors and class names the drag controller works with.
///
/// Every field has a default matching the timetable markup, so a host only
/// overrides what differs. Field names are camelCase in both JS options
/// objects and TOML files:
///
/// ```toml
/// sessionSelector = ".lecture"
/// thresholdPx = 8.0
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct DragConfig {
    pub session_selector: String,
    pub cell_selector: String,
    /// Ancestor grouping that scopes which cells accept drops
    pub column_selector: String,
    /// Class on sub-elements (resize grips) that must not start a drag
    pub resize_handle_class: String,
    pub dragging_body_class: String,
    pub proxy_class: String,
    pub indicator_class: String,
    pub style_id: String,
    pub threshold_px: f64,
}

impl DragConfig {
    pub const DEFAULT_THRESHOLD_PX: f64 = 5.0;

    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: DragConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("sessionSelector", &self.session_selector),
            ("cellSelector", &self.cell_selector),
            ("columnSelector", &self.column_selector),
            ("resizeHandleClass", &self.resize_handle_class),
            ("draggingBodyClass", &self.dragging_body_class),
            ("proxyClass", &self.proxy_class),
            ("indicatorClass", &self.indicator_class),
            ("styleId", &self.style_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::EmptyField(field));
            }
        }
        if !self.threshold_px.is_finite() || self.threshold_px < 0.0 {
            return Err(ConfigError::InvalidThreshold(self.threshold_px));
        }
        Ok(())
    }
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            session_selector: ".session-block".to_string(),
            cell_selector: ".time-slot".to_string(),
            column_selector: ".day-column".to_string(),
            resize_handle_class: "resize-handle".to_string(),
            dragging_body_class: "dragging".to_string(),
            proxy_class: "drag-clone".to_string(),
            indicator_class: "drop-indicator".to_string(),
            style_id: "drag-override-styles".to_string(),
            threshold_px: Self::DEFAULT_THRESHOLD_PX,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("drag option '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("drag threshold must be a finite, non-negative pixel count (got {0})")]
    InvalidThreshold(f64),
    #[error("invalid drag configuration: {0}")]
    Parse(#[from] toml::de::Error),
}
