//! Классы оверлея: содержимое всегда смонтировано, видимость задаёт CSS.

pub fn backdrop_class(visible: bool) -> &'static str {
    if visible {
        "overlay overlay-visible"
    } else {
        "overlay overlay-hidden"
    }
}

pub fn panel_class(visible: bool) -> &'static str {
    if visible {
        "overlay-panel overlay-panel-visible"
    } else {
        "overlay-panel overlay-panel-hidden"
    }
}

/// Клик по подложке закрывает оверлей только если это разрешено.
pub fn closes_on_backdrop(allow_click_outside: bool, visible: bool) -> bool {
    allow_click_outside && visible
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_overlay_keeps_distinct_classes() {
        assert_ne!(backdrop_class(true), backdrop_class(false));
        assert!(panel_class(false).contains("hidden"));
    }

    #[test]
    fn backdrop_click_respects_flag() {
        assert!(closes_on_backdrop(true, true));
        assert!(!closes_on_backdrop(false, true));
        assert!(!closes_on_backdrop(true, false));
    }
}
