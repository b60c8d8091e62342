use std::sync::Once;

static INIT: Once = Once::new();

/// Routes `log` records to the browser console and panics to
/// `console.error`. Only the first call has any effect.
pub fn init_logging(level: log::Level) {
    INIT.call_once(|| {
        console_error_panic_hook::set_once();
        if console_log::init_with_level(level).is_err() {
            web_sys::console::warn_1(&"logger already installed".into());
        }
        log::debug!("logging initialized at {level}");
    });
}
