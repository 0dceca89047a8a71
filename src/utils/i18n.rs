use tracing::warn;

/// Switch the reply locale, falling back to English for unknown locales
pub fn set_locale(locale: &str) {
    if available_locales!().contains(&locale) {
        rust_i18n::set_locale(locale);
    } else {
        warn!("Unknown locale '{}', using en", locale);
        rust_i18n::set_locale("en");
    }
}
