//! Placeholder substitution for configured portal URLs.

use domain::Localization;

pub const LOCALIZATION: &str = "{localization}";
pub const LANGUAGE: &str = "{language}";
pub const COUNTRY: &str = "{country}";
pub const HOST: &str = "{host}";

pub fn has_localization(url: &str) -> bool {
    url.contains(LOCALIZATION)
}

pub fn has_language(url: &str) -> bool {
    url.contains(LANGUAGE)
}

pub fn has_country(url: &str) -> bool {
    url.contains(COUNTRY)
}

pub fn has_host(url: &str) -> bool {
    url.contains(HOST)
}

/// True when the url varies by locale.
pub fn is_localized(url: &str) -> bool {
    has_localization(url) || has_language(url) || has_country(url)
}

/// Substitute the locale placeholders; `{localization}` uses the dash form (`de-at`).
pub fn replace_localization(url: &str, localization: &Localization) -> String {
    url.replace(LOCALIZATION, &localization.locale_with("-"))
        .replace(LANGUAGE, &localization.language)
        .replace(COUNTRY, localization.country.as_deref().unwrap_or_default())
}

/// Strip every placeholder and tidy up the separators left behind.
pub fn cleanup(url: &str) -> String {
    let mut out = url
        .replace(LOCALIZATION, "")
        .replace(LANGUAGE, "")
        .replace(COUNTRY, "")
        .replace(HOST, "");

    while out.contains("//") {
        out = out.replace("//", "/");
    }
    while out.contains("..") {
        out = out.replace("..", ".");
    }

    out.trim_start_matches('.')
        .trim_end_matches('/')
        .to_string()
}
