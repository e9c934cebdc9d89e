//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct fields.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
///
/// Starts from `ConfigFile::default()` and overlays any values found in the INI.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [upstream] section
    if let Some(section) = ini.section(Some("upstream")) {
        if let Some(v) = section.get("url") {
            let v = v.trim();
            if !(v.starts_with("http://") || v.starts_with("https://")) {
                return Err(invalid("upstream", "url", v, "must be an http:// or https:// URL"));
            }
            config.upstream.url = v.to_string();
        }
        if let Some(v) = non_empty(section.get("srs")) {
            config.upstream.srs = v.to_string();
        }
        if let Some(v) = section.get("format") {
            let v = v.trim().to_lowercase();
            if !v.starts_with("image/") {
                return Err(invalid(
                    "upstream",
                    "format",
                    &v,
                    "must be an image MIME type such as image/png",
                ));
            }
            config.upstream.format = v;
        }
        if let Some(v) = section.get("timeout") {
            config.upstream.timeout = match v.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => secs,
                _ => {
                    return Err(invalid(
                        "upstream",
                        "timeout",
                        v,
                        "must be a positive integer (seconds)",
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("default_layer")) {
            config.upstream.default_layer = v.to_string();
        }
    }

    // [grid] section
    if let Some(section) = ini.section(Some("grid")) {
        if let Some(v) = section.get("extent") {
            let values = parse_numbers(v)
                .ok_or_else(|| invalid("grid", "extent", v, "expected comma-separated numbers"))?;
            let extent: [f64; 4] = values.try_into().map_err(|_| {
                invalid("grid", "extent", v, "expected exactly 4 values: west,south,east,north")
            })?;
            if !(extent[0] < extent[2] && extent[1] < extent[3]) {
                return Err(invalid(
                    "grid",
                    "extent",
                    v,
                    "west must be below east and south below north",
                ));
            }
            config.grid.extent = extent;
        }
        if let Some(v) = section.get("resolutions") {
            let values = parse_numbers(v).ok_or_else(|| {
                invalid("grid", "resolutions", v, "expected comma-separated numbers")
            })?;
            if values.is_empty() || values.iter().any(|r| *r <= 0.0) {
                return Err(invalid(
                    "grid",
                    "resolutions",
                    v,
                    "must list at least one positive resolution",
                ));
            }
            if values.windows(2).any(|w| w[0] <= w[1]) {
                return Err(invalid(
                    "grid",
                    "resolutions",
                    v,
                    "must be strictly descending (coarsest first)",
                ));
            }
            config.grid.resolutions = values;
        }
        if let Some(v) = section.get("cell_size") {
            config.grid.cell_size = match v.trim().parse::<u32>() {
                Ok(size) if size > 0 => size,
                _ => {
                    return Err(invalid(
                        "grid",
                        "cell_size",
                        v,
                        "must be a positive integer (pixels)",
                    ))
                }
            };
        }
        if let Some(v) = non_empty(section.get("proj")) {
            config.grid.proj = v.to_string();
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = non_empty(section.get("file")) {
            config.logging.file = expand_tilde(v);
        }
    }

    Ok(config)
}

fn invalid(section: &str, key: &str, value: &str, reason: &str) -> ConfigFileError {
    ConfigFileError::InvalidValue {
        section: section.to_string(),
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Parses `a, b, c` into finite floats. `None` if any entry is not a number.
fn parse_numbers(value: &str) -> Option<Vec<f64>> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok().filter(|n| n.is_finite()))
        .collect()
}

/// Expand `~/` prefix to the user's home directory.
pub(super) fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}
