//! INI serialization logic for converting `ConfigFile` → INI string.
//!
//! Produces the commented INI representation written to `config.ini`.

use std::path::Path;

use super::settings::ConfigFile;

/// Convert a `ConfigFile` to a commented INI string for saving.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let extent = join_numbers(&config.grid.extent);
    let resolutions = join_numbers(&config.grid.resolutions);
    let log_file = path_to_string(&config.logging.file);

    format!(
        r#"[upstream]
; WMS endpoint serving the source gridset
url = {}
; Spatial reference of the source grid, sent as the GetMap srs parameter
srs = {}
; Image format requested from the WMS
format = {}
; Timeout in seconds for each source cell request (default: 30)
timeout = {}
; Layer used when a request does not name one
default_layer = {}

[grid]
; Grid extent in source CRS units: west, south, east, north
extent = {}
; Native resolutions in source units per pixel, coarsest first
resolutions = {}
; Source cell edge in pixels (default: 512)
cell_size = {}
; proj string of the source CRS (default: EPSG:2263, NY Long Island, US feet)
proj = {}

[logging]
; Log file path (default: ~/.tileproxy/tileproxy.log)
file = {}
"#,
        config.upstream.url,
        config.upstream.srs,
        config.upstream.format,
        config.upstream.timeout,
        config.upstream.default_layer,
        extent,
        resolutions,
        config.grid.cell_size,
        config.grid.proj,
        log_file,
    )
}

/// Formats numbers with Rust's shortest round-trip representation.
fn join_numbers(values: &[f64]) -> String {
    values
        .iter()
        .map(|v| v.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a path to a string, replacing the home directory with `~`.
fn path_to_string(path: &Path) -> String {
    if let Some(home) = dirs::home_dir() {
        if let Ok(stripped) = path.strip_prefix(&home) {
            return format!("~/{}", stripped.display());
        }
    }
    path.display().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_has_every_section() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("[upstream]"));
        assert!(content.contains("[grid]"));
        assert!(content.contains("[logging]"));
        assert!(content.contains("srs = EPSG:2263"));
        assert!(content.contains("cell_size = 512"));
    }

    #[test]
    fn test_resolutions_keep_full_precision() {
        let content = to_config_string(&ConfigFile::default());
        assert!(content.contains("434.0277788713911"));
        assert!(content.contains("0.10850694471784776"));
    }

    #[test]
    fn test_join_numbers() {
        assert_eq!(join_numbers(&[700000.0, -4444.5]), "700000, -4444.5");
    }

    #[test]
    fn test_path_outside_home_is_verbatim() {
        assert_eq!(path_to_string(Path::new("/tmp/x.log")), "/tmp/x.log");
    }
}
