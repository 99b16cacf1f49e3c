//! Custom icon registry.
//!
//! Maps icon keys carried by palette items and elements to image assets
//! on disk. Keys that are absent here (or whose asset fails to decode)
//! fall back to the procedural vector glyph for the element's type, so
//! the registry can be left empty without affecting the editor.

/// Resolves an icon key to its asset path, if registered.
#[must_use]
pub fn icon_asset_path(key: &str) -> Option<&'static str> {
    REGISTRY
        .iter()
        .find(|(registered, _)| *registered == key)
        .map(|(_, path)| *path)
}

/// Registered icon assets, relative to the working directory.
const REGISTRY: &[(&str, &str)] = &[
    ("round-table", "assets/icons/round-table.png"),
    ("square-table", "assets/icons/square-table.png"),
    ("dance-floor", "assets/icons/dance-floor.png"),
    ("bar", "assets/icons/bar.png"),
    ("restrooms", "assets/icons/restrooms.png"),
    ("sound-booth", "assets/icons/sound-booth.png"),
    ("kitchen", "assets/icons/kitchen.png"),
];
