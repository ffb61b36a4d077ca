//! Plant identifier resolution.

/// Picks the plant a question refers to.
///
/// Precedence: the plant the user spoke, then the configured default. An
/// empty result means the plant is undetermined and the caller must ask for
/// it.
pub fn resolve_plant(spoken_slot: Option<&str>, configured_default: Option<&str>) -> String {
    [spoken_slot, configured_default]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|candidate| !candidate.is_empty())
        .unwrap_or_default()
        .to_string()
}
