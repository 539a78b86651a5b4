use crate::pasteboard::TypeIdentifier;

/// Window title for the current selection: the selected type's title, or
/// the application name when nothing is selected.
pub fn title(selected_type: Option<&TypeIdentifier>, app_name: &str) -> String {
    selected_type
        .map(TypeIdentifier::title)
        .unwrap_or_else(|| app_name.to_string())
}
