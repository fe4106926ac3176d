/// Keep only alphanumeric and whitespace characters, in their original order.
pub fn normalize(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Derive a filesystem-safe name from an arbitrary title.
pub fn to_filename(input: &str, extension: &str) -> String {
    format!("{}.{extension}", normalize(input).replace(' ', "_"))
}
