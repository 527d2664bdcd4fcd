/// Whether a toggle value counts as "on". Accepts `1`, `true`, and `yes` in
/// any case, with surrounding whitespace ignored.
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes"
    )
}

/// Read a boolean toggle from the environment. Unset, unreadable, or
/// non-truthy values are `false`.
#[must_use]
pub fn flag(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| is_truthy(&value))
}
