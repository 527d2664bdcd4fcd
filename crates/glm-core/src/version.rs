use std::cmp::Ordering;

/// Compare two dotted-numeric version strings.
///
/// Returns the ordering of `latest` relative to `current`:
/// [`Ordering::Greater`] means `latest` is newer. A single leading `v` is
/// ignored on either side and missing trailing segments are 0, so `v1.2`,
/// `1.2` and `1.2.0` all compare equal. Segments that do not parse as
/// non-negative integers also fall back to 0, matching the historical
/// tag-comparison behavior.
#[must_use]
pub fn compare_versions(current: &str, latest: &str) -> Ordering {
    let current = segments(current);
    let latest = segments(latest);

    for i in 0..current.len().max(latest.len()) {
        let current_val = current.get(i).copied().unwrap_or(0);
        let latest_val = latest.get(i).copied().unwrap_or(0);

        match latest_val.cmp(&current_val) {
            Ordering::Equal => {}
            unequal => return unequal,
        }
    }

    Ordering::Equal
}

fn segments(version: &str) -> Vec<u64> {
    version
        .strip_prefix('v')
        .unwrap_or(version)
        .split('.')
        .map(|part| part.parse().unwrap_or(0))
        .collect()
}

/// Truncate release notes to at most `max_lines` lines, appending an
/// ellipsis marker when anything was cut.
#[must_use]
pub fn format_release_notes(notes: &str, max_lines: usize) -> String {
    let lines: Vec<&str> = notes.split('\n').collect();
    if lines.len() <= max_lines {
        return notes.to_string();
    }

    let mut truncated = lines[..max_lines].join("\n");
    truncated.push_str("\n...");
    truncated
}

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use super::{compare_versions, format_release_notes};

    #[test]
    fn equal_versions_compare_equal() {
        for version in ["1.0.0", "v1.2", "0.0.1", "2"] {
            assert_eq!(compare_versions(version, version), Ordering::Equal);
        }
    }

    #[test]
    fn newer_and_older_versions_are_detected() {
        assert_eq!(compare_versions("1.2.0", "1.3.0"), Ordering::Greater);
        assert_eq!(compare_versions("2.0.0", "1.9.9"), Ordering::Less);
        assert_eq!(compare_versions("1.0.0", "1.0.1"), Ordering::Greater);
        assert_eq!(compare_versions("0.99.0", "1"), Ordering::Greater);
    }

    #[test]
    fn leading_v_and_missing_segments_are_normalized() {
        assert_eq!(compare_versions("v1.2", "1.2.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.2.0", "v1.2"), Ordering::Equal);
        assert_eq!(compare_versions("1.0.0", "v1.1.0"), Ordering::Greater);
    }

    #[test]
    fn comparison_is_antisymmetric() {
        let pairs = [("1.2.3", "1.2.4"), ("2.0", "1.9.9"), ("1.0.0", "1.0.0")];
        for (a, b) in pairs {
            assert_eq!(compare_versions(a, b), compare_versions(b, a).reverse());
        }
    }

    #[test]
    fn unparseable_segments_fall_back_to_zero() {
        // "1.a.0" compares as "1.0.0"; kept for tag compatibility.
        assert_eq!(compare_versions("1.a.0", "1.0.0"), Ordering::Equal);
        assert_eq!(compare_versions("1.a.0", "1.2.0"), Ordering::Greater);
    }

    #[test]
    fn long_notes_are_truncated_with_marker() {
        let notes = "one\ntwo\nthree\nfour\nfive";
        assert_eq!(
            format_release_notes(notes, 3),
            "one\ntwo\nthree\n..."
        );
    }

    #[test]
    fn short_notes_are_returned_unchanged() {
        let notes = "one\ntwo";
        assert_eq!(format_release_notes(notes, 3), notes);
    }
}
