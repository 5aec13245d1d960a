/// Turn a display name into a job key.
///
/// ASCII letters, digits and spaces are kept, every other character becomes
/// `-`, then spaces become `_`. The result only contains `[A-Za-z0-9_-]`.
/// Distinct names may normalize to the same key; the job map rejects that.
pub fn normalize_key(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            c if c.is_ascii_alphanumeric() => c,
            ' ' => '_',
            _ => '-',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_test_job_name() {
        assert_eq!(
            normalize_key("activerecord mysql2:isolated (truffleruby-head / ubuntu-latest)"),
            "activerecord_mysql2-isolated_-truffleruby-head_-_ubuntu-latest-"
        );
    }

    #[test]
    fn test_normalize_setup_job_name() {
        assert_eq!(
            normalize_key("Bundle Install (3.3 / ubuntu-latest)"),
            "Bundle_Install_-3-3_-_ubuntu-latest-"
        );
    }

    #[test]
    fn test_normalize_keeps_plain_names() {
        assert_eq!(normalize_key("actionpack"), "actionpack");
        assert_eq!(normalize_key("mysql2-isolated"), "mysql2-isolated");
        // underscores are punctuation too
        assert_eq!(normalize_key("isolated_test"), "isolated-test");
    }

    #[test]
    fn test_normalize_only_emits_allowed_characters() {
        let name = "a!b@c#d$ e%f^g&h*(i)j+k=l{m}n[o]p|q\\r;s'u\"v<w>x,y.z?/~`ü\t";
        let key = normalize_key(name);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
        assert_eq!(key.chars().count(), name.chars().count());
    }

    #[test]
    fn test_normalize_is_not_injective() {
        assert_eq!(normalize_key("a:b"), normalize_key("a.b"));
    }
}
