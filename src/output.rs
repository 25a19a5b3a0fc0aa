use std::sync::OnceLock;

static QUIET: OnceLock<bool> = OnceLock::new();

/// Status lines are suppressed when `SHOPDB_QUIET` is `1` or `true`
pub fn is_quiet() -> bool {
    *QUIET.get_or_init(|| quiet_from(std::env::var("SHOPDB_QUIET").ok().as_deref()))
}

fn quiet_from(value: Option<&str>) -> bool {
    value
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_values() {
        assert!(quiet_from(Some("1")));
        assert!(quiet_from(Some("TRUE")));
        assert!(!quiet_from(Some("0")));
        assert!(!quiet_from(None));
    }
}
