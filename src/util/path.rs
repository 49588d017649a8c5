//! Path helpers

/// Expand environment variables and `~` in a path string.
///
/// Supports `$VAR`, `${VAR}` and `~`. Unresolvable input is returned unchanged.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_plain_path_when_expand_then_unchanged() {
        assert_eq!(expand_env_vars("manifests/box.toml"), "manifests/box.toml");
    }

    #[test]
    fn given_tilde_when_expand_then_uses_home() {
        let home = std::env::var("HOME").expect("HOME should be set");
        assert_eq!(expand_env_vars("~/box.toml"), format!("{home}/box.toml"));
    }

    #[test]
    fn given_undefined_var_when_expand_then_returns_input() {
        let input = "$RCOMPOSE_SURELY_UNDEFINED_VAR/box.toml";
        assert_eq!(expand_env_vars(input), input);
    }
}
