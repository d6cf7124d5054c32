use std::env;
use std::path::PathBuf;

/// Get XDG config directory for stackctl
/// Falls back to ~/.config/stackctl if XDG_CONFIG_HOME is not set
pub fn get_config_dir() -> PathBuf {
    match env::var("XDG_CONFIG_HOME") {
        Ok(xdg_config) if !xdg_config.is_empty() => PathBuf::from(xdg_config).join("stackctl"),
        _ => match dirs::home_dir() {
            Some(home) => home.join(".config").join("stackctl"),
            None => PathBuf::from(".config/stackctl"),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_config_dir_with_xdg() {
        env::set_var("XDG_CONFIG_HOME", "/custom/config");
        assert_eq!(get_config_dir(), PathBuf::from("/custom/config/stackctl"));
        env::remove_var("XDG_CONFIG_HOME");
    }

    #[test]
    #[serial]
    fn test_config_dir_ignores_empty_xdg() {
        env::set_var("XDG_CONFIG_HOME", "");
        assert!(get_config_dir().ends_with(".config/stackctl"));
        env::remove_var("XDG_CONFIG_HOME");
    }
}
