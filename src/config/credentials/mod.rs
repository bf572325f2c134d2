use super::schema::Config;
use tracing::debug;

macro_rules! define_credentials {
    ($( $name:literal, $env:literal => $($path:ident).+ );* $(;)?) => {
        /// All known credential slot names.
        pub const CREDENTIAL_NAMES: &[&str] = &[$($name),*];

        /// (slot name, env var name) pairs.
        pub const CREDENTIAL_ENV_VARS: &[(&str, &str)] = &[$(($name, $env)),*];

        /// Get the current value of a credential field by slot name.
        pub fn get_credential_value<'a>(config: &'a Config, name: &str) -> Option<&'a str> {
            match name {
                $($name => Some(config.$($path).+.as_str()),)*
                _ => None,
            }
        }

        /// Apply overrides from an arbitrary lookup keyed by env var name.
        ///
        /// Values that are present and non-empty overwrite the corresponding
        /// config field.
        pub fn apply_overrides_with<F>(config: &mut Config, lookup: F)
        where
            F: Fn(&str) -> Option<String>,
        {
            $(
                if let Some(val) = lookup($env) {
                    if !val.is_empty() {
                        debug!("{} overridden from {}", $name, $env);
                        config.$($path).+ = val;
                    }
                }
            )*
        }
    };
}

define_credentials! {
    "discord-token", "BRAINRELAY_DISCORD_TOKEN" => discord.token;
    "secret-key",    "BRAINRELAY_SECRET_KEY"    => brain.secret_key;
    "brain-url",     "BRAINRELAY_BRAIN_URL"     => brain.url;
}

/// Apply environment variable overrides.
///
/// Any `BRAINRELAY_*` env var that is set and non-empty will overwrite the
/// corresponding config field, allowing secrets to be injected without
/// touching the config file (useful for containers and PaaS hosts).
pub fn apply_env_overrides(config: &mut Config) {
    apply_overrides_with(config, |name| std::env::var(name).ok());
}
