use std::env;

/// Runtime configuration, read once at startup and passed into the
/// components that need it. Handlers never reach into the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub strict_job_edits: bool,
}

impl Config {
    pub fn from_env() -> Result<Self, env::VarError> {
        let database_url = env::var("DATABASE_URL")?;
        let bind_addr = env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
        let strict_job_edits = env::var("STRICT_JOB_EDITS")
            .map(|v| flag(&v))
            .unwrap_or(false);

        Ok(Self {
            database_url,
            bind_addr,
            strict_job_edits,
        })
    }
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_accepts_common_truthy_values() {
        assert!(flag("1"));
        assert!(flag("true"));
        assert!(flag("TRUE"));
        assert!(!flag("0"));
        assert!(!flag("yes"));
        assert!(!flag(""));
    }
}
