use super::LogError;
use log::LevelFilter;
use log4rs::config::Logger;
use std::{collections::BTreeMap, env};

/// Parsed form of a `RUST_LOG`-style filter expression such as
/// `info,hns_wallet_core=debug,reqwest=warn`.
pub(super) struct Filters {
    root_level: LevelFilter,
    targets: BTreeMap<String, LevelFilter>,
}

impl Filters {
    pub fn new(root_level: LevelFilter) -> Self {
        Self { root_level, targets: BTreeMap::new() }
    }

    pub fn root_level(&self) -> LevelFilter {
        self.root_level
    }

    pub fn parse_env(&mut self, env: &str) -> &mut Self {
        self.parse_expression(&env::var(env).unwrap_or_default())
    }

    /// Applies the expression on top of the current state; later entries override earlier ones.
    /// Invalid entries are reported on stdout and skipped since no logger exists yet.
    pub fn parse_expression(&mut self, expression: &str) -> &mut Self {
        for spec in expression.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            match Self::parse_spec(spec) {
                Ok((None, level)) => self.root_level = level,
                Ok((Some(target), level)) => {
                    self.targets.insert(target.to_string(), level);
                }
                Err(err) => println!("Ignoring invalid logging spec: {err}"),
            }
        }
        self
    }

    fn parse_spec(spec: &str) -> Result<(Option<&str>, LevelFilter), LogError> {
        let mut parts = spec.split('=').map(str::trim);
        match (parts.next(), parts.next(), parts.next()) {
            // a lone token is either the root level or a target enabled at max level
            (Some(token), None, None) => match token.parse() {
                Ok(level) => Ok((None, level)),
                Err(_) => Ok((Some(token), LevelFilter::max())),
            },
            (Some(target), Some(""), None) => Ok((Some(target), LevelFilter::max())),
            (Some(target), Some(level), None) => {
                level.parse().map(|level| (Some(target), level)).map_err(|_| LogError::ParseLoggerSpec(spec.to_string()))
            }
            _ => Err(LogError::ParseLoggerSpec(spec.to_string())),
        }
    }

    pub fn loggers(&self, appenders: &[&'static str]) -> Vec<Logger> {
        self.targets
            .iter()
            .map(|(target, level)| {
                Logger::builder().appenders(appenders.iter().map(|x| x.to_string())).additive(false).build(target.clone(), *level)
            })
            .collect()
    }

    #[cfg(test)]
    pub fn target_level(&self, target: &str) -> Option<LevelFilter> {
        self.targets.get(target).copied()
    }
}
