//! The rule registry.

use std::collections::HashSet;

use convlint_config::RulesConfig;

use crate::builtin::BUILTIN_RULES;
use crate::error::RegistryError;
use crate::rule::Rule;

/// The set of rules for one run.
///
/// Built once at startup; nothing mutates it while records are evaluated.
#[derive(Debug, Clone)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
}

impl RuleRegistry {
    /// Register `rules` in the given order.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::DuplicateRule`] if two rules share an id.
    pub fn new(rules: Vec<Rule>) -> Result<Self, RegistryError> {
        let mut seen = HashSet::new();
        for rule in &rules {
            if !seen.insert(rule.id.to_ascii_uppercase()) {
                return Err(RegistryError::DuplicateRule {
                    id: rule.id.to_string(),
                });
            }
        }
        Ok(Self { rules })
    }

    /// Registry holding every built-in rule.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            rules: BUILTIN_RULES.to_vec(),
        }
    }

    #[must_use]
    pub fn list_rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Look a rule up by id or name.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.is_named(key))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Apply `[rules]` configuration: drop disabled rules and override
    /// severities.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::UnknownRule`] if a key names no rule.
    pub fn apply_overrides(mut self, config: &RulesConfig) -> Result<Self, RegistryError> {
        for key in &config.disabled {
            self.require(key, "disabled")?;
        }
        for (key, &severity) in &config.severity {
            self.require(key, "severity")?;
            for rule in self.rules.iter_mut().filter(|r| r.is_named(key)) {
                rule.severity = severity;
            }
        }

        self.rules
            .retain(|rule| !config.disabled.iter().any(|key| rule.is_named(key)));
        tracing::debug!(
            rules = self.rules.len(),
            disabled = config.disabled.len(),
            "rule registry configured"
        );
        Ok(self)
    }

    fn require(&self, key: &str, setting: &'static str) -> Result<(), RegistryError> {
        if self.get(key).is_some() {
            Ok(())
        } else {
            Err(RegistryError::UnknownRule {
                setting,
                key: key.to_string(),
            })
        }
    }
}
