// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Job directory templates with named slots.
//!
//! A template such as `{instance}_{key}/{repeat}` is parsed once; rendering
//! then only substitutes values, so a template with the wrong slots is
//! rejected before any job directory is computed.

use crate::SweepError;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// Regex pattern for `{slot}` placeholders
// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static SLOT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([^{}]*)\}").expect("constant regex pattern is valid"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    Instance,
    Key,
    Repeat,
}

jf_core::simple_display! {
    Slot {
        Instance => "instance",
        Key => "key",
        Repeat => "repeat",
    }
}

impl Slot {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "instance" => Some(Slot::Instance),
            "key" => Some(Slot::Key),
            "repeat" => Some(Slot::Repeat),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Part {
    Literal(String),
    Slot(Slot),
}

/// A parsed job path template, relative to a sweep's base directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    source: String,
    parts: Vec<Part>,
}

impl PathTemplate {
    /// Parse `template`; every slot may appear at most once.
    pub fn parse(template: &str) -> Result<Self, SweepError> {
        let invalid = |reason: String| SweepError::InvalidTemplate {
            template: template.to_string(),
            reason,
        };

        let mut parts = Vec::new();
        let mut seen = Vec::new();
        let mut last = 0;
        for caps in SLOT_PATTERN.captures_iter(template) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let slot = Slot::parse(name.as_str())
                .ok_or_else(|| invalid(format!("unknown slot '{{{}}}'", name.as_str())))?;
            if seen.contains(&slot) {
                return Err(invalid(format!("slot '{{{slot}}}' appears more than once")));
            }
            seen.push(slot);

            if whole.start() > last {
                parts.push(Part::Literal(template[last..whole.start()].to_string()));
            }
            parts.push(Part::Slot(slot));
            last = whole.end();
        }
        if last < template.len() {
            parts.push(Part::Literal(template[last..].to_string()));
        }
        Ok(Self { source: template.to_string(), parts })
    }

    pub fn has_slot(&self, slot: Slot) -> bool {
        self.parts.contains(&Part::Slot(slot))
    }

    /// Fail unless the template has exactly the instance and key slots, plus
    /// the repeat slot when `repeats` is set.
    pub fn require_slots(&self, repeats: bool) -> Result<(), SweepError> {
        for slot in [Slot::Instance, Slot::Key] {
            if !self.has_slot(slot) {
                return Err(self.invalid(format!("missing slot '{{{slot}}}'")));
            }
        }
        match (repeats, self.has_slot(Slot::Repeat)) {
            (true, false) => Err(self.invalid("repeats need a '{repeat}' slot".to_string())),
            (false, true) => Err(self.invalid("'{repeat}' slot without repeats".to_string())),
            _ => Ok(()),
        }
    }

    /// Substitute slot values. A repeat index must be given exactly when the
    /// template has a repeat slot.
    pub fn render(
        &self,
        instance: &str,
        key: &str,
        repeat: Option<u32>,
    ) -> Result<String, SweepError> {
        if repeat.is_some() != self.has_slot(Slot::Repeat) {
            let reason = match repeat {
                Some(index) => format!("repeat index {index} given but no '{{repeat}}' slot"),
                None => "'{repeat}' slot needs a repeat index".to_string(),
            };
            return Err(self.invalid(reason));
        }

        let mut out = String::with_capacity(self.source.len() + instance.len() + key.len());
        for part in &self.parts {
            match part {
                Part::Literal(text) => out.push_str(text),
                Part::Slot(Slot::Instance) => out.push_str(instance),
                Part::Slot(Slot::Key) => out.push_str(key),
                Part::Slot(Slot::Repeat) => {
                    if let Some(index) = repeat {
                        out.push_str(&index.to_string());
                    }
                }
            }
        }
        Ok(out)
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    fn invalid(&self, reason: String) -> SweepError {
        SweepError::InvalidTemplate { template: self.source.clone(), reason }
    }
}

impl fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

#[cfg(test)]
#[path = "template_tests.rs"]
mod tests;
