use std::collections::BTreeMap;

use serde_json::Map;
use serde_json::Value;

pub const TEXT_DEFAULTS: &[(&str, &str)] = &[
    ("vehiclesStored", "Your stored vehicles"),
    ("hint", "↑↓: select • Enter: take out • ESC: close"),
    ("stored", "STORED"),
    ("out", "OUT"),
    ("take", "TAKE VEHICLE"),
    ("close", "CLOSE"),
    ("fuel", "Fuel"),
    ("engine", "Engine"),
    ("body", "Body"),
    ("tagExcellent", "EXCELLENT"),
    ("tagGood", "GOOD"),
    ("tagMedium", "MEDIUM"),
    ("tagBad", "BAD"),
];

pub const THEME_KEYS: [&str; 8] = [
    "primary", "bg", "border", "text", "muted", "good", "warn", "bad",
];

const THEME_DEFAULTS: [&str; 8] = [
    "#3b82f6",
    "rgba(12, 14, 20, 0.92)",
    "rgba(255, 255, 255, 0.08)",
    "#e5e7eb",
    "#9ca3af",
    "#22c55e",
    "#f59e0b",
    "#ef4444",
];

pub fn default_text(key: &str) -> Option<&'static str> {
    TEXT_DEFAULTS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}

/// Display strings keyed by name. Merged key by key, never replaced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextRegistry {
    entries: BTreeMap<String, Value>,
}

impl TextRegistry {
    pub fn merge(&mut self, partial: &Map<String, Value>) {
        for (key, value) in partial {
            self.entries.insert(key.clone(), value.clone());
        }
    }

    /// Resolves `key`, falling back to the built-in default when the
    /// configured value is missing, empty or not printable.
    pub fn get(&self, key: &str) -> String {
        self.configured(key)
            .or_else(|| default_text(key).map(str::to_string))
            .unwrap_or_default()
    }

    pub fn configured(&self, key: &str) -> Option<String> {
        match self.entries.get(key)? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) if n.as_f64() != Some(0.0) => Some(n.to_string()),
            Value::Bool(true) => Some("true".to_string()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeRegistry {
    vars: BTreeMap<&'static str, String>,
}

impl Default for ThemeRegistry {
    fn default() -> Self {
        let vars = THEME_KEYS
            .iter()
            .zip(THEME_DEFAULTS.iter())
            .map(|(key, value)| (*key, value.to_string()))
            .collect();
        Self { vars }
    }
}

impl ThemeRegistry {
    /// Applies recognized, non-empty string values. Everything else is ignored.
    pub fn apply(&mut self, partial: &Map<String, Value>) {
        for key in THEME_KEYS {
            let Some(Value::String(value)) = partial.get(key) else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            self.vars.insert(key, value.clone());
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.vars.get(key).map(String::as_str).unwrap_or("")
    }

    /// Variables in the fixed key order, as `(name, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        THEME_KEYS.iter().map(move |key| (*key, self.get(key)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => Map::new(),
        }
    }

    #[test]
    fn unconfigured_text_uses_defaults() {
        let texts = TextRegistry::default();
        assert_eq!(texts.get("take"), "TAKE VEHICLE");
        assert_eq!(texts.get("tagBad"), "BAD");
        assert_eq!(texts.get("nope"), "");
    }

    #[test]
    fn merge_keeps_prior_keys_and_accepts_unknown() {
        let mut texts = TextRegistry::default();
        texts.merge(&object(json!({"take": "SACAR", "extra": "kept"})));
        texts.merge(&object(json!({"close": "CERRAR"})));

        assert_eq!(texts.get("take"), "SACAR");
        assert_eq!(texts.get("close"), "CERRAR");
        assert_eq!(texts.get("extra"), "kept");
        assert_eq!(texts.get("fuel"), "Fuel");
    }

    #[test]
    fn empty_or_null_text_falls_back() {
        let mut texts = TextRegistry::default();
        texts.merge(&object(json!({"take": "", "close": null, "fuel": 42})));
        assert_eq!(texts.get("take"), "TAKE VEHICLE");
        assert_eq!(texts.get("close"), "CLOSE");
        assert_eq!(texts.get("fuel"), "42");
    }

    #[test]
    fn zero_text_falls_back_like_other_falsy_values() {
        let mut texts = TextRegistry::default();
        texts.merge(&object(json!({"fuel": 0, "engine": 0.0, "body": false})));
        assert_eq!(texts.get("fuel"), "Fuel");
        assert_eq!(texts.get("engine"), "Engine");
        assert_eq!(texts.get("body"), "Body");
    }

    #[test]
    fn theme_only_accepts_recognized_non_empty_keys() {
        let mut theme = ThemeRegistry::default();
        let before_bad = theme.get("bad").to_string();
        theme.apply(&object(json!({
            "primary": "#ff0000",
            "bad": "",
            "warn": 7,
            "glow": "#00ff00",
        })));

        assert_eq!(theme.get("primary"), "#ff0000");
        assert_eq!(theme.get("bad"), before_bad);
        assert_eq!(theme.get("warn"), "#f59e0b");
        assert_eq!(theme.get("glow"), "");
        assert_eq!(theme.iter().count(), THEME_KEYS.len());
    }
}
