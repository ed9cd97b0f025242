use serde_json::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorRole {
    Good,
    Warn,
    Bad,
}

impl ColorRole {
    /// Theme registry key holding the colour for this role.
    pub fn theme_key(self) -> &'static str {
        match self {
            Self::Good => "good",
            Self::Warn => "warn",
            Self::Bad => "bad",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionTag {
    Excellent,
    Good,
    Medium,
    Bad,
}

impl ConditionTag {
    pub fn text_key(self) -> &'static str {
        match self {
            Self::Excellent => "tagExcellent",
            Self::Good => "tagGood",
            Self::Medium => "tagMedium",
            Self::Bad => "tagBad",
        }
    }
}

/// Clamps an arbitrary condition reading into `0..=100`.
///
/// NaN collapses to 0 and infinities saturate. Fractions are truncated;
/// every classification threshold is an integer so the bucket never changes.
pub fn clamp(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.clamp(0.0, 100.0) as u8
}

/// Coerces a loosely typed JSON reading into a number the way a host
/// scripting runtime would: numeric strings parse, booleans map to 1/0,
/// anything else is 0.
pub fn coerce_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    }
}

pub fn clamp_value(value: Option<&Value>) -> u8 {
    value.map_or(0, |v| clamp(coerce_number(v)))
}

pub fn color_bucket(pct: u8) -> ColorRole {
    if pct >= 75 {
        ColorRole::Good
    } else if pct >= 45 {
        ColorRole::Warn
    } else {
        ColorRole::Bad
    }
}

// Deliberately not derived from `color_bucket`: four labels against three colours.
pub fn tag(pct: u8) -> ConditionTag {
    if pct >= 75 {
        ConditionTag::Excellent
    } else if pct >= 45 {
        ConditionTag::Good
    } else if pct >= 25 {
        ConditionTag::Medium
    } else {
        ConditionTag::Bad
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            other => out.push(other),
        }
    }
    out
}
