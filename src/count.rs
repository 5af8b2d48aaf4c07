// True-count normalization.
// The widget scrapes the review count off a third-party page, so the
// raw value arriving here can be anything numeric-looking: an integer,
// a float, or text. Everything funnels into one clamped u64.

/// Largest count the game will represent, for the true answer and for
/// every decoy generated around it.
pub const CAP: u64 = 200_000_000_000;

/// A raw, possibly malformed count as delivered by the page layer.
#[derive(Debug, Clone, PartialEq)]
pub enum RawCount {
    Int(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
}

impl RawCount {
    /// Collapse to the authoritative count: coerce to a number (0 when
    /// that fails or the value is not finite), truncate toward zero,
    /// clamp to `[0, CAP]`.
    pub fn normalize(&self) -> u64 {
        match self {
            RawCount::Int(v) => clamp_signed(*v),
            RawCount::Unsigned(v) => (*v).min(CAP),
            RawCount::Float(v) => clamp_float(*v),
            RawCount::Text(s) => match s.trim().parse::<f64>() {
                Ok(v) => clamp_float(v),
                Err(_) => 0,
            },
        }
    }
}

fn clamp_signed(v: i64) -> u64 {
    if v < 0 {
        0
    } else {
        (v as u64).min(CAP)
    }
}

fn clamp_float(v: f64) -> u64 {
    if !v.is_finite() {
        return 0;
    }
    let truncated = v.trunc();
    if truncated <= 0.0 {
        0
    } else if truncated >= CAP as f64 {
        CAP
    } else {
        truncated as u64
    }
}

impl From<i64> for RawCount {
    fn from(v: i64) -> Self {
        RawCount::Int(v)
    }
}

impl From<i32> for RawCount {
    fn from(v: i32) -> Self {
        RawCount::Int(v as i64)
    }
}

impl From<u64> for RawCount {
    fn from(v: u64) -> Self {
        RawCount::Unsigned(v)
    }
}

impl From<u32> for RawCount {
    fn from(v: u32) -> Self {
        RawCount::Unsigned(v as u64)
    }
}

impl From<f64> for RawCount {
    fn from(v: f64) -> Self {
        RawCount::Float(v)
    }
}

impl From<&str> for RawCount {
    fn from(v: &str) -> Self {
        RawCount::Text(v.to_owned())
    }
}

impl From<String> for RawCount {
    fn from(v: String) -> Self {
        RawCount::Text(v)
    }
}
