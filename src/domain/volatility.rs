use serde::{Deserialize, Serialize};

/// ATR sample for one bar. Absent until the smoothing window is seeded.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum Atr {
    #[default]
    NotYetAvailable,
    Value(f64),
}

impl Atr {
    pub fn value(&self) -> Option<f64> {
        match self {
            Atr::NotYetAvailable => None,
            Atr::Value(v) => Some(*v),
        }
    }

    pub fn is_available(&self) -> bool {
        matches!(self, Atr::Value(_))
    }
}
