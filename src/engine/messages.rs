use crate::analysis::ZoneDecision;
use crate::domain::{Atr, LabeledSwing};
use crate::models::BosRecord;

/// What one streaming update changed.
#[derive(Debug, Clone, PartialEq)]
pub struct UpdateReport {
    pub bar_index: u64,
    pub atr: Atr,

    /// Pivot confirmed by this bar (it sits `swing_length` bars back)
    pub swing: Option<LabeledSwing>,

    /// Present whenever `swing` is
    pub decision: Option<ZoneDecision>,

    /// Zones retired by this bar, including a freshly admitted zone that had
    /// already been broken inside its confirmation window
    pub breaks: Vec<BosRecord>,
}

impl UpdateReport {
    pub(crate) fn new(bar_index: u64, atr: Atr) -> Self {
        Self {
            bar_index,
            atr,
            swing: None,
            decision: None,
            breaks: Vec::new(),
        }
    }

    pub fn admitted_zone(&self) -> bool {
        matches!(self.decision, Some(ZoneDecision::Admitted { .. }))
    }
}
