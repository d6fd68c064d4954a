use crate::domain::{LabeledSwing, SwingKind, SwingLabel, SwingPoint};

/// Labels each swing against the previous swing of the same kind.
///
/// The first high and first low have nothing to compare with and are treated
/// as rising (`HH` / `HL`).
#[derive(Debug, Clone, Default)]
pub struct SwingLabeler {
    last_high: Option<f64>,
    last_low: Option<f64>,
}

impl SwingLabeler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(&mut self, swing: &SwingPoint) -> LabeledSwing {
        let label = match swing.kind {
            SwingKind::High => {
                let previous = self.last_high.replace(swing.price);
                match previous {
                    Some(prev) if swing.price < prev => SwingLabel::LH,
                    _ => SwingLabel::HH,
                }
            }
            SwingKind::Low => {
                let previous = self.last_low.replace(swing.price);
                match previous {
                    Some(prev) if swing.price < prev => SwingLabel::LL,
                    _ => SwingLabel::HL,
                }
            }
        };

        LabeledSwing {
            swing: *swing,
            label,
        }
    }
}

/// Label a chronological swing list.
pub fn label_swings(swings: &[SwingPoint]) -> Vec<LabeledSwing> {
    let mut labeler = SwingLabeler::new();
    swings.iter().map(|s| labeler.label(s)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swing(bar_index: u64, price: f64, kind: SwingKind) -> SwingPoint {
        SwingPoint {
            bar_index,
            time_ms: bar_index as i64,
            price,
            kind,
        }
    }

    #[test]
    fn labels_follow_structure() {
        let swings = vec![
            swing(1, 100.0, SwingKind::High),
            swing(2, 90.0, SwingKind::Low),
            swing(3, 105.0, SwingKind::High),
            swing(4, 88.0, SwingKind::Low),
            swing(5, 105.0, SwingKind::High),
            swing(6, 95.0, SwingKind::Low),
            swing(7, 101.0, SwingKind::High),
        ];
        let labels: Vec<SwingLabel> = label_swings(&swings).iter().map(|l| l.label).collect();
        assert_eq!(
            labels,
            vec![
                SwingLabel::HH,
                SwingLabel::HL,
                SwingLabel::HH,
                SwingLabel::LL,
                SwingLabel::HH, // equal high counts as higher
                SwingLabel::HL,
                SwingLabel::LH,
            ]
        );
    }
}
