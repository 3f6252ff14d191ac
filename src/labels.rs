//! Point-label selection for the frequency scatter charts.
//!
//! Three tiers over the joined rows, in their original row order. The tier
//! thresholds and the label-count minimums are fixed policy constants.

use crate::compare::ComparisonRow;

/// Top-up target when the primary tier selects few labels.
pub const LABEL_TARGET: usize = 8;
/// Floor below which even off-threshold points get labeled.
pub const LABEL_FLOOR: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct PointLabel {
    pub gene: String,
    /// Reference-cohort percentage.
    pub x: f64,
    /// Consortium-cohort percentage.
    pub y: f64,
}

fn is_primary(x: f64, y: f64, delta: f64) -> bool {
    x > 30.0 || y > 30.0 || (y > 20.0 && x > 10.0) || (x > 20.0 && y > 10.0) || delta > 25.0
}

fn is_secondary(x: f64, y: f64, delta: f64) -> bool {
    (y >= 5.0 && x >= 5.0) || (y >= 1.0 && delta > 10.0) || (x >= 1.0 && delta > 10.0)
}

/// Selects which gene points get annotated. A gene is never labeled twice.
pub fn select_labels(rows: &[ComparisonRow]) -> Vec<PointLabel> {
    let mut spent = vec![false; rows.len()];
    let mut labels = Vec::new();
    let mut secondary = Vec::new();
    let mut leftovers = Vec::new();

    for (i, row) in rows.iter().enumerate() {
        let x = row.reference_percentage;
        let y = row.consortium_percentage;
        let delta = (y - x).abs();

        if is_primary(x, y, delta) {
            spent[i] = true;
            labels.push(PointLabel {
                gene: row.gene.clone(),
                x,
                y,
            });
        } else if is_secondary(x, y, delta) {
            secondary.push(i);
        } else {
            leftovers.push(i);
        }
    }

    if labels.len() <= LABEL_TARGET {
        for &i in &secondary {
            if labels.len() >= LABEL_TARGET {
                break;
            }
            if !spent[i] {
                spent[i] = true;
                labels.push(PointLabel {
                    gene: rows[i].gene.clone(),
                    x: rows[i].reference_percentage,
                    y: rows[i].consortium_percentage,
                });
            }
        }
    }

    // Everything is hugging the axes; label a handful anyway.
    if labels.len() <= LABEL_FLOOR {
        for &i in &leftovers {
            if labels.len() >= LABEL_FLOOR {
                break;
            }
            if !spent[i] {
                spent[i] = true;
                labels.push(PointLabel {
                    gene: rows[i].gene.clone(),
                    x: rows[i].reference_percentage,
                    y: rows[i].consortium_percentage,
                });
            }
        }
    }

    labels
}
