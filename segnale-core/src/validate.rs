use crate::types::{
    AlignedRow, EntityId, IssueKind, ScoreColumn, Severity, ValidationConfig, ValidationIssue,
};

/// Scan an aligned table for suspicious score patterns.
///
/// Extreme-value findings for every column come first, then excessive-null
/// findings. An empty table produces no null findings. The rows are never
/// modified and the scan never fails.
#[cfg_attr(
    feature = "tracing",
    tracing::instrument(
        name = "segnale_core::validate_scores",
        skip(rows, cfg),
        fields(entity = %entity, rows = rows.len()),
    )
)]
#[must_use]
pub fn validate_scores(
    entity: &EntityId,
    rows: &[AlignedRow],
    cfg: &ValidationConfig,
) -> Vec<ValidationIssue> {
    let total = rows.len();
    let mut issues = Vec::new();

    for column in ScoreColumn::ALL {
        let count = rows
            .iter()
            .filter_map(|r| r.get(column))
            .filter(|z| z.abs() > cfg.extreme_threshold)
            .count();
        if count > 0 {
            issues.push(ValidationIssue {
                severity: Severity::Warning,
                kind: IssueKind::ExtremeValues,
                column,
                count,
                total,
                message: format!(
                    "{entity}: {count} extreme {column} values (|Z| > {})",
                    cfg.extreme_threshold
                ),
            });
        }
    }

    if total > 0 {
        for column in ScoreColumn::ALL {
            let nulls = rows.iter().filter(|r| r.get(column).is_none()).count();
            #[allow(clippy::cast_precision_loss)]
            let fraction = nulls as f64 / total as f64;
            if fraction > cfg.max_null_fraction {
                issues.push(ValidationIssue {
                    severity: Severity::Warning,
                    kind: IssueKind::ExcessiveNulls,
                    column,
                    count: nulls,
                    total,
                    message: format!("{entity}: {column} is {:.1}% null", fraction * 100.0),
                });
            }
        }
    }

    #[cfg(feature = "tracing")]
    for issue in &issues {
        tracing::warn!(
            column = %issue.column,
            count = issue.count,
            total = issue.total,
            "{}",
            issue.message
        );
    }

    issues
}
