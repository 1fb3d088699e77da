use crate::data::model::{Column, ContactTable};

/// Metrics compared in the correlation matrix.
pub const CORRELATED_METRICS: [Column; 4] = [
    Column::LeadScore,
    Column::OverallScore,
    Column::EnthusiasmLevel,
    Column::CompletionRate,
];

/// Square matrix of Pearson coefficients, `None` where undefined.
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub columns: Vec<Column>,
    pub values: Vec<Vec<Option<f64>>>,
}

pub fn correlation_matrix(table: &ContactTable) -> CorrelationMatrix {
    correlation_matrix_of(table, &CORRELATED_METRICS)
}

pub fn correlation_matrix_of(table: &ContactTable, columns: &[Column]) -> CorrelationMatrix {
    let values = columns
        .iter()
        .map(|&a| columns.iter().map(|&b| pearson(table, a, b)).collect())
        .collect();
    CorrelationMatrix {
        columns: columns.to_vec(),
        values,
    }
}

/// Pearson correlation over rows where both values are present.
pub fn pearson(table: &ContactTable, a: Column, b: Column) -> Option<f64> {
    let pairs: Vec<(f64, f64)> = table
        .iter()
        .filter_map(|row| Some((row.number(a)?, row.number(b)?)))
        .collect();
    if pairs.len() < 2 {
        return None;
    }

    let n = pairs.len() as f64;
    let mean_x = pairs.iter().map(|p| p.0).sum::<f64>() / n;
    let mean_y = pairs.iter().map(|p| p.1).sum::<f64>() / n;

    let (mut cov, mut var_x, mut var_y) = (0.0, 0.0, 0.0);
    for (x, y) in &pairs {
        let dx = x - mean_x;
        let dy = y - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }
    if var_x == 0.0 || var_y == 0.0 {
        return None;
    }
    Some((cov / (var_x.sqrt() * var_y.sqrt())).clamp(-1.0, 1.0))
}
