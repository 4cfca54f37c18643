//! Tabular layout and value formatting
//!
//! One header row, then one row per unit: the metadata columns (word, pos,
//! character count, total frequency) followed by the 16 metric columns in
//! fixed order. Non-finite and undefined values serialize as the literal
//! tokens `inf`, `-inf`, `nan`.

use std::borrow::Cow;

use contracts::UnitResult;

/// Metadata columns preceding the metrics
pub const METADATA_COLUMNS: [&str; 4] = ["word", "pos", "num_chars", "total_frequency"];

/// The 16 metric columns in their fixed export order
pub const METRIC_COLUMNS: [&str; 16] = [
    "range",
    "sd_population",
    "vc_population",
    "juilland_d",
    "carroll_d2",
    "rosengren_s_adj",
    "dp",
    "dp_norm",
    "kl_divergence",
    "jsd_dispersion",
    "hellinger_dispersion",
    "mean_text_frequency_ft",
    "pervasiveness_pt",
    "evenness_da",
    "ft_adjusted_by_pt",
    "ft_adjusted_by_da",
];

/// Default decimal precision for floating values
pub const DEFAULT_PRECISION: usize = 6;

/// Full header row
pub fn header() -> Vec<&'static str> {
    METADATA_COLUMNS
        .iter()
        .chain(METRIC_COLUMNS.iter())
        .copied()
        .collect()
}

/// Format one floating value at the given precision
///
/// `None` (structurally undefined) serializes as `nan`.
pub fn format_value(value: Option<f64>, precision: usize) -> String {
    match value {
        None => "nan".to_string(),
        Some(v) if v.is_nan() => "nan".to_string(),
        Some(v) if v == f64::INFINITY => "inf".to_string(),
        Some(v) if v == f64::NEG_INFINITY => "-inf".to_string(),
        Some(v) => format!("{v:.precision$}"),
    }
}

/// Assemble all column values for one result row
pub fn row_values(row: &UnitResult, precision: usize) -> Vec<String> {
    let m = &row.metrics;
    vec![
        row.word.clone(),
        row.pos.clone(),
        row.word.chars().count().to_string(),
        format_value(Some(row.total_frequency), precision),
        m.range.to_string(),
        format_value(m.sd_population, precision),
        format_value(m.vc_population, precision),
        format_value(m.juilland_d, precision),
        format_value(m.carroll_d2, precision),
        format_value(m.rosengren_s_adj, precision),
        format_value(m.dp, precision),
        format_value(m.dp_norm, precision),
        format_value(m.kl_divergence, precision),
        format_value(m.jsd_dispersion, precision),
        format_value(m.hellinger_dispersion, precision),
        format_value(m.mean_text_frequency_ft, precision),
        format_value(m.pervasiveness_pt, precision),
        format_value(m.evenness_da, precision),
        format_value(m.ft_adjusted_by_pt, precision),
        format_value(m.ft_adjusted_by_da, precision),
    ]
}

/// Quote a CSV field when it contains a delimiter, quote, or line break
pub fn csv_escape(field: &str) -> Cow<'_, str> {
    if field.contains([',', '"', '\n', '\r']) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::DispersionMetrics;

    #[test]
    fn test_header_layout() {
        let header = header();
        assert_eq!(header.len(), 20);
        assert_eq!(header[0], "word");
        assert_eq!(header[4], "range");
        assert_eq!(header[19], "ft_adjusted_by_da");
    }

    #[test]
    fn test_format_value_tokens() {
        assert_eq!(format_value(Some(0.5), 6), "0.500000");
        assert_eq!(format_value(Some(1.0 / 3.0), 2), "0.33");
        assert_eq!(format_value(Some(f64::INFINITY), 6), "inf");
        assert_eq!(format_value(Some(f64::NEG_INFINITY), 6), "-inf");
        assert_eq!(format_value(Some(f64::NAN), 6), "nan");
        assert_eq!(format_value(None, 6), "nan");
    }

    #[test]
    fn test_row_values_char_count() {
        let row = UnitResult {
            word: "语料库".to_string(),
            pos: "n".to_string(),
            total_frequency: 3.0,
            metrics: DispersionMetrics {
                range: 2,
                kl_divergence: Some(f64::INFINITY),
                ..Default::default()
            },
        };

        let values = row_values(&row, 6);
        assert_eq!(values.len(), 20);
        assert_eq!(values[2], "3"); // chars, not bytes
        assert_eq!(values[3], "3.000000");
        assert_eq!(values[4], "2");
        assert_eq!(values[12], "inf");
    }

    #[test]
    fn test_csv_escape() {
        assert_eq!(csv_escape("plain"), "plain");
        assert_eq!(csv_escape("a,b"), "\"a,b\"");
        assert_eq!(csv_escape("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
