//! DispersionMetrics - Metric Engine output
//!
//! One immutable record per vocabulary unit. `None` means the metric is
//! structurally undefined for the given inputs (e.g. VC with a zero mean);
//! KL divergence is the only field that may hold an infinity.

use serde::{Deserialize, Serialize};

/// The 16 dispersion metrics computed for a single unit
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DispersionMetrics {
    /// Number of parts containing the unit (v_i > 0)
    pub range: usize,

    /// Population standard deviation of the per-part frequencies
    pub sd_population: Option<f64>,

    /// Population variation coefficient of the per-part frequencies
    pub vc_population: Option<f64>,

    /// Juilland's D (size-weighted variant)
    pub juilland_d: Option<f64>,

    /// Carroll's D2 (entropy-based)
    pub carroll_d2: Option<f64>,

    /// Rosengren's S_adj
    pub rosengren_s_adj: Option<f64>,

    /// Gries' Deviation of Proportions
    pub dp: Option<f64>,

    /// DP normalized by (1 - min s_i)
    pub dp_norm: Option<f64>,

    /// Kullback-Leibler divergence D(P_obs || S), base 2; may be +inf
    pub kl_divergence: Option<f64>,

    /// 1 - Jensen-Shannon divergence, in [0, 1]
    pub jsd_dispersion: Option<f64>,

    /// 1 - Hellinger distance, in [0, 1]
    pub hellinger_dispersion: Option<f64>,

    /// Mean per-part normalized frequency (Egbert & Burch FT)
    pub mean_text_frequency_ft: Option<f64>,

    /// Proportion of parts containing the unit (PT)
    pub pervasiveness_pt: Option<f64>,

    /// Evenness of the per-part densities (DA), in [0, 1]
    pub evenness_da: Option<f64>,

    /// FT adjusted by pervasiveness (FT * PT)
    pub ft_adjusted_by_pt: Option<f64>,

    /// FT adjusted by evenness (FT * DA)
    pub ft_adjusted_by_da: Option<f64>,
}

impl std::fmt::Display for DispersionMetrics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        fn fmt_opt(value: Option<f64>) -> String {
            match value {
                Some(v) => format!("{v:.4}"),
                None => "undefined".to_string(),
            }
        }

        writeln!(f, "DispersionMetrics {{")?;
        writeln!(f, "  range: {},", self.range)?;
        writeln!(f, "  sd_population: {},", fmt_opt(self.sd_population))?;
        writeln!(f, "  vc_population: {},", fmt_opt(self.vc_population))?;
        writeln!(f, "  juilland_d: {},", fmt_opt(self.juilland_d))?;
        writeln!(f, "  carroll_d2: {},", fmt_opt(self.carroll_d2))?;
        writeln!(f, "  rosengren_s_adj: {},", fmt_opt(self.rosengren_s_adj))?;
        writeln!(f, "  dp: {},", fmt_opt(self.dp))?;
        writeln!(f, "  dp_norm: {},", fmt_opt(self.dp_norm))?;
        writeln!(f, "  kl_divergence: {},", fmt_opt(self.kl_divergence))?;
        writeln!(f, "  jsd_dispersion: {},", fmt_opt(self.jsd_dispersion))?;
        writeln!(
            f,
            "  hellinger_dispersion: {},",
            fmt_opt(self.hellinger_dispersion)
        )?;
        writeln!(
            f,
            "  mean_text_frequency_ft: {},",
            fmt_opt(self.mean_text_frequency_ft)
        )?;
        writeln!(f, "  pervasiveness_pt: {},", fmt_opt(self.pervasiveness_pt))?;
        writeln!(f, "  evenness_da: {},", fmt_opt(self.evenness_da))?;
        writeln!(f, "  ft_adjusted_by_pt: {},", fmt_opt(self.ft_adjusted_by_pt))?;
        writeln!(f, "  ft_adjusted_by_da: {}", fmt_opt(self.ft_adjusted_by_da))?;
        write!(f, "}}")
    }
}
