use serde::{Deserialize, Serialize};

pub const LBS_PER_KG: f64 = 2.20462;

/// Canonical kettlebell sizes. Stored and selected values are always these
/// kilogram figures; the unit only changes the label.
pub const KETTLEBELL_WEIGHTS_KG: [u32; 11] = [8, 12, 16, 20, 24, 28, 32, 36, 40, 44, 48];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayUnit {
    #[default]
    Metric,
    Imperial,
}

impl DisplayUnit {
    pub fn from_imperial(use_imperial: bool) -> Self {
        if use_imperial {
            DisplayUnit::Imperial
        } else {
            DisplayUnit::Metric
        }
    }

    pub fn is_imperial(&self) -> bool {
        *self == DisplayUnit::Imperial
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            DisplayUnit::Metric => "kg",
            DisplayUnit::Imperial => "lbs",
        }
    }

    /// Display value for a kilogram figure: pounds are rounded, kilograms
    /// are passed through.
    pub fn convert(&self, kg: f64) -> f64 {
        match self {
            DisplayUnit::Metric => kg,
            DisplayUnit::Imperial => kg_to_lbs(kg) as f64,
        }
    }
}

impl std::fmt::Display for DisplayUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.suffix())
    }
}

impl std::str::FromStr for DisplayUnit {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "metric" => Ok(DisplayUnit::Metric),
            "lb" | "lbs" | "imperial" => Ok(DisplayUnit::Imperial),
            _ => Err(anyhow::anyhow!("Unknown unit '{}'. Use: kg, lbs", s)),
        }
    }
}

/// Round half away from zero.
pub fn kg_to_lbs(kg: f64) -> i64 {
    (kg * LBS_PER_KG).round() as i64
}

pub fn lbs_to_kg(lbs: f64) -> i64 {
    (lbs / LBS_PER_KG).round() as i64
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeightOption {
    pub kg: u32,
    pub label: String,
}

pub fn weight_options(unit: DisplayUnit) -> Vec<WeightOption> {
    KETTLEBELL_WEIGHTS_KG
        .iter()
        .map(|&kg| WeightOption {
            kg,
            label: format_weight(kg as f64, unit),
        })
        .collect()
}

/// "16kg" or "35lbs".
pub fn format_weight(kg: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Metric => format!("{}{}", trim_float(kg), unit.suffix()),
        DisplayUnit::Imperial => format!("{}{}", kg_to_lbs(kg), unit.suffix()),
    }
}

/// Whole-aggregate volume with thousands separators.
pub fn format_volume(volume_kg: f64, unit: DisplayUnit) -> String {
    match unit {
        DisplayUnit::Metric => {
            // Round to tenths before splitting so a .95+ fraction carries.
            let tenths = (volume_kg * 10.0).round() as i64;
            let whole = group_thousands(tenths / 10);
            match (tenths % 10).abs() {
                0 => whole,
                frac => format!("{}.{}", whole, frac),
            }
        }
        DisplayUnit::Imperial => group_thousands(kg_to_lbs(volume_kg)),
    }
}

pub fn group_thousands(n: i64) -> String {
    let digits = n.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    if n < 0 {
        format!("-{}", out)
    } else {
        out
    }
}

fn trim_float(v: f64) -> String {
    if v == v.floor() {
        format!("{}", v as i64)
    } else {
        format!("{:.1}", v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_kettlebell_sizes() {
        assert_eq!(kg_to_lbs(16.0), 35);
        assert_eq!(kg_to_lbs(24.0), 53);
        assert_eq!(kg_to_lbs(32.0), 71);
        assert_eq!(lbs_to_kg(35.0), 16);
        assert_eq!(lbs_to_kg(53.0), 24);
    }

    #[test]
    fn round_trip_stays_within_one_kg() {
        for kg in KETTLEBELL_WEIGHTS_KG {
            let back = lbs_to_kg(kg_to_lbs(kg as f64) as f64);
            assert!((back - kg as i64).abs() <= 1, "{}kg came back as {}", kg, back);
        }
    }

    #[test]
    fn options_keep_kilogram_values_in_imperial() {
        let metric = weight_options(DisplayUnit::Metric);
        let imperial = weight_options(DisplayUnit::Imperial);
        assert_eq!(metric.len(), 11);
        let kgs: Vec<u32> = imperial.iter().map(|o| o.kg).collect();
        assert_eq!(kgs, KETTLEBELL_WEIGHTS_KG.to_vec());
        assert_eq!(metric[2].label, "16kg");
        assert_eq!(imperial[2].label, "35lbs");
    }

    #[test]
    fn volume_is_converted_once() {
        assert_eq!(format_volume(1600.0, DisplayUnit::Metric), "1,600");
        assert_eq!(format_volume(1600.0, DisplayUnit::Imperial), "3,527");
        assert_eq!(format_volume(1234567.0, DisplayUnit::Metric), "1,234,567");
        assert_eq!(format_volume(0.0, DisplayUnit::Imperial), "0");
    }

    #[test]
    fn fractional_volume_carries_into_whole() {
        assert_eq!(format_volume(3.0 * 16.32, DisplayUnit::Metric), "49");
        assert_eq!(format_volume(48.96, DisplayUnit::Metric), "49");
        assert_eq!(format_volume(1234.56, DisplayUnit::Metric), "1,234.6");
        assert_eq!(format_volume(20.5, DisplayUnit::Metric), "20.5");
    }

    #[test]
    fn weight_labels() {
        assert_eq!(format_weight(16.0, DisplayUnit::Metric), "16kg");
        assert_eq!(format_weight(20.5, DisplayUnit::Metric), "20.5kg");
        assert_eq!(format_weight(16.0, DisplayUnit::Imperial), "35lbs");
    }

    #[test]
    fn unit_parsing() {
        assert_eq!("LBS".parse::<DisplayUnit>().unwrap(), DisplayUnit::Imperial);
        assert_eq!("metric".parse::<DisplayUnit>().unwrap(), DisplayUnit::Metric);
        assert!("stone".parse::<DisplayUnit>().is_err());
    }
}
