//! Text rendering for the interactive assessment form.

use std::fmt;

use crate::features::DerivedFeatures;
use crate::model::{Prediction, RiskLabel};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Info(String),
    Success(String),
    Error(String),
}

impl Banner {
    pub fn text(&self) -> &str {
        match self {
            Banner::Info(t) | Banner::Success(t) | Banner::Error(t) => t,
        }
    }

    fn tag(&self) -> &'static str {
        match self {
            Banner::Info(_) => "info",
            Banner::Success(_) => "ok",
            Banner::Error(_) => "risk",
        }
    }
}

impl fmt::Display for Banner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut lines = self.text().lines();
        if let Some(first) = lines.next() {
            writeln!(f, "[{}] {}", self.tag(), first)?;
        }
        for line in lines {
            writeln!(f, "{:width$} {}", "", line, width = self.tag().len() + 2)?;
        }
        Ok(())
    }
}

/// Result block shown after the form is submitted
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub banners: Vec<Banner>,
}

impl Assessment {
    pub fn new(prediction: &Prediction, derived: &DerivedFeatures) -> Self {
        let mut banners = vec![
            Banner::Info(format!("Calculated BMI: {}", derived.bmi)),
            Banner::Info(format!("Pulse Pressure: {} mmHg", derived.pulse_pressure)),
        ];

        let headline = match prediction.label {
            RiskLabel::High => "⚠️ High Risk of Cardio Disease",
            RiskLabel::Low => "✅ Low Risk of Cardio Disease",
        };
        let body = match prediction.p_high() {
            Some(p) => format!("{}\n\nProbability: {:.2}", headline, p),
            None => headline.to_string(),
        };

        banners.push(match prediction.label {
            RiskLabel::High => Banner::Error(body),
            RiskLabel::Low => Banner::Success(body),
        });

        Self { banners }
    }

    pub fn render(&self) -> String {
        let mut out = String::from("Prediction Result\n\n");
        for banner in &self.banners {
            out.push_str(&banner.to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_high_risk_banners() {
        let prediction = Prediction { label: RiskLabel::High, probability: Some([0.27, 0.73]) };
        let derived = DerivedFeatures { bmi: 21.97, pulse_pressure: 30 };
        let assessment = Assessment::new(&prediction, &derived);

        assert_eq!(assessment.banners[0], Banner::Info("Calculated BMI: 21.97".to_string()));
        assert_eq!(assessment.banners[1], Banner::Info("Pulse Pressure: 30 mmHg".to_string()));
        assert_eq!(
            assessment.banners[2],
            Banner::Error("⚠️ High Risk of Cardio Disease\n\nProbability: 0.73".to_string())
        );
    }

    #[test]
    fn test_low_risk_without_probability() {
        let prediction = Prediction { label: RiskLabel::Low, probability: None };
        let derived = DerivedFeatures { bmi: 24.2, pulse_pressure: 40 };
        let assessment = Assessment::new(&prediction, &derived);

        assert_eq!(assessment.banners[0].text(), "Calculated BMI: 24.2");
        assert_eq!(
            assessment.banners[2],
            Banner::Success("✅ Low Risk of Cardio Disease".to_string())
        );
    }

    #[test]
    fn test_render() {
        let prediction = Prediction { label: RiskLabel::Low, probability: Some([0.6, 0.4]) };
        let derived = DerivedFeatures { bmi: 21.97, pulse_pressure: 30 };
        let text = Assessment::new(&prediction, &derived).render();

        assert!(text.starts_with("Prediction Result\n"));
        assert!(text.contains("[info] Calculated BMI: 21.97\n"));
        assert!(text.contains("[ok] ✅ Low Risk of Cardio Disease\n"));
        assert!(text.contains("Probability: 0.40\n"));
    }
}
