//! Display text for prediction results
//!
//! Views (the terminal UI and the one-shot `predict` command) turn a
//! [`PredictionResult`] into a [`ResultView`] and only decide colors and
//! layout themselves.

use crate::predict::{PredictionResult, RiskFlag};
use tracing::warn;

/// Number of feature lines visible at once in the scrollable panel
pub const FEATURE_PANEL_HEIGHT: usize = 8;

/// Probability as a percentage with two decimals, e.g. `87.00%`
pub fn format_percentage(probability: f64) -> String {
    format!("{:.2}%", probability * 100.0)
}

/// Raw class probabilities with four decimals, e.g. `[0.1300, 0.8700]`
pub fn format_probabilities(values: &[f64]) -> String {
    let parts: Vec<String> = values.iter().map(|p| format!("{:.4}", p)).collect();
    format!("[{}]", parts.join(", "))
}

/// One feature line, e.g. `Age: 0.5000`
pub fn format_feature(name: &str, value: f64) -> String {
    format!("{}: {:.4}", name, value)
}

/// Headline for a risk flag
pub fn risk_headline(risk: RiskFlag) -> &'static str {
    match risk {
        RiskFlag::High => "High Risk",
        RiskFlag::Low => "Low Risk",
    }
}

/// Closing advice for a risk flag
pub fn risk_advice(risk: RiskFlag) -> &'static str {
    match risk {
        RiskFlag::High => "High risk. Please consult with a healthcare professional.",
        RiskFlag::Low => "Low risk. Maintain your healthy lifestyle!",
    }
}

/// All text of the results panel
#[derive(Debug, Clone, PartialEq)]
pub struct ResultView {
    pub risk: RiskFlag,
    /// `High Risk` or `Low Risk`; views color it as danger or success
    pub headline: String,
    pub binary_line: String,
    pub confidence_line: String,
    pub raw_probabilities_line: String,
    pub feature_lines: Vec<String>,
    pub advice: String,
}

impl ResultView {
    pub fn new(result: &PredictionResult) -> Self {
        if !result.features_aligned() {
            warn!(
                names = result.feature_names.len(),
                values = result.scaled_features.len(),
                "Feature names and scaled values differ in length"
            );
        }

        Self {
            risk: result.risk,
            headline: risk_headline(result.risk).to_string(),
            binary_line: format!(
                "Binary Prediction: {} ({})",
                risk_headline(result.risk),
                result.risk.as_int()
            ),
            confidence_line: format!("Confidence: {}", format_percentage(result.probability)),
            raw_probabilities_line: format!(
                "Raw Probabilities: {}",
                format_probabilities(&result.raw_probabilities)
            ),
            feature_lines: result
                .features()
                .map(|(name, value)| format_feature(name, value))
                .collect(),
            advice: risk_advice(result.risk).to_string(),
        }
    }

    /// Every line in panel order, with the feature section unabridged
    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            "Prediction Results".to_string(),
            self.headline.clone(),
            "Model Details:".to_string(),
            self.binary_line.clone(),
            self.confidence_line.clone(),
            self.raw_probabilities_line.clone(),
            "Scaled Feature Values:".to_string(),
        ];
        lines.extend(self.feature_lines.iter().cloned());
        lines.push(self.advice.clone());
        lines
    }
}

/// Visible window of a scrollable list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScrollWindow {
    pub offset: usize,
    pub height: usize,
}

impl ScrollWindow {
    pub fn new(height: usize) -> Self {
        Self { offset: 0, height }
    }

    /// Largest valid offset for a list of `len` items
    pub fn max_offset(&self, len: usize) -> usize {
        len.saturating_sub(self.height)
    }

    /// Scroll by `delta` lines, staying within the list
    pub fn scrolled(self, delta: isize, len: usize) -> Self {
        let max = self.max_offset(len) as isize;
        let offset = (self.offset as isize + delta).clamp(0, max.max(0)) as usize;
        Self { offset, ..self }
    }

    /// Slice of `items` currently visible
    pub fn visible<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let start = self.offset.min(items.len());
        let end = (start + self.height).min(items.len());
        &items[start..end]
    }

    /// Whether lines are hidden above or below the window
    pub fn has_more(&self, len: usize) -> (bool, bool) {
        (self.offset > 0, self.offset + self.height < len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(
        risk: RiskFlag,
        probability: f64,
        raw: Vec<f64>,
        scaled: Vec<f64>,
        names: Vec<&str>,
    ) -> PredictionResult {
        PredictionResult {
            risk,
            probability,
            raw_probabilities: raw,
            scaled_features: scaled,
            feature_names: names.into_iter().map(String::from).collect(),
        }
    }

    #[test]
    fn test_high_risk_rendering() {
        let view = ResultView::new(&result(
            RiskFlag::High,
            0.87,
            vec![0.13, 0.87],
            vec![0.5],
            vec!["Age"],
        ));
        assert_eq!(view.headline, "High Risk");
        assert_eq!(view.confidence_line, "Confidence: 87.00%");
        assert_eq!(view.raw_probabilities_line, "Raw Probabilities: [0.1300, 0.8700]");
        assert_eq!(view.feature_lines, vec!["Age: 0.5000"]);
        assert_eq!(view.binary_line, "Binary Prediction: High Risk (1)");
        assert_eq!(
            view.advice,
            "High risk. Please consult with a healthcare professional."
        );
    }

    #[test]
    fn test_low_risk_rendering() {
        let view = ResultView::new(&result(
            RiskFlag::Low,
            0.10,
            vec![0.90, 0.10],
            vec![-1.2],
            vec!["Carbs"],
        ));
        assert_eq!(view.headline, "Low Risk");
        assert_eq!(view.confidence_line, "Confidence: 10.00%");
        assert_eq!(view.feature_lines, vec!["Carbs: -1.2000"]);
        assert_eq!(view.binary_line, "Binary Prediction: Low Risk (0)");
        assert!(view.lines().contains(&"Low risk. Maintain your healthy lifestyle!".to_string()));
    }

    #[test]
    fn test_format_helpers() {
        assert_eq!(format_percentage(0.0), "0.00%");
        assert_eq!(format_percentage(1.0), "100.00%");
        assert_eq!(format_probabilities(&[]), "[]");
        assert_eq!(format_feature("Sex_encoded", 1.23456), "Sex_encoded: 1.2346");
    }

    #[test]
    fn test_lines_keep_panel_order() {
        let view = ResultView::new(&result(
            RiskFlag::Low,
            0.2,
            vec![0.8, 0.2],
            vec![0.1, 0.2],
            vec!["Age", "Carbs"],
        ));
        let lines = view.lines();
        assert_eq!(lines[0], "Prediction Results");
        assert_eq!(lines[1], "Low Risk");
        assert_eq!(lines[6], "Scaled Feature Values:");
        assert_eq!(&lines[7..9], &["Age: 0.1000", "Carbs: 0.2000"]);
    }

    #[test]
    fn test_scroll_window_bounds() {
        let items: Vec<usize> = (0..18).collect();
        let window = ScrollWindow::new(FEATURE_PANEL_HEIGHT);
        assert_eq!(window.visible(&items), &items[0..8]);
        assert_eq!(window.has_more(items.len()), (false, true));

        let window = window.scrolled(100, items.len());
        assert_eq!(window.offset, 10);
        assert_eq!(window.visible(&items), &items[10..18]);
        assert_eq!(window.has_more(items.len()), (true, false));

        let window = window.scrolled(-3, items.len());
        assert_eq!(window.offset, 7);
        let window = window.scrolled(-100, items.len());
        assert_eq!(window.offset, 0);
    }

    #[test]
    fn test_scroll_window_short_list() {
        let items = vec!["Age"];
        let window = ScrollWindow::new(FEATURE_PANEL_HEIGHT).scrolled(5, items.len());
        assert_eq!(window.offset, 0);
        assert_eq!(window.visible(&items), &["Age"]);
        assert_eq!(window.has_more(items.len()), (false, false));
    }
}
