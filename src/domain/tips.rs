//! Fixed health-tip lists keyed on the risk label.

use super::RiskLabel;

const LOW_RISK_TIPS: &[&str] = &[
    "Keep up at least 150 minutes of moderate activity per week.",
    "Eat plenty of vegetables, fruit, whole grains and legumes.",
    "Check blood pressure and cholesterol at routine visits.",
    "Avoid tobacco and keep alcohol intake moderate.",
    "Sleep 7-9 hours a night and manage stress.",
];

const HIGH_RISK_TIPS: &[&str] = &[
    "Book an appointment with a cardiologist or your primary care doctor.",
    "Seek emergency care for chest pain at rest, fainting or sudden breathlessness.",
    "Cut down on salt, saturated fat and added sugar.",
    "Stop smoking; ask your doctor about cessation support.",
    "Start light, supervised exercise only after medical clearance.",
    "Take prescribed medication exactly as directed.",
];

/// Tips shown for a given assessment.
#[must_use]
pub fn health_tips(label: RiskLabel) -> &'static [&'static str] {
    match label {
        RiskLabel::Low => LOW_RISK_TIPS,
        RiskLabel::High => HIGH_RISK_TIPS,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_differ_per_label() {
        assert!(!health_tips(RiskLabel::Low).is_empty());
        assert!(!health_tips(RiskLabel::High).is_empty());
        assert_ne!(health_tips(RiskLabel::Low), health_tips(RiskLabel::High));
    }
}
