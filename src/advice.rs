// 🩺 Advice Catalog - Wellness suggestions as data
// Fixed condition → advice table plus the marker-based severity rule used by every renderer

use crate::error::{HealthError, Result};
use once_cell::sync::Lazy;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Leading marker of a line that should be shown as a warning banner
pub const WARNING_MARKER: char = '⚠';

/// Leading marker of a line that should be shown as a success banner
pub const SUCCESS_MARKER: char = '✅';

/// Shown above every advice listing
pub const DISCLAIMER: &str = "⚠ This tool gives general wellness suggestions, not a medical diagnosis.";

// ============================================================================
// CONDITION ID
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize)]
#[serde(try_from = "String")]
pub enum ConditionId {
    NoneOrUnsure,
    HighBloodPressure,
    Diabetes,
    Anemia,
    HighCholesterol,
    HeartDisease,
    Obesity,
    ThyroidIssues,
    KidneyIssues,
    LiverIssues,
}

impl ConditionId {
    /// Every condition, in selection-list order
    pub const ALL: [ConditionId; 10] = [
        ConditionId::NoneOrUnsure,
        ConditionId::HighBloodPressure,
        ConditionId::Diabetes,
        ConditionId::Anemia,
        ConditionId::HighCholesterol,
        ConditionId::HeartDisease,
        ConditionId::Obesity,
        ConditionId::ThyroidIssues,
        ConditionId::KidneyIssues,
        ConditionId::LiverIssues,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ConditionId::NoneOrUnsure => "None / Not Sure",
            ConditionId::HighBloodPressure => "High Blood Pressure",
            ConditionId::Diabetes => "Diabetes",
            ConditionId::Anemia => "Anemia",
            ConditionId::HighCholesterol => "High Cholesterol",
            ConditionId::HeartDisease => "Heart Disease",
            ConditionId::Obesity => "Obesity",
            ConditionId::ThyroidIssues => "Thyroid Issues",
            ConditionId::KidneyIssues => "Kidney Issues",
            ConditionId::LiverIssues => "Liver Issues",
        }
    }

    /// URL-friendly identifier (e.g. "high-blood-pressure")
    pub fn slug(&self) -> &'static str {
        match self {
            ConditionId::NoneOrUnsure => "none-or-unsure",
            ConditionId::HighBloodPressure => "high-blood-pressure",
            ConditionId::Diabetes => "diabetes",
            ConditionId::Anemia => "anemia",
            ConditionId::HighCholesterol => "high-cholesterol",
            ConditionId::HeartDisease => "heart-disease",
            ConditionId::Obesity => "obesity",
            ConditionId::ThyroidIssues => "thyroid-issues",
            ConditionId::KidneyIssues => "kidney-issues",
            ConditionId::LiverIssues => "liver-issues",
        }
    }

    /// Position in `ALL`
    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for ConditionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ConditionId {
    type Err = HealthError;

    /// Accepts a display label or a slug, case-insensitively
    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        ConditionId::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(wanted) || c.slug().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| HealthError::UnknownCondition(s.to_string()))
    }
}

impl TryFrom<String> for ConditionId {
    type Error = HealthError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl Serialize for ConditionId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(self.slug())
    }
}

// ============================================================================
// SEVERITY
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Success,
    Info,
}

/// Severity of a line from its leading marker. Warning is checked before success.
pub fn classify(text: &str) -> Severity {
    if text.starts_with(WARNING_MARKER) {
        Severity::Warning
    } else if text.starts_with(SUCCESS_MARKER) {
        Severity::Success
    } else {
        Severity::Info
    }
}

// ============================================================================
// ADVICE LINE / SET
// ============================================================================

/// One advisory line. Severity is never stored, only derived from the text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdviceLine {
    text: String,
}

impl AdviceLine {
    pub fn new(text: impl Into<String>) -> Self {
        AdviceLine { text: text.into() }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn severity(&self) -> Severity {
        classify(&self.text)
    }
}

impl Serialize for AdviceLine {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("AdviceLine", 2)?;
        state.serialize_field("text", &self.text)?;
        state.serialize_field("severity", &self.severity())?;
        state.end()
    }
}

/// Ordered advice for one condition (display order = list order)
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(transparent)]
pub struct AdviceSet {
    lines: Vec<AdviceLine>,
}

impl AdviceSet {
    fn from_authored(lines: &[&str]) -> Self {
        AdviceSet {
            lines: lines.iter().map(|l| AdviceLine::new(*l)).collect(),
        }
    }

    pub fn lines(&self) -> &[AdviceLine] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AdviceLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines that classify as `Warning`
    pub fn warnings(&self) -> impl Iterator<Item = &AdviceLine> {
        self.lines.iter().filter(|l| l.severity() == Severity::Warning)
    }
}

impl<'a> IntoIterator for &'a AdviceSet {
    type Item = &'a AdviceLine;
    type IntoIter = std::slice::Iter<'a, AdviceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

// ============================================================================
// CATALOG
// ============================================================================

fn authored_lines(condition: ConditionId) -> &'static [&'static str] {
    match condition {
        ConditionId::HighBloodPressure => &[
            "⚠ Possible Hypertension detected.",
            "👨‍⚕️ Consult a cardiologist or general physician.",
            "🥗 Diet: Low salt foods, fruits, vegetables, oats.",
            "🏃 Lifestyle: Daily walking, reduce stress, avoid junk food.",
        ],
        ConditionId::Diabetes => &[
            "⚠ Possible Diabetes condition.",
            "👨‍⚕️ Consult an endocrinologist.",
            "🥗 Diet: Low sugar foods, whole grains, leafy vegetables.",
            "🏃 Lifestyle: Regular exercise, avoid sugary drinks.",
        ],
        ConditionId::Anemia => &[
            "⚠ Possible Iron Deficiency (Anemia).",
            "👨‍⚕️ Consult a doctor for blood tests.",
            "🥗 Diet: Spinach, beetroot, dates, iron-rich foods.",
        ],
        ConditionId::HighCholesterol => &[
            "⚠ High cholesterol levels.",
            "👨‍⚕️ Consult a doctor for lipid profile review.",
            "🥗 Diet: Oats, nuts, fish, avoid fried foods.",
        ],
        ConditionId::HeartDisease => &[
            "⚠ Possible heart condition.",
            "👨‍⚕️ Consult a cardiologist.",
            "🥗 Diet: Low-fat foods, high-fiber diet, fruits & vegetables.",
            "🏃 Lifestyle: Cardio exercises, reduce stress, avoid smoking & alcohol.",
        ],
        ConditionId::Obesity => &[
            "⚠ Possible Obesity condition.",
            "👨‍⚕️ Consult a nutritionist or physician.",
            "🥗 Diet: Balanced low-calorie diet, reduce sugar & junk food.",
            "🏃 Lifestyle: Daily exercise, walking, aerobic workouts.",
        ],
        ConditionId::ThyroidIssues => &[
            "⚠ Possible Thyroid condition.",
            "👨‍⚕️ Consult an endocrinologist.",
            "🥗 Diet: Iodine-rich foods, avoid processed foods, fruits & vegetables.",
            "🏃 Lifestyle: Moderate exercise, regular checkups.",
        ],
        ConditionId::KidneyIssues => &[
            "⚠ Possible kidney condition.",
            "👨‍⚕️ Consult a nephrologist.",
            "🥗 Diet: Low-sodium, low-protein, hydration, fruits & vegetables.",
            "🏃 Lifestyle: Avoid dehydration, regular health monitoring.",
        ],
        ConditionId::LiverIssues => &[
            "⚠ Possible liver condition.",
            "👨‍⚕️ Consult a hepatologist.",
            "🥗 Diet: Avoid alcohol, fatty foods, eat green leafy vegetables.",
            "🏃 Lifestyle: Regular exercise, avoid toxin exposure.",
        ],
        ConditionId::NoneOrUnsure => &[
            "✅ No specific issue selected.",
            "Maintain a balanced diet, regular exercise, and yearly health checkups.",
        ],
    }
}

static CATALOG: Lazy<Catalog> = Lazy::new(Catalog::build);

/// Immutable ConditionId → AdviceSet table, one entry per condition
#[derive(Debug)]
pub struct Catalog {
    sets: Vec<AdviceSet>,
}

impl Catalog {
    fn build() -> Self {
        Catalog {
            sets: ConditionId::ALL
                .iter()
                .map(|c| AdviceSet::from_authored(authored_lines(*c)))
                .collect(),
        }
    }

    /// Process-wide catalog, built on first use
    pub fn global() -> &'static Catalog {
        &CATALOG
    }

    pub fn get(&self, condition: ConditionId) -> &AdviceSet {
        &self.sets[condition.index()]
    }

    pub fn conditions(&self) -> impl Iterator<Item = (ConditionId, &AdviceSet)> {
        ConditionId::ALL.iter().copied().zip(self.sets.iter())
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

// ============================================================================
// ADVICE ENGINE
// ============================================================================

/// Read-only facade over the global catalog
#[derive(Debug, Clone, Copy)]
pub struct AdviceEngine {
    catalog: &'static Catalog,
}

impl AdviceEngine {
    pub fn new() -> Self {
        AdviceEngine {
            catalog: Catalog::global(),
        }
    }

    /// Advice for a condition, in display order. Never empty.
    pub fn lookup(&self, condition: ConditionId) -> AdviceSet {
        self.catalog.get(condition).clone()
    }

    /// Same as `lookup` for a free-text label or slug.
    /// Fails with `UnknownCondition` for anything outside the catalog.
    pub fn lookup_str(&self, condition: &str) -> Result<AdviceSet> {
        let id: ConditionId = condition.parse()?;
        Ok(self.lookup(id))
    }

    pub fn classify(&self, line: &AdviceLine) -> Severity {
        line.severity()
    }
}

impl Default for AdviceEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn severities(set: &AdviceSet) -> Vec<Severity> {
        set.iter().map(|l| l.severity()).collect()
    }

    #[test]
    fn test_every_condition_has_advice() {
        let engine = AdviceEngine::new();
        for condition in ConditionId::ALL {
            assert!(!engine.lookup(condition).is_empty(), "{} has no advice", condition);
        }
    }

    #[test]
    fn test_none_or_unsure_message() {
        let set = AdviceEngine::new().lookup(ConditionId::NoneOrUnsure);
        let texts: Vec<&str> = set.iter().map(|l| l.text()).collect();

        assert_eq!(
            texts,
            vec![
                "✅ No specific issue selected.",
                "Maintain a balanced diet, regular exercise, and yearly health checkups.",
            ]
        );
        assert_eq!(severities(&set), vec![Severity::Success, Severity::Info]);
    }

    #[test]
    fn test_diabetes_advice() {
        let set = AdviceEngine::new().lookup(ConditionId::Diabetes);

        assert_eq!(set.len(), 4);
        assert!(set.lines()[0].text().contains("Diabetes"));
        assert!(set.lines()[1].text().contains("endocrinologist"));
        assert!(set.lines()[2].text().contains("Diet"));
        assert!(set.lines()[3].text().contains("Lifestyle"));
        assert_eq!(
            severities(&set),
            vec![Severity::Warning, Severity::Info, Severity::Info, Severity::Info]
        );
        assert_eq!(set.warnings().count(), 1);
    }

    #[test]
    fn test_high_blood_pressure_advice() {
        let set = AdviceEngine::new().lookup(ConditionId::HighBloodPressure);

        assert_eq!(set.len(), 4);
        assert_eq!(
            severities(&set),
            vec![Severity::Warning, Severity::Info, Severity::Info, Severity::Info]
        );
    }

    #[test]
    fn test_short_advice_sets() {
        let engine = AdviceEngine::new();
        assert_eq!(engine.lookup(ConditionId::Anemia).len(), 3);
        assert_eq!(engine.lookup(ConditionId::HighCholesterol).len(), 3);
    }

    #[test]
    fn test_catalog_is_complete() {
        let catalog = Catalog::global();
        let keys: HashSet<ConditionId> = catalog.conditions().map(|(c, _)| c).collect();
        let expected: HashSet<ConditionId> = ConditionId::ALL.iter().copied().collect();

        assert_eq!(catalog.len(), ConditionId::ALL.len());
        assert_eq!(keys, expected);
        for (index, condition) in ConditionId::ALL.iter().enumerate() {
            assert_eq!(condition.index(), index);
        }
    }

    #[test]
    fn test_lookup_str_accepts_labels_and_slugs() {
        let engine = AdviceEngine::new();
        for condition in ConditionId::ALL {
            assert_eq!(engine.lookup_str(condition.label()).unwrap(), engine.lookup(condition));
            assert_eq!(engine.lookup_str(condition.slug()).unwrap(), engine.lookup(condition));
        }
        assert_eq!(
            engine.lookup_str("  thyroid issues ").unwrap(),
            engine.lookup(ConditionId::ThyroidIssues)
        );
    }

    #[test]
    fn test_lookup_unknown_condition() {
        let result = AdviceEngine::new().lookup_str("Broken Leg");

        match result {
            Err(HealthError::UnknownCondition(name)) => assert_eq!(name, "Broken Leg"),
            other => panic!("expected UnknownCondition, got {:?}", other),
        }
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(classify("⚠ Possible liver condition."), Severity::Warning);
        assert_eq!(classify("✅ No specific issue selected."), Severity::Success);
        assert_eq!(classify("🥗 Diet: Oats"), Severity::Info);
        assert_eq!(classify(""), Severity::Info);
        // marker must lead the line
        assert_eq!(classify("Note ⚠ later"), Severity::Info);
    }

    #[test]
    fn test_classify_warning_wins() {
        assert_eq!(classify("⚠✅ mixed markers"), Severity::Warning);
        assert_eq!(classify("✅⚠ mixed markers"), Severity::Success);
    }

    #[test]
    fn test_engine_classify_matches_line() {
        let engine = AdviceEngine::new();
        let line = AdviceLine::new("⚠ Possible Thyroid condition.");
        assert_eq!(engine.classify(&line), Severity::Warning);
    }

    #[test]
    fn test_lookup_returns_fresh_copy() {
        let engine = AdviceEngine::new();
        let mut first = engine.lookup(ConditionId::Obesity);
        first.lines.clear();
        assert_eq!(engine.lookup(ConditionId::Obesity).len(), 4);
    }

    #[test]
    fn test_advice_line_json() {
        let line = AdviceLine::new("⚠ Possible kidney condition.");
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"text": "⚠ Possible kidney condition.", "severity": "warning"})
        );
        assert_eq!(
            serde_json::to_value(ConditionId::KidneyIssues).unwrap(),
            serde_json::json!("kidney-issues")
        );
        let parsed: ConditionId = serde_json::from_str("\"Liver Issues\"").unwrap();
        assert_eq!(parsed, ConditionId::LiverIssues);
    }

    proptest! {
        #[test]
        fn classify_is_idempotent(text in ".*") {
            prop_assert_eq!(classify(&text), classify(&text));
            let line = AdviceLine::new(text.clone());
            prop_assert_eq!(line.severity(), line.clone().severity());
        }

        #[test]
        fn warning_marker_always_wins(rest in ".*") {
            let text = format!("{}{}", WARNING_MARKER, rest);
            prop_assert_eq!(classify(&text), Severity::Warning);
        }
    }
}
