// 🏠 Home page sample statistics (fixed demo figures, not derived from the dataset)

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct KeyMetric {
    pub icon: &'static str,
    pub value: u32,
    pub title: &'static str,
    pub description: &'static str,
}

/// One labelled count of a distribution
#[derive(Debug, Clone, Serialize)]
pub struct Slice {
    pub label: &'static str,
    pub count: u32,
}

impl Slice {
    /// Percentage of `total`
    pub fn share(&self, total: u32) -> f64 {
        if total == 0 {
            0.0
        } else {
            self.count as f64 / total as f64 * 100.0
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DailyTrend {
    pub day: u32,
    pub weight_kg: f64,
    pub steps: u32,
}

#[derive(Debug, Clone, Serialize)]
pub struct AverageMetric {
    pub metric: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Insights {
    pub key_metrics: Vec<KeyMetric>,
    pub bmi_distribution: Vec<Slice>,
    pub heart_disease: Vec<Slice>,
    pub weekly_trends: Vec<DailyTrend>,
    pub average_metrics: Vec<AverageMetric>,
}

impl Insights {
    pub fn sample() -> Self {
        Insights {
            key_metrics: key_metrics(),
            bmi_distribution: bmi_distribution(),
            heart_disease: heart_disease(),
            weekly_trends: weekly_trends(),
            average_metrics: average_metrics(),
        }
    }
}

pub fn key_metrics() -> Vec<KeyMetric> {
    vec![
        KeyMetric {
            icon: "🌟",
            value: 1200,
            title: "Total Users",
            description: "People using HealthBot to track and maintain health metrics.",
        },
        KeyMetric {
            icon: "🧮",
            value: 875,
            title: "BMI Calculations",
            description: "Users calculated their BMI to monitor weight and fitness levels.",
        },
        KeyMetric {
            icon: "🧾",
            value: 450,
            title: "Reports Checked",
            description: "Users uploaded medical reports to get wellness suggestions.",
        },
    ]
}

pub fn bmi_distribution() -> Vec<Slice> {
    vec![
        Slice { label: "Underweight", count: 50 },
        Slice { label: "Normal", count: 400 },
        Slice { label: "Overweight", count: 300 },
        Slice { label: "Obese", count: 125 },
    ]
}

pub fn heart_disease() -> Vec<Slice> {
    vec![
        Slice { label: "Yes", count: 120 },
        Slice { label: "No", count: 1080 },
    ]
}

pub fn weekly_trends() -> Vec<DailyTrend> {
    const WEIGHT: [f64; 7] = [65.0, 64.8, 64.5, 64.3, 64.0, 63.8, 63.7];
    const STEPS: [u32; 7] = [7000, 7500, 8000, 6500, 9000, 8500, 8000];

    WEIGHT
        .iter()
        .zip(STEPS.iter())
        .enumerate()
        .map(|(i, (weight_kg, steps))| DailyTrend {
            day: i as u32 + 1,
            weight_kg: *weight_kg,
            steps: *steps,
        })
        .collect()
}

pub fn average_metrics() -> Vec<AverageMetric> {
    vec![
        AverageMetric { metric: "BMI", value: 22.5 },
        AverageMetric { metric: "Heart Rate", value: 72.0 },
        AverageMetric { metric: "Blood Pressure", value: 120.0 },
        AverageMetric { metric: "Cholesterol", value: 180.0 },
    ]
}

/// Sum of all slice counts
pub fn total(slices: &[Slice]) -> u32 {
    slices.iter().map(|s| s.count).sum()
}
