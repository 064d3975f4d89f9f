use serde::Deserialize;

/// One PRISMA-7 survey entry. Answers are strictly boolean in the wire
/// format; anything else is rejected at parse time.
#[derive(Debug, Clone, Deserialize)]
pub struct SurveyItem {
    pub question: String,
    pub answer: bool,
}

/// Structured clinical assessment for a single invocation. Field names match
/// the caller's JSON keys; missing fields take zero/empty defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct FrailtyAssessment {
    #[serde(default, rename = "First Gait Test speed")]
    pub first_gait_test_speed: f64,
    #[serde(default, rename = "First Gait Test time")]
    pub first_gait_test_time: f64,
    #[serde(default, rename = "First TUG Test time")]
    pub first_tug_test_time: f64,
    #[serde(default, rename = "Gait Speed Test Risk")]
    pub gait_speed_test_risk: String,
    #[serde(default, rename = "Second Gait Test speed")]
    pub second_gait_test_speed: f64,
    #[serde(default, rename = "Second Gait Test time")]
    pub second_gait_test_time: f64,
    #[serde(default, rename = "Second TUG Test time")]
    pub second_tug_test_time: f64,
    #[serde(default, rename = "TUG Test Risk")]
    pub tug_test_risk: String,
    #[serde(default)]
    pub prisma7: Vec<SurveyItem>,
    #[serde(default = "default_uid")]
    pub uid: String,
}

fn default_uid() -> String {
    "default_uid".to_string()
}

impl FrailtyAssessment {
    /// Render the natural-language block consumed by both prompt stages and
    /// by the retrieval query. Survey entries come first, in list order,
    /// followed by the test measurements with their units.
    pub fn prompt_block(&self) -> String {
        let mut lines = Vec::with_capacity(self.prisma7.len() + 8);
        for item in &self.prisma7 {
            let label = if item.answer { "Yes" } else { "No" };
            lines.push(format!("{}: {}", item.question, label));
        }
        lines.push(format!(
            "First Gait Test speed: {} meters per second (m/s).",
            self.first_gait_test_speed
        ));
        lines.push(format!(
            "First Gait Test time: {} seconds",
            self.first_gait_test_time
        ));
        lines.push(format!(
            "First TUG Test time: {} seconds",
            self.first_tug_test_time
        ));
        lines.push(format!("Gait Speed Test Risk: {}", self.gait_speed_test_risk));
        lines.push(format!(
            "Second Gait Test speed: {} meters per second (m/s).",
            self.second_gait_test_speed
        ));
        lines.push(format!(
            "Second Gait Test time: {} seconds",
            self.second_gait_test_time
        ));
        lines.push(format!(
            "Second TUG Test time: {} seconds",
            self.second_tug_test_time
        ));
        lines.push(format!("TUG Test Risk: {}", self.tug_test_risk));
        lines.join("\n")
    }
}
