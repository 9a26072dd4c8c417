//! Prompt construction for narrative insights.
//!
//! One fixed analyst template; the analysis question and the rendered result
//! table are interpolated before the prompt is sent to the model.

/// Base template for every insight request.
pub const BASE_INSIGHT_PROMPT: &str = "\
You are a data analyst helping interpret COVID-19 data.

Background
The COVID-19 pandemic, caused by the SARS-CoV-2 virus, emerged in late 2019 \
and rapidly spread globally, leading to significant health, economic, and \
social impacts. By tracking and analyzing data on confirmed cases, \
recoveries, and deaths, policymakers and health professionals can make \
informed decisions to control the spread of the virus and allocate resources \
effectively.

Given the following data and the analysis question, provide insights in plain English:
- Identify trends, anomalies, and possible explanations.
- Make sure your answer is clear, concise, and understandable for a non-technical audience.

Question:
{question}

Data:
{data}
";

/// Interpolate a question and a rendered result table into the template.
pub fn format_prompt(question: &str, data: &str) -> String {
    BASE_INSIGHT_PROMPT
        .replace("{question}", question.trim())
        .replace("{data}", data.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interpolates_question_and_data() {
        let prompt = format_prompt(
            "  Which country peaked first?  ",
            "Country | Peak\nGermany | 13\n",
        );
        assert!(prompt.contains("Question:\nWhich country peaked first?"));
        assert!(prompt.contains("Data:\nCountry | Peak\nGermany | 13"));
        assert!(!prompt.contains("{question}"));
        assert!(!prompt.contains("{data}"));
    }
}
