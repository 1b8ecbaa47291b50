//! Prompt for the onboarding question generator.

const QUESTION_PROMPT_TEMPLATE: &str = r#"You are a dating app matchmaker AI. Based on the user's previous answers:
{previous_answers}

Generate a creative, engaging question (question #{question_number}) to learn more about their dating preferences or personality.

IMPORTANT:
- Provide EXACTLY 3 distinct, concise options
- Keep options short (2-4 words max)
- Make the question conversational and fun
- Vary the question type (personality, activities, values, lifestyle)
- Each option should be different enough to be meaningful

Return ONLY valid JSON in this exact format (no markdown, no extra text):
{
  "question": "Your question here?",
  "options": ["Option 1", "Option 2", "Option 3"]
}"#;

pub fn build_question_prompt(previous_answers: &[String], question_number: u32) -> String {
    let answers = serde_json::to_string(previous_answers).unwrap_or_else(|_| "[]".to_string());
    QUESTION_PROMPT_TEMPLATE
        .replace("{previous_answers}", &answers)
        .replace("{question_number}", &question_number.to_string())
}
