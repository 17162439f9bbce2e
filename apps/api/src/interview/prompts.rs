// Interview LLM prompt templates.
// Placeholders in braces are substituted with `str::replace` before sending.

/// Question generation. Replace `{resume_text}` and `{format_instruction}`.
pub const QUESTIONS_PROMPT_TEMPLATE: &str = r#"Analyze the following resume and generate exactly 5 insightful, open-ended interview questions
that would be effective for screening this candidate. The questions should be diverse and cover
technical skills, past projects, and behavioral aspects mentioned in the resume.

Return the result as a valid JSON array of strings. Example: ["Question 1", "Question 2"]
{format_instruction}

Resume Text:
---
{resume_text}
---"#;

/// Conversational follow-up. Replace `{history}` and `{marker}`.
pub const FOLLOW_UP_PROMPT_TEMPLATE: &str = r#"You are an AI interviewer. Based on the conversation history below, ask a relevant and concise follow-up question.
Your goal is to dig deeper into the candidate's last answer.

If the candidate's last answer seems complete and you have no more to ask on that topic,
respond with only the exact string "{marker}". Do not add any other text.

History:
---
{history}
---
Follow-up Question or command:"#;

/// Final report. Replace `{answers}` and `{format_instruction}`.
pub const REPORT_PROMPT_TEMPLATE: &str = r#"You are an expert career coach and hiring manager. Analyze the following interview answers and provide a
constructive performance report. The report should be a valid JSON object with the following keys:
"overallScore" (a number out of 10),
"strengths" (a paragraph identifying positive aspects like clarity, specific examples, and confidence),
"weaknesses" (a paragraph identifying areas for improvement like vagueness, lack of detail, or poor structure),
"suggestion" (a paragraph with a single, actionable suggestion for the candidate to improve their interviewing skills).
{format_instruction}

Answers provided by the candidate:
---
{answers}
---"#;
