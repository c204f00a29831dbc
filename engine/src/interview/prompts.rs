//! Prompts sent to the report generator
//!
//! The system prompt sets up the coaching persona. The report instructions
//! describe the structure of the role profile and end with the numbered
//! transcript of the interview.

use super::questions::QUESTIONS;

/// Role-setting instruction sent as the system message
pub const SYSTEM_PROMPT: &str = "
You are the Sisuu Coach, a reflective assistant that helps hiring managers articulate the true shape of a role through thoughtful conversation. Use the user's responses to build a structured, insightful role profile. Do not create the profile until all questions are answered.
";

const TRANSCRIPT_PLACEHOLDER: &str = "{answers}";

/// Report template; `{answers}` is replaced by the transcript
pub const REPORT_INSTRUCTIONS: &str = "
You are the Sisuu Coach. Based on the following hiring manager reflections, craft a clear, compelling role profile that helps candidates understand both the purpose of the role and the reality of what it’s like.

First, open with a strong narrative summary that describes:
- What kind of person would be a great fit
- What success looks like
- What tensions or challenges exist in the role
- Where the role is evolving

Then include:

**Key Responsibilities:** (bulleted)
**Non-negotiables:** (e.g. mindset, work ethic, specific traits)
**Working Style Breakdown:** (meetings %, deep work %, collaboration %)
**Trait Spectrum:**
- Structured vs. Dynamic
- Specialist vs. Generalist
- Entrepreneurial vs. Corporate
- Stable vs. Fast-paced
- Solo vs. Collaborative

**Transparent Expectations:** (5 bullets that describe the real experience of working in this role — cognitive/emotional demands, pace, support, communication style)

**Skills to Complement the Team:** (show gaps that this person should fill)

**Wildcard Potential:** End by asking if they'd be open to candidates with unconventional backgrounds and what that could look like.

Here’s the manager’s input:

{answers}
";

/// Pair each answer with its question as `Q{n}: {question}\nA: {answer}`,
/// 1-based, one pair per line group.
///
/// Answers beyond the question list are ignored.
pub fn format_transcript<S: AsRef<str>>(answers: &[S]) -> String {
    QUESTIONS
        .iter()
        .zip(answers)
        .enumerate()
        .map(|(i, (question, answer))| format!("Q{}: {}\nA: {}", i + 1, question, answer.as_ref()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fill the report template with a transcript
pub fn render_report_prompt(transcript: &str) -> String {
    REPORT_INSTRUCTIONS.replacen(TRANSCRIPT_PLACEHOLDER, transcript, 1)
}
