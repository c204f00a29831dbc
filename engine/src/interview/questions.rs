//! The fixed interview script

/// Questions asked of the hiring manager, in order
pub const QUESTIONS: [&str; 12] = [
    "What's the job title, and what are the core responsibilities in plain English?",
    "What does a typical day or week actually look like in this role — meetings, tasks, pace?",
    "Where is this role evolving over the next few years — what might change, grow, or be automated?",
    "What kind of impact or outcomes is this role truly accountable for?",
    "What have you seen go wrong in this role before — either in performance or fit?",
    "What kind of person (skills, traits, mindset) has succeeded unexpectedly in this role?",
    "What’s hard or emotionally demanding about the role — even if it’s not obvious on paper?",
    "What are some team dynamics, frictions or growth areas that this person will step into?",
    "If you could design an ideal onboarding experience, what would you do differently?",
    "What motivates someone to excel in this role — and what kind of ambition fits best?",
    "What traits or behaviours have been missing in past hires that didn’t quite work out?",
    "Would you be open to someone with an unconventional background? If so, what kind?",
];

/// Number of questions in the interview
pub const QUESTION_COUNT: usize = QUESTIONS.len();
