//! Classification prompt.

use serde_json::json;

/// Labelled examples shown to the model ahead of the real lead.
const FEW_SHOT: [(&str, &str, &str, &str, &str); 4] = [
    (
        "Software Engineer",
        "The server crashed and the client portal is down. We need a fix ASAP.",
        "Practitioner",
        "High",
        "Technical, execution-focused role; the message reports a critical outage.",
    ),
    (
        "Marketing Director",
        "I suggest we increase the marketing budget by 20% next quarter to boost lead generation.",
        "Decision Maker",
        "Medium",
        "Owns strategy and budget; the request matters but is not immediate.",
    ),
    (
        "Intern",
        "Can someone explain how to use the new reporting dashboard?",
        "Other",
        "Low",
        "Trainee role; the question is informational with no time pressure.",
    ),
    (
        "Finance Manager",
        "Please review the quarterly financial report and provide your feedback by next Friday.",
        "Decision Maker",
        "Medium",
        "Oversight role with decision authority; the deadline is reasonable.",
    ),
];

/// Builds the single instruction prompt for one lead.
pub fn classification_prompt(role: &str, comment: &str) -> String {
    let examples: Vec<_> = FEW_SHOT
        .iter()
        .map(|(role, message, persona, urgency, reasoning)| {
            json!({
                "role": role,
                "message": message,
                "persona_type": persona,
                "urgency": urgency,
                "reasoning": reasoning,
            })
        })
        .collect();
    let examples = serde_json::to_string_pretty(&examples).unwrap_or_default();

    format!(
        r#"You analyse a lead's job role and comment and sort them into fixed segments.

role: {role}
comment: {comment}

### Persona type (from the role)
Consider what the role is responsible for, then pick exactly one:
- "Decision Maker": approves budgets, sets strategy or manages teams (CEO, Manager, Director, VP).
- "Practitioner": executes tasks, processes or technical work (Engineer, Analyst, Developer, Accountant).
- "Other": fits neither, such as students, researchers, interns or miscellaneous roles.

### Urgency (from the comment)
Judge the business impact of delaying action, then pick exactly one:
- "High": needs immediate attention, critical impact or time-sensitive action.
- "Medium": important but not urgent; should be handled in a reasonable timeframe.
- "Low": routine or informational; can wait without major consequences.

### Summary
Summarise the comment in one clear sentence covering what it is about and the action it asks for.
Do not mention the person who wrote it.

### Examples
{examples}

Use only the categories above and do not assume anything beyond the role and comment.

### Response format
Return only valid JSON, with no explanations, extra text or markdown, exactly in this shape:
{{
    "persona_type": "Decision Maker | Practitioner | Other",
    "urgency": "High | Medium | Low",
    "summary": "One-sentence summary of the comment"
}}
"#
    )
}
