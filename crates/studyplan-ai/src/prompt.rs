//! Prompt construction for schedule generation and concept validation.
//!
//! Pure string assembly: no I/O, no clock. The caller supplies "today" so the
//! day count is deterministic. Request fields are interpolated verbatim,
//! preferences included; the model is trusted to ignore instructions
//! smuggled in through them.

use jiff::civil::Date;
use studyplan_core::error::CoreError;
use studyplan_core::models::schedule_request::ScheduleRequest;

const OUTPUT_RULES: &str = "\
Respond with ONLY a JSON object. Do not add explanations, prose, or markdown code fences.
All times must use the 24-hour HH:MM format (for example 07:30 or 18:00) and fall between the wake-up time and the sleep time.";

const MULTI_DAY_EXAMPLE: &str = r#"{
  "Day 1": {
    "topics": ["Core concepts", "Terminology"],
    "timeSlots": {
      "08:00": "Read the introduction",
      "10:00": "Practice exercises",
      "14:00": "Review notes"
    }
  },
  "Day 2": {
    "topics": ["Applied practice"],
    "timeSlots": {
      "09:00": "Work through examples",
      "11:00": "Small project",
      "15:00": "Self-quiz"
    }
  }
}"#;

const SINGLE_DAY_EXAMPLE: &str = r#"{
  "08:00": "Read the introduction",
  "10:00": "Practice exercises",
  "14:00": "Review notes"
}"#;

const CONCEPT_INSTRUCTIONS: &str = "\
You are a patient tutor reviewing what a student says they learned today.
Check the explanation below for accuracy. Point out any misconceptions and correct them,
confirm what the student got right, and suggest one or two follow-up questions or topics
to deepen their understanding. Keep the reply concise and encouraging, in plain prose.";

/// Build the schedule-generation prompt.
///
/// With a target date the prompt asks for a multi-day schedule covering
/// exactly `day_count` days (today and the target date both included);
/// without one it asks for a single day of time slots.
pub fn build_schedule_prompt(request: &ScheduleRequest, today: Date) -> Result<String, CoreError> {
    let day_count = request.day_count(today)?;

    let mut prompt = String::with_capacity(2048);

    match day_count {
        Some(days) => prompt.push_str(&format!(
            "Create a detailed {days}-day learning schedule{}.\n\n",
            goal_clause(request)
        )),
        None => prompt.push_str(&format!(
            "Create a detailed learning schedule for a single day{}.\n\n",
            goal_clause(request)
        )),
    }

    prompt.push_str("Details:\n");
    if let Some(description) = &request.goal_description {
        prompt.push_str(&format!("- Goal description: {description}\n"));
    }
    if let (Some(target), Some(days)) = (&request.target_date, day_count) {
        prompt.push_str(&format!(
            "- Target date: {target} ({days} days including today)\n"
        ));
    }
    prompt.push_str(&format!("- Wake-up time: {}\n", request.wake_up_time));
    prompt.push_str(&format!("- Sleep time: {}\n", request.sleep_time));
    if request.preferences.is_empty() {
        prompt.push_str("- Preferences: none\n");
    } else {
        prompt.push_str(&format!("- Preferences: {}\n", request.preferences.join("; ")));
    }

    prompt.push_str("\nOutput rules:\n");
    prompt.push_str(OUTPUT_RULES);
    prompt.push('\n');

    match day_count {
        Some(days) => {
            prompt.push_str(&format!(
                "Use exactly {days} top-level keys, \"Day 1\" through \"Day {days}\". \
                 Each day is an object with \"topics\" (an array of strings) and \
                 \"timeSlots\" (an object mapping HH:MM times to activities).\n\n"
            ));
            prompt.push_str("Format example:\n");
            prompt.push_str(MULTI_DAY_EXAMPLE);
        }
        None => {
            prompt.push_str(
                "The object maps HH:MM times directly to activities, one entry per time slot.\n\n",
            );
            prompt.push_str("Format example:\n");
            prompt.push_str(SINGLE_DAY_EXAMPLE);
        }
    }
    prompt.push('\n');

    Ok(prompt)
}

/// Build the concept-validation prompt around the learner's own text.
pub fn build_concept_prompt(learning_text: &str) -> String {
    format!("{CONCEPT_INSTRUCTIONS}\n\nWhat the student learned:\n\"\"\"\n{learning_text}\n\"\"\"\n")
}

fn goal_clause(request: &ScheduleRequest) -> String {
    match &request.goal_title {
        Some(title) => format!(" for the goal \"{title}\""),
        None => String::new(),
    }
}
