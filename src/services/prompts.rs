//! Prompt builders for each operation

use crate::types::{KnowledgeLevel, LearningStyle, OnboardingRequest};

pub const ONBOARDING_SYSTEM_MESSAGE: &str =
    "You are an expert climate educator creating personalized learning paths.";

pub const LEARNING_SYSTEM_MESSAGE: &str =
    "You are an expert climate educator creating engaging learning content.";

pub const DEFAULT_TOPIC: &str = "climate change";

const LESSON_SHAPE: &str = "Generate a JSON response with:
- title: Engaging lesson title
- content: Educational content (200-300 words)
- key_points: 3-5 key takeaways
- action_items: 2-3 actionable steps
- fun_fact: One interesting climate fact
- quiz_question: One multiple choice question with 4 options and correct answer";

pub fn onboarding(request: &OnboardingRequest) -> String {
    format!(
        "Create a personalized climate education path for a {}-year-old with {} knowledge level.
Their interests include: {}.
They prefer {} learning style.

Generate a JSON response with:
- welcome_message: Encouraging welcome (max 100 words)
- learning_modules: 5 modules tailored to their interests and level
- first_quest: An engaging first activity
- daily_tip: One practical climate tip

Keep it motivational and age-appropriate.",
        request.age,
        request.knowledge_level,
        request.interests.join(", "),
        request.learning_style,
    )
}

pub fn positive_impact(daily_co2: f64) -> String {
    format!(
        "A user has a daily CO2 footprint of {:.1}kg.
Create an encouraging message about the positive impact if 1000 similar users made better choices.
Keep it under 50 words and inspiring.",
        daily_co2
    )
}

pub fn what_if(scenario: &str, context: Option<&str>) -> String {
    let mut prompt = format!(
        "Create an engaging \"What if?\" climate scenario response for: \"{}\"

Include:
- A brief, engaging narrative (100-150 words)
- Key environmental impact numbers
- Connection to user's daily life
- One actionable step they can take

Make it inspiring and scientifically grounded but accessible.",
        scenario
    );
    if let Some(context) = context.filter(|c| !c.trim().is_empty()) {
        prompt.push_str("\n\nAdditional context: ");
        prompt.push_str(context);
    }
    prompt
}

pub fn local_actions(location: &str, interests: &[String]) -> String {
    format!(
        "Generate 5 specific local environmental actions for someone in {}
interested in {}.

Format as JSON array with objects containing:
- title: Action title
- description: Brief description
- impact: Environmental benefit
- difficulty: \"easy\", \"medium\", \"hard\"

Focus on realistic, location-specific actions.",
        location,
        interests.join(", ")
    )
}

/// Learner details used to personalise a lesson
pub struct Learner<'a> {
    pub age: i32,
    pub knowledge_level: KnowledgeLevel,
    pub interests: &'a [String],
    pub learning_style: LearningStyle,
}

pub fn learning_content(topic: &str, learner: Option<Learner<'_>>) -> String {
    match learner {
        Some(learner) => format!(
            "Create engaging learning content about {} for a {}-year-old with {} knowledge level.
Their interests include: {}.
They prefer {} learning style.

{}

Make it age-appropriate and engaging.",
            topic,
            learner.age,
            learner.knowledge_level,
            learner.interests.join(", "),
            learner.learning_style,
            LESSON_SHAPE
        ),
        None => format!(
            "Create engaging learning content about {} for general audience.

{}",
            topic, LESSON_SHAPE
        ),
    }
}
