//! Static content used when a provider reply cannot be parsed

use serde_json::{json, Value};

use crate::types::LocalAction;

pub const DEFAULT_WELCOME: &str = "Welcome to EcoQuest!";

const DEFAULT_INTERESTS_TEXT: &str = "climate change and sustainability";
const DEFAULT_FIRST_INTEREST: &str = "climate";

/// Capitalise the first letter of every cased run, lowercase the rest.
///
/// Only cased letters continue a word, so uncased scripts such as CJK break
/// runs the way punctuation does.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_cased = false;
    for ch in text.chars() {
        let cased = ch.is_lowercase() || ch.is_uppercase();
        if cased {
            if prev_cased {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

/// Learning path built from the learner's interests alone
pub fn learning_path(interests: &[String]) -> Value {
    let interests_text = if interests.is_empty() {
        DEFAULT_INTERESTS_TEXT.to_string()
    } else {
        interests
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    };
    let first_interest = interests
        .first()
        .map(String::as_str)
        .unwrap_or(DEFAULT_FIRST_INTEREST);

    json!({
        "welcome_message": format!(
            "Welcome to EcoQuest! Ready to become a climate hero? Based on your interests in {}, we've created an exciting journey just for you!",
            interests_text
        ),
        "learning_modules": [
            {"title": "Climate Basics", "icon": "🌍", "progress": 0},
            {"title": format!("{} Deep Dive", title_case(first_interest)), "icon": "🔍", "progress": 0},
            {"title": "Carbon Footprint", "icon": "👣", "progress": 0},
            {"title": "Green Solutions", "icon": "🌱", "progress": 0},
            {"title": "Take Action", "icon": "⚡", "progress": 0}
        ],
        "first_quest": "Calculate your carbon footprint and discover 3 easy ways to reduce it today!",
        "daily_tip": "Did you know? Unplugging devices when not in use can save up to 10% on your electricity bill!"
    })
}

/// Welcome message carried by a learning path, if it has a string one
pub fn welcome_message(path: &Value) -> String {
    path.get("welcome_message")
        .and_then(Value::as_str)
        .unwrap_or(DEFAULT_WELCOME)
        .to_string()
}

pub fn local_actions() -> Vec<LocalAction> {
    vec![
        LocalAction {
            title: "Join a local beach/park cleanup".to_string(),
            description: "Connect with environmental groups in your area".to_string(),
            impact: "Remove 50+ pieces of litter per hour".to_string(),
            difficulty: "easy".to_string(),
        },
        LocalAction {
            title: "Start a community garden".to_string(),
            description: "Transform unused space into green areas".to_string(),
            impact: "Absorb 40kg CO2 per year per plot".to_string(),
            difficulty: "medium".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("oceans"), "Oceans");
        assert_eq!(title_case("renewable energy"), "Renewable Energy");
        assert_eq!(title_case("zero-waste"), "Zero-Waste");
        assert_eq!(title_case("CLIMATE"), "Climate");
        assert_eq!(title_case("e2e"), "E2E");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_title_case_uncased_letters_break_words() {
        assert_eq!(title_case("日本abc"), "日本Abc");
        assert_eq!(title_case("气候change"), "气候Change");
        assert_eq!(title_case("ÉCOLE verte"), "École Verte");
    }

    #[test]
    fn test_learning_path_from_interests() {
        let interests = vec!["oceans".to_string(), "forests".to_string(), "energy".to_string()];
        let path = learning_path(&interests);

        assert_eq!(
            welcome_message(&path),
            "Welcome to EcoQuest! Ready to become a climate hero? Based on your interests in oceans, forests, we've created an exciting journey just for you!"
        );
        let modules = path["learning_modules"].as_array().unwrap();
        assert_eq!(modules.len(), 5);
        assert_eq!(modules[1]["title"], "Oceans Deep Dive");
        assert!(modules.iter().all(|m| m["progress"] == 0));
    }

    #[test]
    fn test_learning_path_without_interests() {
        let path = learning_path(&[]);
        assert!(welcome_message(&path).contains("climate change and sustainability"));
        assert_eq!(path["learning_modules"][1]["title"], "Climate Deep Dive");
    }

    #[test]
    fn test_welcome_message_default() {
        assert_eq!(welcome_message(&json!({"learning_modules": []})), DEFAULT_WELCOME);
        assert_eq!(welcome_message(&json!({"welcome_message": 42})), DEFAULT_WELCOME);
        assert_eq!(welcome_message(&json!({"welcome_message": "Hi"})), "Hi");
    }

    #[test]
    fn test_local_actions_fallback() {
        let actions = local_actions();
        assert_eq!(actions.len(), 2);
        assert_eq!(actions[0].difficulty, "easy");
        assert_eq!(actions[1].title, "Start a community garden");
    }
}
