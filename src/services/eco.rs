//! EcoQuest operations
//!
//! Each operation follows the same pipeline: estimate or look up what it can
//! locally, ask the content generator for the rest, substitute static content
//! for replies that do not parse, persist, respond.

use std::sync::Arc;

use serde_json::Value;
use tracing::{info, warn};

use super::content::{ContentFormat, ContentGenerator, DEFAULT_SYSTEM_MESSAGE};
use super::{fallback, impact, prompts};
use crate::db::schemas::{ProgressDoc, UserDoc};
use crate::db::DocumentStore;
use crate::types::{
    EcoQuestError, HabitInput, ImpactSimulation, LearningContentRequest, LearningContentResponse,
    LocalAction, LocalActionRequest, LocalActionsResponse, OnboardingRequest,
    OnboardingResponse, Result, User, WhatIfRequest, WhatIfResponse,
};

/// Returned when a lesson reply is not valid JSON
pub const LEARNING_CONTENT_ERROR: &str = "Failed to generate structured learning content";

#[derive(Clone)]
pub struct EcoService {
    store: Arc<dyn DocumentStore>,
    generator: Arc<ContentGenerator>,
}

impl EcoService {
    pub fn new(store: Arc<dyn DocumentStore>, generator: Arc<ContentGenerator>) -> Self {
        Self { store, generator }
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    pub fn generator(&self) -> &Arc<ContentGenerator> {
        &self.generator
    }

    /// Create the user and a personalised learning path
    pub async fn onboard(&self, request: OnboardingRequest) -> Result<OnboardingResponse> {
        info!(
            age = request.age,
            interests = ?request.interests,
            knowledge_level = %request.knowledge_level,
            location = ?request.location,
            "Onboarding request received"
        );

        let user = UserDoc::from_onboarding(&request);
        let user_id = user.id.clone();
        self.store.insert_user(user).await?;
        info!(user_id = %user_id, "User created");

        let reply = self
            .generator
            .generate(
                &prompts::onboarding(&request),
                prompts::ONBOARDING_SYSTEM_MESSAGE,
                ContentFormat::Json,
            )
            .await;
        info!(len = reply.len(), "Onboarding AI response received");

        let personalized_path = match serde_json::from_str::<Value>(&reply) {
            Ok(path @ Value::Object(_)) => path,
            Ok(_) => {
                warn!("Onboarding AI reply is not a JSON object, using fallback");
                fallback::learning_path(&request.interests)
            }
            Err(e) => {
                warn!("Onboarding AI JSON parsing failed: {}, using fallback", e);
                fallback::learning_path(&request.interests)
            }
        };
        let welcome_message = fallback::welcome_message(&personalized_path);

        info!(user_id = %user_id, "Onboarding successful");
        Ok(OnboardingResponse {
            user_id,
            personalized_path,
            welcome_message,
        })
    }

    /// Estimate the footprint, persist it, and add an encouraging message
    pub async fn calculate_impact(&self, input: HabitInput) -> Result<ImpactSimulation> {
        info!(
            user_id = %input.user_id,
            transport = %input.transport,
            diet = %input.diet,
            energy = %input.energy_usage,
            waste = %input.waste_habits,
            "Impact calculation request"
        );

        let estimate = impact::estimate(
            &input.transport,
            &input.diet,
            &input.energy_usage,
            &input.waste_habits,
        );
        info!(
            "CO2 calculation: daily={:.1}kg, yearly={:.0}kg, {} suggestions",
            estimate.daily_co2,
            estimate.yearly_co2,
            estimate.suggestions.len()
        );

        let positive_impact = self
            .generator
            .generate(
                &prompts::positive_impact(estimate.daily_co2),
                DEFAULT_SYSTEM_MESSAGE,
                ContentFormat::Text,
            )
            .await;

        let outcome = self
            .store
            .save_progress(ProgressDoc::from_habits(&input, estimate.daily_co2))
            .await?;
        info!(
            matched = outcome.matched,
            modified = outcome.modified,
            upserted = outcome.upserted,
            "User progress saved"
        );

        Ok(ImpactSimulation {
            daily_co2: estimate.daily_co2,
            weekly_co2: estimate.weekly_co2,
            yearly_co2: estimate.yearly_co2,
            suggestions: estimate.suggestions,
            positive_impact,
        })
    }

    pub async fn what_if(&self, request: WhatIfRequest) -> Result<WhatIfResponse> {
        info!(scenario = %preview(&request.scenario), "What-if scenario request");

        let scenario_response = self
            .generator
            .generate(
                &prompts::what_if(&request.scenario, request.context.as_deref()),
                DEFAULT_SYSTEM_MESSAGE,
                ContentFormat::Text,
            )
            .await;
        info!(len = scenario_response.len(), "What-if response generated");

        Ok(WhatIfResponse { scenario_response })
    }

    pub async fn local_actions(&self, request: LocalActionRequest) -> Result<LocalActionsResponse> {
        info!(
            location = %request.location,
            interests = ?request.interests,
            "Local actions request"
        );

        let reply = self
            .generator
            .generate(
                &prompts::local_actions(&request.location, &request.interests),
                DEFAULT_SYSTEM_MESSAGE,
                ContentFormat::Text,
            )
            .await;

        let local_actions = match serde_json::from_str::<Vec<LocalAction>>(&reply) {
            Ok(actions) => actions,
            Err(e) => {
                warn!("Local actions JSON parsing failed: {}, using fallback", e);
                fallback::local_actions()
            }
        };
        info!(count = local_actions.len(), "Local actions returned");

        Ok(LocalActionsResponse { local_actions })
    }

    /// Look up a user; `None` when absent
    pub async fn get_user(&self, user_id: &str) -> Result<User> {
        info!(user_id = %user_id, "Get user request");
        match self.store.find_user(user_id).await? {
            Some(doc) => Ok(doc.to_user()),
            None => {
                warn!(user_id = %user_id, "User not found");
                Err(EcoQuestError::NotFound(format!("user {}", user_id)))
            }
        }
    }

    pub async fn learning_content(
        &self,
        request: LearningContentRequest,
    ) -> Result<LearningContentResponse> {
        let topic = request
            .topic
            .as_deref()
            .unwrap_or(prompts::DEFAULT_TOPIC)
            .to_string();
        info!(user_id = ?request.user_id, topic = %topic, "Learning content request");

        let user = match request.user_id.as_deref() {
            Some(id) => self.store.find_user(id).await?,
            None => None,
        };

        let learner = user.as_ref().map(|u| prompts::Learner {
            age: u.age,
            knowledge_level: u.knowledge_level,
            interests: &u.interests,
            learning_style: u.learning_style,
        });
        let prompt = prompts::learning_content(&topic, learner);

        let reply = self
            .generator
            .generate(&prompt, prompts::LEARNING_SYSTEM_MESSAGE, ContentFormat::Json)
            .await;
        info!(len = reply.len(), "Learning content generated");

        match serde_json::from_str::<Value>(&reply) {
            Ok(learning_content) => Ok(LearningContentResponse::Content { learning_content }),
            Err(e) => {
                warn!("Learning content JSON parsing failed: {}", e);
                Ok(LearningContentResponse::Error {
                    error: LEARNING_CONTENT_ERROR.to_string(),
                })
            }
        }
    }
}

/// First 50 characters of a free-text field, for logs
fn preview(text: &str) -> String {
    match text.char_indices().nth(50) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short"), "short");
        let long = "é".repeat(60);
        assert_eq!(preview(&long), format!("{}...", "é".repeat(50)));
    }
}
