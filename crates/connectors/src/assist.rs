//! Client for the Gemini itinerary/chat/destination assistant.
//!
//! The assistant is best-effort by contract: a missing API key, an
//! unreachable provider or an unparseable reply all map to a well-defined
//! fallback value, never an error. The fallback texts are part of the API
//! surface and tested as such.

use api_types::{
    destination::{BudgetEstimate, DestinationInfo},
    itinerary::{Itinerary, ItineraryDay, ItineraryRequest},
};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct AssistClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f64,
    #[serde(rename = "maxOutputTokens")]
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
    error: Option<Value>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Outcome of one provider round trip.
enum Fetch {
    Text(String),
    /// The provider answered but carried no candidate text.
    NoContent,
    /// The provider could not be reached or answered with garbage.
    Unreachable,
}

impl AssistClient {
    /// `base_url` points at the model's `generateContent` endpoint. With no
    /// `api_key` every call short-circuits to its fallback.
    pub fn new(client: Client, base_url: String, api_key: Option<String>) -> Self {
        Self {
            client,
            base_url,
            api_key: api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Day-by-day itinerary for a trip. Always returns an itinerary; on any
    /// provider failure it is the documented fallback one.
    pub async fn generate_itinerary(&self, args: &ItineraryRequest) -> Itinerary {
        if self.api_key.is_none() {
            tracing::error!("assistant API key missing, returning fallback itinerary");
            return fallback_itinerary(args.budget);
        }

        let prompt = format!(
            "You are a travel planning expert specializing in Indian destinations. \
             Provide practical, budget-conscious itineraries with accurate cost \
             estimates in Indian Rupees.\n\n\
             Create a detailed travel itinerary for {destination} from {start} to {end}.\n\n\
             Requirements:\n\
             - Budget: ₹{budget} for {travelers} travelers\n\
             - Interests: {interests}\n\
             - Provide day-by-day activities with realistic costs\n\
             - Include practical tips and recommendations\n\
             - Focus on Indian destinations and local experiences\n\n\
             IMPORTANT: Respond ONLY with valid JSON in this exact format:\n\
             {{\"days\":[{{\"day\":1,\"title\":\"Arrival and City Exploration\",\
             \"activities\":[\"Arrive at airport and check into hotel\"],\
             \"estimatedCost\":5000,\"tips\":\"Book airport transfer in advance\"}}],\
             \"totalEstimatedCost\":15000,\
             \"generalTips\":[\"Carry cash for local markets\"]}}",
            destination = args.destination,
            start = args.start_date,
            end = args.end_date,
            budget = args.budget,
            travelers = args.travelers,
            interests = args.interests.join(", "),
        );

        match self.candidate_text(prompt, 0.7, 2048).await {
            Fetch::Text(content) => parse_itinerary(&content, args.budget),
            Fetch::NoContent | Fetch::Unreachable => fallback_itinerary(args.budget),
        }
    }

    /// Free-form travel chat. The reply is either the assistant's text or
    /// one of three fixed apologies.
    pub async fn chat(&self, message: &str, context: Option<&str>) -> String {
        if self.api_key.is_none() {
            tracing::error!("assistant API key missing, chat disabled");
            return "AI service unavailable. Please try again later.".to_string();
        }

        let context_line = context
            .map(|c| format!("Context: {c}"))
            .unwrap_or_default();
        let prompt = format!(
            "You are sahyaatra AI, a helpful travel assistant for India. You help users with:\n\
             - Travel planning and recommendations\n\
             - Budget advice for Indian destinations\n\
             - Cultural insights and local tips\n\
             - Safety and practical travel information\n\
             - Connecting with travel companions\n\n\
             Keep responses helpful, concise, and focused on Indian travel. If asked about \
             booking or payments, explain that users should use the platform's trip posting \
             feature to connect with travel buddies.\n\n\
             {context_line}\n\nUser: {message}"
        );

        match self.candidate_text(prompt, 0.7, 500).await {
            Fetch::Text(content) => content,
            Fetch::NoContent => {
                "I'm sorry, the AI did not return a response. Please try again later."
                    .to_string()
            }
            Fetch::Unreachable => "I'm experiencing some technical difficulties. Please try \
                                   again later or use the platform's other features to plan \
                                   your trip."
                .to_string(),
        }
    }

    /// Practical destination facts. Falls back to conservative defaults;
    /// when the assistant answered but not in JSON, the raw text leaks
    /// into `transportation`, truncated.
    pub async fn destination_info(&self, destination: &str) -> DestinationInfo {
        if self.api_key.is_none() {
            tracing::error!("assistant API key missing, returning fallback destination info");
            return DestinationInfo {
                best_time: "October to March".to_string(),
                attractions: vec!["Information temporarily unavailable".to_string()],
                budget_estimate: default_budget_estimate(),
                cuisine: vec!["Local specialties".to_string()],
                transportation: "Information currently unavailable".to_string(),
            };
        }

        let prompt = format!(
            "You are a travel expert specializing in Indian destinations. Provide accurate, \
             practical information.\n\n\
             Provide key information about {destination} as a travel destination in India. \
             Include:\n\
             - Best time to visit\n\
             - Top 5 attractions\n\
             - Approximate budget for 3 days (budget, mid-range, luxury)\n\
             - Local cuisine highlights\n\
             - Transportation tips\n\n\
             Format as JSON:\n\
             {{\"bestTime\":\"Month range\",\"attractions\":[\"Attraction 1\"],\
             \"budgetEstimate\":{{\"budget\":5000,\"midRange\":12000,\"luxury\":25000}},\
             \"cuisine\":[\"Dish 1\"],\"transportation\":\"Transportation tips\"}}"
        );

        match self.candidate_text(prompt, 0.3, 1024).await {
            Fetch::Text(content) => {
                match serde_json::from_str::<DestinationInfo>(&clean_json_blob(&content)) {
                    Ok(info) => info,
                    Err(err) => {
                        tracing::error!(%err, "destination info did not parse as JSON");
                        DestinationInfo {
                            transportation: truncate(&content, 200),
                            ..unavailable_destination_info()
                        }
                    }
                }
            }
            Fetch::NoContent | Fetch::Unreachable => unavailable_destination_info(),
        }
    }

    async fn candidate_text(&self, prompt: String, temperature: f64, max_tokens: u32) -> Fetch {
        let Some(api_key) = &self.api_key else {
            return Fetch::Unreachable;
        };

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
            generation_config: GenerationConfig {
                temperature,
                max_output_tokens: max_tokens,
            },
        };

        let response = match self
            .client
            .post(&self.base_url)
            .query(&[("key", api_key.as_str())])
            .json(&body)
            .send()
            .await
        {
            Ok(response) => response,
            Err(err) => {
                tracing::error!(%err, "assistant request failed");
                return Fetch::Unreachable;
            }
        };

        let parsed = match response.json::<GenerateResponse>().await {
            Ok(parsed) => parsed,
            Err(err) => {
                tracing::error!(%err, "assistant response was not valid JSON");
                return Fetch::Unreachable;
            }
        };

        if let Some(error) = parsed.error {
            tracing::error!(?error, "assistant returned an error object");
            return Fetch::NoContent;
        }

        let text = parsed
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text);
        match text {
            Some(text) => Fetch::Text(text),
            None => {
                tracing::error!("assistant response carried no candidate text");
                Fetch::NoContent
            }
        }
    }
}

/// Strip markdown fences and cut out the first `{`..last `}` span.
fn clean_json_blob(text: &str) -> String {
    let mut clean = text.trim().to_string();
    clean = clean.replace("```json", "").replace("```", "");
    match (clean.find('{'), clean.rfind('}')) {
        (Some(start), Some(end)) if start < end => clean[start..=end].to_string(),
        _ => clean,
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn default_budget_estimate() -> BudgetEstimate {
    BudgetEstimate {
        budget: 5000,
        mid_range: 12000,
        luxury: 25000,
    }
}

fn unavailable_destination_info() -> DestinationInfo {
    DestinationInfo {
        best_time: "October to March".to_string(),
        attractions: vec!["Information available on request".to_string()],
        budget_estimate: default_budget_estimate(),
        cuisine: vec!["Local specialties".to_string()],
        transportation: "Information temporarily unavailable".to_string(),
    }
}

fn fallback_itinerary(budget: i64) -> Itinerary {
    Itinerary {
        days: vec![ItineraryDay {
            day: 1,
            title: "AI unavailable — fallback itinerary".to_string(),
            activities: vec![
                "AI response not available. Please try again or check logs for details."
                    .to_string(),
            ],
            estimated_cost: budget.div_euclid(3),
            tips: "AI response unavailable — try again later or refine your inputs.".to_string(),
        }],
        total_estimated_cost: budget,
        general_tips: vec![
            "AI response unavailable. Please try again later.".to_string(),
            "Ensure the assistant API key is configured.".to_string(),
        ],
    }
}

/// Normalize whatever the assistant replied into an `Itinerary`. Structured
/// JSON with a `days` array is patched field by field; anything else is
/// salvaged line by line.
fn parse_itinerary(content: &str, budget: i64) -> Itinerary {
    let parsed: Option<Value> = serde_json::from_str(&clean_json_blob(content)).ok();
    let days = parsed
        .as_ref()
        .and_then(|v| v.get("days"))
        .and_then(Value::as_array)
        .cloned();

    let Some(days) = days else {
        return salvage_itinerary(content, budget);
    };
    let parsed = parsed.unwrap_or_default();
    let day_count = days.len().max(1) as i64;

    let days = days
        .iter()
        .enumerate()
        .map(|(index, day)| ItineraryDay {
            day: day
                .get("day")
                .and_then(Value::as_u64)
                .map_or(index as u32 + 1, |d| d as u32),
            title: day
                .get("title")
                .and_then(Value::as_str)
                .map_or_else(|| format!("Day {}", index + 1), ToString::to_string),
            activities: match day.get("activities") {
                Some(Value::Array(items)) => items
                    .iter()
                    .map(|item| {
                        item.as_str()
                            .map_or_else(|| item.to_string(), ToString::to_string)
                    })
                    .collect(),
                Some(Value::String(single)) => vec![single.clone()],
                _ => vec!["Activity details not available".to_string()],
            },
            estimated_cost: day
                .get("estimatedCost")
                .and_then(Value::as_i64)
                .unwrap_or_else(|| budget.div_euclid(day_count)),
            tips: day
                .get("tips")
                .and_then(Value::as_str)
                .unwrap_or("Enjoy your day!")
                .to_string(),
        })
        .collect();

    Itinerary {
        days,
        total_estimated_cost: parsed
            .get("totalEstimatedCost")
            .and_then(Value::as_i64)
            .unwrap_or(budget),
        general_tips: match parsed.get("generalTips") {
            Some(Value::Array(tips)) => tips
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect(),
            Some(Value::String(single)) => vec![single.clone()],
            _ => vec!["Have a great trip!".to_string()],
        },
    }
}

/// The reply was prose, not JSON: lift up to five lines into a single-day
/// itinerary, dropping any leading list numbering.
fn salvage_itinerary(content: &str, budget: i64) -> Itinerary {
    let activities: Vec<String> = content
        .lines()
        .filter(|line| !line.trim().is_empty())
        .take(5)
        .map(|line| {
            let line = line.trim().trim_start_matches(|c: char| c.is_ascii_digit());
            // at most one dot belongs to the numbering
            line.strip_prefix('.').unwrap_or(line).trim().to_string()
        })
        .collect();

    Itinerary {
        days: vec![ItineraryDay {
            day: 1,
            title: "AI Generated Itinerary".to_string(),
            activities: if activities.is_empty() {
                vec![
                    "AI generated itinerary - please check the full response for details"
                        .to_string(),
                ]
            } else {
                activities
            },
            estimated_cost: budget.div_euclid(3),
            tips: "AI response received but parsing failed. Please review the detailed \
                   itinerary above."
                .to_string(),
        }],
        total_estimated_cost: budget,
        general_tips: vec![
            "AI response received".to_string(),
            "Please review the detailed itinerary".to_string(),
            "Contact support if you need assistance".to_string(),
        ],
    }
}
