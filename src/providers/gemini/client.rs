use crate::capture::CapturedImage;
use crate::core::error::StepError;
use crate::prompts::{PHOTO_PLACEHOLDER, SYSTEM_INSTRUCTION};
use crate::providers::base_client::HttpClient;
use crate::providers::gemini::types::*;
use crate::session::message::{Message, Role};

#[derive(Clone)]
pub struct GeminiClient {
    pub model: String,
    temperature: f64,
    client: HttpClient,
}

impl GeminiClient {
    pub fn new(base_url: String, api_key: String, model: String, temperature: f64) -> Self {
        let mut client = HttpClient::new(base_url, None);

        // Gemini authenticates with the key as a query param
        client.add_query_param("key", api_key);

        Self {
            model,
            temperature,
            client,
        }
    }

    /// Replays the session history as request turns and appends the new
    /// contribution as a trailing user turn.
    ///
    /// Deterministic and side-effect free: identical inputs build identical
    /// requests. A history message carrying neither text nor image breaks
    /// the session contract and is rejected instead of producing an empty
    /// turn.
    pub fn build_request(
        &self,
        history: &[Message],
        new_text: Option<&str>,
        new_image: Option<&CapturedImage>,
    ) -> Result<GenerateContentRequest, StepError> {
        let mut contents = Vec::with_capacity(history.len() + 1);
        for message in history {
            contents.push(encode_message(message)?);
        }

        let mut parts = vec![Part::Text {
            text: new_text.unwrap_or(PHOTO_PLACEHOLDER).to_string(),
        }];
        if let Some(image) = new_image {
            parts.push(inline_image(image.data.clone(), image.mime_type.clone()));
        }
        contents.push(Content {
            role: "user".to_string(),
            parts,
        });

        Ok(GenerateContentRequest {
            contents,
            system_instruction: Some(SystemInstruction {
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
            generation_config: Some(GenerationConfig {
                temperature: self.temperature,
            }),
        })
    }

    /// One full request cycle against `generateContent`. `Ok(None)` means
    /// the endpoint answered but produced no usable text.
    pub async fn generate(
        &self,
        history: &[Message],
        new_text: Option<&str>,
        new_image: Option<&CapturedImage>,
    ) -> Result<Option<String>, StepError> {
        let payload = self.build_request(history, new_text, new_image)?;
        let response = self
            .client
            .post(
                &format!("v1beta/models/{}:generateContent", self.model),
                &payload,
            )
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(StepError::Api(format!(
                "generateContent returned {}: {}",
                status,
                error_message(&body)
            )));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            StepError::Serialization(format!("Failed to parse Gemini response: {}", e))
        })?;

        Ok(parsed.primary_text())
    }
}

fn encode_message(message: &Message) -> Result<Content, StepError> {
    if !message.is_valid() {
        return Err(StepError::Encode(format!(
            "message {} has neither text nor image",
            message.id
        )));
    }

    let mut parts = Vec::new();

    if let Some(text) = message.text.as_deref().filter(|t| !t.is_empty()) {
        parts.push(Part::Text {
            text: text.to_string(),
        });
    } else if message.role == Role::User {
        // Photo-only turns still carry a text part marking the event
        parts.push(Part::Text {
            text: PHOTO_PLACEHOLDER.to_string(),
        });
    }

    // Image parts only ever ride on user turns
    if message.role == Role::User {
        if let (Some(data), Some(mime_type)) = (&message.image_data, &message.mime_type) {
            parts.push(inline_image(data.clone(), mime_type.clone()));
        }
    }

    Ok(Content {
        role: match message.role {
            Role::Model => "model",
            Role::User => "user",
        }
        .to_string(),
        parts,
    })
}

fn inline_image(data: String, mime_type: String) -> Part {
    Part::InlineData {
        inline_data: InlineData { mime_type, data },
    }
}

fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> GeminiClient {
        GeminiClient::new(
            "https://generativelanguage.googleapis.com".to_string(),
            "test-key".to_string(),
            "gemini-3-flash-preview".to_string(),
            0.7,
        )
    }

    fn sample_image() -> CapturedImage {
        CapturedImage {
            data: "X".to_string(),
            mime_type: "image/jpeg".to_string(),
        }
    }

    #[test]
    fn roles_map_one_to_one() {
        let history = vec![
            Message::model_reply("안녕!"),
            Message::user_photo(sample_image()),
            Message::model_reply("좋은 사진이야"),
        ];

        let request = client().build_request(&history, None, None).unwrap();
        let roles: Vec<&str> = request
            .contents
            .iter()
            .map(|turn| turn.role.as_str())
            .collect();
        // Trailing turn for the new contribution is always user
        assert_eq!(roles, ["model", "user", "model", "user"]);
    }

    #[test]
    fn photo_only_user_turn_gets_placeholder_then_image() {
        let history = vec![Message::user_photo(sample_image())];
        let request = client().build_request(&history, None, None).unwrap();

        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 2);
        assert_eq!(
            parts[0],
            Part::Text {
                text: PHOTO_PLACEHOLDER.to_string()
            }
        );
        assert!(matches!(&parts[1], Part::InlineData { inline_data }
            if inline_data.data == "X" && inline_data.mime_type == "image/jpeg"));
    }

    #[test]
    fn captioned_photo_keeps_text_before_image() {
        let mut message = Message::user_photo(sample_image());
        message.text = Some("오늘 하늘".to_string());

        let request = client().build_request(&[message], None, None).unwrap();
        let parts = &request.contents[0].parts;
        assert_eq!(
            parts[0],
            Part::Text {
                text: "오늘 하늘".to_string()
            }
        );
        assert!(matches!(parts[1], Part::InlineData { .. }));
    }

    #[test]
    fn model_turns_never_carry_images() {
        // Even if image fields are somehow populated on a model message
        let mut message = Message::model_reply("답장");
        message.image_data = Some("X".to_string());
        message.mime_type = Some("image/jpeg".to_string());

        let request = client().build_request(&[message], None, None).unwrap();
        let parts = &request.contents[0].parts;
        assert_eq!(parts.len(), 1);
        assert!(matches!(parts[0], Part::Text { .. }));
    }

    #[test]
    fn empty_history_with_new_image_builds_single_trailing_turn() {
        let image = sample_image();
        let request = client().build_request(&[], None, Some(&image)).unwrap();

        assert_eq!(request.contents.len(), 1);
        let turn = &request.contents[0];
        assert_eq!(turn.role, "user");
        assert_eq!(
            turn.parts,
            vec![
                Part::Text {
                    text: PHOTO_PLACEHOLDER.to_string()
                },
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/jpeg".to_string(),
                        data: "X".to_string(),
                    }
                },
            ]
        );
    }

    #[test]
    fn new_text_contribution_replaces_placeholder() {
        let request = client().build_request(&[], Some("[알람] 체크인"), None).unwrap();
        assert_eq!(
            request.contents[0].parts,
            vec![Part::Text {
                text: "[알람] 체크인".to_string()
            }]
        );
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut captioned = Message::user_photo(sample_image());
        captioned.text = Some("여기".to_string());
        let history = vec![Message::model_reply("안녕!"), captioned];
        let image = sample_image();

        let first = client()
            .build_request(&history, None, Some(&image))
            .unwrap();
        let second = client()
            .build_request(&history, None, Some(&image))
            .unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn invalid_history_message_is_rejected() {
        let mut message = Message::model_reply("x");
        message.text = None;

        assert!(matches!(
            client().build_request(&[message], None, None),
            Err(StepError::Encode(_))
        ));
    }

    #[test]
    fn request_serializes_to_gemini_wire_shape() {
        let image = sample_image();
        let request = client().build_request(&[], None, Some(&image)).unwrap();
        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(value["contents"][0]["parts"][0]["text"], PHOTO_PLACEHOLDER);
        assert_eq!(
            value["contents"][0]["parts"][1]["inlineData"]["mimeType"],
            "image/jpeg"
        );
        assert_eq!(value["contents"][0]["parts"][1]["inlineData"]["data"], "X");
        assert_eq!(value["generationConfig"]["temperature"], 0.7);
        assert!(value["systemInstruction"]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("작은 한 걸음"));
    }
}
