use log::{debug, warn};

use crate::error::{Result, TutorError};
use crate::tutor::image::ImagePayload;
use crate::tutor::language::is_arabic;
use crate::tutor::prompt::{
    ARABIC_IMAGE_INSTRUCTION, ARABIC_TEXT_DIRECTIVE, DEFAULT_IMAGE_INSTRUCTION,
    ENGLISH_TEXT_DIRECTIVE, MASTER_TUTOR_PROMPT,
};
use crate::web::models::{Content, ContentPart, ImageUrl, Message};

/// Assembles the outbound message sequence: system prompt, prior turns, then the new user turn.
///
/// Blank text counts as absent. Fails with `InvalidInput` when there is neither text nor image.
pub fn build_messages(
    text: Option<&str>,
    image: Option<&ImagePayload>,
    history: Vec<Message>,
) -> Result<Vec<Message>> {
    let text = text.filter(|t| !t.trim().is_empty());

    let user_message = match (text, image) {
        (None, None) => {
            return Err(TutorError::invalid_input(
                "Either problem_text or image must be provided",
            ))
        }
        (text, Some(image)) => image_turn(text, image),
        (Some(text), None) => text_turn(text),
    };

    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message::system(MASTER_TUTOR_PROMPT));
    messages.extend(history);
    messages.push(user_message);
    Ok(messages)
}

fn image_turn(text: Option<&str>, image: &ImagePayload) -> Message {
    let instruction = match text {
        Some(t) if is_arabic(t) => ARABIC_IMAGE_INSTRUCTION,
        Some(t) => t,
        None => DEFAULT_IMAGE_INSTRUCTION,
    };
    debug!(
        "Embedding {} byte {} image with instruction: {}",
        image.len(),
        image.mime_type(),
        instruction
    );

    Message::user(Content::Parts(vec![
        ContentPart::ImageUrl {
            image_url: ImageUrl {
                url: image.data_uri(),
            },
        },
        ContentPart::Text {
            text: instruction.to_string(),
        },
    ]))
}

fn text_turn(text: &str) -> Message {
    let directive = if is_arabic(text) {
        ARABIC_TEXT_DIRECTIVE
    } else {
        ENGLISH_TEXT_DIRECTIVE
    };
    Message::user(Content::Text(format!("{}\n\n{}", text, directive)))
}

/// Decodes caller-supplied conversation history.
///
/// Lenient on purpose: anything that is not a JSON array of `{role, content}` turns is
/// dropped with a warning and the request carries on without history.
pub fn parse_history(raw: Option<&str>) -> Vec<Message> {
    let raw = match raw.map(str::trim) {
        Some(r) if !r.is_empty() => r,
        _ => return Vec::new(),
    };

    match serde_json::from_str::<Vec<Message>>(raw) {
        Ok(history) => history,
        Err(e) => {
            warn!("Ignoring malformed conversation_history ({} bytes): {}", raw.len(), e);
            Vec::new()
        }
    }
}
