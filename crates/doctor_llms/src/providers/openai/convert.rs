//! Conversion between unified types and OpenAI types

use serde_json::json;

use super::types::{
    is_reasoning_model, OpenAIErrorEnvelope, OpenAIMessage, OpenAIRequest, OpenAIResponse,
};
use crate::error::{Error, Result};
use crate::types::{GenerateRequest, GenerateResponse, Message, ResponseFormat, Usage};

/// Convert unified request to OpenAI request
pub fn to_openai_request(req: &GenerateRequest) -> Result<OpenAIRequest> {
    if req.messages.is_empty() {
        return Err(Error::Other("request has no messages".to_string()));
    }

    let messages = req.messages.iter().map(to_openai_message).collect();

    // Reasoning models reject max_tokens and a non-default temperature
    let reasoning = is_reasoning_model(&req.model);
    let (max_tokens, max_completion_tokens) = if reasoning {
        (None, req.options.max_tokens)
    } else {
        (req.options.max_tokens, None)
    };
    let temperature = if reasoning {
        None
    } else {
        req.options.temperature
    };

    let response_format = match req.options.response_format {
        ResponseFormat::Text => None,
        ResponseFormat::JsonObject => Some(json!({ "type": "json_object" })),
    };

    Ok(OpenAIRequest {
        model: req.model.clone(),
        messages,
        temperature,
        max_tokens,
        max_completion_tokens,
        response_format,
    })
}

fn to_openai_message(msg: &Message) -> OpenAIMessage {
    OpenAIMessage {
        role: msg.role.as_str().to_string(),
        content: Some(msg.content.clone()),
        refusal: None,
    }
}

/// Convert OpenAI response to unified response
pub fn from_openai_response(resp: OpenAIResponse) -> Result<GenerateResponse> {
    let choice = resp
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| Error::invalid_response("No choices in response"))?;

    if let Some(refusal) = choice.message.refusal.filter(|r| !r.is_empty()) {
        return Err(Error::invalid_response(format!("model refused: {}", refusal)));
    }

    let content = choice
        .message
        .content
        .filter(|c| !c.trim().is_empty())
        .ok_or_else(|| Error::invalid_response("No content in response"))?;

    let usage = resp.usage.map(|u| Usage {
        input_tokens: u.prompt_tokens,
        output_tokens: u.completion_tokens,
        total_tokens: u.total_tokens,
    });

    Ok(GenerateResponse {
        content,
        finish_reason: choice.finish_reason,
        usage,
        model: (!resp.model.is_empty()).then_some(resp.model),
    })
}

/// Pull the human-readable message out of an error body, falling back to the raw text.
pub fn error_message(body: &str) -> String {
    match serde_json::from_str::<OpenAIErrorEnvelope>(body) {
        Ok(OpenAIErrorEnvelope { error }) => match error.code {
            Some(code) => format!("{} ({})", error.message, code),
            None => error.message,
        },
        Err(_) => body.trim().to_string(),
    }
}
