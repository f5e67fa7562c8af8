//! Prompt construction for the diagnosis model call.

use doctor_llms::Message;
use serde_json::json;

use crate::report::IssueReport;
use crate::verdict::{RuleVerdict, Side};

/// System instruction: role, language, and output discipline.
pub const SYSTEM_PROMPT: &str = "\
أنت خبير في تشخيص مشاكل الربط بين الواجهة الأمامية (Frontend) والواجهة الخلفية (Backend).
مهمتك تحديد الطرف المسؤول عن المشكلة واقتراح حل عملي مع كود جاهز.
اكتب كل النصوص باللغة العربية، واترك الكود والأوامر كما هي.
You must answer with a single JSON object only. No markdown, no prose before or after it.";

/// The exact response shape the model must produce.
const RESPONSE_SHAPE: &str = r#"{
  "side": "backend" | "frontend" | "both",
  "issue_title": "short title",
  "summary": "one paragraph explaining the cause",
  "steps": ["step 1", "step 2"],
  "backend_code": "server-side code or config, or empty string",
  "frontend_code": "client-side code or config, or empty string",
  "extra_notes": "optional notes, or empty string"
}"#;

/// Build the user instruction for one report.
///
/// A decisive verdict is presented as fixed and must be echoed as `side`;
/// `uncertain` leaves the choice to the model.
pub fn build_user_prompt(report: &IssueReport, verdict: RuleVerdict) -> String {
    let payload = json!({
        "frontend_url": report.frontend_url,
        "backend_url": report.backend_url,
        "frontend_type": report.frontend_type,
        "backend_type": report.backend_type,
        "error_message": report.error_message,
        "rule_side": verdict,
    });
    let payload = serde_json::to_string_pretty(&payload).unwrap_or_else(|_| payload.to_string());

    let side_instruction = match verdict.decisive() {
        Some(side) => fixed_side_instruction(side),
        None => "Rule analysis was inconclusive (rule_side = \"uncertain\"). \
                 Decide the side yourself: \"backend\", \"frontend\" or \"both\"."
            .to_string(),
    };

    format!(
        "Integration problem report:\n{payload}\n\n\
         {side_instruction}\n\n\
         Respond with exactly this JSON shape:\n{RESPONSE_SHAPE}"
    )
}

fn fixed_side_instruction(side: Side) -> String {
    let code_rule = match side {
        Side::Backend => {
            "The fix belongs on the server, so \"backend_code\" is required and \
             \"frontend_code\" must be an empty string."
        }
        Side::Frontend => {
            "The fix belongs in the client, so \"frontend_code\" is required and \
             \"backend_code\" must be an empty string."
        }
        Side::Both => {
            "Both sides need changes, so \"backend_code\" and \"frontend_code\" \
             are both required."
        }
    };
    format!(
        "Rule analysis determined rule_side = \"{side}\". This value is FIXED: \
         set \"side\" to \"{side}\" exactly and do not change it. {code_rule}"
    )
}

/// System and user messages for the model call.
pub fn build_messages(report: &IssueReport, verdict: RuleVerdict) -> Vec<Message> {
    vec![
        Message::system(SYSTEM_PROMPT),
        Message::user(build_user_prompt(report, verdict)),
    ]
}
