//! Fixed diagnoses used when the model cannot be asked or cannot be trusted.
//!
//! Both templates are fully populated and always point at the backend,
//! where the credential and the outbound call live.

use crate::diagnosis::{Diagnosis, DiagnosisSource};
use crate::error::DoctorError;
use crate::verdict::{RuleVerdict, Side};

/// No credential is configured; the model was never called.
pub fn missing_credential(rule: RuleVerdict) -> Diagnosis {
    Diagnosis {
        side: Side::Backend,
        issue_title: "خدمة الذكاء الاصطناعي غير مهيأة".to_string(),
        summary: "لم يتم ضبط مفتاح OPENAI_API_KEY على الخادم، لذلك لم يتم إرسال \
                  المشكلة إلى نموذج الذكاء الاصطناعي. التحليل بالقواعد فقط متاح حالياً."
            .to_string(),
        steps: vec![
            "أنشئ مفتاح API من لوحة تحكم OpenAI.".to_string(),
            "أضف OPENAI_API_KEY=<المفتاح> إلى ملف .env في مجلد المشروع أو إلى ~/.doctor/env.".to_string(),
            "أعد تشغيل الأداة ثم أعد إرسال المشكلة.".to_string(),
        ],
        backend_code: "OPENAI_API_KEY=sk-...".to_string(),
        frontend_code: String::new(),
        extra_notes: format!("نتيجة التحليل بالقواعد: {}", rule),
        rule_side: rule,
        source: DiagnosisSource::MissingCredential,
    }
}

const AUTH_STEPS: &[&str] = &[
    "تحقق من أن المفتاح منسوخ كاملاً دون مسافات أو أسطر زائدة.",
    "تأكد من أن المفتاح لم يُلغَ من لوحة تحكم OpenAI.",
    "أعد تشغيل الأداة بعد تعديل ملف .env.",
];

const RATE_LIMIT_STEPS: &[&str] = &[
    "انتظر قليلاً ثم أعد المحاولة.",
    "تحقق من رصيد الحساب وحدود الاستخدام في لوحة تحكم OpenAI.",
];

const RETRY_STEPS: &[&str] = &[
    "أعد المحاولة بعد قليل.",
    "تحقق من صلاحية OPENAI_API_KEY ومن رصيد الحساب.",
    "تحقق من اتصال الخادم بالإنترنت ومن إعدادات OPENAI_BASE_URL إن وجدت.",
];

/// The model call failed or returned something unusable. The raw error
/// text is kept verbatim in `backend_code` for the operator; the title and
/// steps follow the kind of failure.
pub fn model_failure(rule: RuleVerdict, error: &DoctorError) -> Diagnosis {
    let (issue_title, steps) = if error.is_auth() {
        ("مفتاح OPENAI_API_KEY مرفوض", AUTH_STEPS)
    } else if error.is_rate_limited() {
        ("تم تجاوز حد الاستخدام لدى OpenAI", RATE_LIMIT_STEPS)
    } else {
        ("تعذر الحصول على تحليل الذكاء الاصطناعي", RETRY_STEPS)
    };

    Diagnosis {
        side: Side::Backend,
        issue_title: issue_title.to_string(),
        summary: "فشل الاتصال بنموذج الذكاء الاصطناعي أو أعاد رداً غير صالح. \
                  تفاصيل الخطأ موجودة في قسم كود الواجهة الخلفية."
            .to_string(),
        steps: steps.iter().map(|s| s.to_string()).collect(),
        backend_code: error.to_string(),
        frontend_code: String::new(),
        extra_notes: format!("نتيجة التحليل بالقواعد: {}", rule),
        rule_side: rule,
        source: DiagnosisSource::Fallback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_populated(d: &Diagnosis) {
        assert_eq!(d.side, Side::Backend);
        assert!(!d.issue_title.is_empty());
        assert!(!d.summary.is_empty());
        assert!(!d.steps.is_empty());
        assert!(d.frontend_code.is_empty());
        assert!(d.is_fallback());
    }

    #[test]
    fn test_missing_credential() {
        let d = missing_credential(RuleVerdict::Frontend);
        assert_populated(&d);
        assert_eq!(d.source, DiagnosisSource::MissingCredential);
        assert_eq!(d.rule_side, RuleVerdict::Frontend);
        assert!(d.summary.contains("OPENAI_API_KEY"));
    }

    #[test]
    fn test_model_failure_keeps_raw_error() {
        let error = DoctorError::Timeout(60);
        let d = model_failure(RuleVerdict::Uncertain, &error);
        assert_populated(&d);
        assert_eq!(d.source, DiagnosisSource::Fallback);
        assert_eq!(d.backend_code, "Model call timed out after 60s");
    }

    #[test]
    fn test_model_failure_wording_follows_error_kind() {
        let generic = model_failure(RuleVerdict::Backend, &DoctorError::Timeout(60));

        let auth = DoctorError::from(doctor_llms::Error::api("OpenAI", 401, "Incorrect API key"));
        let d = model_failure(RuleVerdict::Backend, &auth);
        assert_populated(&d);
        assert!(d.issue_title.contains("OPENAI_API_KEY"));
        assert!(d.backend_code.contains("Incorrect API key"));

        let limited = DoctorError::from(doctor_llms::Error::api("OpenAI", 429, "quota"));
        let d = model_failure(RuleVerdict::Backend, &limited);
        assert_populated(&d);
        assert_ne!(d.issue_title, generic.issue_title);
        assert_eq!(d.steps.len(), 2);
    }
}
