//! Standalone right-to-left Arabic result page.

use std::fmt::Write;

use doctor_core::{Diagnosis, IssueReport, Side};

const STYLE: &str = "body{font-family:sans-serif;max-width:760px;margin:40px auto;line-height:1.7}\
pre{direction:ltr;text-align:left;background:#f5f5f5;padding:12px;overflow-x:auto;white-space:pre-wrap}\
.side{display:inline-block;padding:2px 10px;border-radius:4px;background:#eef}\
button[disabled]{padding:8px 16px;opacity:.5}";

/// Escape text for HTML element content and double-quoted attributes.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn side_label(side: Side) -> &'static str {
    match side {
        Side::Backend => "الواجهة الخلفية (Backend)",
        Side::Frontend => "الواجهة الأمامية (Frontend)",
        Side::Both => "الطرفان (Frontend + Backend)",
    }
}

/// Render the full result page. Code sections appear only when non-empty.
pub fn render_page(report: &IssueReport, diagnosis: &Diagnosis) -> String {
    let mut body = String::new();

    let _ = writeln!(body, "<h2>النتيجة</h2>");
    let _ = writeln!(body, "<h3>{}</h3>", escape_html(&diagnosis.issue_title));
    let _ = writeln!(
        body,
        "<p>الطرف المسؤول: <span class=\"side\">{}</span></p>",
        side_label(diagnosis.side)
    );
    let _ = writeln!(body, "<p>{}</p>", escape_html(&diagnosis.summary));

    if !diagnosis.steps.is_empty() {
        let _ = writeln!(body, "<h3>خطوات الحل</h3>\n<ol>");
        for step in &diagnosis.steps {
            let _ = writeln!(body, "  <li>{}</li>", escape_html(step));
        }
        let _ = writeln!(body, "</ol>");
    }

    for (title, code) in [
        ("كود الواجهة الخلفية (Backend)", &diagnosis.backend_code),
        ("كود الواجهة الأمامية (Frontend)", &diagnosis.frontend_code),
    ] {
        if !code.trim().is_empty() {
            let _ = writeln!(body, "<h3>{}</h3>\n<pre><code>{}</code></pre>", title, escape_html(code));
        }
    }

    if !diagnosis.extra_notes.trim().is_empty() {
        let _ = writeln!(body, "<h3>ملاحظات إضافية</h3>\n<p>{}</p>", escape_html(&diagnosis.extra_notes));
    }

    let _ = writeln!(
        body,
        "<h2>الحل الكامل (الجزء المدفوع)</h2>\n\
         <p>سيتم هنا لاحقاً عرض الشرح الكامل والكود الجاهز بعد الدفع.</p>\n\
         <button disabled>عرض الحل الكامل (مدفوع - قيد التطوير)</button>"
    );

    let _ = writeln!(body, "<hr/>\n<h3>بيانات المشكلة التي أدخلتها</h3>\n<ul>");
    for (label, value) in [
        ("Frontend URL", &report.frontend_url),
        ("Backend URL", &report.backend_url),
        ("Frontend type", &report.frontend_type),
        ("Backend type", &report.backend_type),
    ] {
        let _ = writeln!(body, "  <li>{}: {}</li>", label, escape_html(value));
    }
    let _ = writeln!(
        body,
        "  <li>Error message: <pre>{}</pre></li>\n</ul>",
        escape_html(&report.error_message)
    );

    format!(
        "<!DOCTYPE html>\n<html lang=\"ar\" dir=\"rtl\">\n<head>\n<meta charset=\"utf-8\" />\n\
         <title>نتيجة التحليل</title>\n<style>{STYLE}</style>\n</head>\n<body>\n{body}</body>\n</html>"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use doctor_core::{DiagnosisSource, RuleVerdict};

    fn diagnosis() -> Diagnosis {
        Diagnosis {
            side: Side::Backend,
            issue_title: "CORS <blocked>".into(),
            summary: "Server & proxy".into(),
            steps: vec!["Add \"cors\" middleware".into()],
            backend_code: "app.use(cors({ origin: '<url>' }))".into(),
            frontend_code: String::new(),
            extra_notes: String::new(),
            rule_side: RuleVerdict::Backend,
            source: DiagnosisSource::Model,
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
        assert_eq!(escape_html("مرحبا"), "مرحبا");
    }

    #[test]
    fn test_page_escapes_every_field() {
        let report = IssueReport::new("<script>alert(1)</script>")
            .with_frontend("http://x/?a=<b>", "React");
        let page = render_page(&report, &diagnosis());
        assert!(!page.contains("<script>"));
        assert!(page.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(page.contains("CORS &lt;blocked&gt;"));
        assert!(page.contains("Server &amp; proxy"));
        assert!(page.contains("Add &quot;cors&quot; middleware"));
        assert!(page.contains("http://x/?a=&lt;b&gt;"));
    }

    #[test]
    fn test_page_shape() {
        let page = render_page(&IssueReport::default(), &diagnosis());
        assert!(page.contains("dir=\"rtl\""));
        assert!(page.contains("<button disabled>"));
        assert!(page.contains("كود الواجهة الخلفية"));
        assert!(!page.contains("كود الواجهة الأمامية"));
        assert!(!page.contains("ملاحظات إضافية"));
    }
}
