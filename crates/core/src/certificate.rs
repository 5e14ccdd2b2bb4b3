//! Certificate numbering and template rendering.

use chrono::Datelike;

use crate::types::{DbId, Timestamp};

/// Settings key under which admins store a custom template.
pub const TEMPLATE_SETTING_KEY: &str = "certificate_template";

/// Template used when no custom template has been saved.
pub const DEFAULT_TEMPLATE: &str = r#"<article class="certificate">
  <h1>Certificate of Completion</h1>
  <p>This is to certify that</p>
  <h2>{{student_name}}</h2>
  <p>has successfully completed the course</p>
  <h3>{{course_title}}</h3>
  <footer>
    <span>Issued on {{issued_on}}</span>
    <span>Certificate No. {{certificate_no}}</span>
  </footer>
</article>"#;

/// Values substituted into a template.
#[derive(Debug, Clone)]
pub struct CertificateFields<'a> {
    pub student_name: &'a str,
    pub course_title: &'a str,
    pub issued_on: Timestamp,
    pub certificate_no: &'a str,
}

/// Build the certificate number, e.g. `CERT-2026-000012-000034`.
pub fn certificate_number(course_id: DbId, student_id: DbId, issued_at: Timestamp) -> String {
    format!(
        "CERT-{}-{course_id:06}-{student_id:06}",
        issued_at.year()
    )
}

/// Substitute `{{placeholder}}` tokens. Values are HTML-escaped; unknown
/// placeholders and unterminated braces are copied through unchanged.
pub fn render_template(template: &str, fields: &CertificateFields<'_>) -> String {
    let issued_on = fields.issued_on.format("%d %B %Y").to_string();
    let mut out = String::with_capacity(template.len() + 64);
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = after[..end].trim();
        let value = match name {
            "student_name" => Some(fields.student_name),
            "course_title" => Some(fields.course_title),
            "issued_on" => Some(issued_on.as_str()),
            "certificate_no" => Some(fields.certificate_no),
            _ => None,
        };
        match value {
            Some(v) => out.push_str(&escape_html(v)),
            None => out.push_str(&rest[start..start + 2 + end + 2]),
        }
        rest = &after[end + 2..];
    }
    out.push_str(rest);
    out
}

/// Escape the five HTML-significant characters.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn issued() -> Timestamp {
        chrono::Utc.with_ymd_and_hms(2026, 3, 14, 9, 30, 0).unwrap()
    }

    fn fields<'a>(name: &'a str, no: &'a str) -> CertificateFields<'a> {
        CertificateFields {
            student_name: name,
            course_title: "Intro to Navigation",
            issued_on: issued(),
            certificate_no: no,
        }
    }

    #[test]
    fn number_is_zero_padded() {
        assert_eq!(certificate_number(12, 34, issued()), "CERT-2026-000012-000034");
    }

    #[test]
    fn renders_all_placeholders() {
        let html = render_template(
            "{{student_name}}|{{ course_title }}|{{issued_on}}|{{certificate_no}}",
            &fields("Ada Obi", "CERT-1"),
        );
        assert_eq!(html, "Ada Obi|Intro to Navigation|14 March 2026|CERT-1");
    }

    #[test]
    fn values_are_escaped() {
        let html = render_template("<b>{{student_name}}</b>", &fields("<script>&", "x"));
        assert_eq!(html, "<b>&lt;script&gt;&amp;</b>");
    }

    #[test]
    fn unknown_and_unterminated_placeholders_pass_through() {
        let html = render_template("{{signature}} and {{student_name", &fields("Ada", "x"));
        assert_eq!(html, "{{signature}} and {{student_name");
    }

    #[test]
    fn default_template_has_every_placeholder_filled() {
        let html = render_template(DEFAULT_TEMPLATE, &fields("Ada", "CERT-9"));
        assert!(!html.contains("{{"));
        assert!(html.contains("Ada"));
        assert!(html.contains("CERT-9"));
    }
}
