//! Code snippets shown next to a source so client applications can consume
//! its translations: XLIFF units, `.properties` entries, lookup URLs and an
//! Angular service that calls the lookup endpoint.

use serde::Serialize;

use crate::types::SourceDetail;

pub const LOOKUP_PATH: &str = "/api/translations";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnippetFormat {
    Xliff,
    Properties,
    Endpoint,
    Angular,
}

impl SnippetFormat {
    pub fn parse(s: &str) -> Option<SnippetFormat> {
        match s {
            "xliff" | "xlf" => Some(Self::Xliff),
            "properties" => Some(Self::Properties),
            "endpoint" | "url" => Some(Self::Endpoint),
            "angular" => Some(Self::Angular),
            _ => None,
        }
    }
}

/// A snippet rendered for one translation of a source.
#[derive(Debug, Clone, Serialize)]
pub struct LocalizedSnippet {
    pub language_code: String,
    pub language_name: String,
    pub snippet: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct AngularSnippets {
    /// Template line calling the service from a component.
    pub usage: String,
    /// Constructor injection for the component.
    pub injection: String,
    /// `translation.service.ts`
    pub service: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct Snippets {
    pub xliff: Vec<LocalizedSnippet>,
    pub properties: Vec<LocalizedSnippet>,
    pub endpoints: Vec<LocalizedSnippet>,
    pub angular: AngularSnippets,
}

impl Snippets {
    #[must_use]
    pub fn for_source(detail: &SourceDetail, base_url: &str) -> Self {
        let source = &detail.source;
        let localized = |render: &dyn Fn(&str, &str, &str) -> String| {
            detail
                .translations
                .iter()
                .map(|t| LocalizedSnippet {
                    language_code: t.language.code.clone(),
                    language_name: t.language.name.clone(),
                    snippet: render(&t.language.name, &t.language.code, &t.translation.text),
                })
                .collect::<Vec<_>>()
        };

        Self {
            xliff: localized(&|name: &str, _: &str, text: &str| {
                xliff_unit(name, &source.key, &source.text, text)
            }),
            properties: localized(&|_: &str, code: &str, text: &str| {
                properties_entry(code, &detail.domain.name, &source.key, text)
            }),
            endpoints: localized(&|_: &str, code: &str, _: &str| {
                endpoint_url(base_url, &source.key, code)
            }),
            angular: AngularSnippets {
                usage: angular_usage(&source.key),
                injection: angular_injection(),
                service: angular_service(base_url),
            },
        }
    }

    /// Flattens one format into printable blocks.
    #[must_use]
    pub fn render(&self, format: SnippetFormat) -> Vec<String> {
        let snippets = |items: &[LocalizedSnippet]| -> Vec<String> {
            items.iter().map(|s| s.snippet.clone()).collect()
        };
        match format {
            SnippetFormat::Xliff => snippets(&self.xliff),
            SnippetFormat::Properties => snippets(&self.properties),
            SnippetFormat::Endpoint => snippets(&self.endpoints),
            SnippetFormat::Angular => vec![
                self.angular.usage.clone(),
                self.angular.injection.clone(),
                self.angular.service.clone(),
            ],
        }
    }
}

#[must_use]
pub fn xliff_unit(language_name: &str, key: &str, source_text: &str, target_text: &str) -> String {
    format!(
        "<!-- {} -->\n<trans-unit id=\"{}\">\n  <source>{}</source>\n  <target>{}</target>\n</trans-unit>",
        escape_xml(language_name).replace("--", "- -"),
        escape_xml(key),
        escape_xml(source_text),
        escape_xml(target_text),
    )
}

#[must_use]
pub fn properties_entry(code: &str, domain_name: &str, key: &str, text: &str) -> String {
    let property_key = format!("{}.{}", domain_name, key.to_uppercase());
    format!(
        "// messages_{code}.properties\n{}={}",
        escape_properties(&property_key, true),
        escape_properties(text, false),
    )
}

#[must_use]
pub fn endpoint_url(base_url: &str, key: &str, code: &str) -> String {
    format!(
        "{}{LOOKUP_PATH}?key={}&code={}",
        base_url.trim_end_matches('/'),
        urlencoding::encode(key),
        urlencoding::encode(code),
    )
}

#[must_use]
pub fn angular_usage(key: &str) -> String {
    format!(
        "// Call translation service in your component\n<div>{{{{ translationService.translate('{}') | async }}}}</div>",
        key.replace('\\', "\\\\").replace('\'', "\\'"),
    )
}

#[must_use]
pub fn angular_injection() -> String {
    "// Add translation service to your component\nconstructor(public translationService: TranslationService) { }".to_string()
}

#[must_use]
pub fn angular_service(base_url: &str) -> String {
    format!(
        r#"// translation.service.ts
import {{Injectable}} from '@angular/core';
import {{Observable}} from "rxjs";
import {{HttpClient}} from "@angular/common/http";

const BASE_URI = '{}{LOOKUP_PATH}';

@Injectable({{
  providedIn: 'root'
}})
export class TranslationService {{

  constructor(private http: HttpClient) {{ }}

  public translate(key: string): Observable<string> {{
    return this.http.get<string>(`${{BASE_URI}}?key=${{key}}&code=${{$localize.locale}}`);
  }}
}}"#,
        base_url.trim_end_matches('/'),
    )
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escapes a key or value for a `.properties` line.
fn escape_properties(s: &str, is_key: bool) -> String {
    let mut out = String::with_capacity(s.len());
    for (i, c) in s.chars().enumerate() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' ' if is_key || i == 0 => out.push_str("\\ "),
            '=' | ':' | '#' | '!' if is_key => {
                out.push('\\');
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::types::{Domain, Language, Source, Translation, TranslationWithLanguage};

    fn detail() -> SourceDetail {
        let now = Utc::now();
        SourceDetail {
            source: Source {
                id: "src-1".to_string(),
                key: "PRE_AUTH".to_string(),
                text: "Pre-authorized Payments".to_string(),
                domain_id: "dom-1".to_string(),
                created_by_id: None,
                created_at: now,
                updated_at: now,
            },
            domain: Domain {
                id: "dom-1".to_string(),
                name: "payments".to_string(),
                created_at: now,
            },
            translations: vec![TranslationWithLanguage {
                translation: Translation {
                    id: "tr-1".to_string(),
                    text: "Paiements Préautorisé".to_string(),
                    language_id: "lang-fr".to_string(),
                    source_id: "src-1".to_string(),
                    created_by_id: None,
                    created_at: now,
                    updated_at: now,
                },
                language: Language {
                    id: "lang-fr".to_string(),
                    name: "French".to_string(),
                    code: "fr".to_string(),
                    created_at: now,
                },
            }],
        }
    }

    #[test]
    fn test_xliff_unit() {
        let unit = xliff_unit("French", "PRE_AUTH", "Pre-authorized Payments", "Paiements Préautorisé");
        assert_eq!(
            unit,
            "<!-- French -->\n<trans-unit id=\"PRE_AUTH\">\n  <source>Pre-authorized Payments</source>\n  <target>Paiements Préautorisé</target>\n</trans-unit>"
        );
    }

    #[test]
    fn test_xliff_escapes_markup() {
        let unit = xliff_unit("English", "TERMS", "Read <b>terms</b> & \"rules\"", "ok");
        assert!(unit.contains("<source>Read &lt;b&gt;terms&lt;/b&gt; &amp; &quot;rules&quot;</source>"));
    }

    #[test]
    fn test_properties_entry() {
        let entry = properties_entry("fr", "payments", "pre_auth", "Paiements Préautorisé");
        assert_eq!(
            entry,
            "// messages_fr.properties\npayments.PRE_AUTH=Paiements Préautorisé"
        );
    }

    #[test]
    fn test_properties_escaping() {
        let entry = properties_entry("en", "check out", "k", " two\nlines \\ here");
        assert!(entry.ends_with("check\\ out.K=\\ two\\nlines \\\\ here"));
    }

    #[test]
    fn test_endpoint_url_encodes_query() {
        assert_eq!(
            endpoint_url("http://localhost:8080/", "PRE_AUTH", "fr"),
            "http://localhost:8080/api/translations?key=PRE_AUTH&code=fr"
        );
        assert_eq!(
            endpoint_url("https://i18n.example.com", "a&b c", "pt-BR"),
            "https://i18n.example.com/api/translations?key=a%26b%20c&code=pt-BR"
        );
    }

    #[test]
    fn test_angular_snippets() {
        assert!(angular_usage("PRE_AUTH").contains("{{ translationService.translate('PRE_AUTH') | async }}"));

        let service = angular_service("https://i18n.example.com/");
        assert!(service.contains("const BASE_URI = 'https://i18n.example.com/api/translations';"));
        assert!(service.contains("`${BASE_URI}?key=${key}&code=${$localize.locale}`"));
        assert!(service.contains("export class TranslationService {"));
    }

    #[test]
    fn test_snippets_for_source() {
        let snippets = Snippets::for_source(&detail(), "http://localhost:8080");

        assert_eq!(snippets.xliff.len(), 1);
        assert_eq!(snippets.xliff[0].language_code, "fr");
        assert!(snippets.properties[0].snippet.ends_with("payments.PRE_AUTH=Paiements Préautorisé"));
        assert_eq!(
            snippets.endpoints[0].snippet,
            "http://localhost:8080/api/translations?key=PRE_AUTH&code=fr"
        );

        assert_eq!(snippets.render(SnippetFormat::Angular).len(), 3);
        assert_eq!(snippets.render(SnippetFormat::Endpoint), vec![snippets.endpoints[0].snippet.clone()]);
    }

    #[test]
    fn test_parse_format() {
        assert_eq!(SnippetFormat::parse("xlf"), Some(SnippetFormat::Xliff));
        assert_eq!(SnippetFormat::parse("json"), None);
    }
}
