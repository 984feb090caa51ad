//! Markdown rendering of an [`ExportDocument`].

use std::fmt::Write;

use crate::export::{ExportDocument, SectionBody};

/// Default output file for the Markdown export.
pub const DEFAULT_EXPORT_FILE: &str = "azure-architecture-recommendation.md";

pub fn render_markdown(doc: &ExportDocument) -> String {
    let mut out = format!("# {}\n", doc.title);
    for section in &doc.sections {
        out.push_str(&format!("\n## {}\n\n", section.heading));
        render_body(&mut out, &section.body);
    }
    out
}

fn render_body(out: &mut String, body: &SectionBody) {
    // Writing to a String cannot fail.
    match body {
        SectionBody::Text(text) => {
            let _ = writeln!(out, "{text}");
        }
        SectionBody::Diagram(source) => {
            let fence = fence_for(source);
            let _ = writeln!(out, "{fence}mermaid\n{source}\n{fence}");
        }
        SectionBody::Fields(rows) => {
            out.push_str("| Component | Details |\n| --- | --- |\n");
            for (label, value) in rows {
                let _ = writeln!(out, "| **{label}** | {} |", table_cell(value));
            }
        }
        SectionBody::Prices(rows) => {
            for (service, detail) in rows {
                let _ = writeln!(out, "- **{service}**: {detail}");
            }
        }
        SectionBody::Estimate {
            monthly_range,
            breakdown,
        } => {
            let _ = writeln!(out, "**{monthly_range}**");
            if !breakdown.is_empty() {
                out.push('\n');
                for item in breakdown {
                    let _ = writeln!(out, "- {item}");
                }
            }
        }
        SectionBody::Numbered(items) => {
            for (i, item) in items.iter().enumerate() {
                let _ = writeln!(out, "{}. {item}", i + 1);
            }
        }
        SectionBody::Bullets(items) => {
            for item in items {
                let _ = writeln!(out, "- {item}");
            }
        }
        SectionBody::Code { pages } => {
            let total = pages.len();
            for (i, page) in pages.iter().enumerate() {
                if i > 0 {
                    out.push('\n');
                }
                if total > 1 {
                    let _ = writeln!(out, "_Page {} of {total}_\n", i + 1);
                }
                let listing = page.join("\n");
                let fence = fence_for(&listing);
                let _ = writeln!(out, "{fence}hcl\n{listing}\n{fence}");
            }
        }
    }
}

/// A backtick fence longer than any backtick run in `content`.
fn fence_for(content: &str) -> String {
    let longest = content
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

fn table_cell(value: &str) -> String {
    value.replace('|', "\\|").replace(['\r', '\n'], " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{Section, compose_export};
    use crate::view::render_view;
    use crate::view::tests::snapshot;
    use pretty_assertions::assert_eq;

    #[test]
    fn renders_minimal_document() {
        let doc = compose_export(&render_view(&snapshot()));
        let expected = "\
# Azure Architecture Recommendation

## Executive Summary

Static site with an API backend.

## Architecture Components

| Component | Details |
| --- | --- |
| **Core Services** | Azure App Service, Azure CDN |
| **Compute** | App Service S1 |
| **Storage** | Blob storage for assets |
| **Networking** | CDN in front of the app |
| **Security** | TLS everywhere |

## Cost Estimate

**$80 - $120 USD**

- App Service S1: $70
- CDN: $10

## Deployment Checklist

1. Create the app
2. Attach the CDN

## Key Considerations

- Purge the CDN on deploy
";
        assert_eq!(render_markdown(&doc), expected);
    }

    #[test]
    fn multi_page_code_is_labelled() {
        let doc = ExportDocument {
            title: "T",
            sections: vec![Section {
                heading: "Code",
                body: SectionBody::Code {
                    pages: vec![vec!["a".to_string()], vec!["b".to_string()]],
                },
            }],
        };
        let expected = "\
# T

## Code

_Page 1 of 2_

```hcl
a
```

_Page 2 of 2_

```hcl
b
```
";
        assert_eq!(render_markdown(&doc), expected);
    }

    #[test]
    fn fences_outgrow_embedded_backticks() {
        assert_eq!(fence_for("plain"), "```");
        assert_eq!(fence_for("has ``` inside"), "````");
    }

    #[test]
    fn table_cells_escape_pipes() {
        assert_eq!(table_cell("a | b\nc"), "a \\| b c");
    }
}
