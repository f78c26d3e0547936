use quire_gateway::Document;

/// Presentation hand-off for the embedded (`format=swish`) view.
pub trait Renderer: Send + Sync {
    /// Produce an HTML page for `doc`.
    fn render(&self, doc: &Document) -> String;
}

/// Minimal page embedding the escaped source and its metadata.
#[derive(Clone, Copy, Debug, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn render(&self, doc: &Document) -> String {
        let version = &doc.version;
        let title = version.meta().title.as_deref().unwrap_or(version.name());
        let meta = serde_json::to_string(version.meta()).unwrap_or_else(|_| "{}".into());
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{title}</title>\n</head>\n<body>\n\
             <pre class=\"source\" data-file=\"{file}\" data-id=\"{id}\" data-commit=\"{commit}\" data-meta=\"{meta}\">{source}</pre>\n\
             </body>\n</html>\n",
            title = escape(title),
            file = escape(version.name()),
            id = escape(&doc.id.id()),
            commit = version.commit.commit,
            meta = escape(&meta),
            source = escape(&String::from_utf8_lossy(&version.content)),
        )
    }
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_gateway::Resolved;
    use quire_store::{Commit, CommitRecord, Version};
    use quire_types::Metadata;

    fn doc(content: &[u8], meta: Metadata) -> Document {
        let commit = Commit::seal(CommitRecord::new(None, "test.pl", content, &meta)).unwrap();
        Document {
            id: Resolved::File("test.pl".into()),
            version: Version { commit, content: content.to_vec() },
        }
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(escape("<a href=\"x\">&'"), "&lt;a href=&quot;x&quot;&gt;&amp;&#39;");
    }

    #[test]
    fn page_embeds_escaped_source() {
        let page = HtmlRenderer.render(&doc(b"a :- b, </pre>.", Metadata::new()));
        assert!(page.contains("a :- b, &lt;/pre&gt;."));
        assert!(page.contains("<title>test.pl</title>"));
        assert!(page.contains("data-file=\"test.pl\""));
    }

    #[test]
    fn title_comes_from_metadata() {
        let meta = Metadata { title: Some("Queens".into()), ..Metadata::default() };
        let page = HtmlRenderer.render(&doc(b"", meta));
        assert!(page.contains("<title>Queens</title>"));
        assert!(page.contains("&quot;title&quot;:&quot;Queens&quot;"));
    }
}
