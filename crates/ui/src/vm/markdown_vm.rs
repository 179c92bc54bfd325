use std::collections::{HashMap, HashSet};

/// Render markdown (inline HTML allowed) to sanitized HTML.
#[must_use]
pub fn markdown_to_html(input: &str) -> String {
    let mut options = pulldown_cmark::Options::empty();
    options.insert(pulldown_cmark::Options::ENABLE_STRIKETHROUGH);

    let parser = pulldown_cmark::Parser::new_ext(input, options);
    let mut html = String::new();
    pulldown_cmark::html::push_html(&mut html, parser);
    sanitize_html(&html)
}

#[must_use]
pub fn sanitize_html(html: &str) -> String {
    let tags: HashSet<&str> = [
        "p", "div", "span", "br", "em", "strong", "b", "i", "ul", "ol", "li", "a", "h2", "h3",
    ]
    .into_iter()
    .collect();

    let mut attributes: HashMap<&str, HashSet<&str>> = HashMap::new();
    attributes.insert("a", ["href"].into_iter().collect());

    ammonia::Builder::new()
        .tags(tags)
        .tag_attributes(attributes)
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::{markdown_to_html, sanitize_html};

    #[test]
    fn intro_html_passes_through_markdown() {
        let html = markdown_to_html("Ready? <br>Click <b>Start Quiz</b> to begin.");
        assert!(html.contains("<b>Start Quiz</b>"), "{html}");
        assert!(html.contains("<br>"), "{html}");
    }

    #[test]
    fn markdown_emphasis_becomes_html() {
        let html = markdown_to_html("You have **90 minutes**.");
        assert!(html.contains("<strong>90 minutes</strong>"), "{html}");
    }

    #[test]
    fn scripts_and_unsafe_links_are_removed() {
        let html = sanitize_html("<p onclick=\"x()\">Hi<script>alert(1)</script></p>");
        assert_eq!(html, "<p>Hi</p>");

        let html = markdown_to_html("[Link](javascript:alert(1))");
        assert!(html.contains("Link"));
        assert!(!html.contains("javascript:"));
    }
}
