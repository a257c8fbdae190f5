/// Feed URL helpers
pub mod url {
    use url::Url;

    /// Extract domain from URL
    pub fn extract_domain(url_str: &str) -> Option<String> {
        Url::parse(url_str)
            .ok()
            .and_then(|url| url.domain().map(|d| d.trim_start_matches("www.").to_string()))
    }

    /// Only http(s) URLs are fetchable
    pub fn is_valid_feed_url(url_str: &str) -> bool {
        match Url::parse(url_str) {
            Ok(url) => url.scheme() == "http" || url.scheme() == "https",
            Err(_) => false,
        }
    }

    /// Human-readable name for a feed: its title, else its domain, else the URL.
    pub fn source_name(feed_title: Option<&str>, feed_url: &str) -> String {
        feed_title
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .or_else(|| extract_domain(feed_url))
            .unwrap_or_else(|| feed_url.to_string())
    }
}

/// Text cleanup for feed content
pub mod text {
    /// Strip markup and collapse whitespace.
    pub fn extract_text_from_html(html: &str) -> String {
        let stripped = html
            .chars()
            .fold((String::new(), false), |(mut text, in_tag), c| match c {
                '<' => (text, true),
                '>' => {
                    // keep words on either side of a tag apart
                    text.push(' ');
                    (text, false)
                }
                _ if !in_tag => {
                    text.push(c);
                    (text, in_tag)
                }
                _ => (text, in_tag),
            })
            .0;

        decode_entities(&stripped)
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn decode_entities(text: &str) -> String {
        text.replace("&nbsp;", " ")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&quot;", "\"")
            .replace("&#39;", "'")
            .replace("&#8217;", "'")
            .replace("&amp;", "&")
    }

    /// Cut `text` to at most `max_chars` characters, breaking at a space when
    /// possible and marking the cut with "...".
    pub fn truncate(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }

        let cut: String = text.chars().take(max_chars).collect();
        match cut.rfind(' ') {
            Some(last_space) if last_space > 0 => format!("{}...", &cut[..last_space]),
            _ => format!("{}...", cut),
        }
    }
}
