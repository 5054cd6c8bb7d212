/// Format tags as a string with brackets: [tag1] [tag2] [tag3]
pub fn format_tags_brackets(tags: &[String]) -> String {
    tags.iter()
        .map(|tag| format!("[{}]", tag))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Bracketed tags, or a placeholder when there are none
pub fn tags_or_placeholder(tags: &[String]) -> String {
    if tags.is_empty() {
        "[Untagged]".to_string()
    } else {
        format_tags_brackets(tags)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_each_tag() {
        let tags = vec!["work".to_string(), "q3".to_string()];
        assert_eq!(format_tags_brackets(&tags), "[work] [q3]");
        assert_eq!(tags_or_placeholder(&[]), "[Untagged]");
    }
}
