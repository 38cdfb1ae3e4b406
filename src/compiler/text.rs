//! Conversion of the authoring tool's embedded markup into plain prose.

/// Strips the tool's markup from a variant text, preserving line breaks.
///
/// `<br>` and closing block tags become newlines, all other tags are
/// removed, and the common character entities are decoded. The tool emits
/// only this small markup subset, so a full HTML parser is not warranted.
pub fn strip_markup(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        match c {
            '<' => {
                let rest = &input[i..];
                let Some(end) = rest.find('>') else {
                    // Unterminated tag: emit verbatim.
                    out.push(c);
                    continue;
                };
                let tag = rest[1..end].trim().to_ascii_lowercase();
                if tag == "br" || tag == "br/" || tag == "br /" || tag == "/p" || tag == "/div" {
                    out.push('\n');
                }
                // Skip to the closing '>'.
                while let Some((j, _)) = chars.peek().copied() {
                    chars.next();
                    if j == i + end {
                        break;
                    }
                }
            }
            '&' => {
                let rest = &input[i..];
                let (replacement, len) = decode_entity(rest);
                match replacement {
                    Some(decoded) => {
                        out.push_str(decoded);
                        for _ in 0..len - 1 {
                            chars.next();
                        }
                    }
                    None => out.push('&'),
                }
            }
            _ => out.push(c),
        }
    }

    // Collapse the trailing whitespace that closing tags leave behind.
    out.trim_end().to_string()
}

/// Decodes a leading character entity, returning the replacement and the
/// entity's byte length in the source.
fn decode_entity(rest: &str) -> (Option<&'static str>, usize) {
    const ENTITIES: &[(&str, &str)] = &[
        ("&nbsp;", " "),
        ("&amp;", "&"),
        ("&lt;", "<"),
        ("&gt;", ">"),
        ("&quot;", "\""),
        ("&#39;", "'"),
    ];
    for (entity, replacement) in ENTITIES {
        if rest.starts_with(entity) {
            return (Some(replacement), entity.len());
        }
    }
    (None, 1)
}

#[cfg(test)]
mod tests {
    use super::strip_markup;

    #[test]
    fn strips_tags_and_keeps_breaks() {
        assert_eq!(
            strip_markup("<p>Hello<br>world</p>"),
            "Hello\nworld"
        );
    }

    #[test]
    fn decodes_entities() {
        assert_eq!(strip_markup("a &amp; b&nbsp;c"), "a & b c");
        assert_eq!(strip_markup("1 &lt; 2 &gt; 0"), "1 < 2 > 0");
    }

    #[test]
    fn leaves_plain_text_alone() {
        assert_eq!(strip_markup("no markup here"), "no markup here");
    }

    #[test]
    fn unterminated_tag_is_verbatim() {
        assert_eq!(strip_markup("a < b"), "a < b");
    }

    #[test]
    fn styling_tags_are_dropped() {
        assert_eq!(strip_markup("<b>bold</b> and <i>italic</i>"), "bold and italic");
    }
}
