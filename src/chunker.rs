//! Split long replies into delivery-sized chunks at sentence boundaries.

/// Split `text` into ordered chunks of at most `limit` bytes each.
///
/// Text that already fits is returned unchanged as a single chunk. Longer
/// text is split into sentence units on the period character and units are
/// greedily packed, joined by single spaces, while the running length stays
/// within the limit. A single sentence longer than `limit` is emitted as
/// its own oversized chunk rather than split mid-sentence.
pub fn chunk_reply(text: &str, limit: usize) -> Vec<String> {
    if text.len() <= limit {
        return vec![text.to_string()];
    }

    let sentences = text.split('.').filter_map(|part| {
        let trimmed = part.trim();
        (!trimmed.is_empty()).then(|| format!("{trimmed}."))
    });

    let mut chunks = Vec::new();
    let mut current: Vec<String> = Vec::new();
    let mut current_len = 0;

    for sentence in sentences {
        if !current.is_empty() && current_len + sentence.len() > limit {
            chunks.push(current.join(" "));
            current_len = sentence.len();
            current = vec![sentence];
        } else {
            current_len += sentence.len() + 1;
            current.push(sentence);
        }
    }

    if !current.is_empty() {
        chunks.push(current.join(" "));
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMIT: usize = 1900;

    #[test]
    fn short_text_passes_through_unchanged() {
        let text = "Short answer. No chunking needed, even with punctuation!";
        assert_eq!(chunk_reply(text, LIMIT), vec![text.to_string()]);
    }

    #[test]
    fn text_exactly_at_limit_is_one_chunk() {
        let text = "a".repeat(LIMIT);
        assert_eq!(chunk_reply(&text, LIMIT), vec![text]);
    }

    #[test]
    fn long_text_splits_at_sentence_boundaries() {
        let sentence = format!("{}.", "word ".repeat(80).trim());
        let text = sentence.repeat(8);
        let chunks = chunk_reply(&text, LIMIT);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.len() <= LIMIT, "chunk overflows: {}", chunk.len());
            assert!(chunk.ends_with('.'), "chunk split mid-sentence: {chunk:?}");
        }
    }

    #[test]
    fn joined_chunks_reproduce_the_text_up_to_whitespace() {
        let text = "First sentence here. Second sentence follows. Third one too. "
            .repeat(40);
        let chunks = chunk_reply(&text, 200);

        let normalize = |s: &str| s.split_whitespace().collect::<Vec<_>>().join(" ");
        assert_eq!(normalize(&chunks.join(" ")), normalize(&text));
    }

    #[test]
    fn oversized_single_sentence_becomes_its_own_chunk() {
        let giant = format!("{}.", "x".repeat(3000));
        let text = format!("Small lead-in. {giant} Small tail.");
        let chunks = chunk_reply(&text, 100);

        let oversized: Vec<_> = chunks.iter().filter(|c| c.len() > 100).collect();
        assert_eq!(oversized.len(), 1);
        assert!(oversized[0].starts_with("xxx") || oversized[0].ends_with("x."));
        assert!(!chunks.iter().any(|c| c.is_empty()));
    }

    #[test]
    fn no_empty_chunks_emitted() {
        let text = format!("{}. trailing bit", "y".repeat(500));
        for chunk in chunk_reply(&text, 100) {
            assert!(!chunk.is_empty());
        }
    }
}
