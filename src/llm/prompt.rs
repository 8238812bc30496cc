//! Prompt composition for the inference call.

/// Embed the rendered history and the current question into one prompt.
pub fn compose(author: &str, question: &str, history: &str) -> String {
    format!(
        "Recent conversation history:\n\
         {history}\n\
         \n\
         Current user {author} asks: {question}\n\
         \n\
         Please consider the conversation history above when answering. If there are any \
         file contents or analyses shown, you can reference and analyze them in your response."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_history_author_and_question() {
        let prompt = compose("alice", "what changed?", "[2024-05-04] bob: shipped v2");

        assert!(prompt.starts_with("Recent conversation history:\n[2024-05-04] bob: shipped v2"));
        assert!(prompt.contains("Current user alice asks: what changed?"));
        assert!(prompt.ends_with("in your response."));
    }
}
