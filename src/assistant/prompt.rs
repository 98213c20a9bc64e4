//! Prompt text for the book features.
//!
//! Prompts use the `[INST] ... [/INST]` instruction format and end with a
//! cue line the model continues from.

use super::types::Book;

/// Longest excerpt, in characters, that goes into a summary prompt.
pub const MAX_EXCERPT_CHARS: usize = 1500;

/// Shortest cleaned excerpt worth summarizing.
pub const MIN_EXCERPT_CHARS: usize = 50;

/// Strip markup from chapter HTML and cap its length.
///
/// Tags are removed without inserting spaces, whitespace runs collapse to one
/// space, and the result is cut at [`MAX_EXCERPT_CHARS`] characters.
pub fn clean_excerpt(html: &str) -> String {
    let stripped = strip_tags(html);
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(MAX_EXCERPT_CHARS).collect()
}

fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;
    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        match rest[open..].find('>') {
            Some(close) => rest = &rest[open + close + 1..],
            // unterminated tag: keep the '<' as text
            None => {
                out.push('<');
                rest = &rest[open + 1..];
            }
        }
    }
    out.push_str(rest);
    out
}

pub fn summary_prompt(book: &Book, excerpt: &str) -> String {
    format!(
        "[INST] You are a helpful book assistant. Provide a clear, concise summary.\n\
         \n\
         Book: \"{title}\" by {author}\n\
         \n\
         Excerpt from the book:\n\
         {excerpt}\n\
         \n\
         Please write a 3-paragraph summary of this excerpt. [/INST]\n\
         \n\
         Summary:",
        title = book.title,
        author = book.author,
    )
}

/// The prompt ends with `1.` so the model starts on the first question.
pub fn questions_prompt(book: &Book) -> String {
    let description = book
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(|d| format!("Book description: {d}"))
        .unwrap_or_default();

    format!(
        "[INST] Generate 5 thought-provoking discussion questions for the book \"{title}\" by {author}.\n\
         \n\
         {description}\n\
         \n\
         Format your response as a numbered list:\n\
         1. [Question]\n\
         2. [Question]\n\
         3. [Question]\n\
         4. [Question]\n\
         5. [Question] [/INST]\n\
         \n\
         Discussion Questions:\n\
         1.",
        title = book.title,
        author = book.author,
    )
}
