//! Splits extracted document text into overlapping passages.

/// Splits text into passages of at most `chunk_size` characters, cutting on
/// whitespace. Consecutive passages share up to `overlap` characters of
/// trailing words. A single word longer than `chunk_size` becomes its own
/// passage.
pub fn chunk_text(text: &str, chunk_size: usize, overlap: usize) -> Vec<String> {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Vec::new();
    }
    let chunk_size = chunk_size.max(1);
    let overlap = overlap.min(chunk_size.saturating_sub(1));

    let mut chunks = Vec::new();
    let mut start = 0;
    while start < words.len() {
        let mut end = start;
        let mut len = 0;
        while end < words.len() {
            let added = words[end].chars().count() + usize::from(end > start);
            if end > start && len + added > chunk_size {
                break;
            }
            len += added;
            end += 1;
        }
        chunks.push(words[start..end].join(" "));

        if end == words.len() {
            break;
        }

        // Walk back from `end` while the carried-over words fit in `overlap`,
        // always advancing at least one word.
        let mut next = end;
        let mut carried = 0;
        while next > start + 1 {
            let candidate = words[next - 1].chars().count() + 1;
            if carried + candidate > overlap {
                break;
            }
            carried += candidate;
            next -= 1;
        }
        start = next;
    }
    chunks
}
