//! Plain-text rendering of the mail list pane

use mail::EmailRecord;

/// Shown when the fetch produced no records
pub const EMPTY_MESSAGE: &str = "No emails found";

/// Shown in place of the reading pane
pub const PLACEHOLDER: &str = "Select an email to view its content";

/// Teaser lines kept per row
const TEASER_LINES: usize = 2;

/// Render the inbox list: one block per message, newest first as fetched
pub fn render_inbox(title: &str, records: &[EmailRecord], width: usize) -> String {
    let width = width.max(20);
    let rule = "─".repeat(width);
    let mut out = String::new();

    out.push_str(&format!("{}\n{}\n", title, rule));

    if records.is_empty() {
        out.push_str(&format!("{}\n", center(EMPTY_MESSAGE, width)));
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            out.push_str(&format!("{}\n", rule));
        }
        out.push_str(&header_line(record, width));
        out.push('\n');
        out.push_str(&truncate(&record.subject, width));
        out.push('\n');
        for line in wrap(&record.teaser, width, TEASER_LINES) {
            out.push_str(&line);
            out.push('\n');
        }
    }

    out.push_str(&format!("{}\n{}\n", rule, center(PLACEHOLDER, width)));
    out
}

/// Sender on the left, date flush right
fn header_line(record: &EmailRecord, width: usize) -> String {
    let date_len = record.date.chars().count();
    let name_room = width.saturating_sub(date_len + 1);
    let name = truncate(&record.name, name_room);
    let gap = width.saturating_sub(name.chars().count() + date_len).max(1);
    format!("{}{}{}", name, " ".repeat(gap), record.date)
}

fn center(text: &str, width: usize) -> String {
    let pad = width.saturating_sub(text.chars().count()) / 2;
    format!("{}{}", " ".repeat(pad), text)
}

/// Cut to `width` characters, marking the cut with an ellipsis
fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut cut: String = text.chars().take(width - 1).collect();
    cut.push('…');
    cut
}

/// Greedy word wrap, clamped to `max_lines`
fn wrap(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };

        if needed > width && !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let clamped = lines.len() > max_lines;
    lines.truncate(max_lines);
    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter_mut().enumerate() {
        if clamped && i == last {
            let mut marked = truncate(line, width.saturating_sub(1));
            if !marked.ends_with('…') {
                marked.push('…');
            }
            *line = marked;
        } else {
            *line = truncate(line, width);
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, subject: &str, date: &str, teaser: &str) -> EmailRecord {
        EmailRecord {
            id: "m1".to_string(),
            name: name.to_string(),
            email: "x@y.z".to_string(),
            subject: subject.to_string(),
            date: date.to_string(),
            teaser: teaser.to_string(),
        }
    }

    #[test]
    fn test_empty_inbox() {
        let out = render_inbox("Inbox", &[], 40);
        assert!(out.starts_with("Inbox\n"));
        assert!(out.contains(EMPTY_MESSAGE));
        assert!(out.contains(PLACEHOLDER));
    }

    #[test]
    fn test_header_line_right_aligns_date() {
        let line = header_line(&record("Jane Doe", "s", "Yesterday", ""), 30);
        assert_eq!(line.chars().count(), 30);
        assert!(line.starts_with("Jane Doe "));
        assert!(line.ends_with("Yesterday"));
    }

    #[test]
    fn test_long_name_is_truncated() {
        let line = header_line(&record(&"n".repeat(50), "s", "9:05 AM", ""), 30);
        assert!(line.ends_with(" 9:05 AM"));
        assert!(line.contains('…'));
    }

    #[test]
    fn test_wrap_clamps_to_two_lines() {
        let lines = wrap("one two three four five six seven eight nine ten", 10, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "one two");
        assert!(lines[1].ends_with('…'));
        assert!(lines.iter().all(|l| l.chars().count() <= 10));
    }

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap("hello world", 40, 2), vec!["hello world"]);
        assert!(wrap("", 40, 2).is_empty());
    }

    #[test]
    fn test_rows_in_order() {
        let records = vec![
            record("Alice", "First", "Yesterday", "a"),
            record("Bob", "Second", "3 days ago", "b"),
        ];
        let out = render_inbox("Inbox", &records, 40);
        let first = out.find("First").unwrap();
        let second = out.find("Second").unwrap();
        assert!(first < second);
        assert!(!out.contains(EMPTY_MESSAGE));
    }
}
