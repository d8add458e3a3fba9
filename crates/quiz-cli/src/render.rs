//! Text rendering of questions, notices and quiz summaries.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use quiz_model::{ErrorNotice, LanguageTags, Question, QuizData};

/// Render one question with its choices or typed answer.
pub fn render_question(question: &Question, index: usize, total: usize, tags: &LanguageTags) -> String {
    let mut lines = vec![format!(
        "{} {} / {} ({})",
        tags.question,
        index + 1,
        total,
        question.kind.label()
    )];
    lines.push(plain_text(&question.text));

    if question.kind.takes_text() {
        let answer = question.text_answer().unwrap_or("");
        lines.push(format!("  > {answer}"));
    } else {
        for (i, choice) in question.choices.iter().enumerate() {
            let mark = match (question.kind.toggles(), choice.chosen) {
                (true, true) => "[x]",
                (true, false) => "[ ]",
                (false, true) => "(*)",
                (false, false) => "( )",
            };
            let text = choice.text.as_deref().map(plain_text).unwrap_or_default();
            lines.push(format!("  {}. {mark} {text}", i + 1));
        }
    }
    lines.join("\n")
}

/// One line per question, marking the chosen one.
pub fn render_list(quiz: &QuizData, chosen: usize) -> String {
    quiz.questions
        .iter()
        .enumerate()
        .map(|(i, q)| {
            let cursor = if i == chosen { '>' } else { ' ' };
            let state = if q.is_answered() { '*' } else { ' ' };
            format!("{cursor}{state} {:>2}. {}", i + 1, plain_text(&q.text))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render a save error notice.
pub fn render_notice(notice: &ErrorNotice) -> String {
    format!("{}: {}", notice.title, notice.message)
}

/// Summary table of a quiz's questions and answered state.
pub fn question_table(quiz: &QuizData) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("#"),
        header_cell("Id"),
        header_cell("Type"),
        header_cell("Question"),
        header_cell("Choices"),
        header_cell("Answered"),
    ]);
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);

    for (i, question) in quiz.questions.iter().enumerate() {
        let answered = if question.is_answered() {
            Cell::new("yes").fg(Color::Green)
        } else {
            Cell::new("no").fg(Color::DarkGrey)
        };
        table.add_row(vec![
            Cell::new(i + 1).set_alignment(CellAlignment::Right),
            Cell::new(question.id),
            Cell::new(question.kind.label()),
            Cell::new(plain_text(&question.text)),
            Cell::new(question.choices.len()).set_alignment(CellAlignment::Right),
            answered,
        ]);
    }
    table
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

/// Strip markup from question HTML and collapse whitespace.
pub fn plain_text(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;
    for c in html.chars() {
        match c {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }
    let text = text
        .replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text() {
        assert_eq!(plain_text("<p>2 + 2 = ?</p>"), "2 + 2 = ?");
        assert_eq!(plain_text("a<br>b"), "a b");
        assert_eq!(plain_text("<b>x</b> &lt; 3 &amp;&amp; y"), "x < 3 && y");
        assert_eq!(plain_text("plain"), "plain");
    }

    #[test]
    fn test_notice_for_gone_quiz() {
        let tags = LanguageTags::default();
        let notice = ErrorNotice::classify(Some(410), Some("Quiz is finished"), false, &tags);
        assert_eq!(
            render_notice(&notice),
            "Quiz is over: Quiz is finished"
        );
    }
}
