//! Quiz page JSON in, save-answer JSON out.

use proptest::prelude::*;
use quiz_model::{ModelError, QuestionKind, QuizData, step_index};

const QUIZ_JSON: &str = r#"{
    "id": 77,
    "name": "Midterm",
    "timeLeft": 1795,
    "questions": [
        {
            "id": 1,
            "text": "<p>2 + 2 = ?</p>",
            "type": 0,
            "choices": [
                {"id": 101, "chosen": false, "text": "3"},
                {"id": 102, "chosen": false, "text": "4"},
                {"id": 103, "chosen": false, "text": "5"}
            ]
        },
        {
            "id": 2,
            "text": "<p>Solve for x</p>",
            "type": 2,
            "choices": [
                {"id": 201, "chosen": false, "userAnswer": null}
            ]
        },
        {
            "id": 3,
            "text": "<p>Primes</p>",
            "type": 1,
            "choices": [
                {"id": 301, "chosen": true, "text": "2"},
                {"id": 302, "chosen": false, "text": "9"}
            ]
        }
    ]
}"#;

fn quiz() -> QuizData {
    QuizData::from_json(QUIZ_JSON).unwrap()
}

#[test]
fn parses_quiz_page_data() {
    let quiz = quiz();
    assert_eq!(quiz.id, 77);
    assert_eq!(quiz.time_left, 1795);
    assert_eq!(quiz.questions.len(), 3);
    assert_eq!(quiz.questions[1].kind, QuestionKind::TextAnswer);
    assert_eq!(quiz.questions[1].text_answer(), None);
    assert_eq!(quiz.answered_count(), 1);
    assert!(!quiz.is_answered());
}

#[test]
fn choice_question_request() {
    let mut quiz = quiz();
    let question = quiz.question_mut(0).unwrap();
    question.set_radio_choice(1).unwrap();

    insta::assert_json_snapshot!("choice_question_request", question.answer_request());
}

#[test]
fn text_question_request() {
    let mut quiz = quiz();
    let question = quiz.question_mut(1).unwrap();
    question.set_text_answer("x = 42").unwrap();

    insta::assert_json_snapshot!("text_question_request", question.answer_request());
}

#[test]
fn rejects_unknown_question_type() {
    let json = QUIZ_JSON.replace(r#""type": 1"#, r#""type": 7"#);
    assert!(matches!(
        QuizData::from_json(&json),
        Err(ModelError::Parse(_))
    ));
}

#[test]
fn rejects_empty_quiz() {
    let json = r#"{"id": 5, "name": "Empty", "timeLeft": 10, "questions": []}"#;
    assert!(matches!(
        QuizData::from_json(json),
        Err(ModelError::NoQuestions { quiz_id: 5 })
    ));
}

#[test]
fn rejects_text_question_without_slot() {
    let json = r#"{"id": 5, "timeLeft": 10, "questions": [
        {"id": 9, "text": "?", "type": 2, "choices": []}
    ]}"#;
    assert!(matches!(
        QuizData::from_json(json),
        Err(ModelError::NoChoices { question_id: 9 })
    ));
}

#[test]
fn open_answer_question_loads_as_choice_question() {
    let json = r#"{"id": 5, "timeLeft": 10, "questions": [
        {"id": 2, "text": "Which apply?", "type": 3, "choices": []},
        {"id": 3, "text": "And these?", "type": 3, "choices": [
            {"id": 31, "chosen": false, "text": "yes"}
        ]}
    ]}"#;
    let mut quiz = QuizData::from_json(json).unwrap();
    assert_eq!(quiz.questions[0].kind, QuestionKind::OpenAnswer);
    assert!(!quiz.questions[0].is_answered());

    quiz.question_mut(1).unwrap().toggle_choice(0).unwrap();
    assert!(quiz.questions[1].is_answered());
    assert_eq!(quiz.answered_count(), 1);
}

proptest! {
    #[test]
    fn step_index_stays_in_bounds(current in 0usize..50, len in 1usize..50, dir in -3isize..=3) {
        let current = current % len;
        let next = step_index(current, len, dir).unwrap();
        prop_assert!(next < len);
        prop_assert_eq!(step_index(next, len, -dir), Some(current));
    }
}
