//! Client tests against a minimal local HTTP server.

use quiz_autosave::{AutoSaveConfig, AutoSaver, FinalizeError, SaveFailure};
use quiz_client::{AnswerEndpoint, ClientConfig, ClientError, QuizApiClient};
use quiz_model::{Choice, Question, QuestionKind};
use serde_json::{Value, json};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::mpsc;

/// A request as seen by the server. Header names are lowercased.
struct Captured {
    head: String,
    body: String,
}

impl Captured {
    fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// Serve one canned response per connection, in order.
async fn serve(responses: Vec<(u16, &'static str)>) -> (String, mpsc::UnboundedReceiver<Captured>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = mpsc::unbounded_channel();

    tokio::spawn(async move {
        for (status, body) in responses {
            let (mut socket, _) = listener.accept().await.unwrap();
            let captured = read_request(&mut socket).await;
            let _ = tx.send(captured);

            let response = format!(
                "HTTP/1.1 {status} Status\r\nContent-Type: application/json\r\n\
                 Content-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        }
    });

    (format!("http://{addr}"), rx)
}

async fn read_request(socket: &mut TcpStream) -> Captured {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    let head_end = loop {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before headers were complete");
        buf.extend_from_slice(&chunk[..n]);
        if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
            break pos;
        }
    };

    let head = String::from_utf8_lossy(&buf[..head_end]).to_lowercase();
    let content_length = head
        .lines()
        .find_map(|line| line.strip_prefix("content-length:"))
        .map_or(0, |v| v.trim().parse::<usize>().unwrap());

    let body_start = head_end + 4;
    while buf.len() < body_start + content_length {
        let n = socket.read(&mut chunk).await.unwrap();
        assert!(n > 0, "connection closed before body was complete");
        buf.extend_from_slice(&chunk[..n]);
    }

    Captured {
        head,
        body: String::from_utf8_lossy(&buf[body_start..body_start + content_length]).to_string(),
    }
}

fn client(base_url: &str) -> QuizApiClient {
    let config = ClientConfig::new(base_url)
        .with_csrf_token(Some("tok123".to_string()))
        .with_session_cookie(Some("sess456".to_string()));
    QuizApiClient::new(config).unwrap()
}

fn text_question(answer: &str) -> Question {
    Question {
        id: 2,
        text: "Solve".to_string(),
        kind: QuestionKind::TextAnswer,
        choices: vec![Choice {
            id: 201,
            chosen: false,
            text: None,
            user_answer: Some(answer.to_string()),
        }],
    }
}

#[tokio::test]
async fn save_answer_posts_json_with_credentials() {
    let (base, mut requests) = serve(vec![(200, "{}")]).await;
    let client = client(&base);

    let request = text_question("42").answer_request();
    client.save_answer("/quiz/save/", &request).await.unwrap();

    let captured = requests.recv().await.unwrap();
    assert!(captured.head.starts_with("post /quiz/save/ http/1.1"));
    assert!(captured.head.contains("x-csrftoken: tok123"));
    assert!(captured.head.contains("cookie: csrftoken=tok123; sessionid=sess456"));
    assert!(captured.head.contains("content-type: application/json"));
    assert_eq!(
        captured.json(),
        json!({"answers": [{"id": 201, "chosen": false, "userAnswer": "42"}]})
    );
}

#[tokio::test]
async fn error_status_keeps_server_message() {
    let (base, _requests) = serve(vec![(410, r#"{"message": "Quiz is finished"}"#)]).await;
    let client = client(&base);

    let err = client
        .save_answer("/quiz/save/", &text_question("1").answer_request())
        .await
        .unwrap_err();

    match err {
        ClientError::Status { status, body } => {
            assert_eq!(status, 410);
            assert_eq!(body["message"], "Quiz is finished");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_network_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .finish_quiz("/finish/")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Network(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn autosaver_finalize_reaches_the_server() {
    let (base, mut requests) = serve(vec![(200, "{}")]).await;
    let endpoint = AnswerEndpoint::new(client(&base), "/quiz/save/");
    let saver = AutoSaver::spawn(AutoSaveConfig::default(), endpoint, |_: &SaveFailure| {});

    saver.notify_edit(text_question("first"));
    saver.notify_edit(text_question("second"));
    saver.finalize().await.unwrap();

    let captured = requests.recv().await.unwrap();
    assert_eq!(captured.json()["answers"][0]["userAnswer"], "second");
    assert!(requests.try_recv().is_err());
}

#[tokio::test]
async fn autosaver_finalize_reports_gone_quiz() {
    let (base, _requests) = serve(vec![(410, r#"{"message": "Quiz is over"}"#)]).await;
    let endpoint = AnswerEndpoint::new(client(&base), "/quiz/save/");
    let saver = AutoSaver::spawn(AutoSaveConfig::default(), endpoint, |_: &SaveFailure| {});

    saver.notify_edit(text_question("late"));
    let err = saver.finalize().await.unwrap_err();

    let FinalizeError::Failed(failure) = err else {
        panic!("saver stopped unexpectedly");
    };
    assert!(failure.explicit());
    assert_eq!(failure.error.status, Some(410));
    assert_eq!(failure.error.server_message(), Some("Quiz is over"));
}
