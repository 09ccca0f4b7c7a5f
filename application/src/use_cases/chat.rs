//! Chat use case.
//!
//! Answers one question inside a logged-in [`Session`]:
//! 1. Record the user turn locally
//! 2. Submit it through the [`AssistantSessionDriver`]
//! 3. Strip citation markers from the reply
//! 4. Record the assistant turn and append the exchange to the
//!    [`ConversationLog`]
//!
//! A failed submission keeps the user turn in the history so the user can
//! see what was asked and retry.

use crate::ports::conversation_log::{ConversationLog, LogRecord, NoConversationLog};
use crate::ports::progress::TurnProgressNotifier;
use crate::use_cases::submit_turn::{AssistantSessionDriver, SubmitError};
use nova_domain::util::preview;
use nova_domain::{DomainError, Session, Turn, sanitize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while answering a question.
#[derive(Error, Debug)]
pub enum ChatError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Use case for one question/answer exchange.
pub struct ChatUseCase {
    driver: AssistantSessionDriver,
    conversation_log: Arc<dyn ConversationLog>,
}

impl ChatUseCase {
    pub fn new(driver: AssistantSessionDriver) -> Self {
        Self {
            driver,
            conversation_log: Arc::new(NoConversationLog),
        }
    }

    /// Create with a conversation log.
    pub fn with_conversation_log(mut self, log: Arc<dyn ConversationLog>) -> Self {
        self.conversation_log = log;
        self
    }

    /// Ask `question` and return the cleaned assistant turn.
    pub async fn ask(
        &self,
        session: &mut Session,
        question: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<Turn, ChatError> {
        let user_name = session
            .user()
            .map(|u| u.name().to_string())
            .ok_or(DomainError::NotAuthenticated)?;

        let question = question.trim();
        if question.is_empty() {
            return Err(DomainError::EmptyMessage.into());
        }

        info!("{} asks: {}", user_name, preview(question, 100));
        session.push_turn(Turn::user(question))?;

        let raw = match self
            .driver
            .submit(session.thread_slot(), question, progress)
            .await
        {
            Ok(turn) => turn,
            Err(e) => {
                warn!("Turn for {} failed: {}", user_name, e);
                return Err(e.into());
            }
        };

        let answer = Turn::assistant(sanitize(raw.text()));
        session.push_turn(answer.clone())?;

        self.conversation_log
            .append(&LogRecord::new(user_name, question, answer.text()));

        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PollingParams;
    use crate::ports::assistant_backend::{AssistantBackend, BackendError};
    use crate::ports::progress::NoProgress;
    use async_trait::async_trait;
    use nova_domain::{Email, Role, Run, RunId, RunStatus, ThreadId, ThreadMessage, UserIdentity};
    use std::sync::Mutex;
    use std::time::Duration;

    // ==================== Test Mocks ====================

    struct ScriptedBackend {
        final_status: RunStatus,
        reply: String,
    }

    #[async_trait]
    impl AssistantBackend for ScriptedBackend {
        async fn create_thread(&self) -> Result<ThreadId, BackendError> {
            Ok(ThreadId::new("thread_chat"))
        }

        async fn create_message(
            &self,
            _thread: &ThreadId,
            _role: Role,
            _text: &str,
        ) -> Result<(), BackendError> {
            Ok(())
        }

        async fn create_run(
            &self,
            _thread: &ThreadId,
            _assistant_id: &str,
        ) -> Result<Run, BackendError> {
            Ok(Run::new(RunId::new("run_chat"), RunStatus::Queued))
        }

        async fn get_run(&self, _thread: &ThreadId, run: &RunId) -> Result<Run, BackendError> {
            Ok(Run::new(run.clone(), self.final_status))
        }

        async fn list_messages(
            &self,
            _thread: &ThreadId,
        ) -> Result<Vec<ThreadMessage>, BackendError> {
            Ok(vec![ThreadMessage {
                id: "msg_reply".to_string(),
                role: Role::Assistant,
                text: Some(self.reply.clone()),
            }])
        }
    }

    #[derive(Default)]
    struct RecordingLog {
        records: Mutex<Vec<LogRecord>>,
    }

    impl ConversationLog for RecordingLog {
        fn append(&self, record: &LogRecord) {
            self.records.lock().unwrap().push(record.clone());
        }
    }

    fn use_case(final_status: RunStatus, log: Arc<RecordingLog>) -> ChatUseCase {
        let backend = Arc::new(ScriptedBackend {
            final_status,
            reply: "Il corso inizia lunedì【3:0†calendario.pdf】.".to_string(),
        });
        let driver = AssistantSessionDriver::new(backend, "asst_chat").with_polling(
            PollingParams::default()
                .with_interval(Duration::ZERO)
                .with_max_attempts(3),
        );
        ChatUseCase::new(driver).with_conversation_log(log)
    }

    fn session() -> Session {
        Session::login(UserIdentity::new(
            "Marco",
            Email::parse("marco@nova.edu").unwrap(),
        ))
    }

    // ==================== Tests ====================

    #[tokio::test]
    async fn ask_sanitizes_records_and_logs() {
        let log = Arc::new(RecordingLog::default());
        let use_case = use_case(RunStatus::Completed, log.clone());
        let mut session = session();

        let answer = use_case
            .ask(&mut session, "  Quando inizia il corso? ", &NoProgress)
            .await
            .unwrap();

        assert_eq!(answer.text(), "Il corso inizia lunedì.");
        assert_eq!(
            session.turns(),
            &[
                Turn::user("Quando inizia il corso?"),
                Turn::assistant("Il corso inizia lunedì.")
            ]
        );
        assert_eq!(session.thread_id(), Some(&ThreadId::new("thread_chat")));

        let records = log.records.lock().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].user, "Marco");
        assert_eq!(records[0].question, "Quando inizia il corso?");
        assert_eq!(records[0].answer, "Il corso inizia lunedì.");
    }

    #[tokio::test]
    async fn failed_turn_keeps_history_and_skips_log() {
        let log = Arc::new(RecordingLog::default());
        let use_case = use_case(RunStatus::Failed, log.clone());
        let mut session = session();

        let err = use_case
            .ask(&mut session, "Hello?", &NoProgress)
            .await
            .unwrap_err();

        assert!(matches!(err, ChatError::Submit(SubmitError::BackendFailed(_))));
        assert_eq!(session.turns(), &[Turn::user("Hello?")]);
        assert!(session.is_authenticated());
        assert!(log.records.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn timeout_aborts_only_the_current_turn() {
        let log = Arc::new(RecordingLog::default());
        let use_case = use_case(RunStatus::InProgress, log);
        let mut session = session();

        let err = use_case.ask(&mut session, "one", &NoProgress).await.unwrap_err();
        assert!(matches!(err, ChatError::Submit(ref e) if e.is_timeout()));

        let err = use_case.ask(&mut session, "two", &NoProgress).await.unwrap_err();
        assert!(matches!(err, ChatError::Submit(_)));
        assert_eq!(session.turns().len(), 2);
    }

    #[tokio::test]
    async fn ask_requires_login() {
        let use_case = use_case(RunStatus::Completed, Arc::new(RecordingLog::default()));
        let mut session = Session::default();

        let err = use_case.ask(&mut session, "hi", &NoProgress).await.unwrap_err();

        assert!(matches!(err, ChatError::Domain(DomainError::NotAuthenticated)));
        assert!(session.thread_id().is_none());
    }

    #[tokio::test]
    async fn blank_question_is_rejected_without_backend_call() {
        let use_case = use_case(RunStatus::Completed, Arc::new(RecordingLog::default()));
        let mut session = session();

        let err = use_case.ask(&mut session, "  \n ", &NoProgress).await.unwrap_err();

        assert!(matches!(err, ChatError::Domain(DomainError::EmptyMessage)));
        assert!(session.turns().is_empty());
        assert!(session.thread_id().is_none());
    }
}
