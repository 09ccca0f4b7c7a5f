//! REPL (Read-Eval-Print Loop) for the student chat shell

use crate::ConsoleFormatter;
use crate::ReplConfig;
use crate::SpinnerProgress;
use crate::output::console::USER_AVATAR;
use nova_application::{
    ChatError, ChatUseCase, IdentityLookupUseCase, NoProgress, TurnProgressNotifier,
};
use nova_domain::Session;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use tracing::warn;

const EMAIL_NOT_FOUND: &str = "Email not found.";
const ANSWER_FAILED: &str = "Error while generating the answer.";
const INTERRUPTED: &str = "Interrupted, closing the chat.";

/// Slash commands understood by the chat shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Logout,
    History,
    WhoAmI,
    Help,
    Quit,
    Unknown(String),
}

impl ShellCommand {
    /// Parse a line; `None` when the line is not a command.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if !line.starts_with('/') {
            return None;
        }
        let command = match line {
            "/logout" => ShellCommand::Logout,
            "/history" => ShellCommand::History,
            "/whoami" => ShellCommand::WhoAmI,
            "/help" | "/h" | "/?" => ShellCommand::Help,
            "/quit" | "/exit" | "/q" => ShellCommand::Quit,
            other => ShellCommand::Unknown(other.to_string()),
        };
        Some(command)
    }
}

/// How a logged-in chat ended
enum ChatExit {
    Logout,
    Quit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    chat: ChatUseCase,
    lookup: IdentityLookupUseCase,
    config: ReplConfig,
    initial_email: Option<String>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(chat: ChatUseCase, lookup: IdentityLookupUseCase) -> Self {
        Self {
            chat,
            lookup,
            config: ReplConfig::default(),
            initial_email: None,
        }
    }

    pub fn with_config(mut self, config: ReplConfig) -> Self {
        self.config = config;
        self
    }

    /// Set whether to show progress
    pub fn with_progress(mut self, show: bool) -> Self {
        self.config.show_progress = show;
        self
    }

    /// Try this email before prompting for one
    pub fn with_initial_email(mut self, email: Option<String>) -> Self {
        self.initial_email = email;
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        // Try to load history
        let history_path = self.config.history_path();

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        let mut pending_email = self.initial_email.clone();

        loop {
            println!();
            println!("{}", ConsoleFormatter::banner(&self.config.title));
            println!();

            let Some(mut session) = self.login(&mut rl, pending_email.take()).await? else {
                println!("Bye!");
                break;
            };

            match self.chat(&mut rl, &mut session).await? {
                ChatExit::Logout => {
                    session.logout();
                    println!("{}", ConsoleFormatter::notice("Logged out."));
                }
                ChatExit::Quit => {
                    println!("Bye!");
                    break;
                }
            }
        }

        // Save history
        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    /// Prompt for an email until one is accepted. `None` when the user leaves.
    async fn login(
        &self,
        rl: &mut DefaultEditor,
        mut preset: Option<String>,
    ) -> RlResult<Option<Session>> {
        loop {
            let email = match preset.take() {
                Some(email) => email,
                None => match rl.readline("Email: ") {
                    Ok(line) => line,
                    Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => return Ok(None),
                    Err(err) => return Err(err),
                },
            };

            if email.trim().is_empty() {
                continue;
            }

            if let Some(session) = self.authenticate(&email).await {
                return Ok(Some(session));
            }
            eprintln!("{}", ConsoleFormatter::error(EMAIL_NOT_FOUND));
        }
    }

    /// Resolve an email to a fresh session.
    async fn authenticate(&self, email: &str) -> Option<Session> {
        match self.lookup.lookup(email).await {
            Ok(user) => Some(Session::login(user)),
            Err(e) => {
                if !e.is_not_found() {
                    warn!("Login failed: {}", e);
                }
                None
            }
        }
    }

    async fn chat(&self, rl: &mut DefaultEditor, session: &mut Session) -> RlResult<ChatExit> {
        if let Some(user) = session.user() {
            println!("{}", ConsoleFormatter::greeting(user));
        }
        println!("{}", ConsoleFormatter::notice("Type /help for commands."));
        println!();

        let prompt = format!("{} > ", USER_AVATAR);

        loop {
            let line = match rl.readline(&prompt) {
                Ok(line) => line,
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => return Ok(ChatExit::Quit),
                Err(err) => return Err(err),
            };

            let line = line.trim();

            // Skip empty lines
            if line.is_empty() {
                continue;
            }

            if let Some(command) = ShellCommand::parse(line) {
                match self.handle_command(command, session) {
                    Some(exit) => return Ok(exit),
                    None => continue,
                }
            }

            // Add to history
            let _ = rl.add_history_entry(line);

            if let Some(exit) = self.process_question(session, line).await {
                return Ok(exit);
            }
        }
    }

    /// Handle slash commands. Returns the exit when the chat should end.
    fn handle_command(&self, command: ShellCommand, session: &Session) -> Option<ChatExit> {
        match command {
            ShellCommand::Logout => Some(ChatExit::Logout),
            ShellCommand::Quit => Some(ChatExit::Quit),
            ShellCommand::History => {
                println!();
                println!("{}", ConsoleFormatter::format_history(session.turns()));
                println!();
                None
            }
            ShellCommand::WhoAmI => {
                if let Some(user) = session.user() {
                    println!("{}", ConsoleFormatter::whoami(user));
                }
                None
            }
            ShellCommand::Help => {
                Self::print_help();
                None
            }
            ShellCommand::Unknown(cmd) => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
                None
            }
        }
    }

    fn print_help() {
        println!();
        println!("Commands:");
        println!("  /help, /h, /?     - Show this help");
        println!("  /history          - Show the conversation so far");
        println!("  /whoami           - Show who is logged in");
        println!("  /logout           - Log out and return to the login prompt");
        println!("  /quit, /exit, /q  - Exit chat");
        println!();
    }

    async fn process_question(&self, session: &mut Session, question: &str) -> Option<ChatExit> {
        let result = if self.config.show_progress {
            let progress = SpinnerProgress::new();
            self.ask(session, question, &progress).await
        } else {
            self.ask(session, question, &NoProgress).await
        };

        match result {
            Ok(answer) => {
                println!("{}", ConsoleFormatter::format_turn(&answer));
                println!();
                None
            }
            Err(ChatError::Submit(e)) if e.is_cancelled() => {
                eprintln!("{}", ConsoleFormatter::notice(INTERRUPTED));
                Some(ChatExit::Quit)
            }
            Err(_) => {
                eprintln!("{}", ConsoleFormatter::error(ANSWER_FAILED));
                println!();
                None
            }
        }
    }

    async fn ask(
        &self,
        session: &mut Session,
        question: &str,
        progress: &dyn TurnProgressNotifier,
    ) -> Result<nova_domain::Turn, ChatError> {
        self.chat.ask(session, question, progress).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use nova_application::{
        AssistantBackend, AssistantSessionDriver, BackendError, DirectoryEntry, IdentitySource,
        IdentitySourceError,
    };
    use nova_domain::{Role, Run, RunId, ThreadId, ThreadMessage};
    use std::sync::Arc;
    use tokio_util::sync::CancellationToken;

    // ==================== Test Mocks ====================

    struct OfflineBackend;

    #[async_trait]
    impl AssistantBackend for OfflineBackend {
        async fn create_thread(&self) -> Result<ThreadId, BackendError> {
            Err(BackendError::Connection("offline".to_string()))
        }

        async fn create_message(
            &self,
            _thread: &ThreadId,
            _role: Role,
            _text: &str,
        ) -> Result<(), BackendError> {
            Err(BackendError::Connection("offline".to_string()))
        }

        async fn create_run(
            &self,
            _thread: &ThreadId,
            _assistant_id: &str,
        ) -> Result<Run, BackendError> {
            Err(BackendError::Connection("offline".to_string()))
        }

        async fn get_run(&self, _thread: &ThreadId, _run: &RunId) -> Result<Run, BackendError> {
            Err(BackendError::Connection("offline".to_string()))
        }

        async fn list_messages(
            &self,
            _thread: &ThreadId,
        ) -> Result<Vec<ThreadMessage>, BackendError> {
            Err(BackendError::Connection("offline".to_string()))
        }
    }

    struct StaticDirectory(Result<Vec<DirectoryEntry>, u16>);

    #[async_trait]
    impl IdentitySource for StaticDirectory {
        async fn fetch_directory(&self) -> Result<Vec<DirectoryEntry>, IdentitySourceError> {
            self.0.clone().map_err(IdentitySourceError::Http)
        }
    }

    fn repl(directory: StaticDirectory) -> ChatRepl {
        repl_with_driver(
            directory,
            AssistantSessionDriver::new(Arc::new(OfflineBackend), "asst_test"),
        )
    }

    fn repl_with_driver(directory: StaticDirectory, driver: AssistantSessionDriver) -> ChatRepl {
        ChatRepl::new(
            ChatUseCase::new(driver),
            IdentityLookupUseCase::new(Arc::new(directory)),
        )
    }

    // ==================== Tests ====================

    #[test]
    fn test_parse_commands() {
        assert_eq!(ShellCommand::parse("/logout"), Some(ShellCommand::Logout));
        assert_eq!(ShellCommand::parse(" /history "), Some(ShellCommand::History));
        assert_eq!(ShellCommand::parse("/whoami"), Some(ShellCommand::WhoAmI));
        assert_eq!(ShellCommand::parse("/?"), Some(ShellCommand::Help));
        assert_eq!(ShellCommand::parse("/q"), Some(ShellCommand::Quit));
        assert_eq!(
            ShellCommand::parse("/grades"),
            Some(ShellCommand::Unknown("/grades".to_string()))
        );
    }

    #[test]
    fn test_questions_are_not_commands() {
        assert_eq!(ShellCommand::parse("When is the exam?"), None);
        assert_eq!(ShellCommand::parse("is 1/2 enough?"), None);
    }

    #[tokio::test]
    async fn test_authenticate_known_email_opens_session() {
        let repl = repl(StaticDirectory(Ok(vec![DirectoryEntry::new(
            "Mario.Rossi@nova.edu",
            "Mario Rossi",
        )])));

        let session = repl.authenticate("  mario.rossi@NOVA.edu ").await.unwrap();
        assert!(session.is_authenticated());
        assert_eq!(session.user().unwrap().name(), "Mario Rossi");
        assert!(session.turns().is_empty());
        assert!(session.thread_id().is_none());
    }

    #[tokio::test]
    async fn test_authenticate_unknown_or_unreachable_is_rejected() {
        let repl_unknown = repl(StaticDirectory(Ok(vec![])));
        assert!(repl_unknown.authenticate("ghost@nova.edu").await.is_none());

        let repl_down = repl(StaticDirectory(Err(503)));
        assert!(repl_down.authenticate("mario@nova.edu").await.is_none());
    }

    #[tokio::test]
    async fn test_failed_answer_keeps_session_and_question() {
        let repl = repl(StaticDirectory(Ok(vec![DirectoryEntry::new(
            "mario@nova.edu",
            "Mario",
        )])))
        .with_progress(false);
        let mut session = repl.authenticate("mario@nova.edu").await.unwrap();

        let exit = repl.process_question(&mut session, "Hello?").await;

        assert!(exit.is_none());
        assert!(session.is_authenticated());
        assert_eq!(session.turns().len(), 1);
        assert_eq!(session.turns()[0].text(), "Hello?");
    }

    #[tokio::test]
    async fn test_interrupt_before_question_ends_chat() {
        let token = CancellationToken::new();
        let driver = AssistantSessionDriver::new(Arc::new(OfflineBackend), "asst_test")
            .with_cancellation(token.clone());
        let repl = repl_with_driver(
            StaticDirectory(Ok(vec![DirectoryEntry::new("mario@nova.edu", "Mario")])),
            driver,
        )
        .with_progress(false);
        let mut session = repl.authenticate("mario@nova.edu").await.unwrap();

        token.cancel();
        let exit = repl.process_question(&mut session, "Hello?").await;

        assert!(matches!(exit, Some(ChatExit::Quit)));
    }
}
