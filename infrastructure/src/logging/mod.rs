//! Logging infrastructure: the durable conversation transcript.
//!
//! Provides [`CsvConversationLog`], a CSV writer that implements the
//! [`ConversationLog`](nova_application::ConversationLog) port.

mod csv_log;

pub use csv_log::CsvConversationLog;
