//! Terminal command/chat session.
//!
//! One session owns the transcript, the busy flag, and the (lazily
//! created) remote conversation channel. Each submitted line is classified
//! first: recognized local commands resolve entirely inside the session;
//! everything else is forwarded to the channel and the streamed reply is
//! appended fragment by fragment to a placeholder message.

use anyhow::{Context, Result, bail};
use futures_util::StreamExt;
use tracing::warn;

use crate::commands::{LocalCommand, help_text, status_text};
use crate::contact::SignalForm;
use crate::prompts::{BOOT_BANNER, CLEAR_BANNER, CONNECTION_ERROR_TEXT, SIGNAL_PROMPT};
use crate::providers::{ConversationChannel, StreamEvent};
use crate::transcript::Transcript;

/// Factory used for lazy channel construction on first use.
pub type ChannelFactory = Box<dyn Fn() -> Result<Box<dyn ConversationChannel>> + Send>;

/// How a submitted line was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// Empty input; nothing happened.
    Ignored,
    /// A local command resolved without touching the channel.
    Command(LocalCommand),
    /// A remote reply streamed and finalized successfully.
    Reply,
    /// The channel failed; a generic error message was appended.
    Failed,
}

/// A caller-owned terminal session.
pub struct TerminalSession {
    transcript: Transcript,
    channel: Option<Box<dyn ConversationChannel>>,
    connect: ChannelFactory,
    busy: bool,
}

impl TerminalSession {
    /// Creates a session whose channel is constructed lazily on the first
    /// non-command submission.
    pub fn new(connect: ChannelFactory) -> Self {
        let mut transcript = Transcript::new();
        transcript.push_system(BOOT_BANNER);
        Self {
            transcript,
            channel: None,
            connect,
            busy: false,
        }
    }

    /// Creates a session around an already-constructed channel (tests).
    pub fn with_channel(channel: Box<dyn ConversationChannel>) -> Self {
        let mut session = Self::new(Box::new(|| {
            bail!("channel factory should not be invoked")
        }));
        session.channel = Some(channel);
        session
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while a reply is pending; callers disable submission.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Submits one line of input.
    pub async fn submit(&mut self, input: &str) -> Result<Submission> {
        self.submit_with(input, |_| {}).await
    }

    /// Submits one line of input, republishing the transcript to `publish`
    /// after every mutation (including after every streamed fragment).
    pub async fn submit_with<F>(&mut self, input: &str, mut publish: F) -> Result<Submission>
    where
        F: FnMut(&Transcript),
    {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Submission::Ignored);
        }
        if self.busy {
            bail!("a reply is already pending");
        }

        // Local commands short-circuit: exactly one of {mutate + return}
        // or {fall through} happens per submission.
        if let Some(command) = LocalCommand::parse(trimmed) {
            self.apply_command(command);
            publish(&self.transcript);
            return Ok(Submission::Command(command));
        }

        let user_text = trimmed.to_string();
        self.transcript.push_user(&user_text);
        publish(&self.transcript);

        self.busy = true;
        let result = self.stream_reply(&user_text, &mut publish).await;
        // Released unconditionally so the user can always submit again.
        self.busy = false;

        match result {
            Ok(full_text) => {
                self.transcript.finalize_reply();
                if let Some(channel) = self.channel.as_mut() {
                    channel.record_turn(&user_text, &full_text);
                }
                publish(&self.transcript);
                Ok(Submission::Reply)
            }
            Err(err) => {
                warn!(error = %format!("{err:#}"), "conversation channel failure");
                // Partial text already shown stays in place; the cause is
                // collapsed into one generic message.
                self.transcript.finalize_reply();
                self.transcript.push_system(CONNECTION_ERROR_TEXT);
                publish(&self.transcript);
                Ok(Submission::Failed)
            }
        }
    }

    /// Acknowledges a completed `/signal` contact form locally.
    pub fn acknowledge_signal(&mut self, form: &SignalForm) -> Result<()> {
        form.validate().context("invalid contact form")?;
        self.transcript.push_system(form.confirmation_text());
        Ok(())
    }

    fn apply_command(&mut self, command: LocalCommand) {
        match command {
            LocalCommand::Help => {
                self.transcript.push_system(help_text());
            }
            LocalCommand::Status => {
                self.transcript.push_system(status_text());
            }
            LocalCommand::Clear => {
                self.transcript.clear_with(CLEAR_BANNER);
            }
            LocalCommand::Signal => {
                self.transcript.push_system_custom_ui(SIGNAL_PROMPT);
            }
        }
    }

    async fn stream_reply<F>(&mut self, text: &str, publish: &mut F) -> Result<String>
    where
        F: FnMut(&Transcript),
    {
        // Placeholder goes up before the channel is touched so the user
        // sees the typing indicator immediately.
        let reply_id = self.transcript.begin_reply();
        publish(&self.transcript);

        let mut channel = match self.channel.take() {
            Some(channel) => channel,
            None => (self.connect)().context("initialize conversation channel")?,
        };

        let outcome = pump_stream(
            &mut self.transcript,
            channel.as_mut(),
            &reply_id,
            text,
            publish,
        )
        .await;

        // The handle survives failed turns; only its context stays clean.
        self.channel = Some(channel);
        outcome
    }
}

/// Drives one streamed reply, appending fragments in arrival order.
async fn pump_stream<F>(
    transcript: &mut Transcript,
    channel: &mut dyn ConversationChannel,
    reply_id: &str,
    text: &str,
    publish: &mut F,
) -> Result<String>
where
    F: FnMut(&Transcript),
{
    let mut stream = channel.send_stream(text).await?;
    let mut full_text = String::new();

    while let Some(event) = stream.next().await {
        match event? {
            StreamEvent::TextDelta { text } => {
                if text.is_empty() {
                    continue;
                }
                full_text.push_str(&text);
                transcript.append_fragment(reply_id, &text);
                publish(transcript);
            }
            StreamEvent::MessageCompleted => break,
            StreamEvent::Error {
                error_type,
                message,
            } => {
                return Err(
                    crate::providers::ProviderError::api_error(&error_type, &message).into(),
                );
            }
        }
    }

    Ok(full_text)
}
